/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use alloc::collections::VecDeque;
use alloc::string::String;
use alloc::vec::Vec;
use arbitrary::Arbitrary;

use crate::prelude::*;

#[derive(Arbitrary, Debug)]
pub struct FuzzCase {
    big_endian: bool,
    init: Vec<u8>,
    commands: Vec<RandomCommand>,
}

#[derive(Arbitrary, Debug)]
pub enum RandomCommand {
    Feed(Vec<u8>),
    Clear,
    ReadBits(u16),
    SkipBits(u16),
    ReadUint64(u8),
    ReadUint32(u8),
    ReadUint16(u8),
    ReadUint8(u8),
    ReadBit,
    ReadString(u8),
    ByteAlign,
}

/// Bits still to be read, most significant bit of each byte first.
struct Model(VecDeque<bool>);

impl Model {
    fn feed(&mut self, data: &[u8]) {
        for &byte in data {
            self.0.extend((0..8_u32).rev().map(|i| (byte >> i) & 1 == 1));
        }
    }

    /// Removes `n_bits` bits and packs them left-justified into bytes.
    fn take(&mut self, n_bits: u64) -> Option<Vec<u8>> {
        if n_bits > self.0.len() as u64 {
            return None;
        }
        let mut bytes = Vec::new();
        for i in 0..n_bits {
            if i % 8 == 0 {
                bytes.push(0);
            }
            if self.0.pop_front() == Some(true) {
                *bytes.last_mut().unwrap() |= 0x80 >> (i % 8);
            }
        }
        Some(bytes)
    }
}

pub fn harness(data: FuzzCase) {
    let order = if data.big_endian {
        ByteOrder::BigEndian
    } else {
        ByteOrder::LittleEndian
    };
    let mut cursor = BitCursor::with_data(order, data.init.clone());
    let mut model = Model(VecDeque::new());
    model.feed(&data.init);

    for command in data.commands {
        let before = cursor.clone();
        match command {
            RandomCommand::Feed(bytes) => {
                cursor.feed(&bytes);
                model.feed(&bytes);
            }
            RandomCommand::Clear => {
                cursor.clear();
                model.0.clear();
            }
            RandomCommand::ReadBits(n_bits) => {
                let n_bits = n_bits as u64;
                assert_eq!(cursor.read_bits(n_bits).ok(), model.take(n_bits));
            }
            RandomCommand::SkipBits(n_bits) => {
                let n_bits = n_bits as u64;
                assert_eq!(
                    cursor.skip_bits(n_bits).is_ok(),
                    model.take(n_bits).is_some()
                );
            }
            RandomCommand::ReadUint64(width) => {
                let width = width % 72;
                let result = cursor.read_uint64(width);
                if width > 64 {
                    assert!(matches!(
                        result,
                        Err(BitCursorError::WidthExceeded { .. })
                    ));
                } else {
                    let expected = model.take(width as u64);
                    assert_eq!(result.is_ok(), expected.is_some());
                    if let (Ok(value), Some(bytes)) = (result, expected) {
                        assert_eq!(value, order.reconstruct(&bytes, width));
                        if order == ByteOrder::BigEndian {
                            // the value of the bits read most significant first
                            let msb_first = bytes
                                .iter()
                                .fold(0_u128, |acc, &byte| (acc << 8) | byte as u128);
                            let padding = bytes.len() as u32 * 8 - width as u32;
                            assert_eq!(value as u128, msb_first >> padding);
                        }
                    }
                }
            }
            RandomCommand::ReadUint32(width) => {
                let width = width % 40;
                check_narrow(cursor.read_uint32(width), &mut model, order, width, 32);
            }
            RandomCommand::ReadUint16(width) => {
                let width = width % 24;
                check_narrow(cursor.read_uint16(width), &mut model, order, width, 16);
            }
            RandomCommand::ReadUint8(width) => {
                let width = width % 16;
                check_narrow(cursor.read_uint8(width), &mut model, order, width, 8);
            }
            RandomCommand::ReadBit => {
                let expected = model.take(1).map(|bytes| bytes[0] != 0);
                assert_eq!(cursor.read_bit().ok(), expected);
            }
            RandomCommand::ReadString(n_bytes) => {
                let n_bits = n_bytes as u64 * 8;
                let expected = model
                    .take(n_bits)
                    .map(|bytes| String::from_utf8_lossy(&bytes).into_owned());
                assert_eq!(cursor.read_string(n_bits).ok(), expected);
            }
            RandomCommand::ByteAlign => {
                cursor.byte_align();
                let partial = model.0.len() % 8;
                model.0.drain(..partial);
            }
        }

        if cursor.bits_remaining() == before.bits_remaining() {
            assert_eq!(cursor, before);
        }
        assert_eq!(cursor.bits_remaining(), model.0.len() as u64);
        assert!(cursor.bit_offset() < 8);
        assert_eq!(cursor.bit_offset() as usize, (8 - model.0.len() % 8) % 8);
        assert_eq!(cursor.is_empty(), model.0.is_empty());
    }
}

fn check_narrow<T: Into<u64> + core::fmt::Debug>(
    result: Result<T, BitCursorError>,
    model: &mut Model,
    order: ByteOrder,
    width: u8,
    capacity: u32,
) {
    if width as u32 > capacity {
        assert_eq!(
            result.err(),
            Some(BitCursorError::WidthExceeded { width, capacity })
        );
        return;
    }
    let expected = model
        .take(width as u64)
        .map(|bytes| order.reconstruct(&bytes, width));
    assert_eq!(result.ok().map(Into::<u64>::into), expected);
}
