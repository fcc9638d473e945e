/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use alloc::vec::Vec;
#[cfg(feature = "mem_dbg")]
use mem_dbg::{MemDbg, MemSize};

use crate::traits::*;

/// An implementation of [`BitRead`] on a growable in-memory byte buffer.
///
/// Bytes are appended with [`feed`](BitCursor::feed) and consumed from the
/// front, most significant bit first, by the methods of [`BitRead`]. The
/// cursor keeps track of how many bits of the first unread byte have already
/// been consumed; fully consumed bytes are dropped.
///
/// Reads are atomic: a read that fails leaves the cursor untouched.
///
/// # Examples
/// ```
/// use bit_cursor::prelude::*;
///
/// let mut cursor = BitCursor::new(BE);
/// cursor.feed(&[0b1011_0010, 0xFF]);
/// assert_eq!(cursor.read_uint8(3)?, 0b101);
/// assert!(cursor.read_bit()?);
/// assert_eq!(cursor.read_bits(6)?, vec![0b0010_1100]);
/// assert_eq!(cursor.bits_remaining(), 6);
/// assert!(cursor.read_uint8(7).is_err());
/// # Ok::<(), BitCursorError>(())
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "mem_dbg", derive(MemDbg, MemSize))]
pub struct BitCursor {
    /// The buffer; bytes before `head` have been consumed.
    data: Vec<u8>,
    /// The index in `data` of the first byte that is not fully consumed.
    head: usize,
    /// The number of bits already consumed from `data[head]`. It is always
    /// smaller than 8, and it is zero when `head == data.len()`.
    bit_offset: u8,
    order: ByteOrder,
}

impl BitCursor {
    /// Create an empty [`BitCursor`] assembling integers in the given
    /// byte order.
    #[must_use]
    pub fn new(order: impl Into<ByteOrder>) -> Self {
        Self::with_data(order, Vec::new())
    }

    /// Create a [`BitCursor`] that will read `data`.
    #[must_use]
    pub fn with_data(order: impl Into<ByteOrder>, data: Vec<u8>) -> Self {
        Self {
            data,
            head: 0,
            bit_offset: 0,
            order: order.into(),
        }
    }

    /// Append `data` to the buffer.
    pub fn feed(&mut self, data: &[u8]) {
        self.compact();
        self.data.extend_from_slice(data);
    }

    /// Discard all the content of the buffer, including a partially read
    /// byte.
    pub fn clear(&mut self) {
        tracing::trace!(
            discarded_bits = self.bits_remaining(),
            "clearing bit cursor"
        );
        self.data.clear();
        self.head = 0;
        self.bit_offset = 0;
    }

    /// Skip the unread bits of a partially read byte, if any.
    pub fn byte_align(&mut self) {
        if self.bit_offset != 0 {
            self.bit_offset = 0;
            self.head += 1;
        }
    }

    /// Return whether the next bit to read is the first bit of a byte.
    #[must_use]
    pub fn is_byte_aligned(&self) -> bool {
        self.bit_offset == 0
    }

    /// The number of bits already consumed from the first unread byte.
    #[must_use]
    pub fn bit_offset(&self) -> u8 {
        self.bit_offset
    }

    /// The number of bytes that are not fully consumed, including a
    /// partially read byte.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len() - self.head
    }

    /// Return whether there are no bits left to read.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The bytes that are not fully consumed. If
    /// [`bit_offset`](BitCursor::bit_offset) is not zero, the first
    /// byte has been partially read.
    #[must_use]
    pub fn unread_bytes(&self) -> &[u8] {
        &self.data[self.head..]
    }

    /// Drop consumed bytes from the buffer once they make up at least half
    /// of it.
    fn compact(&mut self) {
        if self.head == 0 || self.head < self.data.len() / 2 {
            return;
        }
        tracing::trace!(
            dropped = self.head,
            kept = self.len(),
            "compacting bit cursor"
        );
        self.data.drain(..self.head);
        self.head = 0;
    }
}

impl BitRead for BitCursor {
    #[inline(always)]
    fn byte_order(&self) -> ByteOrder {
        self.order
    }

    #[inline(always)]
    fn bits_remaining(&self) -> u64 {
        self.len() as u64 * 8 - self.bit_offset as u64
    }

    fn read_bits(&mut self, n_bits: u64) -> Result<Vec<u8>, BitCursorError> {
        let available = self.bits_remaining();
        if n_bits > available {
            return Err(BitCursorError::EndOfData {
                requested: n_bits,
                available,
            });
        }

        let offset = self.bit_offset as u32;
        let mut result = Vec::with_capacity(n_bits.div_ceil(8) as usize);
        let mut n_bits = n_bits;

        while n_bits > 0 {
            // the high bits come from the current byte, the low bits from
            // the top of the next one
            let mut byte = self.data[self.head] << offset;
            if offset != 0 {
                if let Some(&next) = self.data.get(self.head + 1) {
                    byte |= next >> (8 - offset);
                }
            }

            if n_bits < 8 {
                let n = n_bits as u32;
                byte &= !(u8::MAX >> n);
                result.push(byte);
                if offset + n > 7 {
                    self.head += 1;
                }
                self.bit_offset = ((offset + n) % 8) as u8;
                break;
            }

            result.push(byte);
            self.head += 1;
            n_bits -= 8;
        }

        Ok(result)
    }

    fn skip_bits(&mut self, n_bits: u64) -> Result<(), BitCursorError> {
        let available = self.bits_remaining();
        if n_bits > available {
            return Err(BitCursorError::EndOfData {
                requested: n_bits,
                available,
            });
        }
        let position = self.bit_offset as u64 + n_bits;
        self.head += (position / 8) as usize;
        self.bit_offset = (position % 8) as u8;
        Ok(())
    }
}

/// Two cursors are equal if they will return the same bits in the same
/// byte order, regardless of the bytes they have already dropped.
impl PartialEq for BitCursor {
    fn eq(&self, other: &Self) -> bool {
        self.order == other.order
            && self.bit_offset == other.bit_offset
            && self.unread_bytes() == other.unread_bytes()
    }
}

impl Eq for BitCursor {}

impl Extend<u8> for BitCursor {
    fn extend<I: IntoIterator<Item = u8>>(&mut self, iter: I) {
        self.compact();
        self.data.extend(iter);
    }
}

impl<'a> Extend<&'a u8> for BitCursor {
    fn extend<I: IntoIterator<Item = &'a u8>>(&mut self, iter: I) {
        self.compact();
        self.data.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    const DATA1: [u8; 3] = [0x0F, 0xAC, 0x2B];
    const DATA2: [u8; 2] = [0x92, 0xDB];
    const DATA_STR: [u8; 3] = *b"akG";

    fn little() -> BitCursor {
        let mut cursor = BitCursor::new(LE);
        cursor.feed(&DATA1);
        cursor.feed(&DATA2);
        cursor.feed(&DATA_STR);
        cursor
    }

    fn big() -> BitCursor {
        let mut cursor = BitCursor::new(BE);
        cursor.feed(&DATA2);
        cursor.feed(&DATA1);
        cursor.feed(&DATA_STR);
        cursor
    }

    #[test]
    fn test_feed() {
        let mut expected = vec![];
        expected.extend_from_slice(&DATA1);
        expected.extend_from_slice(&DATA2);
        expected.extend_from_slice(&DATA_STR);
        assert_eq!(little().unread_bytes(), expected.as_slice());
        assert_eq!(little().bits_remaining(), 64);
        assert_eq!(big().len(), 8);
    }

    #[test]
    fn test_clear() {
        let mut cursor = little();
        cursor.read_bits(3).unwrap();
        cursor.clear();
        assert!(cursor.is_empty());
        assert_eq!(cursor.bit_offset(), 0);
        assert_eq!(cursor.bits_remaining(), 0);
        assert_eq!(cursor.read_bits(0), Ok(Vec::new()));
        assert!(matches!(
            cursor.read_bits(1),
            Err(BitCursorError::EndOfData {
                requested: 1,
                available: 0
            })
        ));
    }

    #[test]
    fn test_read() {
        let mut cursor = little();
        let data = cursor.read_bits(26).unwrap();
        assert_eq!(data, vec![DATA1[0], DATA1[1], DATA1[2], DATA2[0] >> 6 << 6]);
        assert_eq!(cursor.bit_offset(), 2);

        let mut cursor = big();
        let data = cursor.read_bits(15).unwrap();
        assert_eq!(data, vec![DATA2[0], DATA2[1] >> 1 << 1]);
        assert_eq!(cursor.bit_offset(), 7);
    }

    #[test]
    fn test_read_unaligned() {
        let mut cursor =
            BitCursor::with_data(BE, vec![0b1100_1010, 0b0101_1111, 0b1000_0001]);
        cursor.read_bits(3).unwrap();
        // 0_1010 0101_1 111 1000_0001
        assert_eq!(cursor.read_bits(10).unwrap(), vec![0b0101_0010, 0b1100_0000]);
        assert_eq!(cursor.bit_offset(), 5);
        assert_eq!(cursor.len(), 2);
        assert_eq!(cursor.read_bits(11).unwrap(), vec![0b1111_0000, 0b0010_0000]);
        assert!(cursor.is_empty());
        assert_eq!(cursor.bit_offset(), 0);
    }

    #[test]
    fn test_read_to_byte_boundary() {
        let mut cursor = BitCursor::with_data(LE, vec![0xAB, 0xCD]);
        assert_eq!(cursor.read_bits(5).unwrap(), vec![0xA8]);
        assert_eq!(cursor.read_bits(3).unwrap(), vec![0x60]);
        assert!(cursor.is_byte_aligned());
        assert_eq!(cursor.unread_bytes(), &[0xCD]);
    }

    #[test]
    fn test_read_zero() {
        let mut cursor = big();
        cursor.read_bits(5).unwrap();
        let before = cursor.clone();
        assert!(cursor.read_bits(0).unwrap().is_empty());
        assert_eq!(cursor, before);
    }

    #[test]
    fn test_end_of_data_is_atomic() {
        let mut cursor = big();
        cursor.read_bits(61).unwrap();
        let before = cursor.clone();
        assert_eq!(
            cursor.read_bits(4),
            Err(BitCursorError::EndOfData {
                requested: 4,
                available: 3
            })
        );
        assert_eq!(cursor, before);
        assert_eq!(
            cursor.skip_bits(4),
            Err(BitCursorError::EndOfData {
                requested: 4,
                available: 3
            })
        );
        assert_eq!(cursor, before);
        assert_eq!(cursor.read_bits(3).unwrap(), vec![b'G' << 5]);
    }

    #[test]
    fn test_read_uint64() {
        assert_eq!(little().read_uint64(32).unwrap(), 0x922bac0f);
        assert_eq!(big().read_uint64(32).unwrap(), 0x92db0fac);
        assert_eq!(big().read_uint64(0).unwrap(), 0);
        assert_eq!(big().read_uint64(4).unwrap(), 0x9);
        assert_eq!(big().read_uint64(12).unwrap(), 0x92d);
        assert_eq!(
            little().read_uint64(64).unwrap(),
            u64::from_le_bytes(*b"\x0F\xAC\x2B\x92\xDBakG")
        );
    }

    #[test]
    fn test_width_exceeded() {
        let mut cursor = big();
        let before = cursor.clone();
        assert_eq!(
            cursor.read_uint8(9),
            Err(BitCursorError::WidthExceeded {
                width: 9,
                capacity: 8
            })
        );
        assert!(cursor.read_byte(9).is_err());
        assert!(cursor.read_uint16(17).is_err());
        assert!(cursor.read_uint32(33).is_err());
        assert_eq!(
            cursor.read_uint64(65),
            Err(BitCursorError::WidthExceeded {
                width: 65,
                capacity: 64
            })
        );
        assert!(cursor.read_uint(usize::BITS as u8 + 1).is_err());
        assert_eq!(cursor, before);
    }

    #[test]
    fn test_width_checked_before_end_of_data() {
        let mut cursor = BitCursor::new(BE);
        assert!(matches!(
            cursor.read_uint8(20),
            Err(BitCursorError::WidthExceeded { .. })
        ));
        assert!(matches!(
            cursor.read_uint8(8),
            Err(BitCursorError::EndOfData { .. })
        ));
    }

    #[test]
    fn test_narrow_readers() {
        let mut cursor = big();
        assert_eq!(cursor.read_uint8(8).unwrap(), 0x92);
        assert_eq!(cursor.read_uint16(16).unwrap(), 0xdb0f);
        assert!(cursor.read_bit().unwrap());
        assert!(!cursor.read_bit().unwrap());
        assert_eq!(cursor.read_byte(6).unwrap(), 0b10_1100);
        assert_eq!(cursor.read_uint(8).unwrap(), 0x2b);
        assert_eq!(cursor.read_uint32(24).unwrap(), 0x616b47);
        assert!(cursor.is_empty());
    }

    #[test]
    fn test_read_string() {
        let mut cursor = little();
        cursor.read_bits(5 * 8).unwrap();
        assert_eq!(cursor.read_string(16).unwrap(), "ak");

        let mut cursor = big();
        cursor.read_bits(6 * 8).unwrap();
        assert_eq!(cursor.read_string(16).unwrap(), "kG");

        let mut cursor = BitCursor::with_data(BE, vec![0xFF, b'a']);
        assert_eq!(cursor.read_string(16).unwrap(), "\u{FFFD}a");
        let mut cursor = BitCursor::with_data(BE, vec![0xFF, b'a']);
        assert_eq!(cursor.read_str_bytes(16).unwrap(), vec![0xFF, b'a']);
    }

    #[test]
    fn test_skip_and_align() {
        let mut cursor = big();
        cursor.skip_bits(13).unwrap();
        assert_eq!(cursor.bit_offset(), 5);
        assert_eq!(cursor.len(), 7);
        cursor.byte_align();
        assert!(cursor.is_byte_aligned());
        assert_eq!(cursor.read_uint8(8).unwrap(), DATA1[0]);
        cursor.byte_align();
        assert_eq!(cursor.len(), 5);
    }

    #[test]
    fn test_compaction() {
        let mut cursor = BitCursor::new(BE);
        cursor.feed(&[1, 2, 3, 4]);
        cursor.read_bits(19).unwrap();
        cursor.feed(&[5]);
        assert_eq!(cursor.unread_bytes(), &[3, 4, 5]);
        assert_eq!(cursor.bit_offset(), 3);
        assert_eq!(cursor.read_bits(21).unwrap(), vec![0x18, 0x20, 0x28]);
        cursor.extend([6_u8, 7]);
        cursor.extend(&[8_u8]);
        assert_eq!(cursor.unread_bytes(), &[6, 7, 8]);
        assert_eq!(cursor, BitCursor::with_data(BE, vec![6, 7, 8]));
        assert_ne!(cursor, BitCursor::with_data(LE, vec![6, 7, 8]));
    }
}
