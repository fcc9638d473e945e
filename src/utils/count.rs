/*
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use alloc::vec::Vec;

use crate::traits::*;

/// Wrapping struct that keeps track of the bits consumed from a [`BitRead`].
///
/// Failed reads are not counted, as they consume nothing.
#[derive(Debug, Clone)]
pub struct CountBitRead<BR: BitRead> {
    bit_read: BR,
    /// The number of bits read (or skipped) so far from the underlying [`BitRead`].
    pub bits_read: u64,
}

impl<BR: BitRead> CountBitRead<BR> {
    pub fn new(bit_read: BR) -> Self {
        Self {
            bit_read,
            bits_read: 0,
        }
    }

    pub fn into_inner(self) -> BR {
        self.bit_read
    }
}

impl<BR: BitRead> BitRead for CountBitRead<BR> {
    fn byte_order(&self) -> ByteOrder {
        self.bit_read.byte_order()
    }

    fn bits_remaining(&self) -> u64 {
        self.bit_read.bits_remaining()
    }

    fn read_bits(&mut self, n_bits: u64) -> Result<Vec<u8>, BitCursorError> {
        self.bit_read.read_bits(n_bits).inspect(|_| {
            self.bits_read += n_bits;
        })
    }

    fn skip_bits(&mut self, n_bits: u64) -> Result<(), BitCursorError> {
        self.bit_read.skip_bits(n_bits)?;
        self.bits_read += n_bits;
        Ok(())
    }
}

#[cfg(test)]
#[test]
fn test_count() -> Result<(), BitCursorError> {
    use crate::impls::BitCursor;

    let mut cursor = BitCursor::new(LE);
    cursor.feed(&[0xFF; 16]);
    let mut count = CountBitRead::new(cursor);

    count.read_bits(5)?;
    assert_eq!(count.bits_read, 5);
    count.read_uint64(64)?;
    assert_eq!(count.bits_read, 69);
    count.read_bit()?;
    assert_eq!(count.bits_read, 70);
    count.skip_bits(30)?;
    assert_eq!(count.bits_read, 100);
    assert!(count.read_uint8(9).is_err());
    assert!(count.read_bits(29).is_err());
    assert_eq!(count.bits_read, 100);
    assert_eq!(count.bits_read + count.bits_remaining(), 128);
    count.read_string(28)?;
    assert_eq!(count.bits_remaining(), 0);
    assert!(count.into_inner().is_empty());

    Ok(())
}
