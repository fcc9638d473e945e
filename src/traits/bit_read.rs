/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use alloc::string::String;
use alloc::vec::Vec;
use num_traits::{AsPrimitive, PrimInt, Unsigned};

use crate::traits::{BitCursorError, ByteOrder};

/// Sequential, destructive bit-by-bit reads.
///
/// Implementors provide the [`read_bits`](BitRead::read_bits) primitive,
/// together with the number of bits still available and the byte order used
/// to assemble integers. All typed readers are provided on top of the
/// primitive, and check the requested width against the capacity of the
/// target type before consuming anything.
///
/// Bits are always consumed starting from the most significant bit of each
/// byte.
pub trait BitRead {
    /// The byte order used by [`read_uint64`](BitRead::read_uint64) and the
    /// narrower integer readers.
    fn byte_order(&self) -> ByteOrder;

    /// The number of bits that can still be read.
    fn bits_remaining(&self) -> u64;

    /// Reads `n_bits` bits and returns them left-justified in
    /// `n_bits.div_ceil(8)` bytes. The bits of the last byte beyond the
    /// requested ones are zero.
    ///
    /// Reading zero bits always succeeds and returns an empty vector.
    ///
    /// # Errors
    ///
    /// [`BitCursorError::EndOfData`] if fewer than `n_bits` bits are left; in
    /// this case nothing is consumed.
    fn read_bits(&mut self, n_bits: u64) -> Result<Vec<u8>, BitCursorError>;

    /// Skips `n_bits` bits. Fails exactly when
    /// [`read_bits`](BitRead::read_bits) would.
    #[inline]
    fn skip_bits(&mut self, n_bits: u64) -> Result<(), BitCursorError> {
        self.read_bits(n_bits).map(|_| ())
    }

    /// Reads a `width`-bit unsigned integer, `width` being at most 64.
    ///
    /// The bits read are padded to eight bytes and reinterpreted in the
    /// [byte order](BitRead::byte_order) of the reader; see
    /// [`ByteOrder::reconstruct`] for the details.
    ///
    /// # Errors
    ///
    /// [`BitCursorError::WidthExceeded`] if `width` is larger than 64, and
    /// [`BitCursorError::EndOfData`] if fewer than `width` bits are left.
    fn read_uint64(&mut self, width: u8) -> Result<u64, BitCursorError> {
        check_width(width, u64::BITS)?;
        let bytes = self.read_bits(width as u64)?;
        Ok(self.byte_order().reconstruct(&bytes, width))
    }

    /// Reads a `width`-bit unsigned integer into any primitive unsigned type.
    ///
    /// # Errors
    ///
    /// [`BitCursorError::WidthExceeded`] if `width` is larger than the number
    /// of bits of `T`, and [`BitCursorError::EndOfData`] if fewer than
    /// `width` bits are left.
    #[inline]
    fn read_uint_as<T>(&mut self, width: u8) -> Result<T, BitCursorError>
    where
        Self: Sized,
        T: PrimInt + Unsigned + 'static,
        u64: AsPrimitive<T>,
    {
        check_width(width, T::zero().count_zeros())?;
        Ok(self.read_uint64(width)?.as_())
    }

    /// Reads a `width`-bit unsigned integer, `width` being at most the
    /// number of bits of a `usize`.
    #[inline]
    fn read_uint(&mut self, width: u8) -> Result<usize, BitCursorError>
    where
        Self: Sized,
    {
        self.read_uint_as(width)
    }

    /// Reads a `width`-bit unsigned integer, `width` being at most 8.
    #[inline]
    fn read_uint8(&mut self, width: u8) -> Result<u8, BitCursorError>
    where
        Self: Sized,
    {
        self.read_uint_as(width)
    }

    /// Same as [`read_uint8`](BitRead::read_uint8).
    #[inline]
    fn read_byte(&mut self, width: u8) -> Result<u8, BitCursorError>
    where
        Self: Sized,
    {
        self.read_uint8(width)
    }

    /// Reads a `width`-bit unsigned integer, `width` being at most 16.
    #[inline]
    fn read_uint16(&mut self, width: u8) -> Result<u16, BitCursorError>
    where
        Self: Sized,
    {
        self.read_uint_as(width)
    }

    /// Reads a `width`-bit unsigned integer, `width` being at most 32.
    #[inline]
    fn read_uint32(&mut self, width: u8) -> Result<u32, BitCursorError>
    where
        Self: Sized,
    {
        self.read_uint_as(width)
    }

    /// Reads a single bit.
    #[inline]
    fn read_bit(&mut self) -> Result<bool, BitCursorError>
    where
        Self: Sized,
    {
        Ok(self.read_uint8(1)? != 0)
    }

    /// Reads `n_bits` bits as text.
    ///
    /// The bytes are not validated: sequences that are not valid UTF-8 are
    /// replaced by [`U+FFFD`](char::REPLACEMENT_CHARACTER). Use
    /// [`read_str_bytes`](BitRead::read_str_bytes) to get the raw bytes.
    fn read_string(&mut self, n_bits: u64) -> Result<String, BitCursorError> {
        let bytes = self.read_bits(n_bits)?;
        Ok(match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
        })
    }

    /// Reads `n_bits` bits as text in an arbitrary encoding.
    #[inline]
    fn read_str_bytes(&mut self, n_bits: u64) -> Result<Vec<u8>, BitCursorError> {
        self.read_bits(n_bits)
    }
}

#[inline(always)]
fn check_width(width: u8, capacity: u32) -> Result<(), BitCursorError> {
    if width as u32 > capacity {
        return Err(BitCursorError::WidthExceeded { width, capacity });
    }
    Ok(())
}

impl<R: BitRead + ?Sized> BitRead for &mut R {
    #[inline(always)]
    fn byte_order(&self) -> ByteOrder {
        (**self).byte_order()
    }

    #[inline(always)]
    fn bits_remaining(&self) -> u64 {
        (**self).bits_remaining()
    }

    #[inline(always)]
    fn read_bits(&mut self, n_bits: u64) -> Result<Vec<u8>, BitCursorError> {
        (**self).read_bits(n_bits)
    }

    #[inline(always)]
    fn skip_bits(&mut self, n_bits: u64) -> Result<(), BitCursorError> {
        (**self).skip_bits(n_bits)
    }
}
