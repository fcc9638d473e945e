/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

#[cfg(feature = "mem_dbg")]
use mem_dbg::{MemDbg, MemSize};

/// The byte order used to assemble integers from the bits of a cursor.
///
/// The order is fixed when a [`BitCursor`](crate::impls::BitCursor) is
/// created. It does not affect the bit order within a byte: bits are always
/// consumed from the most significant one. It decides how the bytes
/// returned by [`read_bits`](crate::traits::BitRead::read_bits) are padded
/// to eight bytes and reinterpreted by
/// [`read_uint64`](crate::traits::BitRead::read_uint64).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "mem_dbg", derive(MemDbg, MemSize))]
#[cfg_attr(feature = "mem_dbg", mem_size(flat))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ByteOrder {
    BigEndian,
    LittleEndian,
}

impl ByteOrder {
    /// The byte order of the target.
    #[cfg(target_endian = "little")]
    pub const NATIVE: Self = Self::LittleEndian;
    /// The byte order of the target.
    #[cfg(target_endian = "big")]
    pub const NATIVE: Self = Self::BigEndian;

    /// Reconstructs the value of a `width`-bit field from the bytes returned
    /// by [`read_bits`](crate::traits::BitRead::read_bits).
    ///
    /// The bytes are left-padded (big endian) or right-padded (little endian)
    /// with zeros to eight bytes and reinterpreted as a `u64` in this order.
    /// The result is then shifted right by `(8 - width % 8) % 8` to undo the
    /// left justification of the last, partial byte.
    ///
    /// In big-endian order this is exactly the value of the field read
    /// most-significant bit first. In little-endian order the partial byte
    /// ends up as the most significant one, so for widths that are not a
    /// multiple of eight the shift also moves bits across byte boundaries.
    ///
    /// `bytes` must contain at most eight bytes.
    ///
    /// # Examples
    /// ```
    /// use bit_cursor::prelude::*;
    /// assert_eq!(ByteOrder::BigEndian.reconstruct(&[0xAB, 0xC0], 12), 0xABC);
    /// assert_eq!(ByteOrder::LittleEndian.reconstruct(&[0x34, 0x12], 16), 0x1234);
    /// ```
    #[must_use]
    pub fn reconstruct(self, bytes: &[u8], width: u8) -> u64 {
        debug_assert!(bytes.len() <= 8);
        let mut padded = [0_u8; 8];
        let value = match self {
            Self::BigEndian => {
                padded[8 - bytes.len()..].copy_from_slice(bytes);
                u64::from_be_bytes(padded)
            }
            Self::LittleEndian => {
                padded[..bytes.len()].copy_from_slice(bytes);
                u64::from_le_bytes(padded)
            }
        };
        value >> ((8 - width % 8) % 8)
    }
}

impl core::fmt::Display for ByteOrder {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ByteOrder::BigEndian => f.write_str("big endian"),
            ByteOrder::LittleEndian => f.write_str("little endian"),
        }
    }
}

/// Inner private trait used to make implementing [`Endianness`]
/// impossible for other structs.
mod private {
    /// This is a [SealedTrait](https://predr.ag/blog/definitive-guide-to-sealed-traits-in-rust/).
    pub trait Endianness {}
}

/// Marker trait for endianness selector types.
///
/// Its only implementations are [`LittleEndian`] and [`BigEndian`]. Selector
/// types convert into the corresponding [`ByteOrder`], so they can be used
/// wherever a byte order is expected:
/// ```
/// use bit_cursor::prelude::*;
/// let cursor = BitCursor::new(BE);
/// assert_eq!(cursor.byte_order(), ByteOrder::BigEndian);
/// ```
pub trait Endianness: private::Endianness + Into<ByteOrder> + Copy {
    /// The byte order selected by this type.
    const ORDER: ByteOrder;
}

/// Selector type for little-endian cursors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LittleEndian;

/// Selector type for big-endian cursors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BigEndian;

/// Alias for [`BigEndian`]
pub type BE = BigEndian;

/// Alias for [`LittleEndian`]
pub type LE = LittleEndian;

/// Alias for the native endianness of the target.
#[cfg(target_endian = "little")]
pub type NE = LittleEndian;

/// Alias for the native endianness of the target.
#[cfg(target_endian = "big")]
pub type NE = BigEndian;

/// The [`BE`] selector as a value, to be passed where a [`ByteOrder`] is
/// expected.
pub const BE: BE = BigEndian;

/// The [`LE`] selector as a value, to be passed where a [`ByteOrder`] is
/// expected.
pub const LE: LE = LittleEndian;

/// The [`NE`] selector as a value, to be passed where a [`ByteOrder`] is
/// expected.
pub const NE: NE = NE {};

impl private::Endianness for LittleEndian {}
impl private::Endianness for BigEndian {}

impl Endianness for LittleEndian {
    const ORDER: ByteOrder = ByteOrder::LittleEndian;
}

impl Endianness for BigEndian {
    const ORDER: ByteOrder = ByteOrder::BigEndian;
}

impl From<LittleEndian> for ByteOrder {
    fn from(_: LittleEndian) -> Self {
        ByteOrder::LittleEndian
    }
}

impl From<BigEndian> for ByteOrder {
    fn from(_: BigEndian) -> Self {
        ByteOrder::BigEndian
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reconstruct_aligned() {
        let bytes = [0x92, 0xDB, 0x0F, 0xAC];
        assert_eq!(ByteOrder::BigEndian.reconstruct(&bytes, 32), 0x92db0fac);
        assert_eq!(ByteOrder::LittleEndian.reconstruct(&bytes, 32), 0xac0fdb92);
        assert_eq!(ByteOrder::BigEndian.reconstruct(&[], 0), 0);
        assert_eq!(ByteOrder::LittleEndian.reconstruct(&[], 0), 0);
        let full = [1, 2, 3, 4, 5, 6, 7, 8];
        assert_eq!(
            ByteOrder::BigEndian.reconstruct(&full, 64),
            u64::from_be_bytes(full)
        );
        assert_eq!(
            ByteOrder::LittleEndian.reconstruct(&full, 64),
            u64::from_le_bytes(full)
        );
    }

    #[test]
    fn test_reconstruct_partial() {
        // top three bits of 0b1010_0000
        assert_eq!(ByteOrder::BigEndian.reconstruct(&[0b1010_0000], 3), 0b101);
        assert_eq!(ByteOrder::LittleEndian.reconstruct(&[0b1010_0000], 3), 0b101);
        // in little-endian order the partial byte is the most significant
        assert_eq!(
            ByteOrder::LittleEndian.reconstruct(&[0xAB, 0xC0], 12),
            0xC0AB >> 4
        );
    }

    #[test]
    fn test_selectors() {
        assert_eq!(ByteOrder::from(BE), ByteOrder::BigEndian);
        assert_eq!(ByteOrder::from(LE), ByteOrder::LittleEndian);
        assert_eq!(<BE as Endianness>::ORDER, ByteOrder::BigEndian);
        assert_eq!(<LE as Endianness>::ORDER, ByteOrder::LittleEndian);
        assert_eq!(<NE as Endianness>::ORDER, ByteOrder::NATIVE);
    }
}
