/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

/// The error returned by the reading methods of
/// [`BitRead`](crate::traits::BitRead).
///
/// In both cases the reader is left exactly as it was before the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitCursorError {
    /// More bits were requested than are left in the buffer.
    EndOfData { requested: u64, available: u64 },
    /// The requested width does not fit in the target integer type.
    WidthExceeded { width: u8, capacity: u32 },
}

impl core::error::Error for BitCursorError {}

impl core::fmt::Display for BitCursorError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BitCursorError::EndOfData {
                requested,
                available,
            } => write!(
                f,
                "bit cursor: end of data: requested {} bits, {} available",
                requested, available
            ),
            BitCursorError::WidthExceeded { width, capacity } => write!(
                f,
                "bit cursor: too many bits requested: {} (at most {})",
                width, capacity
            ),
        }
    }
}

#[cfg(feature = "std")]
impl From<BitCursorError> for std::io::Error {
    fn from(err: BitCursorError) -> Self {
        let kind = match err {
            BitCursorError::EndOfData { .. } => std::io::ErrorKind::UnexpectedEof,
            BitCursorError::WidthExceeded { .. } => std::io::ErrorKind::InvalidInput,
        };
        std::io::Error::new(kind, err)
    }
}
