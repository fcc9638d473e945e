/*
 * SPDX-FileCopyrightText: 2023 Inria
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use alloc::vec::Vec;

use crate::traits::*;

/// A wrapper over a [`BitRead`] that logs all the reads performed.
///
/// Successful reads are logged at the `TRACE` level, failures at the `DEBUG`
/// level, using [`tracing`]; the bits read are logged as hexadecimal bytes.
#[derive(Debug, Clone)]
pub struct DbgBitRead<BR: BitRead> {
    reader: BR,
}

impl<BR: BitRead> DbgBitRead<BR> {
    pub fn new(reader: BR) -> Self {
        Self { reader }
    }

    pub fn into_inner(self) -> BR {
        self.reader
    }
}

impl<BR: BitRead> BitRead for DbgBitRead<BR> {
    fn byte_order(&self) -> ByteOrder {
        self.reader.byte_order()
    }

    fn bits_remaining(&self) -> u64 {
        self.reader.bits_remaining()
    }

    fn read_bits(&mut self, n_bits: u64) -> Result<Vec<u8>, BitCursorError> {
        match self.reader.read_bits(n_bits) {
            Ok(bits) => {
                tracing::trace!(
                    n_bits,
                    bits = ?HexBytes(&bits),
                    remaining = self.reader.bits_remaining(),
                    "read_bits"
                );
                Ok(bits)
            }
            Err(err) => {
                tracing::debug!(n_bits, error = %err, "read_bits failed");
                Err(err)
            }
        }
    }

    fn skip_bits(&mut self, n_bits: u64) -> Result<(), BitCursorError> {
        match self.reader.skip_bits(n_bits) {
            Ok(()) => {
                tracing::trace!(
                    n_bits,
                    remaining = self.reader.bits_remaining(),
                    "skip_bits"
                );
                Ok(())
            }
            Err(err) => {
                tracing::debug!(n_bits, error = %err, "skip_bits failed");
                Err(err)
            }
        }
    }
}

struct HexBytes<'a>(&'a [u8]);

impl core::fmt::Debug for HexBytes<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("[")?;
        for (i, byte) in self.0.iter().enumerate() {
            if i != 0 {
                f.write_str(" ")?;
            }
            write!(f, "{:02x}", byte)?;
        }
        f.write_str("]")
    }
}
