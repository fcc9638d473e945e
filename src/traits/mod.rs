/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

/*!

Traits and types shared by all readers.

[`BitRead`] is the reading interface: it requires a single primitive,
[`BitRead::read_bits`], and provides on top of it width-checked readers for
unsigned integers, booleans and text. [`ByteOrder`] selects how integers are
assembled from the bits read; the selector types [`BE`], [`LE`] and [`NE`]
can be used in its place.

*/

mod bit_read;
pub use bit_read::*;

mod endianness;
pub use endianness::*;

mod error;
pub use error::*;
