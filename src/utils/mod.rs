/*
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

/*!

Debug helpers.

[`CountBitRead`] keeps track of the number of bits consumed from a
[`BitRead`](crate::traits::BitRead).

[`DbgBitRead`] logs through [`tracing`] all operations performed on a
[`BitRead`](crate::traits::BitRead).

*/

mod count;
pub use count::*;

mod dbg;
pub use dbg::*;
