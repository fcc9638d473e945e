/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

/*!

Implementations of bit readers.

[`BitCursor`] holds its whole input in memory: bytes are appended with
[`BitCursor::feed`] as they become available, and consumed from the front
by the methods of [`BitRead`](crate::traits::BitRead). It never seeks
backwards, and drops the bytes it has fully consumed.

*/

mod bit_cursor;
pub use bit_cursor::BitCursor;
