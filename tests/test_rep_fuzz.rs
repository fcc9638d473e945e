/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

#[cfg(feature = "fuzz")]
use anyhow::Result;

macro_rules! impl_fuzz_repr {
    ($func_name:ident, $fuzz_name:ident) => {
        #[cfg(feature = "fuzz")]
        #[test]
        fn $func_name() -> Result<()> {
            use arbitrary::Arbitrary;
            use bit_cursor::fuzz::$fuzz_name::*;
            let dir = format!("fuzz/corpus/{}", stringify!($fuzz_name));
            let Ok(entries) = std::fs::read_dir(&dir) else {
                // no corpus has been generated yet
                return Ok(());
            };
            for file in entries {
                let file = file?;

                if file.file_type()?.is_dir() {
                    continue;
                }

                let file_bytes = std::fs::read(file.path())?;
                let mut unstructured = arbitrary::Unstructured::new(&file_bytes);
                let data = FuzzCase::arbitrary(&mut unstructured)?;
                harness(data);
            }

            Ok(())
        }
    };
}

impl_fuzz_repr!(test_rep_fuzz_bit_cursor, bit_cursor);

#[cfg(feature = "fuzz")]
#[test]
fn test_random_fuzz_cases() -> Result<()> {
    use arbitrary::Arbitrary;
    use bit_cursor::fuzz::bit_cursor::*;
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    let mut r = SmallRng::seed_from_u64(0);
    for _ in 0..1000 {
        let len = r.random_range(0..4096);
        let bytes: Vec<u8> = (0..len).map(|_| r.random()).collect();
        let mut unstructured = arbitrary::Unstructured::new(&bytes);
        harness(FuzzCase::arbitrary(&mut unstructured)?);
    }
    Ok(())
}
