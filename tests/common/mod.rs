/*
    graymap
    https://github.com/dbalsom/graymap

    Copyright 2024 Daniel Balsom

    Permission is hereby granted, free of charge, to any person obtaining a
    copy of this software and associated documentation files (the “Software”),
    to deal in the Software without restriction, including without limitation
    the rights to use, copy, modify, merge, publish, distribute, sublicense,
    and/or sell copies of the Software, and to permit persons to whom the
    Software is furnished to do so, subject to the following conditions:

    The above copyright notice and this permission notice shall be included in
    all copies or substantial portions of the Software.

    THE SOFTWARE IS PROVIDED “AS IS”, WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
    IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
    FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
    AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
    LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING
    FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER
    DEALINGS IN THE SOFTWARE.

    --------------------------------------------------------------------------

    tests/common/mod.rs

    Common support routines for tests
*/
#![allow(dead_code)]

use graymap::GrayMatrix;
use hex::encode;
use rand::{rngs::StdRng, Rng, SeedableRng};
use sha1::{Digest, Sha1};
use std::path::Path;

pub fn init() {
    match env_logger::builder().is_test(true).try_init() {
        Ok(_) => {
            println!("Logger initialized. A debug log should follow:");
            log::debug!("Logger initialized.");
        }
        Err(e) => eprintln!("Failed to initialize logger: {}", e),
    }
}

pub fn compute_file_hash<P: AsRef<Path>>(path: P) -> String {
    let file_buf = std::fs::read(path).unwrap();
    compute_slice_hash(&file_buf)
}

pub fn compute_slice_hash(slice: &[u8]) -> String {
    let mut hasher = Sha1::new();
    hasher.update(slice);
    let result = hasher.finalize();

    encode(result)
}

/// Build a `height` x `width` matrix of random values in `0..=max_value`.
pub fn random_matrix(height: usize, width: usize, max_value: i32, seed: u64) -> GrayMatrix {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut matrix = GrayMatrix::allocate(height, width).unwrap();
    for value in matrix.values_mut() {
        *value = rng.gen_range(0..=max_value);
    }
    matrix
}

/// Build a matrix whose values increase by one in row-major order, wrapping at `modulus`.
pub fn ramp_matrix(height: usize, width: usize, modulus: i32) -> GrayMatrix {
    let values = (0..height * width).map(|i| (i as i32) % modulus).collect();
    GrayMatrix::from_vec(height, width, values).unwrap()
}
