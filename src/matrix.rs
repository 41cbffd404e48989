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
*/

//! The in-memory model of a gray image: a rectangular matrix of integer intensities.
//!
//! Pixels are stored in a single contiguous buffer in row-major order, so row `r` occupies
//! `values[r * width..(r + 1) * width]`. The dimensions are fixed when the matrix is allocated.

use std::ops::{Index, IndexMut};

use crate::{report::report, GrayMapError};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "GrayMatrixData"))]
pub struct GrayMatrix {
    height: usize,
    width: usize,
    values: Vec<i32>,
}

/// Unchecked serialized form of a [GrayMatrix]. Deserialized data is validated by
/// [GrayMatrix::from_vec] before a matrix is built from it.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct GrayMatrixData {
    height: usize,
    width: usize,
    values: Vec<i32>,
}

#[cfg(feature = "serde")]
impl TryFrom<GrayMatrixData> for GrayMatrix {
    type Error = GrayMapError;

    fn try_from(data: GrayMatrixData) -> Result<Self, Self::Error> {
        GrayMatrix::from_vec(data.height, data.width, data.values)
    }
}

impl GrayMatrix {
    /// Allocate a zero-filled matrix of `height` rows and `width` columns.
    ///
    /// Returns [GrayMapError::OutOfMemory] if the pixel buffer cannot be reserved. No partially
    /// allocated matrix is ever returned.
    pub fn allocate(height: usize, width: usize) -> Result<GrayMatrix, GrayMapError> {
        let len = match height.checked_mul(width) {
            Some(len) => len,
            None => {
                report("allocate", format!("{}x{} matrix size overflows", height, width));
                return Err(GrayMapError::OutOfMemory { height, width });
            }
        };

        let mut values: Vec<i32> = Vec::new();
        if let Err(e) = values.try_reserve_exact(len) {
            report("allocate", format!("No memory available: {}", e));
            return Err(GrayMapError::OutOfMemory { height, width });
        }
        values.resize(len, 0);

        log::trace!("allocate(): {}x{} matrix ({} pixels)", height, width, len);
        Ok(GrayMatrix { height, width, values })
    }

    /// Build a matrix from a row-major buffer. The buffer length must equal `height * width`.
    pub fn from_vec(height: usize, width: usize, values: Vec<i32>) -> Result<GrayMatrix, GrayMapError> {
        if height.checked_mul(width) != Some(values.len()) {
            report(
                "from_vec",
                format!("{} values cannot fill a {}x{} matrix", values.len(), height, width),
            );
            return Err(GrayMapError::InvalidArgument("buffer length does not match dimensions"));
        }
        Ok(GrayMatrix { height, width, values })
    }

    /// Build a matrix from a slice of rows. Every row must have the same length.
    pub fn from_rows<R: AsRef<[i32]>>(rows: &[R]) -> Result<GrayMatrix, GrayMapError> {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.as_ref().len());

        if rows.iter().any(|r| r.as_ref().len() != width) {
            report("from_rows", "Rows have differing lengths");
            return Err(GrayMapError::InvalidArgument("rows have differing lengths"));
        }

        let mut matrix = GrayMatrix::allocate(height, width)?;
        for (dst, src) in matrix.values.chunks_exact_mut(width.max(1)).zip(rows) {
            dst.copy_from_slice(src.as_ref());
        }
        Ok(matrix)
    }

    /// Release the matrix and all of its storage. The matrix is consumed and cannot be used
    /// afterward.
    pub fn release(self) {
        log::trace!("release(): {}x{} matrix", self.height, self.width);
        drop(self);
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Total number of pixels.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Return the value at `row`, `col`.
    ///
    /// # Panics
    /// Panics if the coordinates are outside the matrix. Use [GrayMatrix::get] for a checked read.
    pub fn value_at(&self, row: usize, col: usize) -> i32 {
        self[(row, col)]
    }

    pub fn get(&self, row: usize, col: usize) -> Option<i32> {
        self.offset(row, col).map(|o| self.values[o])
    }

    pub fn set(&mut self, row: usize, col: usize, value: i32) -> Result<(), GrayMapError> {
        match self.offset(row, col) {
            Some(o) => {
                self.values[o] = value;
                Ok(())
            }
            None => {
                report(
                    "set",
                    format!("({}, {}) is outside a {}x{} matrix", row, col, self.height, self.width),
                );
                Err(GrayMapError::InvalidArgument("coordinates outside matrix"))
            }
        }
    }

    /// Return a slice over the pixels of row `row`.
    ///
    /// # Panics
    /// Panics if `row >= height`.
    pub fn row(&self, row: usize) -> &[i32] {
        assert!(row < self.height, "row {} out of range for height {}", row, self.height);
        &self.values[row * self.width..(row + 1) * self.width]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[i32]> + '_ {
        (0..self.height).map(move |r| self.row(r))
    }

    /// All pixels in row-major order.
    pub fn values(&self) -> &[i32] {
        &self.values
    }

    pub fn values_mut(&mut self) -> &mut [i32] {
        &mut self.values
    }

    /// Scan the matrix for its smallest value.
    pub fn min_value(&self) -> Result<i32, GrayMapError> {
        match self.values.iter().copied().min() {
            Some(min) => Ok(min),
            None => {
                report("min_value", "Matrix is empty");
                Err(GrayMapError::EmptyMatrix)
            }
        }
    }

    /// Scan the matrix for its largest value.
    pub fn max_value(&self) -> Result<i32, GrayMapError> {
        match self.values.iter().copied().max() {
            Some(max) => Ok(max),
            None => {
                report("max_value", "Matrix is empty");
                Err(GrayMapError::EmptyMatrix)
            }
        }
    }

    /// Convert a row-major offset back into `(row, col)`.
    pub(crate) fn coords(&self, offset: usize) -> (usize, usize) {
        match self.width {
            0 => (0, 0),
            w => (offset / w, offset % w),
        }
    }

    fn offset(&self, row: usize, col: usize) -> Option<usize> {
        if row < self.height && col < self.width {
            Some(row * self.width + col)
        }
        else {
            None
        }
    }
}

impl Index<(usize, usize)> for GrayMatrix {
    type Output = i32;

    fn index(&self, (row, col): (usize, usize)) -> &i32 {
        assert!(
            row < self.height && col < self.width,
            "({}, {}) out of range for {}x{} matrix",
            row,
            col,
            self.height,
            self.width
        );
        &self.values[row * self.width + col]
    }
}

impl IndexMut<(usize, usize)> for GrayMatrix {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut i32 {
        assert!(
            row < self.height && col < self.width,
            "({}, {}) out of range for {}x{} matrix",
            row,
            col,
            self.height,
            self.width
        );
        &mut self.values[row * self.width + col]
    }
}

/// Release an optional matrix. Passing `None` is reported and returns
/// [GrayMapError::InvalidArgument]; nothing is freed.
pub fn release(matrix: Option<GrayMatrix>) -> Result<(), GrayMapError> {
    match matrix {
        Some(matrix) => {
            matrix.release();
            Ok(())
        }
        None => {
            report("release", "Matrix is missing");
            Err(GrayMapError::InvalidArgument("no matrix to release"))
        }
    }
}
