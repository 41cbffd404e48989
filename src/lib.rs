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

//! graymap reads and writes PGM (Portable Gray Map) images.
//!
//! Both variants of the gray map format are supported: the plain text `P2` format and the raw
//! binary `P5` format, with 8-bit or 16-bit big-endian samples. Images are loaded into a
//! [GrayMatrix], a rectangular matrix of integer intensities stored in row-major order.
//!
//! ```no_run
//! use graymap::{decode, encode, PgmFormat};
//!
//! let image = decode("terrain.pgm")?;
//! println!("{} x {} pixels", image.width(), image.height());
//! encode(&image, "terrain_ascii.pgm", PgmFormat::Ascii)?;
//! # Ok::<(), graymap::GrayMapError>(())
//! ```

mod file_parsers;
pub mod io;
mod matrix;
mod report;

use std::fmt::{self, Display, Formatter};

use thiserror::Error;

/// The largest maximum value a PGM header may declare.
pub const PGM_MAX_VALUE: u32 = 65535;
/// Maximum values below this threshold are stored with one byte per sample in raw files.
pub const PGM_WIDE_THRESHOLD: u32 = 256;
/// Number of samples written per line of a plain (`P2`) file unless configured otherwise.
pub const DEFAULT_VALUES_PER_LINE: usize = 19;

/// The header token being parsed when a header error occurred.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HeaderField {
    Magic,
    Width,
    Height,
    MaxValue,
}

impl Display for HeaderField {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            HeaderField::Magic => write!(f, "magic number"),
            HeaderField::Width => write!(f, "width"),
            HeaderField::Height => write!(f, "height"),
            HeaderField::MaxValue => write!(f, "maximum value"),
        }
    }
}

/// Failures detected by the PGM header tokenizer.
#[derive(Copy, Clone, Debug, Error, PartialEq, Eq)]
pub enum HeaderError {
    #[error("Unknown file type")]
    UnknownFormat,
    #[error("Incorrect {0}")]
    MalformedHeader(HeaderField),
    #[error("Stream ended while reading the {0}")]
    TruncatedHeader(HeaderField),
}

#[derive(Debug, Error)]
pub enum GrayMapError {
    #[error("An IO error occurred reading or writing the image: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Not enough memory available for a {height}x{width} matrix")]
    OutOfMemory { height: usize, width: usize },
    #[error("Invalid parameters were specified to a library function: {0}")]
    InvalidArgument(&'static str),
    #[error("Unknown image format")]
    UnknownFormat,
    #[error("Invalid header: {0}")]
    InvalidHeader(HeaderError),
    #[error("Invalid maximum value {0} (limit is 65535)")]
    InvalidMaxValue(u32),
    #[error("File ended prematurely after {read} of {expected} pixels")]
    TruncatedPixelData {
        image: GrayMatrix,
        read: usize,
        expected: usize,
    },
    #[error("Malformed pixel value after {read} of {expected} pixels")]
    MalformedPixelData {
        image: GrayMatrix,
        read: usize,
        expected: usize,
    },
    #[error("Pixel value {value} at row {row}, column {col} is outside the range 0-65535")]
    ValueOutOfRange { row: usize, col: usize, value: i32 },
    #[error("The matrix contains no pixels")]
    EmptyMatrix,
}

impl From<HeaderError> for GrayMapError {
    fn from(err: HeaderError) -> Self {
        match err {
            HeaderError::UnknownFormat => GrayMapError::UnknownFormat,
            _ => GrayMapError::InvalidHeader(err),
        }
    }
}

impl GrayMapError {
    /// Returns true if the error still carries a partially decoded image.
    pub fn is_partial(&self) -> bool {
        matches!(
            self,
            GrayMapError::TruncatedPixelData { .. } | GrayMapError::MalformedPixelData { .. }
        )
    }

    /// Take the partially decoded image out of a pixel data error. Pixels that could not be
    /// read are left at zero.
    pub fn into_partial(self) -> Option<GrayMatrix> {
        match self {
            GrayMapError::TruncatedPixelData { image, .. } | GrayMapError::MalformedPixelData { image, .. } => {
                Some(image)
            }
            _ => None,
        }
    }

    /// The number of pixels successfully decoded before a pixel data error.
    pub fn pixels_read(&self) -> Option<usize> {
        match self {
            GrayMapError::TruncatedPixelData { read, .. } | GrayMapError::MalformedPixelData { read, .. } => {
                Some(*read)
            }
            _ => None,
        }
    }
}

pub use crate::file_parsers::{
    pgm::{decode, decode_from, decode_pixels, encode, encode_to, encode_with_options, read_header, PgmHeader},
    supported_extensions,
    PgmFormat,
    PgmWriteOptions,
};
pub use crate::matrix::{release, GrayMatrix};
pub use crate::report::report;
