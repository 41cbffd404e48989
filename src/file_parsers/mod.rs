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

//! The gray map file format definitions shared by the PGM reader and writer.

pub mod pgm;

use std::fmt::{self, Display, Formatter};

use strum::EnumIter;

use crate::DEFAULT_VALUES_PER_LINE;

/// The PGM sub-format of an image file, as selected by its magic number.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PgmFormat {
    /// Plain gray map (`P2`); samples are whitespace-separated decimal text.
    Ascii,
    /// Raw gray map (`P5`); samples are packed bytes, big-endian when two bytes wide.
    #[default]
    Raw,
    Unknown,
}

impl PgmFormat {
    /// Return the two-byte magic number identifying the format, or None for [PgmFormat::Unknown].
    pub fn magic(&self) -> Option<&'static [u8; 2]> {
        match self {
            PgmFormat::Ascii => Some(b"P2"),
            PgmFormat::Raw => Some(b"P5"),
            PgmFormat::Unknown => None,
        }
    }

    /// Map the digit following `P` in a magic number to a format.
    pub fn from_magic_digit(digit: u8) -> PgmFormat {
        match digit {
            b'2' => PgmFormat::Ascii,
            b'5' => PgmFormat::Raw,
            _ => PgmFormat::Unknown,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, PgmFormat::Unknown)
    }
}

impl Display for PgmFormat {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            PgmFormat::Ascii => write!(f, "PGM ASCII (P2)"),
            PgmFormat::Raw => write!(f, "PGM Raw (P5)"),
            PgmFormat::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Options controlling how a gray map is written.
#[derive(Clone, Debug)]
pub struct PgmWriteOptions {
    /// Number of samples per line in plain (`P2`) output. Must be non-zero.
    pub values_per_line: usize,
}

impl Default for PgmWriteOptions {
    fn default() -> Self {
        PgmWriteOptions {
            values_per_line: DEFAULT_VALUES_PER_LINE,
        }
    }
}

/// Returns a list of advertised file extensions for gray map images.
/// This is a convenience function for use in file dialogs - format detection is based on the
/// magic number, not the file extension.
pub fn supported_extensions() -> Vec<&'static str> {
    vec!["pgm"]
}
