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

//! Tokenizer for the PGM header.
//!
//! The four header fields are read in wire order: magic number, width, height, maximum value.
//! On success the underlying reader is left positioned at the first byte of pixel data.

use crate::{
    io::{ErrorKind, Read},
    report::report,
    GrayMapError,
    HeaderError,
    HeaderField,
    PgmFormat,
    PGM_WIDE_THRESHOLD,
};

/// The fields of a PGM header.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PgmHeader {
    pub format: PgmFormat,
    /// Number of columns. Appears before the height in the file.
    pub width: usize,
    /// Number of rows.
    pub height: usize,
    pub max_value: u32,
}

impl PgmHeader {
    /// Bytes used by each sample in raw pixel data.
    pub fn bytes_per_pixel(&self) -> usize {
        if self.max_value < PGM_WIDE_THRESHOLD {
            1
        }
        else {
            2
        }
    }

    pub fn pixel_count(&self) -> Option<usize> {
        self.width.checked_mul(self.height)
    }

    /// The exact length of the pixel data in bytes, for raw images. Plain text pixel data has no
    /// fixed length.
    pub fn pixel_data_len(&self) -> Option<usize> {
        match self.format {
            PgmFormat::Raw => self.pixel_count()?.checked_mul(self.bytes_per_pixel()),
            _ => None,
        }
    }
}

/// Structural whitespace permitted between PGM tokens.
pub(crate) fn is_pgm_whitespace(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\r')
}

/// A byte reader with a single byte of push-back, shared by the header tokenizer and the plain
/// text sample reader.
pub(crate) struct TokenReader<'a, R: Read> {
    inner: &'a mut R,
    pending: Option<u8>,
}

impl<'a, R: Read> TokenReader<'a, R> {
    pub(crate) fn new(inner: &'a mut R) -> Self {
        TokenReader { inner, pending: None }
    }

    /// Read one byte. Returns None at the end of the stream.
    pub(crate) fn next_byte(&mut self) -> Result<Option<u8>, crate::io::Error> {
        if let Some(byte) = self.pending.take() {
            return Ok(Some(byte));
        }

        let mut buf = [0u8; 1];
        loop {
            match self.inner.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(buf[0])),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }

    pub(crate) fn unread(&mut self, byte: u8) {
        debug_assert!(self.pending.is_none());
        self.pending = Some(byte);
    }

    /// Skip a run of whitespace and comments, returning the first byte that is neither.
    /// Returns None if the stream ends first.
    pub(crate) fn skip_separators(&mut self) -> Result<Option<u8>, crate::io::Error> {
        loop {
            match self.next_byte()? {
                Some(byte) if is_pgm_whitespace(byte) => continue,
                Some(b'#') => {
                    if !self.skip_comment()? {
                        return Ok(None);
                    }
                }
                other => return Ok(other),
            }
        }
    }

    /// Skip to and including the next CR or LF. Returns false if the stream ends first.
    pub(crate) fn skip_comment(&mut self) -> Result<bool, crate::io::Error> {
        loop {
            match self.next_byte()? {
                Some(b'\n') | Some(b'\r') => return Ok(true),
                Some(_) => continue,
                None => return Ok(false),
            }
        }
    }

    /// Parse a decimal integer whose first digit has already been read. Returns the value,
    /// saturated at `u32::MAX`, and the byte that terminated the token (None at end of stream).
    pub(crate) fn read_decimal(&mut self, first: u8) -> Result<(u32, Option<u8>), crate::io::Error> {
        let mut value = u32::from(first - b'0');
        loop {
            match self.next_byte()? {
                Some(byte) if byte.is_ascii_digit() => {
                    value = value.saturating_mul(10).saturating_add(u32::from(byte - b'0'));
                }
                other => return Ok((value, other)),
            }
        }
    }
}

fn header_failure(err: HeaderError) -> GrayMapError {
    report("read_header", err);
    err.into()
}

fn io_failure(err: crate::io::Error) -> GrayMapError {
    report("read_header", &err);
    err.into()
}

fn read_magic<R: Read>(tokens: &mut TokenReader<R>) -> Result<PgmFormat, GrayMapError> {
    match tokens.skip_separators().map_err(io_failure)? {
        Some(b'P') => {}
        Some(_) => return Err(header_failure(HeaderError::UnknownFormat)),
        None => return Err(header_failure(HeaderError::TruncatedHeader(HeaderField::Magic))),
    }

    match tokens.next_byte().map_err(io_failure)? {
        Some(digit) => match PgmFormat::from_magic_digit(digit) {
            PgmFormat::Unknown => Err(header_failure(HeaderError::UnknownFormat)),
            format => Ok(format),
        },
        None => Err(header_failure(HeaderError::TruncatedHeader(HeaderField::Magic))),
    }
}

/// Read one numeric header field, returning its value and the byte that terminated it.
fn read_field<R: Read>(tokens: &mut TokenReader<R>, field: HeaderField) -> Result<(u32, u8), GrayMapError> {
    let first = match tokens.skip_separators().map_err(io_failure)? {
        Some(byte) if byte.is_ascii_digit() => byte,
        Some(_) => return Err(header_failure(HeaderError::MalformedHeader(field))),
        None => return Err(header_failure(HeaderError::TruncatedHeader(field))),
    };

    match tokens.read_decimal(first).map_err(io_failure)? {
        (value, Some(terminator)) => Ok((value, terminator)),
        (_, None) => Err(header_failure(HeaderError::TruncatedHeader(field))),
    }
}

/// Parse a PGM header from `reader`.
///
/// On success the reader is positioned at the first byte of pixel data. The maximum value is
/// returned as declared; range checking is left to the decoder.
pub fn read_header<R: Read>(reader: &mut R) -> Result<PgmHeader, GrayMapError> {
    let mut tokens = TokenReader::new(reader);

    let format = read_magic(&mut tokens)?;

    let (width, terminator) = read_field(&mut tokens, HeaderField::Width)?;
    tokens.unread(terminator);
    let (height, terminator) = read_field(&mut tokens, HeaderField::Height)?;
    tokens.unread(terminator);
    let (max_value, terminator) = read_field(&mut tokens, HeaderField::MaxValue)?;

    // Exactly one whitespace byte separates the maximum value from the pixel data, so that raw
    // samples with the values of whitespace characters are not swallowed.
    match terminator {
        byte if is_pgm_whitespace(byte) => {}
        b'#' => {
            if !tokens.skip_comment().map_err(io_failure)? {
                return Err(header_failure(HeaderError::TruncatedHeader(HeaderField::MaxValue)));
            }
        }
        _ => return Err(header_failure(HeaderError::MalformedHeader(HeaderField::MaxValue))),
    }

    let header = PgmHeader {
        format,
        width: width as usize,
        height: height as usize,
        max_value,
    };
    log::debug!(
        "read_header(): {} {}x{} max value: {}",
        header.format,
        header.width,
        header.height,
        header.max_value
    );
    Ok(header)
}
