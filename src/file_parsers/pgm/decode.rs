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

//! Decoding of PGM pixel data into a [GrayMatrix].
//!
//! Header and allocation failures return no image. A stream that ends inside the pixel data
//! still yields the image filled as far as the data allowed; it is carried by the
//! [GrayMapError::TruncatedPixelData] error so callers can inspect or discard it.

use std::{fs::File, path::Path};

use binrw::BinReaderExt;

use super::header::{read_header, PgmHeader, TokenReader};
use crate::{
    io::{BufReader, Read, ReadSeek},
    report::report,
    GrayMapError,
    GrayMatrix,
    PgmFormat,
    PGM_MAX_VALUE,
};

enum PixelFault {
    Truncated,
    Malformed,
}

enum PixelLayout {
    Ascii,
    Raw { wide: bool },
}

/// Decode the PGM file at `path`.
///
/// The file is closed before this function returns, whether or not decoding succeeded.
pub fn decode(path: impl AsRef<Path>) -> Result<GrayMatrix, GrayMapError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        report("decode", format!("Unable to open file {}: {}", path.display(), e));
        GrayMapError::from(e)
    })?;

    log::debug!("decode(): reading {}", path.display());
    let mut reader = BufReader::new(file);
    decode_from(&mut reader)
}

/// Decode a PGM image from a reader positioned at the start of the file.
pub fn decode_from<R: ReadSeek>(reader: &mut R) -> Result<GrayMatrix, GrayMapError> {
    let header = read_header(reader)?;
    decode_pixels(&header, reader)
}

/// Decode the pixel data described by `header`. The reader must be positioned at the first
/// byte of pixel data, as [read_header] leaves it.
pub fn decode_pixels<R: ReadSeek>(header: &PgmHeader, reader: &mut R) -> Result<GrayMatrix, GrayMapError> {
    if header.max_value > PGM_MAX_VALUE {
        report("decode", format!("Invalid maximum value {}.", header.max_value));
        return Err(GrayMapError::InvalidMaxValue(header.max_value));
    }

    let layout = match header.format {
        PgmFormat::Ascii => PixelLayout::Ascii,
        PgmFormat::Raw => PixelLayout::Raw {
            wide: header.bytes_per_pixel() == 2,
        },
        PgmFormat::Unknown => {
            report("decode", "Invalid file type.");
            return Err(GrayMapError::UnknownFormat);
        }
    };

    let mut image = GrayMatrix::allocate(header.height, header.width)?;
    let expected = image.len();

    let result = match layout {
        PixelLayout::Ascii => read_ascii_samples(reader, header.max_value, image.values_mut()),
        PixelLayout::Raw { wide } => read_raw_samples(reader, wide, image.values_mut()),
    };

    match result {
        Ok(()) => {
            log::debug!("decode_pixels(): read {} pixels", expected);
            Ok(image)
        }
        Err((read, PixelFault::Truncated)) => {
            report(
                "decode",
                format!("File ended prematurely after {} of {} pixels.", read, expected),
            );
            Err(GrayMapError::TruncatedPixelData { image, read, expected })
        }
        Err((read, PixelFault::Malformed)) => {
            report(
                "decode",
                format!("Malformed pixel value after {} of {} pixels.", read, expected),
            );
            Err(GrayMapError::MalformedPixelData { image, read, expected })
        }
    }
}

/// Read whitespace-separated decimal samples. On failure, returns the number of samples read.
fn read_ascii_samples<R: Read>(reader: &mut R, max_value: u32, values: &mut [i32]) -> Result<(), (usize, PixelFault)> {
    let mut tokens = TokenReader::new(reader);
    let mut over_max = 0;

    for (i, value) in values.iter_mut().enumerate() {
        let first = match tokens.skip_separators() {
            Ok(Some(byte)) if byte.is_ascii_digit() => byte,
            Ok(Some(byte)) => {
                log::debug!("read_ascii_samples(): unexpected byte {:02X} at sample {}", byte, i);
                return Err((i, PixelFault::Malformed));
            }
            Ok(None) => return Err((i, PixelFault::Truncated)),
            Err(e) => {
                report("decode", &e);
                return Err((i, PixelFault::Truncated));
            }
        };

        let sample = match tokens.read_decimal(first) {
            Ok((sample, terminator)) => {
                if let Some(byte) = terminator {
                    tokens.unread(byte);
                }
                sample
            }
            Err(e) => {
                report("decode", &e);
                return Err((i, PixelFault::Truncated));
            }
        };

        if sample > max_value {
            over_max += 1;
        }
        *value = i32::try_from(sample).unwrap_or(i32::MAX);
    }

    if over_max > 0 {
        log::warn!(
            "read_ascii_samples(): {} samples exceed the declared maximum value of {}",
            over_max,
            max_value
        );
    }
    Ok(())
}

/// Read packed samples, one byte each or two bytes big-endian if `wide`. On failure, returns
/// the number of samples read.
fn read_raw_samples<R: ReadSeek>(reader: &mut R, wide: bool, values: &mut [i32]) -> Result<(), (usize, PixelFault)> {
    for (i, value) in values.iter_mut().enumerate() {
        let sample = if wide {
            reader.read_be::<u16>()
        }
        else {
            reader.read_be::<u8>().map(u16::from)
        };

        match sample {
            Ok(sample) => *value = i32::from(sample),
            Err(e) => {
                log::debug!("read_raw_samples(): short read at sample {}: {}", i, e);
                return Err((i, PixelFault::Truncated));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::Cursor;

    fn decode_bytes(bytes: &[u8]) -> Result<GrayMatrix, GrayMapError> {
        decode_from(&mut Cursor::new(bytes))
    }

    #[test]
    fn test_decode_raw_8bit() {
        let image = decode_bytes(b"P5\n2 2\n255\n\x0a\x14\x1e\x28").unwrap();
        assert_eq!(image, GrayMatrix::from_rows(&[[10, 20], [30, 40]]).unwrap());
    }

    #[test]
    fn test_decode_raw_16bit_big_endian() {
        let image = decode_bytes(b"P5 3 1 65535\n\x01\x00\xff\xff\x00\x07").unwrap();
        assert_eq!(image.row(0), &[256, 65535, 7]);
    }

    #[test]
    fn test_decode_max_value_256_is_wide() {
        let image = decode_bytes(b"P5 1 2 256\n\x01\x00\x00\xff").unwrap();
        assert_eq!(image.values(), &[256, 255]);
    }

    #[test]
    fn test_decode_ascii_any_layout() {
        let image = decode_bytes(b"P2\n3 2\n9\n1 2\n3\t\t4\r\n  5 # comment 100\n6").unwrap();
        assert_eq!(image, GrayMatrix::from_rows(&[[1, 2, 3], [4, 5, 6]]).unwrap());
    }

    #[test]
    fn test_decode_ascii_over_max_is_kept() {
        let image = decode_bytes(b"P2 2 1 10 5 300 ").unwrap();
        assert_eq!(image.values(), &[5, 300]);
    }

    #[test]
    fn test_truncated_ascii_returns_partial() {
        let err = decode_bytes(b"P2 2 2 255 1 2 3").unwrap_err();
        assert!(err.is_partial());
        assert_eq!(err.pixels_read(), Some(3));
        match err {
            GrayMapError::TruncatedPixelData { image, read, expected } => {
                assert_eq!((read, expected), (3, 4));
                assert_eq!(image.values(), &[1, 2, 3, 0]);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_malformed_ascii_returns_partial() {
        let err = decode_bytes(b"P2 2 2 255 1 2 x 4").unwrap_err();
        assert!(matches!(err, GrayMapError::MalformedPixelData { read: 2, expected: 4, .. }));
        assert_eq!(err.into_partial().unwrap().values(), &[1, 2, 0, 0]);
    }

    #[test]
    fn test_truncated_raw_16bit_half_sample() {
        let err = decode_bytes(b"P5 2 1 1000\n\x03\xe8\x01").unwrap_err();
        assert_eq!(err.pixels_read(), Some(1));
        assert_eq!(err.into_partial().unwrap().values(), &[1000, 0]);
    }

    #[test]
    fn test_invalid_max_value() {
        assert!(matches!(
            decode_bytes(b"P5 2 2 70000\n\x00\x00\x00\x00\x00\x00\x00\x00"),
            Err(GrayMapError::InvalidMaxValue(70000))
        ));
    }

    #[test]
    fn test_decode_pixels_rejects_unknown_format() {
        let header = PgmHeader {
            format: PgmFormat::Unknown,
            width: 1,
            height: 1,
            max_value: 255,
        };
        let result = decode_pixels(&header, &mut Cursor::new(vec![0u8]));
        assert!(matches!(result, Err(GrayMapError::UnknownFormat)));
    }

    #[test]
    fn test_decode_pixels_out_of_memory() {
        let header = PgmHeader {
            format: PgmFormat::Raw,
            width: usize::MAX,
            height: 2,
            max_value: 255,
        };
        let result = decode_pixels(&header, &mut Cursor::new(Vec::new()));
        assert!(matches!(result, Err(GrayMapError::OutOfMemory { .. })));
    }

    #[test]
    fn test_zero_area_image() {
        let image = decode_bytes(b"P5 0 3 255\n").unwrap();
        assert_eq!(image.height(), 3);
        assert_eq!(image.width(), 0);
        assert!(image.is_empty());
    }

    #[test]
    fn test_header_errors_return_no_image() {
        let err = decode_bytes(b"P5 2 2").unwrap_err();
        assert!(matches!(err, GrayMapError::InvalidHeader(_)));
        assert!(err.into_partial().is_none());
    }
}
