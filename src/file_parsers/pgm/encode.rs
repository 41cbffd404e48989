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

//! Encoding of a [GrayMatrix] as a PGM file.
//!
//! The header's maximum value is always computed from the matrix at the time of writing, and
//! selects between one and two bytes per raw sample. There is no rollback: a failure while
//! writing pixel data leaves a truncated file behind.

use std::{fs::File, path::Path};

use binrw::BinWrite;

use crate::{
    file_parsers::PgmWriteOptions,
    io::{BufWriter, Write, WriteSeek},
    report::report,
    GrayMapError,
    GrayMatrix,
    PgmFormat,
    PGM_MAX_VALUE,
    PGM_WIDE_THRESHOLD,
};

/// Encode `matrix` to the file at `path` in the requested format, with default options.
pub fn encode(matrix: &GrayMatrix, path: impl AsRef<Path>, format: PgmFormat) -> Result<(), GrayMapError> {
    encode_with_options(matrix, path, format, &PgmWriteOptions::default())
}

/// Encode `matrix` to the file at `path` in the requested format.
///
/// The format, options and matrix contents are validated before the file is created.
pub fn encode_with_options(
    matrix: &GrayMatrix,
    path: impl AsRef<Path>,
    format: PgmFormat,
    opts: &PgmWriteOptions,
) -> Result<(), GrayMapError> {
    let path = path.as_ref();
    let (magic, max_value) = validate(matrix, format, opts)?;

    let file = File::create(path).map_err(|e| {
        report("encode", format!("Unable to open file {}: {}", path.display(), e));
        GrayMapError::from(e)
    })?;

    log::debug!("encode(): writing {} to {}", format, path.display());
    let mut writer = BufWriter::new(file);
    write_pgm(matrix, &mut writer, magic, max_value, opts)?;
    writer.flush().map_err(write_failure)?;
    Ok(())
}

/// Encode `matrix` to `writer` in the requested format.
pub fn encode_to<W: WriteSeek>(
    matrix: &GrayMatrix,
    writer: &mut W,
    format: PgmFormat,
    opts: &PgmWriteOptions,
) -> Result<(), GrayMapError> {
    let (magic, max_value) = validate(matrix, format, opts)?;
    write_pgm(matrix, writer, magic, max_value, opts)
}

/// Check the request and return the magic number and maximum value to write.
fn validate(
    matrix: &GrayMatrix,
    format: PgmFormat,
    opts: &PgmWriteOptions,
) -> Result<(&'static [u8; 2], u32), GrayMapError> {
    let magic = match format.magic() {
        Some(magic) => magic,
        None => {
            report("encode", "Invalid image type.");
            return Err(GrayMapError::InvalidArgument("output format must be ASCII or Raw"));
        }
    };

    if opts.values_per_line == 0 {
        report("encode", "values_per_line must be at least 1.");
        return Err(GrayMapError::InvalidArgument("values_per_line must be at least 1"));
    }

    let max_value = matrix.max_value()?;
    let min_value = matrix.min_value()?;

    if min_value < 0 || max_value > PGM_MAX_VALUE as i32 {
        let bad = if min_value < 0 { min_value } else { max_value };
        // Both scans found the value, so the position lookup cannot miss.
        let offset = matrix.values().iter().position(|&v| v == bad).unwrap_or(0);
        let (row, col) = matrix.coords(offset);
        report(
            "encode",
            format!("Pixel value {} at row {}, column {} cannot be stored.", bad, row, col),
        );
        return Err(GrayMapError::ValueOutOfRange { row, col, value: bad });
    }

    Ok((magic, max_value as u32))
}

fn write_failure(err: crate::io::Error) -> GrayMapError {
    report("encode", &err);
    err.into()
}

fn sample_failure(err: binrw::Error) -> GrayMapError {
    report("encode", &err);
    match err {
        binrw::Error::Io(e) => GrayMapError::IoError(e),
        other => GrayMapError::IoError(crate::io::Error::other(other.to_string())),
    }
}

fn write_pgm<W: WriteSeek>(
    matrix: &GrayMatrix,
    writer: &mut W,
    magic: &[u8; 2],
    max_value: u32,
    opts: &PgmWriteOptions,
) -> Result<(), GrayMapError> {
    writer.write_all(magic).map_err(write_failure)?;
    write!(
        writer,
        "\n{} {}\n{}\n",
        matrix.width(),
        matrix.height(),
        max_value
    )
    .map_err(write_failure)?;

    match magic {
        b"P2" => write_ascii_samples(matrix, writer, opts.values_per_line),
        _ => write_raw_samples(matrix, writer, max_value >= PGM_WIDE_THRESHOLD),
    }
}

/// Write decimal samples, each followed by a space except the last one on a line, which is
/// followed by a newline.
fn write_ascii_samples<W: Write>(matrix: &GrayMatrix, writer: &mut W, values_per_line: usize) -> Result<(), GrayMapError> {
    let mut on_line = 0;
    for value in matrix.values() {
        on_line += 1;
        if on_line == values_per_line {
            writeln!(writer, "{}", value).map_err(write_failure)?;
            on_line = 0;
        }
        else {
            write!(writer, "{} ", value).map_err(write_failure)?;
        }
    }
    Ok(())
}

fn write_raw_samples<W: WriteSeek>(matrix: &GrayMatrix, writer: &mut W, wide: bool) -> Result<(), GrayMapError> {
    for &value in matrix.values() {
        if wide {
            (value as u16).write_be(writer).map_err(sample_failure)?;
        }
        else {
            (value as u8).write_be(writer).map_err(sample_failure)?;
        }
    }
    Ok(())
}
