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
pub mod args;

use crate::args::GlobalOptions;
use anyhow::{bail, Error};
use graymap::{decode, encode_with_options, GrayMapError, GrayMatrix, PgmFormat, PgmWriteOptions};

pub(crate) fn run(global: &GlobalOptions, params: &args::ConvertParams) -> Result<(), Error> {
    log::debug!("convert::run(): {:?}", params);

    let image = match decode(&params.in_file) {
        Ok(image) => image,
        Err(e) if e.is_partial() && !params.strict => {
            if let Some(warning) = partial_warning(global, &e) {
                eprintln!("{}", warning);
            }
            match e.into_partial() {
                Some(image) => image,
                None => bail!("Error loading input image"),
            }
        }
        Err(e) => {
            bail!("Error loading input image: {}", e);
        }
    };

    if !global.silent {
        println!(
            "Input image: {} x {} pixels from {}",
            image.width(),
            image.height(),
            params.in_file.display()
        );
    }

    let format = PgmFormat::from(params.format);
    let mut opts = PgmWriteOptions::default();
    if let Some(count) = params.values_per_line {
        opts.values_per_line = count;
    }

    save(&image, params, format, &opts)?;

    if !global.silent {
        println!("Output image saved to {} as {}", params.out_file.display(), format);
    }
    Ok(())
}

fn partial_warning(global: &GlobalOptions, e: &GrayMapError) -> Option<String> {
    if global.silent {
        return None;
    }
    Some(format!("Warning: {}; converting the partial image.", e))
}

fn save(image: &GrayMatrix, params: &args::ConvertParams, format: PgmFormat, opts: &PgmWriteOptions) -> Result<(), Error> {
    match encode_with_options(image, &params.out_file, format, opts) {
        Ok(()) => Ok(()),
        Err(e) => {
            bail!("Error saving output image: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::OutputFormat;
    use std::{fs, path::Path};

    fn params(in_file: &Path, out_file: &Path, format: OutputFormat, strict: bool) -> args::ConvertParams {
        args::ConvertParams {
            in_file: in_file.to_path_buf(),
            out_file: out_file.to_path_buf(),
            format,
            values_per_line: None,
            strict,
        }
    }

    #[test]
    fn test_convert_raw_to_ascii() {
        let dir = tempfile::tempdir().unwrap();
        let in_file = dir.path().join("in.pgm");
        let out_file = dir.path().join("out.pgm");
        fs::write(&in_file, b"P5\n2 2\n255\n\x0a\x14\x1e\x28").unwrap();

        let global = GlobalOptions { silent: true };
        run(&global, &params(&in_file, &out_file, OutputFormat::Ascii, false)).unwrap();
        assert_eq!(fs::read(&out_file).unwrap(), b"P2\n2 2\n40\n10 20 30 40 ");
    }

    #[test]
    fn test_convert_truncated_input() {
        let dir = tempfile::tempdir().unwrap();
        let in_file = dir.path().join("short.pgm");
        let out_file = dir.path().join("out.pgm");
        fs::write(&in_file, b"P2 2 2 255 5 6 7").unwrap();

        let global = GlobalOptions { silent: true };
        assert!(run(&global, &params(&in_file, &out_file, OutputFormat::Raw, true)).is_err());
        assert!(!out_file.exists());

        run(&global, &params(&in_file, &out_file, OutputFormat::Raw, false)).unwrap();
        assert_eq!(fs::read(&out_file).unwrap(), b"P5\n2 2\n7\n\x05\x06\x07\x00");
    }

    #[test]
    fn test_partial_warning_respects_silent() {
        let dir = tempfile::tempdir().unwrap();
        let in_file = dir.path().join("short.pgm");
        fs::write(&in_file, b"P5\n2 2\n255\n\x01").unwrap();
        let e = decode(&in_file).unwrap_err();
        assert!(e.is_partial());

        assert!(partial_warning(&GlobalOptions { silent: true }, &e).is_none());

        let warning = partial_warning(&GlobalOptions { silent: false }, &e).unwrap();
        assert!(warning.starts_with("Warning: "));
        assert!(warning.ends_with("converting the partial image."));
    }
}
