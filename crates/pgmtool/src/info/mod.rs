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
use crate::args::GlobalOptions;
use anyhow::{bail, Context, Error};
use graymap::{decode_pixels, read_header, GrayMapError, GrayMatrix};
use std::{fs::File, io::BufReader};

pub mod args;

pub(crate) fn run(global: &GlobalOptions, params: &args::InfoParams) -> Result<(), Error> {
    let file = File::open(&params.in_file).with_context(|| format!("Opening {}", params.in_file.display()))?;
    let mut reader = BufReader::new(file);

    let header = match read_header(&mut reader) {
        Ok(header) => header,
        Err(e) => {
            bail!("Error reading PGM header: {}", e);
        }
    };

    println!("Image info:");
    println!("{}", "-".repeat(79));
    println!("Format:         {}", header.format);
    println!("Width:          {}", header.width);
    println!("Height:         {}", header.height);
    println!("Maximum value:  {}", header.max_value);
    println!("Bytes/sample:   {}", header.bytes_per_pixel());

    if params.header_only {
        return Ok(());
    }

    let image = match decode_pixels(&header, &mut reader) {
        Ok(image) => image,
        Err(e @ GrayMapError::TruncatedPixelData { .. }) | Err(e @ GrayMapError::MalformedPixelData { .. }) => {
            if !global.silent {
                eprintln!("Warning: {}", e);
            }
            match e.into_partial() {
                Some(image) => image,
                None => bail!("Error decoding pixel data"),
            }
        }
        Err(e) => {
            bail!("Error decoding pixel data: {}", e);
        }
    };

    print_range(&image);
    Ok(())
}

fn print_range(image: &GrayMatrix) {
    match (image.min_value(), image.max_value()) {
        (Ok(min), Ok(max)) => {
            println!("Pixel range:    {} - {}", min, max);
        }
        _ => {
            println!("Pixel range:    (empty image)");
        }
    }
}
