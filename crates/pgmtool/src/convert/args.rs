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
use crate::args::*;
use bpaf::{construct, long, Parser};
use std::path::PathBuf;

#[derive(Clone, Debug)]
pub(crate) struct ConvertParams {
    pub(crate) in_file: PathBuf,
    pub(crate) out_file: PathBuf,
    pub(crate) format: OutputFormat,
    pub(crate) values_per_line: Option<usize>,
    pub(crate) strict: bool,
}

fn format_parser() -> impl Parser<OutputFormat> {
    long("format")
        .short('f')
        .argument::<OutputFormat>("FORMAT")
        .help("Output format: 'ascii' (P2) or 'raw' (P5)")
}

fn values_per_line_parser() -> impl Parser<Option<usize>> {
    long("values-per-line")
        .argument::<usize>("COUNT")
        .help("Number of samples per line in ASCII output")
        .guard(|&count| count > 0, "Count must be at least 1")
        .optional()
}

fn strict_parser() -> impl Parser<bool> {
    long("strict")
        .switch()
        .help("Fail instead of converting a truncated input image")
}

pub(crate) fn convert_parser() -> impl Parser<ConvertParams> {
    let in_file = in_file_parser();
    let out_file = out_file_parser();
    let format = format_parser();
    let values_per_line = values_per_line_parser();
    let strict = strict_parser();

    construct!(ConvertParams {
        in_file,
        out_file,
        format,
        values_per_line,
        strict,
    })
}
