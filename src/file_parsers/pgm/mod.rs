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

//! Reader and writer for PGM (Portable Gray Map) images.
//!
//! A PGM file starts with a magic number (`P2` for plain text samples, `P5` for raw binary
//! samples), followed by the width, height and maximum value as decimal text. Tokens may be
//! separated by any run of whitespace and `#` comments. A single whitespace byte follows the
//! maximum value, after which the pixel data begins. Raw samples are one byte wide if the
//! maximum value is below 256, and two bytes wide, most significant byte first, otherwise.

mod decode;
mod encode;
mod header;

pub use decode::{decode, decode_from, decode_pixels};
pub use encode::{encode, encode_to, encode_with_options};
pub use header::{read_header, PgmHeader};
