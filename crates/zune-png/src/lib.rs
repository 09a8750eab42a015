/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! A png header parser
//!
//! Reads the signature and the `IHDR` chunk of a PNG image, walks the
//! ancillary chunks up to the first `IDAT` chunk and reports the image as a
//! single `zip` tile starting at the compressed image data.
//!
//! Chunks are read through a bounded reader, so a chunk length taken from a
//! hostile file costs at most what the file actually contains.
//!
//! # Features
//! - `crc`: Confirm chunk checksums (can be turned off at runtime with
//!   [`DecoderOptions::png_set_confirm_crc`](zune_core::options::DecoderOptions::png_set_confirm_crc))
//! - `log`: Trace what the parser sees through the `log` crate
//!
//! # Example
//!```no_run
//! use zune_core::bytestream::ZCursor;
//! use zune_png::PngDecoder;
//!
//! let mut decoder = PngDecoder::new(ZCursor::new(b""));
//! let header = decoder.decode_headers().unwrap();
//! println!("{} {:?}", header.mode(), header.size());
//! ```
#![forbid(unsafe_code)]
#![macro_use]

pub use crate::decoder::{probe_png, PngDecoder, PNG_SIGNATURE};
pub use crate::enums::{InterlaceMethod, PngChunkType, PngColor};
pub use crate::error::PngDecodeErrors;

#[cfg(feature = "crc")]
mod crc;
mod decoder;
mod enums;
mod error;
mod headers;
