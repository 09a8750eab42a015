/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! A BMP and DIB header parser
//!
//! This crate reads the headers of Windows bitmaps and reports what a pixel
//! decoder needs to get at the pixels: the image mode, the dimensions and a
//! single tile describing where the rows start, how they are stored and in
//! which direction they run.
//!
//! Both complete `.bmp` files (with the 14 byte `BM` file header) and bare
//! device independent bitmaps, such as the ones embedded in icon files, are
//! supported.
//!
//! # Supported layouts
//! - Info headers of 12, 16, 40, 52, 56, 64, 108 and 124 bytes
//! - 1, 4 and 8 bit paletted images, greyscale palettes map to `1`/`L`
//! - 16, 24 and 32 bit images, including `BITFIELDS` masks
//! - RLE4 and RLE8 compressed images (reported with the `bmp_rle` decoder)
//!
//! # Example
//! ```no_run
//! use zune_bmp::BmpDecoder;
//! use zune_core::bytestream::ZCursor;
//!
//! fn main() -> Result<(), zune_bmp::BmpDecoderErrors> {
//!     let data = std::fs::read("image.bmp").unwrap();
//!     let mut decoder = BmpDecoder::new(ZCursor::new(data));
//!     let header = decoder.decode_headers()?;
//!     println!("{:?} {}", header.size(), header.mode());
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]
#![macro_use]

pub use crate::common::BmpCompression;
pub use crate::decoder::{probe_bmp, BmpDecoder};
pub use crate::errors::BmpDecoderErrors;

mod common;
mod decoder;
mod errors;
