/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Image header sniffing
//!
//! This crate looks at the first few bytes of a file, decides which of the
//! zune header parsers understands it and runs that parser, returning an
//! [`ImageHeader`](zune_core::header::ImageHeader) describing the image and how its pixels
//! would be decoded.
//!
//! Supported formats are ICO, OpenEXR, lossy WebP, PNG and BMP.
//!
//! # Example
//! ```
//! use zune_core::bytestream::ZCursor;
//! use zune_core::options::DecoderOptions;
//! use zune_image::codecs::{guess_format, read_header, ImageFormat};
//!
//! let data = b"not an image";
//! assert_eq!(guess_format(data), ImageFormat::Unknown);
//! assert!(read_header(ZCursor::new(data), DecoderOptions::default()).is_err());
//! ```
#![forbid(unsafe_code)]

pub mod codecs;
pub mod errors;
