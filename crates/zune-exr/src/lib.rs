/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! An OpenEXR header parser
//!
//! OpenEXR files start with a header made of named, typed attributes.
//! This crate reads the attributes of the first header, converts the
//! standard attribute types into typed values and works out the image mode
//! and size from the `channels` and `displayWindow` attributes.
//!
//! Pixel data is not described, the returned header carries no tiles.
//!
//! Attribute values whose type is unknown, or whose bytes do not match their
//! type, are kept as [`AttributeValue::Raw`](zune_core::header::AttributeValue::Raw).
//!
//! # Example
//! ```no_run
//! use zune_core::bytestream::ZCursor;
//! use zune_exr::ExrDecoder;
//!
//! fn main() -> Result<(), zune_exr::ExrDecodeErrors> {
//!     let data = std::fs::read("image.exr").unwrap();
//!     let header = ExrDecoder::new(ZCursor::new(data)).decode_headers()?;
//!
//!     for (name, value) in header.attributes() {
//!         println!("{name}: {value:?}");
//!     }
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub use crate::decoder::{probe_exr, ExrDecoder};
pub use crate::errors::ExrDecodeErrors;

mod attributes;
mod decoder;
mod errors;
