/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! A Windows icon (`.ico`) parser
//!
//! An icon file is a directory of images of different sizes and depths.
//! The parser reads the directory, picks the largest image and describes it,
//! handing the actual image to the BMP or PNG parser depending on how it is
//! stored.
//!
//! # Example
//! ```no_run
//! use zune_core::bytestream::ZCursor;
//! use zune_ico::IcoDecoder;
//!
//! fn main() -> Result<(), zune_ico::IcoDecodeErrors> {
//!     let data = std::fs::read("favicon.ico").unwrap();
//!     let mut decoder = IcoDecoder::new(ZCursor::new(data));
//!     let header = decoder.decode_headers()?;
//!
//!     for entry in decoder.entries() {
//!         println!("{}x{} at {} bits", entry.width, entry.height, entry.bits);
//!     }
//!     println!("picked {:?}", header.size());
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub use crate::decoder::{probe_ico, IcoDecoder, IcoEntry};
pub use crate::errors::IcoDecodeErrors;

mod decoder;
mod errors;
