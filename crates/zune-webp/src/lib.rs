/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! A WebP header parser
//!
//! Supports simple lossy WebP files, a RIFF container holding a single
//! `VP8 ` chunk whose first frame is a visible key frame.
//! Lossless (`VP8L`) and extended (`VP8X`) files are not recognised.
//!
//! The image is always reported as `RGB` (VP8 stores subsampled YCbCr) with
//! one `webp` tile covering the whole image and pointing at the start of the file.
#![forbid(unsafe_code)]

pub use crate::decoder::{probe_webp, WebpDecoder};
pub use crate::errors::WebpDecodeErrors;

mod decoder;
mod errors;
