/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Core routines shared by the zune header parsers
//!
//! This crate provides the pieces every format parser builds on
//!
//! - A bounds checked byte buffer with endian aware integer reads and
//!   fixed layout unpacking
//! - A bounded reader that never asks its source for more than a configured
//!   block size in one physical read, so size fields taken from untrusted
//!   headers cannot force one huge allocation
//! - An incremental attribute stream for NUL terminated key/value headers
//! - The header model handed to pixel decoders (mode, size, tile descriptors
//!   and format attributes)
//! - Decoder options shared by all parsers
//!
//! # Features
//!  - `log`: Forward the internal logging macros to the [`log`](https://docs.rs/log) crate.
//!
//!  - `serde`: Enables serializing of the header model
#![forbid(unsafe_code)]
#![macro_use]

pub mod bytestream;
pub mod errors;
pub mod header;
pub mod log;
pub mod mode;
pub mod options;
mod serde;
