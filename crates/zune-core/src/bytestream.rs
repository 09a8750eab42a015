/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Byte readers and buffers for header parsing
//!
//! - [`ZByteBuffer`]: an owned, bounds checked byte range with endian aware
//!   integer reads, searching and fixed layout unpacking.
//! - [`ZReader`]: wraps any [`ZByteReaderTrait`] source and caps the size of
//!   every physical read it issues.
//! - [`ZAttributeStream`]: incremental reads of NUL terminated strings and
//!   sized values on top of a [`ZReader`].
//!
//! Sources report optional seek and position support through
//! [`ZSeekable`] and [`ZPositionable`]; readers query for them instead of
//! assuming them.
pub use attributes::ZAttributeStream;
pub use buffer::ZByteBuffer;
pub use layout::{Endian, Field, FieldKind, Layout, Unpacked, Value};
pub use reader::{ZByteIoError, ZCursor, ZReader, ZSeekFrom, ZStream};
pub use traits::{ZByteReaderTrait, ZPositionable, ZSeekable};

mod attributes;
mod buffer;
mod layout;
mod reader;
mod traits;
