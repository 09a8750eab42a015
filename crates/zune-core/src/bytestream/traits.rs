/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! Traits for byte sources read by the zune header parsers
//!
//! A source only has to know how to hand out bytes. Seeking and reporting a
//! position are optional capabilities, a source that supports them returns
//! itself from [`as_seekable`](ZByteReaderTrait::as_seekable) or
//! [`as_positionable`](ZByteReaderTrait::as_positionable).

use crate::bytestream::reader::{ZByteIoError, ZSeekFrom};

/// The de-facto Input trait implemented for byte sources.
///
/// # Considerations
///
/// If you have an in memory buffer, prefer [`ZCursor`](crate::bytestream::ZCursor) over [`Cursor`](std::io::Cursor),
/// both work but `ZCursor` does not go through `std::io` error handling.
///
/// Forward only readers (pipes, sockets, decompressors) can be wrapped in
/// [`ZStream`](crate::bytestream::ZStream), parsers that need to seek will then
/// report the missing capability as an error when they reach that point.
pub trait ZByteReaderTrait {
    /// Read bytes into `buf` returning how many bytes were read or an error if one occurred
    ///
    /// This doesn't guarantee that buf will be filled, a return of `Ok(0)`
    /// for a non-empty `buf` means the source is exhausted.
    ///
    /// ## Arguments
    /// - `buf`: The buffer to fill with bytes
    ///
    /// ## Returns
    ///  - `Ok(usize)` - Actual bytes read into the buffer
    ///  - `Err()` - The error encountered when reading bytes for which we couldn't recover
    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<usize, ZByteIoError>;

    /// Return this source as something that can seek, if it can.
    fn as_seekable(&mut self) -> Option<&mut dyn ZSeekable> {
        None
    }

    /// Return this source as something that can report its position, if it can.
    fn as_positionable(&mut self) -> Option<&mut dyn ZPositionable> {
        None
    }

    /// A human readable name for the source, used in diagnostics
    fn name(&self) -> &'static str;
}

/// Sources that can move their read position
pub trait ZSeekable {
    /// Seek into a new position from the buffer
    ///
    /// This is similar to the [seek](std::io::Seek::seek) function in the [Seek](std::io::Seek) trait
    /// and returns the new position from the start of the source
    fn z_seek(&mut self, from: ZSeekFrom) -> Result<u64, ZByteIoError>;
}

/// Sources that can report their current read position
pub trait ZPositionable {
    /// Return the current position of the inner cursor.
    ///
    /// This can be used to check the advancement of the cursor
    fn z_position(&mut self) -> Result<u64, ZByteIoError>;
}

impl<T: ZByteReaderTrait + ?Sized> ZByteReaderTrait for &mut T {
    #[inline(always)]
    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<usize, ZByteIoError> {
        (**self).read_bytes(buf)
    }

    fn as_seekable(&mut self) -> Option<&mut dyn ZSeekable> {
        (**self).as_seekable()
    }

    fn as_positionable(&mut self) -> Option<&mut dyn ZPositionable> {
        (**self).as_positionable()
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}
