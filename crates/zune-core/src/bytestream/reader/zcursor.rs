/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
use crate::bytestream::{ZByteIoError, ZByteReaderTrait, ZPositionable, ZSeekFrom, ZSeekable};

/// An in memory source.
///
/// Reads copy out of the wrapped buffer and never fail, reading past the end
/// returns zero bytes. Seeking past the end is allowed, seeking before the
/// start is an error.
pub struct ZCursor<T: AsRef<[u8]>> {
    stream:   T,
    position: usize
}

impl<T: AsRef<[u8]>> ZCursor<T> {
    pub fn new(buffer: T) -> ZCursor<T> {
        ZCursor {
            stream:   buffer,
            position: 0
        }
    }

    /// Bytes between the current position and the end of the buffer
    pub fn remaining(&self) -> usize {
        self.stream.as_ref().len().saturating_sub(self.position)
    }

    pub fn into_inner(self) -> T {
        self.stream
    }
}

impl<T: AsRef<[u8]>> ZByteReaderTrait for ZCursor<T> {
    #[inline(always)]
    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<usize, ZByteIoError> {
        let data = self.stream.as_ref();
        let start = self.position.min(data.len());
        let end = start.saturating_add(buf.len()).min(data.len());

        buf[..end - start].copy_from_slice(&data[start..end]);
        self.position = end.max(self.position);

        Ok(end - start)
    }

    fn as_seekable(&mut self) -> Option<&mut dyn ZSeekable> {
        Some(self)
    }

    fn as_positionable(&mut self) -> Option<&mut dyn ZPositionable> {
        Some(self)
    }

    #[inline(always)]
    fn name(&self) -> &'static str {
        "ZCursor<T>"
    }
}

impl<T: AsRef<[u8]>> ZSeekable for ZCursor<T> {
    fn z_seek(&mut self, from: ZSeekFrom) -> Result<u64, ZByteIoError> {
        let (base, offset) = match from {
            ZSeekFrom::Start(position) => {
                self.position = usize::try_from(position)?;
                return Ok(position);
            }
            ZSeekFrom::End(offset) => (self.stream.as_ref().len(), offset),
            ZSeekFrom::Current(offset) => (self.position, offset)
        };
        let new_position = i64::try_from(base)?
            .checked_add(offset)
            .ok_or(ZByteIoError::SeekError("seek position overflowed"))?;

        if new_position < 0 {
            return Err(ZByteIoError::SeekError("cannot seek before the start"));
        }
        self.position = usize::try_from(new_position)?;
        Ok(self.position as u64)
    }
}

impl<T: AsRef<[u8]>> ZPositionable for ZCursor<T> {
    #[inline(always)]
    fn z_position(&mut self) -> Result<u64, ZByteIoError> {
        Ok(self.position as u64)
    }
}
