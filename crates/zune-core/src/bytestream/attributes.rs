/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use crate::bytestream::{ZByteBuffer, ZByteIoError, ZByteReaderTrait, ZReader};

/// Bytes requested from the source each time a string needs more data
const STRING_CHUNK_SIZE: usize = 512;

/// Incremental reader for headers made of NUL terminated names and sized values.
///
/// Strings are read in small chunks, so the stream usually holds a few bytes
/// past what it has returned. Those bytes are kept and served first by the
/// next call, the source is only asked for what is missing.
pub struct ZAttributeStream<'a, T: ZByteReaderTrait> {
    reader:     &'a mut ZReader<T>,
    buffer:     Vec<u8>,
    max_string: Option<usize>
}

impl<'a, T: ZByteReaderTrait> ZAttributeStream<'a, T> {
    pub fn new(reader: &'a mut ZReader<T>) -> ZAttributeStream<'a, T> {
        ZAttributeStream {
            reader,
            buffer: Vec::new(),
            max_string: None
        }
    }

    /// Fail strings longer than `max` bytes instead of buffering until a NUL shows up
    pub fn with_max_string_length(mut self, max: usize) -> ZAttributeStream<'a, T> {
        self.max_string = Some(max);
        self
    }

    /// Number of bytes read from the source but not yet returned
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    /// Read up to, and discard, the next NUL byte and return what came before it.
    ///
    /// Fails with [`ZByteIoError::UnterminatedString`] if the source ends first,
    /// or with [`ZByteIoError::StringTooLong`] if a maximum length is set and
    /// no NUL appears within it.
    pub fn read_string(&mut self) -> Result<Vec<u8>, ZByteIoError> {
        let mut scanned = 0;

        loop {
            if let Some(end) = self.buffer[scanned..].iter().position(|&c| c == 0) {
                let end = scanned + end;
                self.check_string_length(end)?;
                let rest = self.buffer.split_off(end + 1);
                let mut value = core::mem::replace(&mut self.buffer, rest);
                // drop the terminator
                value.truncate(end);
                return Ok(value);
            }
            scanned = self.buffer.len();
            self.check_string_length(scanned)?;

            let chunk = self.reader.read(STRING_CHUNK_SIZE)?;
            if chunk.is_empty() {
                return Err(ZByteIoError::UnterminatedString(self.buffer.len()));
            }
            self.buffer.extend_from_slice(chunk.as_bytes());
        }
    }

    fn check_string_length(&self, length: usize) -> Result<(), ZByteIoError> {
        match self.max_string {
            Some(max) if length > max => Err(ZByteIoError::StringTooLong(max)),
            _ => Ok(())
        }
    }

    /// Read exactly `size` bytes.
    ///
    /// Buffered bytes are used first, the source is asked only for the
    /// shortfall. Fails with [`ZByteIoError::NotEnoughBytes`] if the source
    /// cannot supply it.
    pub fn read(&mut self, size: usize) -> Result<ZByteBuffer, ZByteIoError> {
        if self.buffer.len() < size {
            let shortfall = size - self.buffer.len();
            let more = self.reader.read(shortfall)?;

            if more.len() < shortfall {
                return Err(ZByteIoError::NotEnoughBytes(
                    size,
                    self.buffer.len() + more.len()
                ));
            }
            self.buffer.extend_from_slice(more.as_bytes());
        }
        let rest = self.buffer.split_off(size);
        let value = core::mem::replace(&mut self.buffer, rest);

        Ok(ZByteBuffer::new(value))
    }
}
