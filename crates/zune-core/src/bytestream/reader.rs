/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use core::fmt::Formatter;

pub use self::std_readers::ZStream;
pub use self::zcursor::ZCursor;
use crate::bytestream::{ZByteBuffer, ZByteReaderTrait};
use crate::errors::ErrorKind;
use crate::options::DecoderOptions;

mod std_readers;
mod zcursor;

/// Enumeration of possible methods to seek within an I/O object.
///
/// It is analogous to the [SeekFrom](std::io::SeekFrom) in the std library but
/// it's here so that sources which are not `std::io::Seek` can still offer seeking
#[derive(Copy, PartialEq, Eq, Clone, Debug)]
pub enum ZSeekFrom {
    /// Sets the offset to the provided number of bytes.
    Start(u64),

    /// Sets the offset to the size of this object plus the specified number of
    /// bytes.
    ///
    /// It is possible to seek beyond the end of an object, but it's an error to
    /// seek before byte 0.
    End(i64),

    /// Sets the offset to the current position plus the specified number of
    /// bytes.
    ///
    /// It is possible to seek beyond the end of an object, but it's an error to
    /// seek before byte 0.
    Current(i64)
}

impl ZSeekFrom {
    /// Convert to [SeekFrom](std::io::SeekFrom) from the `std::io` library
    pub(crate) fn to_std_seek(self) -> std::io::SeekFrom {
        match self {
            ZSeekFrom::Start(pos) => std::io::SeekFrom::Start(pos),
            ZSeekFrom::End(pos) => std::io::SeekFrom::End(pos),
            ZSeekFrom::Current(pos) => std::io::SeekFrom::Current(pos)
        }
    }
}

/// Errors raised by byte sources, readers and buffers
#[non_exhaustive]
pub enum ZByteIoError {
    StdIoError(std::io::Error),
    TryFromIntError(core::num::TryFromIntError),
    /// requested, read
    NotEnoughBytes(usize, usize),
    /// The source ended before a NUL terminator, carries the bytes buffered so far
    UnterminatedString(usize),
    /// No NUL terminator within the allowed string length
    StringTooLong(usize),
    /// index, buffer length
    IndexOutOfBounds(usize, usize),
    /// bytes needed by the layout, bytes available
    LayoutTooShort(usize, usize),
    /// The layout description could not be understood
    InvalidLayout(String),
    /// The source lacks a capability, e.g `seek`
    Unsupported(&'static str),
    Generic(&'static str),
    SeekError(&'static str)
}

impl ZByteIoError {
    /// Classify this error
    pub const fn kind(&self) -> ErrorKind {
        match self {
            ZByteIoError::NotEnoughBytes(..) | ZByteIoError::UnterminatedString(_) => {
                ErrorKind::UnexpectedEnd
            }
            ZByteIoError::IndexOutOfBounds(..) => ErrorKind::Index,
            ZByteIoError::LayoutTooShort(..)
            | ZByteIoError::InvalidLayout(_)
            | ZByteIoError::StringTooLong(_) => ErrorKind::Format,
            ZByteIoError::StdIoError(_)
            | ZByteIoError::TryFromIntError(_)
            | ZByteIoError::Unsupported(_)
            | ZByteIoError::Generic(_)
            | ZByteIoError::SeekError(_) => ErrorKind::Io
        }
    }
}

impl core::fmt::Debug for ZByteIoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            ZByteIoError::StdIoError(err) => {
                writeln!(f, "Underlying I/O error {}", err)
            }
            ZByteIoError::TryFromIntError(err) => {
                writeln!(f, "Cannot convert to int {}", err)
            }
            ZByteIoError::NotEnoughBytes(expected, found) => {
                writeln!(f, "Not enough bytes, expected {expected} but found {found}")
            }
            ZByteIoError::UnterminatedString(buffered) => {
                writeln!(
                    f,
                    "Unexpected end of file, no NUL terminator after {buffered} bytes"
                )
            }
            ZByteIoError::StringTooLong(max) => {
                writeln!(f, "No NUL terminator within {max} bytes")
            }
            ZByteIoError::IndexOutOfBounds(index, len) => {
                writeln!(f, "Index {index} out of range for buffer of length {len}")
            }
            ZByteIoError::LayoutTooShort(needed, found) => {
                writeln!(
                    f,
                    "Layout needs {needed} bytes but only {found} bytes are available"
                )
            }
            ZByteIoError::InvalidLayout(err) => {
                writeln!(f, "Invalid layout: {err}")
            }
            ZByteIoError::Unsupported(capability) => {
                writeln!(f, "Source does not support {capability}")
            }
            ZByteIoError::Generic(err) => {
                writeln!(f, "Generic I/O error: {err}")
            }
            ZByteIoError::SeekError(err) => {
                writeln!(f, "Seek error: {err}")
            }
        }
    }
}

impl core::fmt::Display for ZByteIoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for ZByteIoError {}

impl From<std::io::Error> for ZByteIoError {
    fn from(value: std::io::Error) -> Self {
        ZByteIoError::StdIoError(value)
    }
}

impl From<core::num::TryFromIntError> for ZByteIoError {
    fn from(value: core::num::TryFromIntError) -> Self {
        ZByteIoError::TryFromIntError(value)
    }
}

impl From<&'static str> for ZByteIoError {
    fn from(value: &'static str) -> Self {
        ZByteIoError::Generic(value)
    }
}

/// A reader that never trusts the sizes it is asked for.
///
/// Every physical read issued to the wrapped source asks for at most
/// `safe_block_size` bytes, larger requests are serviced block by block and
/// the output only grows by what the source actually returned.
/// A header claiming a four gigabyte payload in a ten byte file therefore
/// costs ten bytes, not four gigabytes.
///
/// Seeking and position queries are passed through to the source when it
/// supports them, see [`can_seek`](Self::can_seek).
pub struct ZReader<T: ZByteReaderTrait> {
    inner:           T,
    safe_block_size: usize
}

impl<T: ZByteReaderTrait> ZReader<T> {
    /// Create a reader with the default safe block size
    pub fn new(source: T) -> ZReader<T> {
        ZReader::new_with_options(source, &DecoderOptions::default())
    }

    /// Create a reader using the safe block size configured in `options`
    pub fn new_with_options(source: T, options: &DecoderOptions) -> ZReader<T> {
        ZReader::new_with_block_size(source, options.safe_block_size())
    }

    /// Create a reader that requests at most `safe_block_size` bytes per
    /// physical read. Zero is treated as one.
    pub fn new_with_block_size(source: T, safe_block_size: usize) -> ZReader<T> {
        ZReader {
            inner:           source,
            safe_block_size: safe_block_size.max(1)
        }
    }

    /// Destroy this reader returning
    /// the underlying source of the bytes
    /// from which we were decoding
    #[inline(always)]
    pub fn consume(self) -> T {
        self.inner
    }

    /// Mutable access to the underlying source.
    ///
    /// The reader keeps no buffered bytes, so another reader built over the
    /// returned reference continues exactly where this one stopped.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// The largest request this reader issues to its source
    pub const fn safe_block_size(&self) -> usize {
        self.safe_block_size
    }

    /// Read up to `size` bytes.
    ///
    /// Returns exactly `size` bytes unless the source ends first, in which
    /// case whatever was available is returned.
    pub fn read(&mut self, size: usize) -> Result<ZByteBuffer, ZByteIoError> {
        let mut data = Vec::with_capacity(size.min(self.safe_block_size));

        while data.len() < size {
            let start = data.len();
            let want = (size - start).min(self.safe_block_size);

            data.resize(start + want, 0);
            let read = self.inner.read_bytes(&mut data[start..])?;
            data.truncate(start + read);

            if read == 0 {
                break;
            }
        }
        Ok(ZByteBuffer::new(data))
    }

    /// Read exactly `size` bytes or fail with [`ZByteIoError::NotEnoughBytes`]
    pub fn read_exact(&mut self, size: usize) -> Result<ZByteBuffer, ZByteIoError> {
        let bytes = self.read(size)?;
        if bytes.len() != size {
            return Err(ZByteIoError::NotEnoughBytes(size, bytes.len()));
        }
        Ok(bytes)
    }

    /// Read exactly `N` bytes into an array
    pub fn read_fixed_bytes_or_error<const N: usize>(&mut self) -> Result<[u8; N], ZByteIoError> {
        let mut byte_store: [u8; N] = [0; N];
        let mut filled = 0;

        while filled < N {
            let end = N.min(filled + self.safe_block_size);
            let read = self.inner.read_bytes(&mut byte_store[filled..end])?;
            if read == 0 {
                return Err(ZByteIoError::NotEnoughBytes(N, filled));
            }
            filled += read;
        }
        Ok(byte_store)
    }

    /// Read a line, byte by byte.
    ///
    /// Stops after a `\n` (which is kept) or once `max_size` bytes have been
    /// read, whichever comes first, or at the end of the source.
    ///
    /// This reads one byte per call into the source, it promises bounded
    /// work, not speed. Formats that read many lines should put their own
    /// buffering on top.
    pub fn read_line(&mut self, max_size: usize) -> Result<ZByteBuffer, ZByteIoError> {
        let mut line = Vec::new();
        let mut byte = [0_u8; 1];

        while line.len() < max_size {
            if self.inner.read_bytes(&mut byte)? == 0 {
                break;
            }
            line.push(byte[0]);

            if byte[0] == b'\n' {
                break;
            }
        }
        Ok(ZByteBuffer::new(line))
    }

    /// Read a line of at most `safe_block_size` bytes
    pub fn read_line_default(&mut self) -> Result<ZByteBuffer, ZByteIoError> {
        self.read_line(self.safe_block_size)
    }

    /// Read a line as text.
    ///
    /// Header text is treated as ISO-8859-1, every byte maps to the
    /// code point of the same value so this never fails on content.
    pub fn read_text_line(&mut self, max_size: usize) -> Result<String, ZByteIoError> {
        let line = self.read_line(max_size)?;
        Ok(line.as_bytes().iter().map(|&c| char::from(c)).collect())
    }

    /// Whether the underlying source can seek
    pub fn can_seek(&mut self) -> bool {
        self.inner.as_seekable().is_some()
    }

    /// Seek the underlying source, failing with [`ZByteIoError::Unsupported`]
    /// if it cannot
    pub fn seek(&mut self, from: ZSeekFrom) -> Result<u64, ZByteIoError> {
        match self.inner.as_seekable() {
            Some(source) => source.z_seek(from),
            None => Err(ZByteIoError::Unsupported("seek"))
        }
    }

    #[inline]
    pub fn set_position(&mut self, position: u64) -> Result<(), ZByteIoError> {
        self.seek(ZSeekFrom::Start(position))?;
        Ok(())
    }

    /// Current position of the underlying source, failing with
    /// [`ZByteIoError::Unsupported`] if it cannot tell
    pub fn position(&mut self) -> Result<u64, ZByteIoError> {
        match self.inner.as_positionable() {
            Some(source) => source.z_position(),
            None => Err(ZByteIoError::Unsupported("position"))
        }
    }

    /// Move `num` bytes forward.
    ///
    /// Seeks when the source supports it, otherwise reads and discards the
    /// bytes in bounded blocks and fails if the source ends first.
    pub fn skip(&mut self, num: u64) -> Result<(), ZByteIoError> {
        if self.can_seek() {
            let offset = i64::try_from(num)?;
            self.seek(ZSeekFrom::Current(offset))?;
            return Ok(());
        }
        let mut remaining = num;
        let mut scratch = vec![0; usize::try_from(num)?.min(self.safe_block_size)];

        while remaining > 0 {
            let want = usize::try_from(remaining)?.min(scratch.len());
            let read = self.inner.read_bytes(&mut scratch[..want])?;
            if read == 0 {
                let skipped = usize::try_from(num - remaining)?;
                return Err(ZByteIoError::NotEnoughBytes(usize::try_from(num)?, skipped));
            }
            remaining -= read as u64;
        }
        Ok(())
    }

    /// Read up to `size` bytes and move back to where we were.
    ///
    /// Requires a seekable source.
    pub fn peek(&mut self, size: usize) -> Result<ZByteBuffer, ZByteIoError> {
        if !self.can_seek() {
            return Err(ZByteIoError::Unsupported("seek"));
        }
        let bytes = self.read(size)?;
        let rewind = -i64::try_from(bytes.len())?;
        self.seek(ZSeekFrom::Current(rewind))?;
        Ok(bytes)
    }
}

impl<T> std::io::Read for ZReader<T>
where
    T: ZByteReaderTrait
{
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        use std::io::ErrorKind;
        let end = buf.len().min(self.safe_block_size);
        self.inner
            .read_bytes(&mut buf[..end])
            .map_err(|e| std::io::Error::new(ErrorKind::Other, format!("{:?}", e)))
    }
}
