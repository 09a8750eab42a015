/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
use std::fs::File;
use std::io::{self, BufReader, Read, Seek};

use crate::bytestream::{ZByteIoError, ZByteReaderTrait, ZPositionable, ZSeekFrom, ZSeekable};

/// Read into `buf`, retrying reads interrupted by signals
fn read_retrying<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<usize, ZByteIoError> {
    loop {
        match reader.read(buf) {
            Ok(read) => return Ok(read),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(ZByteIoError::from(e))
        }
    }
}

macro_rules! impl_seekable_std_source {
    ($name:literal, [$($generics:tt)*], $ty:ty) => {
        impl<$($generics)*> ZByteReaderTrait for $ty {
            #[inline(always)]
            fn read_bytes(&mut self, buf: &mut [u8]) -> Result<usize, ZByteIoError> {
                read_retrying(self, buf)
            }

            fn as_seekable(&mut self) -> Option<&mut dyn ZSeekable> {
                Some(self)
            }

            fn as_positionable(&mut self) -> Option<&mut dyn ZPositionable> {
                Some(self)
            }

            fn name(&self) -> &'static str {
                $name
            }
        }

        impl<$($generics)*> ZSeekable for $ty {
            #[inline(always)]
            fn z_seek(&mut self, from: ZSeekFrom) -> Result<u64, ZByteIoError> {
                self.seek(from.to_std_seek()).map_err(ZByteIoError::from)
            }
        }

        impl<$($generics)*> ZPositionable for $ty {
            fn z_position(&mut self) -> Result<u64, ZByteIoError> {
                self.stream_position().map_err(ZByteIoError::from)
            }
        }
    };
}

impl_seekable_std_source!("Cursor<T>", [T: AsRef<[u8]>], io::Cursor<T>);
impl_seekable_std_source!("BufReader<T>", [T: Read + Seek], BufReader<T>);
impl_seekable_std_source!("File", [], File);

/// A forward only source over any [`Read`] implementation.
///
/// It supports neither seeking nor position queries, parsers that need
/// either fail with [`ZByteIoError::Unsupported`] when they get there.
pub struct ZStream<R: Read> {
    inner: R
}

impl<R: Read> ZStream<R> {
    pub fn new(reader: R) -> ZStream<R> {
        ZStream { inner: reader }
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> ZByteReaderTrait for ZStream<R> {
    #[inline(always)]
    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<usize, ZByteIoError> {
        read_retrying(&mut self.inner, buf)
    }

    fn name(&self) -> &'static str {
        "ZStream<R>"
    }
}
