/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use crate::bytestream::layout::{Layout, Unpacked};
use crate::bytestream::ZByteIoError;

/// An owned, immutable run of bytes with bounds checked accessors.
///
/// Every accessor that takes an index fails with
/// [`ZByteIoError::IndexOutOfBounds`] when any byte it needs lies outside
/// the buffer, reads never wrap or silently truncate.
#[derive(Clone, Default, Eq, PartialEq, Hash)]
pub struct ZByteBuffer {
    data: Vec<u8>
}

impl ZByteBuffer {
    pub fn new(data: Vec<u8>) -> ZByteBuffer {
        ZByteBuffer { data }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }

    /// Return a new buffer holding the bytes of `self` followed by the bytes of `other`
    pub fn concat(&self, other: &ZByteBuffer) -> ZByteBuffer {
        let mut data = Vec::with_capacity(self.len() + other.len());
        data.extend_from_slice(&self.data);
        data.extend_from_slice(&other.data);
        ZByteBuffer::new(data)
    }

    /// The byte at `index`
    #[inline]
    pub fn byte_at(&self, index: usize) -> Result<u8, ZByteIoError> {
        self.data
            .get(index)
            .copied()
            .ok_or(ZByteIoError::IndexOutOfBounds(index, self.len()))
    }

    /// `N` bytes starting at `index`
    #[inline]
    pub fn fixed_bytes<const N: usize>(&self, index: usize) -> Result<[u8; N], ZByteIoError> {
        let mut space = [0; N];
        match index.checked_add(N).and_then(|end| self.data.get(index..end)) {
            Some(bytes) => {
                space.copy_from_slice(bytes);
                Ok(space)
            }
            None => Err(ZByteIoError::IndexOutOfBounds(
                index.saturating_add(N).saturating_sub(1),
                self.len()
            ))
        }
    }

    /// A copy of the bytes in `[start, end)`
    pub fn slice(&self, start: usize, end: usize) -> Result<ZByteBuffer, ZByteIoError> {
        if start > end {
            return Err(ZByteIoError::IndexOutOfBounds(start, self.len()));
        }
        match self.data.get(start..end) {
            Some(bytes) => Ok(ZByteBuffer::new(bytes.to_vec())),
            None => Err(ZByteIoError::IndexOutOfBounds(end, self.len()))
        }
    }

    /// Whether the buffer begins with `pattern`.
    ///
    /// A buffer shorter than the pattern never matches.
    pub fn starts_with(&self, pattern: &[u8]) -> bool {
        self.data.starts_with(pattern)
    }

    /// Position of the first occurrence of `pattern`, `None` if it does not occur.
    ///
    /// The empty pattern is found at position 0.
    pub fn find(&self, pattern: &[u8]) -> Option<usize> {
        if pattern.is_empty() {
            return Some(0);
        }
        self.data
            .windows(pattern.len())
            .position(|window| window == pattern)
    }

    /// Decode `layout` starting at `offset`.
    ///
    /// Fails with [`ZByteIoError::LayoutTooShort`] if the buffer does not hold
    /// enough bytes for the whole layout. A layout producing exactly one value
    /// returns [`Unpacked::Single`].
    pub fn unpack(&self, layout: &Layout, offset: usize) -> Result<Unpacked, ZByteIoError> {
        let needed = layout.size();
        let available = self.len().saturating_sub(offset);

        if available < needed {
            return Err(ZByteIoError::LayoutTooShort(needed, available));
        }
        Ok(layout.decode(&self.data[offset..offset + needed]))
    }
}

macro_rules! get_single_type {
    ($le_name:tt,$be_name:tt,$int_type:tt) => {
        impl ZByteBuffer {
            #[doc=concat!("Read a little endian ",stringify!($int_type)," starting at `index`")]
            #[inline]
            pub fn $le_name(&self, index: usize) -> Result<$int_type, ZByteIoError> {
                const SIZE_OF_VAL: usize = core::mem::size_of::<$int_type>();

                self.fixed_bytes::<SIZE_OF_VAL>(index)
                    .map($int_type::from_le_bytes)
            }

            #[doc=concat!("Read a big endian ",stringify!($int_type)," starting at `index`")]
            #[inline]
            pub fn $be_name(&self, index: usize) -> Result<$int_type, ZByteIoError> {
                const SIZE_OF_VAL: usize = core::mem::size_of::<$int_type>();

                self.fixed_bytes::<SIZE_OF_VAL>(index)
                    .map($int_type::from_be_bytes)
            }
        }
    };
}

get_single_type!(int16_le, int16_be, u16);
get_single_type!(int32_le, int32_be, u32);

impl core::fmt::Debug for ZByteBuffer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        const PREVIEW: usize = 16;

        write!(f, "ZByteBuffer({} bytes: ", self.len())?;
        for byte in self.data.iter().take(PREVIEW) {
            write!(f, "{byte:02x}")?;
        }
        if self.len() > PREVIEW {
            write!(f, "..")?;
        }
        write!(f, ")")
    }
}

impl From<Vec<u8>> for ZByteBuffer {
    fn from(value: Vec<u8>) -> Self {
        ZByteBuffer::new(value)
    }
}

impl From<&[u8]> for ZByteBuffer {
    fn from(value: &[u8]) -> Self {
        ZByteBuffer::new(value.to_vec())
    }
}

impl AsRef<[u8]> for ZByteBuffer {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}
