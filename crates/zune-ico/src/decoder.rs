/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::collections::BTreeSet;

use zune_bmp::BmpDecoder;
use zune_core::bytestream::{ZByteBuffer, ZByteIoError, ZByteReaderTrait, ZReader};
use zune_core::header::{AttributeValue, BoundingBox, ImageHeader};
use zune_core::log::trace;
use zune_core::options::DecoderOptions;
use zune_png::{probe_png, PngDecoder};

use crate::IcoDecodeErrors;

const ICO_MAGIC: [u8; 4] = [0, 0, 1, 0];
const ICO_HEADER_SIZE: usize = 6;
const ICO_ENTRY_SIZE: usize = 16;

/// Probe some bytes to see
/// if they consist of an icon file
pub fn probe_ico(bytes: &[u8]) -> bool {
    bytes.starts_with(&ICO_MAGIC)
}

/// One image in the icon directory
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct IcoEntry {
    /// Width in pixels, a stored zero means 256
    pub width:  u32,
    /// Height in pixels, a stored zero means 256
    pub height: u32,
    /// Palette size, zero when the image has no palette
    pub colors: u8,
    pub planes: u16,
    pub bits:   u16,
    /// Size of the image data
    pub bytes:  u32,
    /// Where the image data starts
    pub offset: u32
}

impl IcoEntry {
    fn from_bytes(entry: &ZByteBuffer) -> Result<IcoEntry, IcoDecodeErrors> {
        let dimension = |byte: u8| if byte == 0 { 256 } else { u32::from(byte) };

        Ok(IcoEntry {
            width:  dimension(entry.byte_at(0)?),
            height: dimension(entry.byte_at(1)?),
            colors: entry.byte_at(2)?,
            planes: entry.int16_le(4)?,
            bits:   entry.int16_le(6)?,
            bytes:  entry.int32_le(8)?,
            offset: entry.int32_le(12)?
        })
    }

    /// Ordering used to pick the image to describe, larger is better
    fn rank(&self) -> ((u32, u32), u16, u32, u32) {
        ((self.width, self.height), self.bits, self.offset, self.bytes)
    }

    pub const fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// An icon directory parser
pub struct IcoDecoder<T>
where
    T: ZByteReaderTrait
{
    stream:   ZReader<T>,
    options:  DecoderOptions,
    entries:  Vec<IcoEntry>,
    selected: Option<usize>
}

impl<T> IcoDecoder<T>
where
    T: ZByteReaderTrait
{
    pub fn new(data: T) -> IcoDecoder<T> {
        IcoDecoder::new_with_options(data, DecoderOptions::default())
    }

    pub fn new_with_options(data: T, options: DecoderOptions) -> IcoDecoder<T> {
        IcoDecoder {
            stream: ZReader::new_with_options(data, &options),
            options,
            entries: Vec::new(),
            selected: None
        }
    }

    /// Images listed in the directory, in file order.
    ///
    /// Empty until [`decode_headers`](Self::decode_headers) has read the directory
    pub fn entries(&self) -> &[IcoEntry] {
        &self.entries
    }

    /// The entry [`decode_headers`](Self::decode_headers) described
    pub fn selected_entry(&self) -> Option<&IcoEntry> {
        self.selected.and_then(|index| self.entries.get(index))
    }

    /// Read the directory and describe its largest image.
    ///
    /// The largest image is the one with the greatest `(size, bits, offset, bytes)`,
    /// compared in that order, the first one wins among equals.
    ///
    /// PNG images report their mode and size with no tiles, bitmaps report
    /// one tile covering the size given in the directory. The source must
    /// be seekable, entry offsets are taken relative to where parsing started.
    pub fn decode_headers(&mut self) -> Result<ImageHeader, IcoDecodeErrors> {
        // entry offsets are relative to the start of the directory
        let start = self.stream.position().unwrap_or(0);

        let header = self.stream.read(ICO_HEADER_SIZE)?;
        if !probe_ico(header.as_bytes()) {
            return Err(IcoDecodeErrors::NotAnIcoFile);
        }
        if header.len() != ICO_HEADER_SIZE {
            let err = ZByteIoError::NotEnoughBytes(ICO_HEADER_SIZE, header.len());
            return Err(IcoDecodeErrors::IoErrors(err));
        }
        let count = header.int16_le(4)?;

        if count == 0 {
            return Err(IcoDecodeErrors::GenericStatic("ICO file has no images"));
        }

        self.entries.clear();
        for _ in 0..count {
            let entry = self.stream.read_exact(ICO_ENTRY_SIZE)?;
            self.entries.push(IcoEntry::from_bytes(&entry)?);
        }

        let (index, entry) = self.pick_largest()?;
        self.selected = Some(index);

        trace!("Icon entries: {}", self.entries.len());
        trace!("Selected entry {}: {:?}", index, entry);

        let offset = start + u64::from(entry.offset);
        self.stream.set_position(offset)?;
        let prefix = self.stream.peek(16)?;

        let header = if probe_png(prefix.as_bytes()) {
            trace!("Entry is stored as PNG");

            let mut decoder = PngDecoder::new_with_options(self.stream.get_mut(), self.options);
            let png = decoder.decode_headers()?;

            ImageHeader::new("ICO", png.mode(), png.size())
        } else {
            trace!("Entry is stored as a bitmap");

            let mut decoder = BmpDecoder::new_with_options(self.stream.get_mut(), self.options);
            let bitmap = decoder.decode_dib_headers(offset)?;

            let mode = bitmap.mode();
            let attributes = bitmap.attributes().clone();
            // the stored height covers the colour and mask bitmaps, the
            // directory size covers just the image
            let bounding_box = BoundingBox::from_size(entry.width, entry.height);
            let tiles = bitmap
                .into_tiles()
                .into_iter()
                .map(|tile| tile.with_bounding_box(bounding_box))
                .collect();

            ImageHeader::new("ICO", mode, entry.size())
                .with_attributes(attributes)
                .with_tiles(tiles)
        };

        Ok(header.with_attribute("sizes", self.sizes()))
    }

    fn pick_largest(&self) -> Result<(usize, IcoEntry), IcoDecodeErrors> {
        let mut best: Option<(usize, IcoEntry)> = None;

        for (index, entry) in self.entries.iter().enumerate() {
            match best {
                Some((_, current)) if entry.rank() <= current.rank() => (),
                _ => best = Some((index, *entry))
            }
        }
        best.ok_or(IcoDecodeErrors::GenericStatic("ICO file has no images"))
    }

    /// Distinct sizes available in the directory, smallest first
    fn sizes(&self) -> AttributeValue {
        let sizes: BTreeSet<(u32, u32)> = self.entries.iter().map(IcoEntry::size).collect();
        AttributeValue::Sizes(sizes.into_iter().collect())
    }
}
