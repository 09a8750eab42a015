/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::collections::BTreeMap;

use zune_core::bytestream::{ZAttributeStream, ZByteIoError, ZByteReaderTrait, ZReader};
use zune_core::header::{AttributeValue, ChannelDescriptor, ImageHeader};
use zune_core::log::trace;
use zune_core::mode::ImageMode;
use zune_core::options::DecoderOptions;

use crate::attributes::convert;
use crate::ExrDecodeErrors;

/// Magic number followed by the version byte
const EXR_MAGIC: [u8; 5] = [0x76, 0x2f, 0x31, 0x01, 0x02];
/// Magic number plus version and flags
const EXR_HEADER_SIZE: usize = 8;
/// Attribute names and type names are at most 255 bytes with the long names flag
const MAX_NAME_LENGTH: usize = 255;

/// Probe some bytes to see
/// if they consist of an OpenEXR image
pub fn probe_exr(bytes: &[u8]) -> bool {
    bytes.starts_with(&EXR_MAGIC)
}

/// Image modes for sorted channel name sets
const CHANNEL_MODES: [(&[&str], ImageMode); 3] = [
    (&["BY", "RY", "Y"], ImageMode::YBR),
    (&["B", "G", "R"], ImageMode::RGB),
    (&["A", "B", "G", "R"], ImageMode::RGBA)
];

/// An OpenEXR header parser
pub struct ExrDecoder<T>
where
    T: ZByteReaderTrait
{
    stream:  ZReader<T>,
    options: DecoderOptions
}

impl<T> ExrDecoder<T>
where
    T: ZByteReaderTrait
{
    pub fn new(data: T) -> ExrDecoder<T> {
        ExrDecoder::new_with_options(data, DecoderOptions::default())
    }

    pub fn new_with_options(data: T, options: DecoderOptions) -> ExrDecoder<T> {
        ExrDecoder {
            stream: ZReader::new_with_options(data, &options),
            options
        }
    }

    /// Read the attributes of the header.
    ///
    /// # Returns
    /// - Ok(header): The mode from the `channels` attribute, the size from
    ///   `displayWindow` and every attribute read. There are no tiles.
    /// - Err: Bad magic, a truncated header, or a missing `channels`
    ///   or `displayWindow` attribute, or channels that map to no mode
    pub fn decode_headers(&mut self) -> Result<ImageHeader, ExrDecodeErrors> {
        let head = self.stream.read(EXR_HEADER_SIZE)?;
        if !probe_exr(head.as_bytes()) {
            return Err(ExrDecodeErrors::NotAnExrFile);
        }
        if head.len() != EXR_HEADER_SIZE {
            let err = ZByteIoError::NotEnoughBytes(EXR_HEADER_SIZE, head.len());
            return Err(ExrDecodeErrors::IoErrors(err));
        }

        let attributes = self.read_attributes()?;

        let window = match attributes.get("displayWindow") {
            Some(AttributeValue::Box2i(window)) => *window,
            _ => return Err(ExrDecodeErrors::MissingAttribute("displayWindow"))
        };
        let mode = match attributes.get("channels") {
            Some(AttributeValue::ChannelList(channels)) => mode_from_channels(channels)?,
            _ => return Err(ExrDecodeErrors::MissingAttribute("channels"))
        };

        // kept as (max - min), without the inclusive +1
        let [xmin, ymin, xmax, ymax] = window.map(i64::from);
        let width = xmax - xmin;
        let height = ymax - ymin;

        if width < 0 || height < 0 {
            return Err(ExrDecodeErrors::GenericStatic(
                "displayWindow has negative extents"
            ));
        }
        if width as u64 > self.options.max_width() as u64 {
            return Err(ExrDecodeErrors::TooLargeDimensions(
                "width",
                self.options.max_width(),
                width as usize
            ));
        }
        if height as u64 > self.options.max_height() as u64 {
            return Err(ExrDecodeErrors::TooLargeDimensions(
                "height",
                self.options.max_height(),
                height as usize
            ));
        }
        trace!("Mode: {}", mode);
        trace!("Width: {}", width);
        trace!("Height: {}", height);

        Ok(ImageHeader::new("EXR", mode, (width as u32, height as u32))
            .with_attributes(attributes))
    }

    /// Read `name, type, size, value` records up to the empty name ending the header
    fn read_attributes(&mut self) -> Result<BTreeMap<String, AttributeValue>, ExrDecodeErrors> {
        let max_attributes = self.options.exr_get_max_attributes();

        let mut stream =
            ZAttributeStream::new(&mut self.stream).with_max_string_length(MAX_NAME_LENGTH);
        let mut attributes = BTreeMap::new();
        let mut count = 0;

        loop {
            let name = stream.read_string()?;
            if name.is_empty() {
                break;
            }
            count += 1;
            if count > max_attributes {
                return Err(ExrDecodeErrors::TooManyAttributes(max_attributes));
            }

            let type_tag = stream.read_string()?;
            let size = stream.read(4)?.int32_le(0)?;
            let value = stream.read(size as usize)?;

            let name = String::from_utf8_lossy(&name).into_owned();
            let type_tag = String::from_utf8_lossy(&type_tag).into_owned();

            trace!("Attribute {} of type {} ({} bytes)", name, type_tag, size);

            let value = convert(&type_tag, value);
            attributes.insert(name, value);
        }
        Ok(attributes)
    }
}

fn mode_from_channels(channels: &[ChannelDescriptor]) -> Result<ImageMode, ExrDecodeErrors> {
    let mut names: Vec<&str> = channels.iter().map(|c| c.name.as_str()).collect();
    names.sort_unstable();

    CHANNEL_MODES
        .iter()
        .find(|(set, _)| *set == names.as_slice())
        .map(|(_, mode)| *mode)
        .ok_or_else(|| {
            ExrDecodeErrors::UnsupportedChannels(names.iter().map(|n| n.to_string()).collect())
        })
}
