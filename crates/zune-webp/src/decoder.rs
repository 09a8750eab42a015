/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::collections::BTreeMap;

use zune_core::bytestream::{ZByteBuffer, ZByteIoError, ZByteReaderTrait, ZReader};
use zune_core::header::{AttributeValue, BoundingBox, DecoderArgs, ImageHeader, TileDescriptor};
use zune_core::log::trace;
use zune_core::mode::ImageMode;
use zune_core::options::DecoderOptions;

use crate::errors::WebpDecodeErrors;

/// `RIFF`, file size, `WEBP`, `VP8 `, chunk size
const CONTAINER_HEADER_SIZE: usize = 20;
/// Frame tag, start code, width and height
const FRAME_HEADER_SIZE: usize = 10;
const VP8_START_CODE: [u8; 3] = [0x9d, 0x01, 0x2a];

/// Probe some bytes to see
/// if they consist of a lossy WebP image
pub fn probe_webp(bytes: &[u8]) -> bool {
    bytes.get(0..4) == Some(b"RIFF") && bytes.get(8..16) == Some(b"WEBPVP8 ")
}

/// A WebP header parser
pub struct WebpDecoder<T>
where
    T: ZByteReaderTrait
{
    stream:  ZReader<T>,
    options: DecoderOptions
}

impl<T> WebpDecoder<T>
where
    T: ZByteReaderTrait
{
    pub fn new(data: T) -> WebpDecoder<T> {
        WebpDecoder::new_with_options(data, DecoderOptions::default())
    }

    pub fn new_with_options(data: T, options: DecoderOptions) -> WebpDecoder<T> {
        WebpDecoder {
            stream: ZReader::new_with_options(data, &options),
            options
        }
    }

    /// Read the container and VP8 frame headers
    pub fn decode_headers(&mut self) -> Result<ImageHeader, WebpDecodeErrors> {
        let container = self.stream.read(CONTAINER_HEADER_SIZE)?;

        if !probe_webp(container.as_bytes()) {
            return Err(WebpDecodeErrors::NotAWebpFile);
        }
        if container.len() != CONTAINER_HEADER_SIZE {
            let err = ZByteIoError::NotEnoughBytes(CONTAINER_HEADER_SIZE, container.len());
            return Err(WebpDecodeErrors::IoErrors(err));
        }
        let riff_size = container.int32_le(4)?;
        let chunk_size = container.int32_le(16)?;

        let frame = ZByteBuffer::new(
            self.stream
                .read_fixed_bytes_or_error::<FRAME_HEADER_SIZE>()?
                .to_vec()
        );

        let start_code = frame.fixed_bytes::<3>(3)?;
        if start_code != VP8_START_CODE {
            return Err(WebpDecodeErrors::UnsupportedFrameSignature(start_code));
        }

        // read frame tag
        let tag = u32::from(frame.int16_le(0)?) | (u32::from(frame.byte_at(2)?) << 16);

        let key_frame = tag & 1 == 0;
        let version = (tag >> 1) & 7;
        let show_frame = (tag >> 4) & 1 == 1;
        let partition_size = tag >> 5;

        trace!("Frame tag: {:#08x}", tag);
        trace!("Key frame: {}, shown: {}", key_frame, show_frame);

        if !key_frame || !show_frame {
            return Err(WebpDecodeErrors::NotAVisibleFrame);
        }

        let raw_width = frame.int16_le(6)?;
        let raw_height = frame.int16_le(8)?;

        let width = u32::from(raw_width & 0x3fff);
        let height = u32::from(raw_height & 0x3fff);

        if width as usize > self.options.max_width() {
            let msg = format!(
                "Width {} greater than max configured width {}",
                width,
                self.options.max_width()
            );
            return Err(WebpDecodeErrors::Generic(msg));
        }

        if height as usize > self.options.max_height() {
            let msg = format!(
                "Height {} greater than max configured height {}",
                height,
                self.options.max_height()
            );
            return Err(WebpDecodeErrors::Generic(msg));
        }

        trace!("Image width: {:?}", width);
        trace!("Image height: {:?}", height);

        let attribute = |value: u32| AttributeValue::UInt(u64::from(value));

        let mut attributes = BTreeMap::new();
        attributes.insert("version".to_string(), attribute(version));
        attributes.insert("partition_size".to_string(), attribute(partition_size));
        attributes.insert(
            "horizontal_scale".to_string(),
            attribute(u32::from(raw_width >> 14))
        );
        attributes.insert(
            "vertical_scale".to_string(),
            attribute(u32::from(raw_height >> 14))
        );
        attributes.insert("riff_size".to_string(), attribute(riff_size));
        attributes.insert("vp8_chunk_size".to_string(), attribute(chunk_size));

        // VP8 is always YCbCr with chroma subsampling
        let tile = TileDescriptor::new(
            "webp",
            BoundingBox::from_size(width, height),
            0,
            DecoderArgs::new(ImageMode::RGB.as_str(), 0, 1)
        );

        Ok(ImageHeader::new("WEBP", ImageMode::RGB, (width, height))
            .with_tiles(vec![tile])
            .with_attributes(attributes))
    }
}
