/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::collections::BTreeMap;

use zune_core::bytestream::{ZByteBuffer, ZByteReaderTrait, ZReader};
use zune_core::header::{AttributeValue, BoundingBox, DecoderArgs, ImageHeader, TileDescriptor};
use zune_core::log::trace;
use zune_core::mode::ImageMode;
use zune_core::options::DecoderOptions;

use crate::enums::{InterlaceMethod, PngChunkType, PngColor};
use crate::error::PngDecodeErrors;

/// The eight bytes every PNG file starts with
pub const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// Largest chunk length the format allows, 2^31 - 1
const MAX_CHUNK_LENGTH: u32 = (1 << 31) - 1;

/// Probe some bytes to see
/// if they consist of a PNG image
pub fn probe_png(bytes: &[u8]) -> bool {
    bytes.starts_with(&PNG_SIGNATURE)
}

#[derive(Copy, Clone, Debug)]
pub(crate) struct PngChunk {
    pub length:     usize,
    pub chunk_type: PngChunkType,
    pub chunk:      [u8; 4]
}

#[derive(Copy, Clone, Debug)]
pub(crate) struct PngInfo {
    pub width:            u32,
    pub height:           u32,
    pub depth:            u8,
    pub color:            PngColor,
    pub interlace_method: InterlaceMethod
}

/// A PNG header parser
///
/// Reads up to, but not into, the first `IDAT` chunk.
pub struct PngDecoder<T>
where
    T: ZByteReaderTrait
{
    pub(crate) stream:     ZReader<T>,
    pub(crate) options:    DecoderOptions,
    pub(crate) png_info:   Option<PngInfo>,
    pub(crate) attributes: BTreeMap<String, AttributeValue>
}

impl<T> PngDecoder<T>
where
    T: ZByteReaderTrait
{
    pub fn new(data: T) -> PngDecoder<T> {
        PngDecoder::new_with_options(data, DecoderOptions::default())
    }

    pub fn new_with_options(data: T, options: DecoderOptions) -> PngDecoder<T> {
        PngDecoder {
            stream: ZReader::new_with_options(data, &options),
            options,
            png_info: None,
            attributes: BTreeMap::new()
        }
    }

    /// Parse the signature and chunks preceding the image data
    ///
    /// # Returns
    /// - Ok(header): mode, dimensions and a single `zip` tile whose offset is the
    ///   start of the first `IDAT` chunk's data
    /// - Err: The file is not a PNG, a chunk is malformed or the source failed
    pub fn decode_headers(&mut self) -> Result<ImageHeader, PngDecodeErrors> {
        let start = self.stream.position().unwrap_or(0);

        let signature = self.stream.read(PNG_SIGNATURE.len())?;
        if signature.as_bytes() != PNG_SIGNATURE {
            return Err(PngDecodeErrors::BadSignature);
        }
        let mut offset = start + PNG_SIGNATURE.len() as u64;

        loop {
            let chunk = self.read_chunk_header()?;

            if self.png_info.is_none() && chunk.chunk_type != PngChunkType::IHDR {
                return Err(PngDecodeErrors::GenericStatic(
                    "First chunk is not IHDR, corrupt PNG"
                ));
            }
            trace!(
                "Chunk {} of {} bytes at {}",
                String::from_utf8_lossy(&chunk.chunk),
                chunk.length,
                offset
            );

            match chunk.chunk_type {
                PngChunkType::IHDR => {
                    let data = self.read_chunk_data(chunk)?;
                    self.parse_ihdr(&data)?;
                }
                PngChunkType::PLTE => {
                    let data = self.read_chunk_data(chunk)?;
                    self.parse_plte(data)?;
                }
                PngChunkType::tRNS => {
                    let data = self.read_chunk_data(chunk)?;
                    self.parse_trns(data)?;
                }
                PngChunkType::gAMA => {
                    let data = self.read_chunk_data(chunk)?;
                    self.parse_gama(&data)?;
                }
                PngChunkType::pHYs => {
                    let data = self.read_chunk_data(chunk)?;
                    self.parse_phys(&data)?;
                }
                PngChunkType::IDAT => {
                    // chunk length and type precede the data
                    return self.build_header(offset + 8);
                }
                PngChunkType::IEND => {
                    return Err(PngDecodeErrors::GenericStatic("No IDAT chunk found"));
                }
                PngChunkType::unkn => self.skip_chunk(chunk)?
            }
            // length + type + data + crc
            offset += 12 + chunk.length as u64;
        }
    }

    fn read_chunk_header(&mut self) -> Result<PngChunk, PngDecodeErrors> {
        // Format is length - chunk type - [data] -  crc chunk
        let header = self.stream.read_fixed_bytes_or_error::<8>()?;

        let length = u32::from_be_bytes([header[0], header[1], header[2], header[3]]);
        let chunk = [header[4], header[5], header[6], header[7]];

        if length > MAX_CHUNK_LENGTH {
            return Err(PngDecodeErrors::Generic(format!(
                "Chunk length {length} exceeds the maximum allowed"
            )));
        }
        Ok(PngChunk {
            length: length as usize,
            chunk_type: PngChunkType::from_bytes(chunk),
            chunk
        })
    }

    /// Read the data of a chunk and its crc, confirming the crc if asked to
    fn read_chunk_data(&mut self, chunk: PngChunk) -> Result<ZByteBuffer, PngDecodeErrors> {
        let data = self.stream.read_exact(chunk.length)?;
        let crc = u32::from_be_bytes(self.stream.read_fixed_bytes_or_error::<4>()?);

        #[cfg(feature = "crc")]
        {
            if self.options.png_get_confirm_crc() {
                let calc_crc = crate::crc::chunk_crc(chunk.chunk, data.as_bytes());

                if crc != calc_crc {
                    return Err(PngDecodeErrors::BadCrc(crc, calc_crc));
                }
            }
        }
        #[cfg(not(feature = "crc"))]
        {
            let _ = crc;
        }
        Ok(data)
    }

    /// Move past a chunk we do not interpret
    fn skip_chunk(&mut self, chunk: PngChunk) -> Result<(), PngDecodeErrors> {
        let chunk_name = String::from_utf8_lossy(&chunk.chunk);

        if chunk.chunk[0] & (1 << 5) == 0 {
            return Err(PngDecodeErrors::Generic(format!(
                "Marker {chunk_name} unknown but deemed necessary",
            )));
        }

        trace!("Encountered unknown chunk {:?}", chunk_name);
        trace!("Skipping {} bytes", chunk.length + 4);

        self.stream.skip(chunk.length as u64 + 4)?;
        Ok(())
    }

    fn build_header(&mut self, data_offset: u64) -> Result<ImageHeader, PngDecodeErrors> {
        let info = self
            .png_info
            .ok_or(PngDecodeErrors::GenericStatic("IDAT before IHDR"))?;

        let (mode, raw_mode) = info
            .color
            .layout(info.depth)
            .ok_or(PngDecodeErrors::GenericStatic("Invalid colour and depth pair"))?;

        if mode == ImageMode::Palette && !self.attributes.contains_key("palette") {
            return Err(PngDecodeErrors::GenericStatic(
                "Indexed image without a PLTE chunk"
            ));
        }

        self.attributes
            .insert("bits".to_string(), AttributeValue::UInt(u64::from(info.depth)));
        if info.interlace_method == InterlaceMethod::Adam7 {
            self.attributes
                .insert("interlace".to_string(), AttributeValue::UInt(1));
        }

        let tile = TileDescriptor::new(
            "zip",
            BoundingBox::from_size(info.width, info.height),
            data_offset,
            DecoderArgs::new(raw_mode, 0, 1)
        );

        Ok(ImageHeader::new("PNG", mode, (info.width, info.height))
            .with_tiles(vec![tile])
            .with_attributes(core::mem::take(&mut self.attributes)))
    }
}
