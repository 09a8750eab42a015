/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

// BMP has been extended many times, the revision of a file is told apart by
// the size of its info header.
//
// - 12 bytes (OS/2 1.x, Windows 2.x): u16 width and height, planes, bits.
//   Colour table entries are 3 bytes (BGR).
// - 16 and 64 bytes (OS/2 2.x): the first 40 bytes match the Windows 3.x
//   header, anything after the fields we need is ignored.
// - 40 bytes (Windows 3.x): i32 width and height (negative height means top
//   down rows), compression, colours used. Colour table entries are 4 bytes
//   (BGR0). With BITFIELDS compression three u32 masks follow the header.
// - 52 and 56 bytes: the 40 byte header with the RGB (and alpha) masks inside.
// - 108 and 124 bytes (Windows 4.x and 5.x): masks plus colour space data we
//   do not need.
//
// A bare DIB, as stored inside icon files, is the same thing without the 14
// byte `BM` file header, its pixels follow the colour table directly.

use std::collections::BTreeMap;

use zune_core::bytestream::{ZByteBuffer, ZByteReaderTrait, ZReader};
use zune_core::header::{AttributeValue, BoundingBox, DecoderArgs, ImageHeader, TileDescriptor};
use zune_core::log::{trace, warn};
use zune_core::mode::ImageMode;
use zune_core::options::DecoderOptions;

use crate::common::{direct_layout, is_greyscale_ramp, paletted_layout, BmpCompression};
use crate::BmpDecoderErrors;

const FILE_HEADER_SIZE: u64 = 14;

/// Probe some bytes to see
/// if they consist of a BMP image
pub fn probe_bmp(bytes: &[u8]) -> bool {
    if let Some(magic_bytes) = bytes.get(0..2) {
        if magic_bytes == b"BM" {
            // skip file_size   -> 4
            // skip reserved    -> 4
            // skip data offset -> 4
            // read sz
            if let Some(sz) = bytes.get(14) {
                return is_known_header_size(u32::from(*sz));
            }
        }
    }
    false
}

fn is_known_header_size(size: u32) -> bool {
    matches!(size, 12 | 16 | 40 | 52 | 56 | 64 | 108 | 124)
}

/// Everything read from an info header and the tables following it
struct InfoHeader {
    header_size:  u32,
    width:        u32,
    height:       u32,
    bottom_up:    bool,
    depth:        u16,
    compression:  BmpCompression,
    masks:        [u32; 4],
    /// pixels per meter, zero when absent
    resolution:   (i32, i32),
    palette:      Vec<u8>,
    palette_tag:  &'static str,
    /// bytes between the end of the info header and the pixel data
    /// of a bare DIB, (masks and colour table)
    trailing_len: u64
}

/// A BMP header parser.
///
/// # Usage
/// - For complete files starting with `BM` use [`decode_headers`](Self::decode_headers)
/// - For device independent bitmaps stored inside other containers use
///   [`decode_dib_headers`](Self::decode_dib_headers) with the offset of the info header
///
/// ```no_run
/// use zune_bmp::BmpDecoder;
/// use zune_core::bytestream::ZCursor;
///
/// fn main() -> Result<(), zune_bmp::BmpDecoderErrors> {
///     let source = ZCursor::new(b"BM");
///     let mut decoder = BmpDecoder::new(source);
///     let header = decoder.decode_headers()?;
///     let tile = &header.tiles()[0];
///     println!("pixels at {} stored as {}", tile.source_offset, tile.args.raw_mode);
///     Ok(())
/// }
/// ```
pub struct BmpDecoder<T>
where
    T: ZByteReaderTrait
{
    stream:  ZReader<T>,
    options: DecoderOptions
}

impl<T> BmpDecoder<T>
where
    T: ZByteReaderTrait
{
    /// Create a new bmp decoder that reads data from
    /// `data`
    ///
    /// # Arguments
    /// - `data`: The source from which we will read bytes from
    ///
    /// # Returns
    /// - A BMP decoder instance
    pub fn new(data: T) -> BmpDecoder<T> {
        BmpDecoder::new_with_options(data, DecoderOptions::default())
    }

    /// Create a new decoder instance with specified options
    ///
    /// # Arguments
    ///
    /// * `data`: The source from which we will read data from
    /// * `options`:  Specialized options for this decoder
    ///
    /// returns: A BMP Decoder instance
    pub fn new_with_options(data: T, options: DecoderOptions) -> BmpDecoder<T> {
        BmpDecoder {
            stream: ZReader::new_with_options(data, &options),
            options
        }
    }

    /// Parse a complete BMP file starting at the current position of the source.
    ///
    /// The tile offset is absolute when the source can report its position,
    /// otherwise it is relative to where parsing started.
    ///
    /// # Returns
    /// - Ok(header): mode, dimensions and one tile describing the pixel data
    /// - Err: The file is not a BMP file, is malformed or the source failed
    pub fn decode_headers(&mut self) -> Result<ImageHeader, BmpDecoderErrors> {
        let start = self.stream.position().unwrap_or(0);

        let file_header = self.stream.read(FILE_HEADER_SIZE as usize)?;
        if !file_header.starts_with(b"BM") {
            return Err(BmpDecoderErrors::InvalidMagicBytes);
        }
        // 4 bytes file size
        // skip 4 reserved bytes
        let data_offset = file_header.int32_le(10)?;

        let info = self.read_info_header()?;

        if u64::from(info.header_size) + FILE_HEADER_SIZE > u64::from(data_offset) {
            return Err(BmpDecoderErrors::GenericStatic("Invalid header size"));
        }
        self.build_header(&info, start + u64::from(data_offset))
    }

    /// Parse a device independent bitmap whose info header starts at `start`.
    ///
    /// Seeks the source to `start`, the pixel data is taken to follow the
    /// info header, masks and colour table directly.
    pub fn decode_dib_headers(&mut self, start: u64) -> Result<ImageHeader, BmpDecoderErrors> {
        self.stream.set_position(start)?;

        let info = self.read_info_header()?;
        let pixel_offset = start
            .checked_add(u64::from(info.header_size))
            .and_then(|x| x.checked_add(info.trailing_len))
            .ok_or(BmpDecoderErrors::OverFlowOccurred)?;

        self.build_header(&info, pixel_offset)
    }

    fn read_info_header(&mut self) -> Result<InfoHeader, BmpDecoderErrors> {
        let size_bytes = self.stream.read_fixed_bytes_or_error::<4>()?;
        let header_size = u32::from_le_bytes(size_bytes);

        if !is_known_header_size(header_size) {
            return Err(BmpDecoderErrors::GenericStatic(
                "Unknown information header size"
            ));
        }
        let body = self.stream.read_exact(header_size as usize - 4)?;
        let header = ZByteBuffer::from(&size_bytes[..]).concat(&body);

        let (width, height, planes, depth);
        if header_size == 12 {
            width = i64::from(header.int16_le(4)?);
            height = i64::from(header.int16_le(6)?);
            planes = header.int16_le(8)?;
            depth = header.int16_le(10)?;
        } else {
            width = i64::from(header.int32_le(4)? as i32);
            height = i64::from(header.int32_le(8)? as i32);
            planes = header.int16_le(12)?;
            depth = header.int16_le(14)?;
        }

        // planes
        if planes != 1 {
            return Err(BmpDecoderErrors::GenericStatic("Invalid BMP header"));
        }
        if depth == 0 {
            return Err(BmpDecoderErrors::GenericStatic(
                "Depth is zero, invalid image"
            ));
        }
        if width <= 0 {
            return Err(BmpDecoderErrors::GenericStatic(
                "Width is zero or negative, invalid image"
            ));
        }
        if height == 0 {
            return Err(BmpDecoderErrors::GenericStatic(
                "Height is zero, invalid image"
            ));
        }
        let bottom_up = height > 0;
        let (width, height) = (width.unsigned_abs(), height.unsigned_abs());

        if height > self.options.max_height() as u64 {
            return Err(BmpDecoderErrors::TooLargeDimensions(
                "height",
                self.options.max_height(),
                height as usize
            ));
        }
        if width > self.options.max_width() as u64 {
            return Err(BmpDecoderErrors::TooLargeDimensions(
                "width",
                self.options.max_width(),
                width as usize
            ));
        }

        let compression = if header_size >= 20 {
            let raw = header.int32_le(16)?;
            match BmpCompression::from_u32(raw) {
                Some(c) if header_size == 64 && c == BmpCompression::BITFIELDS => {
                    // OS/2 reuses this value for Huffman 1D
                    return Err(BmpDecoderErrors::GenericStatic(
                        "Unsupported BMP compression scheme"
                    ));
                }
                Some(c) => c,
                None => {
                    return Err(BmpDecoderErrors::GenericStatic(
                        "Unsupported BMP compression scheme"
                    ));
                }
            }
        } else {
            BmpCompression::RGB
        };

        match (compression, depth) {
            (BmpCompression::RLE8, 8) | (BmpCompression::RLE4, 4) => (),
            (BmpCompression::BITFIELDS, 16 | 32) => (),
            (BmpCompression::RGB, 1 | 4 | 8 | 16 | 24 | 32) => (),
            _ => {
                return Err(BmpDecoderErrors::Generic(format!(
                    "Depth {depth} unsupported for {compression:?} compression"
                )));
            }
        }

        let resolution = if header_size >= 32 {
            (header.int32_le(24)? as i32, header.int32_le(28)? as i32)
        } else {
            (0, 0)
        };
        let colors_used = if header_size >= 36 {
            header.int32_le(32)?
        } else {
            0
        };

        let mut trailing_len = 0;
        let mut masks = [0_u32; 4];

        if compression == BmpCompression::BITFIELDS {
            if header_size >= 52 {
                masks[0] = header.int32_le(40)?;
                masks[1] = header.int32_le(44)?;
                masks[2] = header.int32_le(48)?;
                if header_size >= 56 {
                    masks[3] = header.int32_le(52)?;
                }
            } else {
                let extra = self.stream.read_exact(12)?;
                masks[0] = extra.int32_le(0)?;
                masks[1] = extra.int32_le(4)?;
                masks[2] = extra.int32_le(8)?;
                trailing_len += 12;
            }
        }

        let mut palette = Vec::new();
        let palette_tag = if header_size == 12 { "BGR" } else { "BGRX" };

        if depth <= 8 {
            let max_colors = 1_u32 << depth;
            let mut colors = max_colors;

            if colors_used > max_colors {
                warn!("Incorrect number of colors {colors_used} for depth {depth}");
            } else if colors_used != 0 {
                colors = colors_used;
            }
            let entry_size = palette_tag.len();
            palette = self.stream.read_exact(colors as usize * entry_size)?.into_vec();
            trailing_len += palette.len() as u64;
        }

        trace!("Info header size: {}", header_size);
        trace!("Width: {}", width);
        trace!("Height: {}", height);
        trace!("Bit depth: {}", depth);
        trace!("Compression: {:?}", compression);

        Ok(InfoHeader {
            header_size,
            width: width as u32,
            height: height as u32,
            bottom_up,
            depth,
            compression,
            masks,
            resolution,
            palette,
            palette_tag,
            trailing_len
        })
    }

    fn build_header(&self, info: &InfoHeader, pixel_offset: u64) -> Result<ImageHeader, BmpDecoderErrors> {
        let layout = if info.depth <= 8 {
            let greyscale = is_greyscale_ramp(&info.palette, info.palette_tag.len());
            paletted_layout(info.depth, greyscale)?
        } else {
            direct_layout(info.depth, info.compression, info.masks)?
        };
        trace!("Raw mode: {}", layout.raw_mode);

        let stride = (info.width as usize)
            .checked_mul(usize::from(info.depth))
            .and_then(|bits| bits.checked_add(31))
            .map(|bits| (bits >> 3) & !3)
            .ok_or(BmpDecoderErrors::OverFlowOccurred)?;

        let decoder_id = if info.compression.is_rle() {
            "bmp_rle"
        } else {
            "raw"
        };
        let orientation = if info.bottom_up { -1 } else { 1 };

        let tile = TileDescriptor::new(
            decoder_id,
            BoundingBox::from_size(info.width, info.height),
            pixel_offset,
            DecoderArgs::new(layout.raw_mode, stride, orientation)
        );

        let mut attributes = BTreeMap::new();
        attributes.insert(
            "compression".to_string(),
            AttributeValue::UInt(u64::from(info.compression.to_u32()))
        );
        attributes.insert(
            "bits".to_string(),
            AttributeValue::UInt(u64::from(info.depth))
        );

        if info.resolution.0 > 0 && info.resolution.1 > 0 {
            // pixels per meter to pixels per inch
            let to_dpi = |ppm: i32| (f64::from(ppm) * 0.0254).round() as i32;
            attributes.insert(
                "dpi".to_string(),
                AttributeValue::V2i([to_dpi(info.resolution.0), to_dpi(info.resolution.1)])
            );
        }
        if !info.palette.is_empty() && layout.mode == ImageMode::Palette {
            attributes.insert(
                "palette".to_string(),
                AttributeValue::Raw {
                    type_tag: info.palette_tag.to_string(),
                    data:     info.palette.clone()
                }
            );
        }

        Ok(ImageHeader::new("BMP", layout.mode, (info.width, info.height))
            .with_tiles(vec![tile])
            .with_attributes(attributes))
    }
}
