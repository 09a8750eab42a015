/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! The header model produced by every parser.
//!
//! An [`ImageHeader`] describes what a file contains (mode, size, format
//! attributes) and how to get at the pixels (a list of [`TileDescriptor`]s),
//! it never holds pixel data itself. Pixel decoders pick a codec by the tile's
//! `decoder_id` and read from `source_offset` onwards.

use std::collections::BTreeMap;

use crate::mode::ImageMode;

/// A rectangle in pixel coordinates, `x1` and `y1` exclusive
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct BoundingBox {
    pub x0: u32,
    pub y0: u32,
    pub x1: u32,
    pub y1: u32
}

impl BoundingBox {
    pub const fn new(x0: u32, y0: u32, x1: u32, y1: u32) -> BoundingBox {
        BoundingBox { x0, y0, x1, y1 }
    }

    /// The box `(0, 0) - (width, height)`
    pub const fn from_size(width: u32, height: u32) -> BoundingBox {
        BoundingBox::new(0, 0, width, height)
    }

    pub const fn width(&self) -> u32 {
        self.x1.saturating_sub(self.x0)
    }

    pub const fn height(&self) -> u32 {
        self.y1.saturating_sub(self.y0)
    }
}

/// Codec specific parameters of a tile
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct DecoderArgs {
    /// Layout of the stored pixels, e.g `"BGR"` or `"P;4"`
    pub raw_mode:    String,
    /// Bytes per stored row, zero when the codec works it out itself
    pub stride:      usize,
    /// `1` for top-down rows, `-1` for bottom-up rows
    pub orientation: i32
}

impl DecoderArgs {
    pub fn new(raw_mode: impl Into<String>, stride: usize, orientation: i32) -> DecoderArgs {
        DecoderArgs {
            raw_mode: raw_mode.into(),
            stride,
            orientation
        }
    }
}

/// An instruction for a pixel decoder
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct TileDescriptor {
    /// Which codec decodes this tile, e.g `"raw"`, `"zip"` or `"webp"`
    pub decoder_id:    String,
    /// Region of the image the tile covers
    pub bounding_box:  BoundingBox,
    /// Where in the source the tile's data begins
    pub source_offset: u64,
    pub args:          DecoderArgs
}

impl TileDescriptor {
    pub fn new(
        decoder_id: impl Into<String>, bounding_box: BoundingBox, source_offset: u64,
        args: DecoderArgs
    ) -> TileDescriptor {
        TileDescriptor {
            decoder_id: decoder_id.into(),
            bounding_box,
            source_offset,
            args
        }
    }

    /// Return the same tile covering `bounding_box` instead
    pub fn with_bounding_box(mut self, bounding_box: BoundingBox) -> TileDescriptor {
        self.bounding_box = bounding_box;
        self
    }
}

/// Storage type of an OpenEXR channel
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum PixelType {
    UInt,
    Half,
    Float
}

impl PixelType {
    pub const fn from_i32(value: i32) -> Option<PixelType> {
        match value {
            0 => Some(PixelType::UInt),
            1 => Some(PixelType::Half),
            2 => Some(PixelType::Float),
            _ => None
        }
    }
}

/// One entry of an OpenEXR channel list
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct ChannelDescriptor {
    pub name:       String,
    pub pixel_type: PixelType,
    pub linear:     bool,
    /// `(x_sampling, y_sampling)`
    pub sampling:   (i32, i32)
}

/// An embedded RGBA preview image
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Preview {
    pub width:  u32,
    pub height: u32,
    /// `width * height` RGBA pixels
    pub data:   Vec<u8>
}

impl Preview {
    pub const fn mode(&self) -> ImageMode {
        ImageMode::RGBA
    }
}

/// OpenEXR compression methods
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ExrCompression {
    None,
    Rle,
    Zips,
    Zip,
    Piz,
    Pxr24,
    B44,
    B44A,
    Dwaa,
    Dwab
}

impl ExrCompression {
    pub const fn from_u8(value: u8) -> Option<ExrCompression> {
        match value {
            0 => Some(ExrCompression::None),
            1 => Some(ExrCompression::Rle),
            2 => Some(ExrCompression::Zips),
            3 => Some(ExrCompression::Zip),
            4 => Some(ExrCompression::Piz),
            5 => Some(ExrCompression::Pxr24),
            6 => Some(ExrCompression::B44),
            7 => Some(ExrCompression::B44A),
            8 => Some(ExrCompression::Dwaa),
            9 => Some(ExrCompression::Dwab),
            _ => None
        }
    }
}

/// OpenEXR tile layout (`tiledesc` attribute)
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct TileDescription {
    pub x_size:        u32,
    pub y_size:        u32,
    /// one level, mipmap or ripmap levels (low nibble of the mode byte)
    pub level_mode:    u8,
    /// round down or up (high nibble of the mode byte)
    pub rounding_mode: u8
}

/// A typed header attribute.
///
/// Values that could not be decoded into one of the typed variants are kept
/// as [`AttributeValue::Raw`] with the tag they were stored under.
#[derive(Clone, Debug, PartialEq)]
pub enum AttributeValue {
    /// `xmin, ymin, xmax, ymax`
    Box2i([i32; 4]),
    Box2f([f32; 4]),
    ChannelList(Vec<ChannelDescriptor>),
    /// red, green, blue and white `x, y` pairs
    Chromaticities([f32; 8]),
    Compression(ExrCompression),
    Double(f64),
    EnvMap(u8),
    Float(f32),
    Int(i32),
    KeyCode([i32; 7]),
    LineOrder(u8),
    M33f([f32; 9]),
    M44f([f32; 16]),
    Preview(Preview),
    /// numerator, denominator
    Rational(i32, u32),
    /// Text as stored, not validated as UTF-8
    Text(Vec<u8>),
    TextList(Vec<Vec<u8>>),
    TileDesc(TileDescription),
    /// time and control words
    TimeCode(u32, u32),
    V2f([f32; 2]),
    V2i([i32; 2]),
    V3f([f32; 3]),
    V3i([i32; 3]),
    UInt(u64),
    /// A list of `(width, height)` pairs
    Sizes(Vec<(u32, u32)>),
    Raw {
        type_tag: String,
        data:     Vec<u8>
    }
}

/// What a parser learned about an image
#[derive(Clone, Debug, PartialEq)]
pub struct ImageHeader {
    format:     &'static str,
    mode:       ImageMode,
    width:      u32,
    height:     u32,
    tiles:      Vec<TileDescriptor>,
    attributes: BTreeMap<String, AttributeValue>
}

impl ImageHeader {
    /// Create a header with no tiles and no attributes
    ///
    /// # Arguments
    /// - format: Short name of the format that produced this header, e.g `"ICO"`
    /// - mode: Mode of the decoded image
    /// - size: `(width, height)` in pixels
    pub fn new(format: &'static str, mode: ImageMode, size: (u32, u32)) -> ImageHeader {
        ImageHeader {
            format,
            mode,
            width: size.0,
            height: size.1,
            tiles: Vec::new(),
            attributes: BTreeMap::new()
        }
    }

    pub fn with_tiles(mut self, tiles: Vec<TileDescriptor>) -> ImageHeader {
        self.tiles = tiles;
        self
    }

    pub fn with_attributes(mut self, attributes: BTreeMap<String, AttributeValue>) -> ImageHeader {
        self.attributes = attributes;
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: AttributeValue) -> ImageHeader {
        self.attributes.insert(name.into(), value);
        self
    }

    pub const fn format(&self) -> &'static str {
        self.format
    }

    pub const fn mode(&self) -> ImageMode {
        self.mode
    }

    /// `(width, height)`
    pub const fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub const fn width(&self) -> u32 {
        self.width
    }

    pub const fn height(&self) -> u32 {
        self.height
    }

    pub fn tiles(&self) -> &[TileDescriptor] {
        &self.tiles
    }

    pub fn attributes(&self) -> &BTreeMap<String, AttributeValue> {
        &self.attributes
    }

    pub fn attribute(&self, name: &str) -> Option<&AttributeValue> {
        self.attributes.get(name)
    }

    pub fn into_tiles(self) -> Vec<TileDescriptor> {
        self.tiles
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tile_rebox_keeps_everything_else() {
        let tile = TileDescriptor::new(
            "raw",
            BoundingBox::from_size(16, 32),
            62,
            DecoderArgs::new("BGRX", 64, -1)
        );
        let reboxed = tile.clone().with_bounding_box(BoundingBox::from_size(16, 16));

        assert_eq!(reboxed.bounding_box, BoundingBox::new(0, 0, 16, 16));
        assert_eq!(reboxed.source_offset, tile.source_offset);
        assert_eq!(reboxed.args, tile.args);
        assert_eq!(reboxed.bounding_box.height(), 16);
    }

    #[test]
    fn header_builders() {
        let header = ImageHeader::new("TEST", ImageMode::RGB, (3, 4))
            .with_attribute("answer", AttributeValue::Int(42));

        assert_eq!(header.size(), (3, 4));
        assert!(header.tiles().is_empty());
        assert_eq!(header.attribute("answer"), Some(&AttributeValue::Int(42)));
        assert_eq!(header.attribute("missing"), None);
    }
}
