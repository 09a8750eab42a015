/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use zune_core::mode::ImageMode;

use crate::BmpDecoderErrors;

/// Compression schemes a BMP info header can name
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum BmpCompression {
    RGB,
    RLE8,
    RLE4,
    BITFIELDS
}

impl BmpCompression {
    pub fn from_u32(num: u32) -> Option<BmpCompression> {
        match num {
            0 => Some(BmpCompression::RGB),
            1 => Some(BmpCompression::RLE8),
            2 => Some(BmpCompression::RLE4),
            3 => Some(BmpCompression::BITFIELDS),
            _ => None
        }
    }

    pub const fn to_u32(self) -> u32 {
        match self {
            BmpCompression::RGB => 0,
            BmpCompression::RLE8 => 1,
            BmpCompression::RLE4 => 2,
            BmpCompression::BITFIELDS => 3
        }
    }

    pub const fn is_rle(self) -> bool {
        matches!(self, BmpCompression::RLE8 | BmpCompression::RLE4)
    }
}

/// How the stored pixels are laid out and what they decode to
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct PixelLayout {
    pub mode:     ImageMode,
    pub raw_mode: &'static str
}

impl PixelLayout {
    const fn new(mode: ImageMode, raw_mode: &'static str) -> PixelLayout {
        PixelLayout { mode, raw_mode }
    }
}

/// Layout of an image with a colour table.
///
/// Palettes that are a plain black to white ramp decode to greyscale.
pub(crate) fn paletted_layout(depth: u16, greyscale: bool) -> Result<PixelLayout, BmpDecoderErrors> {
    let layout = match (depth, greyscale) {
        (1, true) => PixelLayout::new(ImageMode::Bilevel, "1"),
        (1, false) => PixelLayout::new(ImageMode::Palette, "P;1"),
        (4, true) => PixelLayout::new(ImageMode::Luma, "L;4"),
        (4, false) => PixelLayout::new(ImageMode::Palette, "P;4"),
        (8, true) => PixelLayout::new(ImageMode::Luma, "L"),
        (8, false) => PixelLayout::new(ImageMode::Palette, "P"),
        _ => {
            return Err(BmpDecoderErrors::Generic(format!(
                "Depth {depth} cannot carry a palette"
            )))
        }
    };
    Ok(layout)
}

/// Layout of an image storing colours directly
pub(crate) fn direct_layout(
    depth: u16, compression: BmpCompression, masks: [u32; 4]
) -> Result<PixelLayout, BmpDecoderErrors> {
    if compression == BmpCompression::BITFIELDS {
        let layout = match (depth, masks) {
            (32, [0x00ff_0000, 0x0000_ff00, 0x0000_00ff, 0]) => {
                PixelLayout::new(ImageMode::RGB, "BGRX")
            }
            (32, [0x00ff_0000, 0x0000_ff00, 0x0000_00ff, 0xff00_0000]) => {
                PixelLayout::new(ImageMode::RGBA, "BGRA")
            }
            (16, [0x7c00, 0x03e0, 0x001f, _]) => PixelLayout::new(ImageMode::RGB, "BGR;15"),
            (16, [0xf800, 0x07e0, 0x001f, _]) => PixelLayout::new(ImageMode::RGB, "BGR;16"),
            _ => {
                return Err(BmpDecoderErrors::GenericStatic(
                    "Unsupported BMP bitfields layout"
                ))
            }
        };
        return Ok(layout);
    }
    match depth {
        16 => Ok(PixelLayout::new(ImageMode::RGB, "BGR;15")),
        24 => Ok(PixelLayout::new(ImageMode::RGB, "BGR")),
        32 => Ok(PixelLayout::new(ImageMode::RGB, "BGRX")),
        _ => Err(BmpDecoderErrors::Generic(format!("Depth {depth} unsupported")))
    }
}

/// Whether a colour table is the linear ramp from black to white
pub(crate) fn is_greyscale_ramp(palette: &[u8], entry_size: usize) -> bool {
    let colors = palette.len() / entry_size;
    if colors < 2 {
        return false;
    }
    palette
        .chunks_exact(entry_size)
        .enumerate()
        .all(|(i, entry)| {
            let expected = (i * 255 / (colors - 1)) as u8;
            entry[..3].iter().all(|&c| c == expected)
        })
}
