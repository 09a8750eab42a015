/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
#![allow(clippy::upper_case_acronyms, non_camel_case_types)]

use zune_core::mode::ImageMode;

/// Chunks the header parser knows about, see
/// <https://www.w3.org/TR/2003/REC-PNG-20031110/> table 5.3
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PngChunkType {
    IHDR,
    PLTE,
    IDAT,
    IEND,
    gAMA,
    pHYs,
    tRNS,
    unkn
}

impl PngChunkType {
    pub const fn from_bytes(chunk: [u8; 4]) -> PngChunkType {
        match &chunk {
            b"IHDR" => Self::IHDR,
            b"PLTE" => Self::PLTE,
            b"IDAT" => Self::IDAT,
            b"IEND" => Self::IEND,
            b"gAMA" => Self::gAMA,
            b"pHYs" => Self::pHYs,
            b"tRNS" => Self::tRNS,
            _ => Self::unkn
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum InterlaceMethod {
    Standard,
    Adam7
}

impl InterlaceMethod {
    pub fn from_int(int: u8) -> Option<InterlaceMethod> {
        match int {
            0 => Some(Self::Standard),
            1 => Some(Self::Adam7),
            _ => None
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PngColor {
    Luma,
    Palette,
    LumaA,
    RGB,
    RGBA
}

impl PngColor {
    pub(crate) fn from_int(int: u8) -> Option<PngColor> {
        match int {
            0 => Some(Self::Luma),
            2 => Some(Self::RGB),
            3 => Some(Self::Palette),
            4 => Some(Self::LumaA),
            6 => Some(Self::RGBA),
            _ => None
        }
    }

    /// The decoded mode and raw mode of the stored samples for a bit depth,
    /// or `None` when the combination is not allowed
    pub(crate) fn layout(self, depth: u8) -> Option<(ImageMode, &'static str)> {
        let layout = match (self, depth) {
            (PngColor::Luma, 1) => (ImageMode::Bilevel, "1"),
            (PngColor::Luma, 2) => (ImageMode::Luma, "L;2"),
            (PngColor::Luma, 4) => (ImageMode::Luma, "L;4"),
            (PngColor::Luma, 8) => (ImageMode::Luma, "L"),
            (PngColor::Luma, 16) => (ImageMode::Luma16, "I;16B"),
            (PngColor::RGB, 8) => (ImageMode::RGB, "RGB"),
            (PngColor::RGB, 16) => (ImageMode::RGB, "RGB;16B"),
            (PngColor::Palette, 1) => (ImageMode::Palette, "P;1"),
            (PngColor::Palette, 2) => (ImageMode::Palette, "P;2"),
            (PngColor::Palette, 4) => (ImageMode::Palette, "P;4"),
            (PngColor::Palette, 8) => (ImageMode::Palette, "P"),
            (PngColor::LumaA, 8) => (ImageMode::LumaA, "LA"),
            (PngColor::LumaA, 16) => (ImageMode::LumaA, "LA;16B"),
            (PngColor::RGBA, 8) => (ImageMode::RGBA, "RGBA"),
            (PngColor::RGBA, 16) => (ImageMode::RGBA, "RGBA;16B"),
            _ => return None
        };
        Some(layout)
    }
}
