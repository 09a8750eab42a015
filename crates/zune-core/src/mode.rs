/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Image mode tags reported by header parsers.
//!
//! A mode describes the pixel layout a downstream decoder will produce,
//! it is not the raw layout inside the file (that is carried by the
//! tile descriptor's raw mode).

/// All image modes a header parser can report
#[allow(clippy::upper_case_acronyms)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum ImageMode {
    /// One bit per pixel, black and white
    Bilevel,
    /// Grayscale
    Luma,
    /// Grayscale with alpha
    LumaA,
    /// 16 bit grayscale
    Luma16,
    /// Palette indices into a color table
    Palette,
    /// Red, Green, Blue
    RGB,
    /// Red, Green, Blue, Alpha
    RGBA,
    /// Luminance with red and blue chroma differences (OpenEXR `Y`, `RY`, `BY`)
    YBR
}

impl ImageMode {
    /// The conventional short tag for this mode, e.g. `"RGB"` or `"L"`
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bilevel => "1",
            Self::Luma => "L",
            Self::LumaA => "LA",
            Self::Luma16 => "I;16",
            Self::Palette => "P",
            Self::RGB => "RGB",
            Self::RGBA => "RGBA",
            Self::YBR => "YBR"
        }
    }

    /// Number of color channels present for a certain mode
    ///
    /// E.g. RGB returns 3 since it contains R,G and B colors to make up a pixel
    pub const fn num_components(self) -> usize {
        match self {
            Self::Bilevel | Self::Luma | Self::Luma16 | Self::Palette => 1,
            Self::LumaA => 2,
            Self::RGB | Self::YBR => 3,
            Self::RGBA => 4
        }
    }

    pub const fn has_alpha(self) -> bool {
        matches!(self, Self::RGBA | Self::LumaA)
    }

    pub const fn is_grayscale(self) -> bool {
        matches!(self, Self::Bilevel | Self::Luma | Self::LumaA | Self::Luma16)
    }
}

impl core::fmt::Display for ImageMode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::ImageMode;

    #[test]
    fn mode_tags() {
        assert_eq!(ImageMode::RGB.as_str(), "RGB");
        assert_eq!(ImageMode::YBR.to_string(), "YBR");
        assert_eq!(ImageMode::Luma16.as_str(), "I;16");
        assert_eq!(ImageMode::LumaA.num_components(), 2);
        assert!(ImageMode::RGBA.has_alpha());
        assert!(!ImageMode::Palette.has_alpha());
    }
}
