/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Global Decoder options

/// Largest number of bytes requested from a source in one read call
/// unless configured otherwise.
pub const DEFAULT_SAFE_BLOCK_SIZE: usize = 1024 * 1024;

/// Decoder options
///
/// Not all options are respected by all parsers,
/// each option lists the parsers that respect it
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct DecoderOptions {
    /// Maximum width for which parsers will
    /// reject images larger than the specified width.
    ///
    /// - Default value: 16384
    /// - Respected by: `all parsers`
    max_width:       usize,
    /// Maximum height for which parsers will reject
    /// images larger than the specified height
    ///
    /// - Default value: 16384
    /// - Respected by: `all parsers`
    max_height:      usize,
    /// Maximum number of bytes requested from the underlying
    /// source in a single read call.
    ///
    /// Reads larger than this are serviced block by block, so a
    /// length taken from the file can never force one huge allocation
    ///
    /// - Default value: 1 MiB
    /// - Respected by: `all parsers`
    safe_block_size: usize,
    /// Maximum number of attributes read from a header before the parser
    /// gives up
    ///
    /// - Default value: 1024
    /// - Respected by: `exr`
    max_attributes:  usize,
    /// Whether the PNG parser should confirm crc
    /// of the chunks it reads
    ///
    /// - Default value: true
    /// - Respected by: `png`
    png_confirm_crc: bool
}

impl Default for DecoderOptions {
    fn default() -> Self {
        Self {
            max_width:       1 << 14,
            max_height:      1 << 14,
            safe_block_size: DEFAULT_SAFE_BLOCK_SIZE,
            max_attributes:  1024,
            png_confirm_crc: true
        }
    }
}

/// Global options respected by all parsers
impl DecoderOptions {
    /// Get maximum width configured for which the parser
    /// should reject images greater than this width
    pub const fn max_width(&self) -> usize {
        self.max_width
    }

    /// Get maximum height configured for which the parser should
    /// reject images greater than this height
    pub const fn max_height(&self) -> usize {
        self.max_height
    }

    /// Get the largest number of bytes requested from a source in one
    /// physical read
    pub const fn safe_block_size(&self) -> usize {
        self.safe_block_size
    }

    /// Set maximum width for which the parser should reject images
    /// greater than that width
    ///
    /// # Arguments
    ///
    /// * `width`:  The maximum width allowed
    ///
    /// returns: DecoderOptions
    pub fn set_max_width(mut self, width: usize) -> Self {
        self.max_width = width;
        self
    }

    /// Set maximum height for which the parser should reject images
    /// greater than that height
    /// # Arguments
    ///
    /// * `height`: The maximum height allowed
    ///
    /// returns: DecoderOptions
    ///
    pub fn set_max_height(mut self, height: usize) -> Self {
        self.max_height = height;
        self
    }

    /// Set the largest number of bytes requested from a source in one
    /// physical read.
    ///
    /// A value of zero is treated as one, a reader always needs to make progress
    pub fn set_safe_block_size(mut self, size: usize) -> Self {
        self.safe_block_size = size.max(1);
        self
    }
}

/// OpenEXR specific options
impl DecoderOptions {
    /// Get the maximum number of attributes the exr parser reads
    pub const fn exr_get_max_attributes(&self) -> usize {
        self.max_attributes
    }

    /// Set the maximum number of attributes the exr parser reads before
    /// returning an error
    pub fn exr_set_max_attributes(mut self, count: usize) -> Self {
        self.max_attributes = count;
        self
    }
}

/// PNG specific options
impl DecoderOptions {
    /// Whether the png parser should confirm
    /// crc 32 checksums
    pub const fn png_get_confirm_crc(&self) -> bool {
        self.png_confirm_crc
    }

    /// Set whether the png parser should confirm
    /// CRC 32 checksums
    pub fn png_set_confirm_crc(mut self, yes: bool) -> Self {
        self.png_confirm_crc = yes;
        self
    }
}
