/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use zune_core::bytestream::{ZByteBuffer, ZByteReaderTrait};
use zune_core::header::AttributeValue;
use zune_core::log::{info, warn};

use crate::decoder::PngInfo;
use crate::enums::{InterlaceMethod, PngColor};
use crate::error::PngDecodeErrors;
use crate::PngDecoder;

impl<T: ZByteReaderTrait> PngDecoder<T> {
    pub(crate) fn parse_ihdr(&mut self, data: &ZByteBuffer) -> Result<(), PngDecodeErrors> {
        if self.png_info.is_some() {
            return Err(PngDecodeErrors::GenericStatic("Multiple IHDR, corrupt PNG"));
        }

        if data.len() != 13 {
            return Err(PngDecodeErrors::GenericStatic("BAD IHDR length"));
        }

        let width = data.int32_be(0)?;
        let height = data.int32_be(4)?;

        if width == 0 || height == 0 {
            return Err(PngDecodeErrors::GenericStatic("Width or height cannot be zero"));
        }

        if width as usize > self.options.max_width() {
            return Err(PngDecodeErrors::TooLargeDimensions(
                "width",
                self.options.max_width(),
                width as usize
            ));
        }

        if height as usize > self.options.max_height() {
            return Err(PngDecodeErrors::TooLargeDimensions(
                "height",
                self.options.max_height(),
                height as usize
            ));
        }

        let depth = data.byte_at(8)?;
        let color_byte = data.byte_at(9)?;

        let color = PngColor::from_int(color_byte)
            .ok_or_else(|| PngDecodeErrors::Generic(format!("Unknown color value {color_byte}")))?;

        // verify colors plus bit depths
        if color.layout(depth).is_none() {
            return Err(PngDecodeErrors::Generic(format!(
                "Bit depth of {depth} not allowed for {color:?} images"
            )));
        }

        if data.byte_at(10)? != 0 {
            return Err(PngDecodeErrors::GenericStatic("Unknown compression method"));
        }

        let filter_method = data.byte_at(11)?;
        if filter_method != 0 {
            return Err(PngDecodeErrors::Generic(format!(
                "Unknown filter method {filter_method}"
            )));
        }

        let interlace = data.byte_at(12)?;
        let interlace_method = InterlaceMethod::from_int(interlace).ok_or_else(|| {
            PngDecodeErrors::Generic(format!("Unknown interlace method {interlace}"))
        })?;

        info!("Width: {}", width);
        info!("Height: {}", height);
        info!("Color type: {:?}", color);
        info!("Depth: {:?}", depth);
        info!("Interlace :{:?}", interlace_method);

        self.png_info = Some(PngInfo {
            width,
            height,
            depth,
            color,
            interlace_method
        });

        Ok(())
    }

    pub(crate) fn parse_plte(&mut self, data: ZByteBuffer) -> Result<(), PngDecodeErrors> {
        if data.is_empty() || data.len() % 3 != 0 || data.len() > 256 * 3 {
            return Err(PngDecodeErrors::GenericStatic("Invalid PLTE length"));
        }
        self.attributes.insert(
            "palette".to_string(),
            AttributeValue::Raw {
                type_tag: "RGB".to_string(),
                data:     data.into_vec()
            }
        );
        Ok(())
    }

    pub(crate) fn parse_trns(&mut self, data: ZByteBuffer) -> Result<(), PngDecodeErrors> {
        let color = self.png_info.map(|info| info.color);

        let value = match color {
            Some(PngColor::Luma) if data.len() == 2 => {
                AttributeValue::UInt(u64::from(data.int16_be(0)?))
            }
            Some(PngColor::RGB) if data.len() == 6 => AttributeValue::V3i([
                i32::from(data.int16_be(0)?),
                i32::from(data.int16_be(2)?),
                i32::from(data.int16_be(4)?)
            ]),
            Some(PngColor::Palette) => AttributeValue::Raw {
                type_tag: "alpha".to_string(),
                data:     data.into_vec()
            },
            _ => {
                warn!("Ignoring tRNS chunk of {} bytes", data.len());
                return Ok(());
            }
        };
        self.attributes.insert("transparency".to_string(), value);
        Ok(())
    }

    pub(crate) fn parse_gama(&mut self, data: &ZByteBuffer) -> Result<(), PngDecodeErrors> {
        if data.len() != 4 {
            warn!("Ignoring gAMA chunk of {} bytes", data.len());
            return Ok(());
        }
        let gamma = f64::from(data.int32_be(0)?) / 100_000.0;
        self.attributes
            .insert("gamma".to_string(), AttributeValue::Double(gamma));
        Ok(())
    }

    pub(crate) fn parse_phys(&mut self, data: &ZByteBuffer) -> Result<(), PngDecodeErrors> {
        if data.len() != 9 {
            warn!("Ignoring pHYs chunk of {} bytes", data.len());
            return Ok(());
        }
        let px = data.int32_be(0)?;
        let py = data.int32_be(4)?;

        match data.byte_at(8)? {
            1 => {
                // pixels per meter to pixels per inch
                let to_dpi = |ppm: u32| (f64::from(ppm) * 0.0254).round() as i32;
                self.attributes.insert(
                    "dpi".to_string(),
                    AttributeValue::V2i([to_dpi(px), to_dpi(py)])
                );
            }
            0 => {
                if let (Ok(x), Ok(y)) = (i32::try_from(px), i32::try_from(py)) {
                    self.attributes
                        .insert("aspect".to_string(), AttributeValue::V2i([x, y]));
                }
            }
            unit => {
                warn!("Unknown pHYs unit {}", unit);
            }
        }
        Ok(())
    }
}
