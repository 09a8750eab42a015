/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
#![cfg(feature = "serde")]

use serde::ser::*;

use crate::header::{BoundingBox, ImageHeader, TileDescriptor};
use crate::mode::ImageMode;

impl Serialize for ImageMode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer
    {
        serializer.serialize_str(self.as_str())
    }
}

impl Serialize for BoundingBox {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer
    {
        let mut tuple = serializer.serialize_tuple(4)?;
        tuple.serialize_element(&self.x0)?;
        tuple.serialize_element(&self.y0)?;
        tuple.serialize_element(&self.x1)?;
        tuple.serialize_element(&self.y1)?;
        tuple.end()
    }
}

impl Serialize for TileDescriptor {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer
    {
        let mut state = serializer.serialize_struct("TileDescriptor", 6)?;
        state.serialize_field("decoder", &self.decoder_id)?;
        state.serialize_field("box", &self.bounding_box)?;
        state.serialize_field("offset", &self.source_offset)?;
        state.serialize_field("raw_mode", &self.args.raw_mode)?;
        state.serialize_field("stride", &self.args.stride)?;
        state.serialize_field("orientation", &self.args.orientation)?;
        state.end()
    }
}

impl Serialize for ImageHeader {
    #[allow(clippy::uninlined_format_args)]
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer
    {
        // attribute values are many shapes, serialize them as their debug value
        let attributes: Vec<(&String, String)> = self
            .attributes()
            .iter()
            .map(|(name, value)| (name, format!("{:?}", value)))
            .collect();

        let mut state = serializer.serialize_struct("ImageHeader", 6)?;
        state.serialize_field("format", self.format())?;
        state.serialize_field("mode", &self.mode())?;
        state.serialize_field("width", &self.width())?;
        state.serialize_field("height", &self.height())?;
        state.serialize_field("tiles", self.tiles())?;
        state.serialize_field("attributes", &attributes)?;
        state.end()
    }
}
