/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use zune_core::bytestream::{ZCursor, ZStream};
use zune_core::errors::ErrorKind;
use zune_core::header::{AttributeValue, ExrCompression};
use zune_core::mode::ImageMode;
use zune_core::options::DecoderOptions;
use zune_exr::{probe_exr, ExrDecodeErrors, ExrDecoder};

struct HeaderBuilder {
    data: Vec<u8>
}

impl HeaderBuilder {
    fn new() -> HeaderBuilder {
        HeaderBuilder {
            data: vec![0x76, 0x2f, 0x31, 0x01, 0x02, 0, 0, 0]
        }
    }

    fn attribute(mut self, name: &str, type_tag: &str, value: &[u8]) -> HeaderBuilder {
        self.data.extend_from_slice(name.as_bytes());
        self.data.push(0);
        self.data.extend_from_slice(type_tag.as_bytes());
        self.data.push(0);
        self.data.extend_from_slice(&(value.len() as u32).to_le_bytes());
        self.data.extend_from_slice(value);
        self
    }

    fn channels(self, names: &[&str]) -> HeaderBuilder {
        let mut value = Vec::new();
        for name in names {
            value.extend_from_slice(name.as_bytes());
            value.push(0);
            value.extend_from_slice(&1_i32.to_le_bytes());
            value.extend_from_slice(&[0; 4]);
            value.extend_from_slice(&1_i32.to_le_bytes());
            value.extend_from_slice(&1_i32.to_le_bytes());
        }
        value.push(0);
        self.attribute("channels", "chlist", &value)
    }

    fn display_window(self, window: [i32; 4]) -> HeaderBuilder {
        let value: Vec<u8> = window.iter().flat_map(|v| v.to_le_bytes()).collect();
        self.attribute("displayWindow", "box2i", &value)
    }

    fn finish(mut self) -> Vec<u8> {
        self.data.push(0);
        // some pixel data
        self.data.extend_from_slice(&[0xAB; 32]);
        self.data
    }
}

fn decode(data: &[u8]) -> Result<zune_core::header::ImageHeader, ExrDecodeErrors> {
    ExrDecoder::new(ZCursor::new(data)).decode_headers()
}

#[test]
fn probe() {
    assert!(probe_exr(&HeaderBuilder::new().finish()));
    assert!(!probe_exr(&[0x76, 0x2f, 0x31, 0x01, 0x01]));
}

#[test]
fn channel_sets_map_to_modes() {
    let cases: [(&[&str], ImageMode); 4] = [
        (&["R", "G", "B"], ImageMode::RGB),
        (&["B", "G", "R", "A"], ImageMode::RGBA),
        (&["Y", "RY", "BY"], ImageMode::YBR),
        (&["G", "R", "B"], ImageMode::RGB)
    ];

    for (channels, mode) in cases {
        let file = HeaderBuilder::new()
            .channels(channels)
            .display_window([0, 0, 63, 31])
            .finish();
        let header = decode(&file).unwrap();

        assert_eq!(header.mode(), mode, "{channels:?}");
        assert_eq!(header.format(), "EXR");
        assert!(header.tiles().is_empty());
    }
}

#[test]
fn unknown_channel_sets_fail() {
    for channels in [&["Z"][..], &["R", "G"][..], &["R", "G", "B", "Z"][..]] {
        let file = HeaderBuilder::new()
            .channels(channels)
            .display_window([0, 0, 1, 1])
            .finish();
        let err = decode(&file).unwrap_err();

        assert!(matches!(err, ExrDecodeErrors::UnsupportedChannels(_)));
        assert_eq!(err.kind(), ErrorKind::Format);
    }
}

#[test]
fn size_is_max_minus_min() {
    let file = HeaderBuilder::new()
        .display_window([10, 20, 73, 51])
        .channels(&["R", "G", "B"])
        .finish();
    let header = decode(&file).unwrap();

    assert_eq!(header.size(), (63, 31));

    let file = HeaderBuilder::new()
        .display_window([10, 20, 5, 51])
        .channels(&["R", "G", "B"])
        .finish();
    assert_eq!(decode(&file).unwrap_err().kind(), ErrorKind::Format);
}

#[test]
fn attributes_are_kept() {
    let file = HeaderBuilder::new()
        .channels(&["A", "B", "G", "R"])
        .attribute("compression", "compression", &[3])
        .attribute("owner", "string", b"someone")
        .attribute("studioThing", "customType", &[1, 2, 3])
        .attribute("pixelAspectRatio", "float", &1.0_f32.to_le_bytes())
        .attribute("badWindow", "box2i", &[0; 12])
        .display_window([0, 0, 15, 15])
        .finish();
    let header = decode(&file).unwrap();

    assert_eq!(
        header.attribute("compression"),
        Some(&AttributeValue::Compression(ExrCompression::Zip))
    );
    assert_eq!(
        header.attribute("owner"),
        Some(&AttributeValue::Text(b"someone".to_vec()))
    );
    assert_eq!(
        header.attribute("pixelAspectRatio"),
        Some(&AttributeValue::Float(1.0))
    );
    assert!(matches!(
        header.attribute("studioThing"),
        Some(AttributeValue::Raw { type_tag, data }) if type_tag == "customType" && data == &[1, 2, 3]
    ));
    assert!(matches!(
        header.attribute("badWindow"),
        Some(AttributeValue::Raw { .. })
    ));
    assert_eq!(header.attributes().len(), 7);
}

#[test]
fn required_attributes() {
    let file = HeaderBuilder::new().channels(&["R", "G", "B"]).finish();
    let err = decode(&file).unwrap_err();
    assert!(matches!(err, ExrDecodeErrors::MissingAttribute("displayWindow")));

    let file = HeaderBuilder::new().display_window([0, 0, 1, 1]).finish();
    let err = decode(&file).unwrap_err();
    assert!(matches!(err, ExrDecodeErrors::MissingAttribute("channels")));

    // present but malformed
    let file = HeaderBuilder::new()
        .channels(&["R", "G", "B"])
        .attribute("displayWindow", "box2i", &[0; 8])
        .finish();
    assert_eq!(decode(&file).unwrap_err().kind(), ErrorKind::Format);
}

#[test]
fn truncated_headers() {
    let file = HeaderBuilder::new()
        .channels(&["R", "G", "B"])
        .display_window([0, 0, 1, 1])
        .finish();

    // inside an attribute name
    let err = decode(&file[..10]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnexpectedEnd);

    // inside a value
    let err = decode(&file[..30]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnexpectedEnd);

    let err = decode(&file[..6]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnexpectedEnd);

    let err = decode(b"not an exr file").unwrap_err();
    assert!(matches!(err, ExrDecodeErrors::NotAnExrFile));
}

#[test]
fn hostile_value_size_does_not_allocate_it() {
    let mut file = HeaderBuilder::new().finish();
    file.truncate(8);
    file.extend_from_slice(b"huge\0string\0");
    file.extend_from_slice(&u32::MAX.to_le_bytes());
    file.extend_from_slice(b"tiny");

    let options = DecoderOptions::default().set_safe_block_size(64);
    let err = ExrDecoder::new_with_options(ZCursor::new(&file), options)
        .decode_headers()
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnexpectedEnd);
}

#[test]
fn attribute_limit() {
    let mut builder = HeaderBuilder::new();
    for i in 0..10 {
        builder = builder.attribute(&format!("a{i}"), "int", &[0; 4]);
    }
    let file = builder.channels(&["R", "G", "B"]).display_window([0, 0, 1, 1]).finish();

    let options = DecoderOptions::default().exr_set_max_attributes(5);
    let err = ExrDecoder::new_with_options(ZCursor::new(&file), options)
        .decode_headers()
        .unwrap_err();
    assert!(matches!(err, ExrDecodeErrors::TooManyAttributes(5)));

    let header = ExrDecoder::new(ZStream::new(&file[..])).decode_headers().unwrap();
    assert_eq!(header.attribute("a3"), Some(&AttributeValue::Int(0)));
}

#[test]
fn overlong_attribute_names_fail() {
    let long_name = "n".repeat(256);
    let file = HeaderBuilder::new()
        .attribute(&long_name, "int", &1_i32.to_le_bytes())
        .channels(&["R", "G", "B"])
        .display_window([0, 0, 1, 1])
        .finish();
    let err = decode(&file).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Format);

    // a name of the maximum length is fine
    let name = "n".repeat(255);
    let file = HeaderBuilder::new()
        .attribute(&name, "int", &1_i32.to_le_bytes())
        .channels(&["R", "G", "B"])
        .display_window([0, 0, 1, 1])
        .finish();
    let header = decode(&file).unwrap();
    assert_eq!(header.attribute(&name), Some(&AttributeValue::Int(1)));
}
