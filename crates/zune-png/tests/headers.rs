/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use zune_core::bytestream::{ZCursor, ZStream};
use zune_core::errors::ErrorKind;
use zune_core::header::{AttributeValue, BoundingBox};
use zune_core::mode::ImageMode;
use zune_core::options::DecoderOptions;
use zune_png::{probe_png, PngDecodeErrors, PngDecoder, PNG_SIGNATURE};

fn crc32(bytes: &[u8]) -> u32 {
    let mut crc = u32::MAX;
    for &byte in bytes {
        crc ^= u32::from(byte);
        for _ in 0..8 {
            crc = if crc & 1 == 1 {
                0xedb8_8320 ^ (crc >> 1)
            } else {
                crc >> 1
            };
        }
    }
    !crc
}

fn chunk(name: &[u8; 4], data: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(&(data.len() as u32).to_be_bytes());
    out.extend_from_slice(name);
    out.extend_from_slice(data);

    let mut covered = name.to_vec();
    covered.extend_from_slice(data);
    out.extend_from_slice(&crc32(&covered).to_be_bytes());
    out
}

fn ihdr(width: u32, height: u32, depth: u8, color: u8, interlace: u8) -> Vec<u8> {
    let mut data = Vec::new();
    data.extend_from_slice(&width.to_be_bytes());
    data.extend_from_slice(&height.to_be_bytes());
    data.extend_from_slice(&[depth, color, 0, 0, interlace]);
    chunk(b"IHDR", &data)
}

fn png(chunks: &[Vec<u8>]) -> Vec<u8> {
    let mut out = PNG_SIGNATURE.to_vec();
    for c in chunks {
        out.extend_from_slice(c);
    }
    out
}

#[test]
fn probe() {
    assert!(probe_png(&png(&[])));
    assert!(!probe_png(b"\x89PNG"));
}

#[test]
fn rgba_tile_points_at_first_idat() {
    let text = chunk(b"tEXt", b"Comment\0hello");
    let file = png(&[
        ihdr(16, 8, 8, 6, 0),
        text.clone(),
        chunk(b"IDAT", &[1, 2, 3]),
        chunk(b"IEND", &[])
    ]);
    let header = PngDecoder::new(ZCursor::new(&file)).decode_headers().unwrap();

    assert_eq!(header.format(), "PNG");
    assert_eq!(header.mode(), ImageMode::RGBA);
    assert_eq!(header.size(), (16, 8));

    let tile = &header.tiles()[0];
    assert_eq!(tile.decoder_id, "zip");
    assert_eq!(tile.bounding_box, BoundingBox::new(0, 0, 16, 8));
    assert_eq!(tile.args.raw_mode, "RGBA");
    // signature, IHDR, tEXt, IDAT length and type
    assert_eq!(tile.source_offset, (8 + 25 + text.len() + 8) as u64);
    assert_eq!(file[tile.source_offset as usize], 1);
}

#[test]
fn forward_only_sources_work() {
    let file = png(&[
        ihdr(2, 2, 16, 0, 1),
        chunk(b"gAMA", &45455_u32.to_be_bytes()),
        chunk(b"IDAT", &[])
    ]);
    let header = PngDecoder::new(ZStream::new(&file[..]))
        .decode_headers()
        .unwrap();

    assert_eq!(header.mode(), ImageMode::Luma16);
    assert_eq!(header.tiles()[0].args.raw_mode, "I;16B");
    assert_eq!(header.attribute("interlace"), Some(&AttributeValue::UInt(1)));
    match header.attribute("gamma") {
        Some(AttributeValue::Double(gamma)) => assert!((gamma - 0.45455).abs() < 1e-9),
        other => panic!("unexpected gamma {other:?}")
    }
}

#[test]
fn palette_and_transparency() {
    let mut phys = Vec::new();
    phys.extend_from_slice(&2835_u32.to_be_bytes());
    phys.extend_from_slice(&2835_u32.to_be_bytes());
    phys.push(1);

    let file = png(&[
        ihdr(4, 4, 4, 3, 0),
        chunk(b"PLTE", &[0, 0, 0, 255, 0, 0]),
        chunk(b"tRNS", &[0]),
        chunk(b"pHYs", &phys),
        chunk(b"IDAT", &[])
    ]);
    let header = PngDecoder::new(ZCursor::new(&file)).decode_headers().unwrap();

    assert_eq!(header.mode(), ImageMode::Palette);
    assert_eq!(header.tiles()[0].args.raw_mode, "P;4");
    assert_eq!(header.attribute("dpi"), Some(&AttributeValue::V2i([72, 72])));
    assert!(matches!(
        header.attribute("palette"),
        Some(AttributeValue::Raw { data, .. }) if data.len() == 6
    ));
    assert!(header.attribute("transparency").is_some());
}

#[test]
fn indexed_image_needs_a_palette() {
    let file = png(&[ihdr(4, 4, 8, 3, 0), chunk(b"IDAT", &[])]);
    let err = PngDecoder::new(ZCursor::new(&file)).decode_headers().unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Format);
}

#[test]
fn bad_depth_colour_pairs() {
    for (depth, color) in [(16, 3), (4, 2), (1, 6), (3, 0)] {
        let file = png(&[ihdr(1, 1, depth, color, 0), chunk(b"IDAT", &[])]);
        let result = PngDecoder::new(ZCursor::new(&file)).decode_headers();
        assert!(result.is_err(), "{depth} {color}");
    }
}

#[test]
fn crc_mismatch() {
    let mut file = png(&[ihdr(1, 1, 8, 0, 0), chunk(b"IDAT", &[])]);
    // corrupt the IHDR crc
    file[8 + 21] ^= 0xff;

    let err = PngDecoder::new(ZCursor::new(&file)).decode_headers().unwrap_err();
    assert!(matches!(err, PngDecodeErrors::BadCrc(..)));

    let options = DecoderOptions::default().png_set_confirm_crc(false);
    let header = PngDecoder::new_with_options(ZCursor::new(&file), options)
        .decode_headers()
        .unwrap();
    assert_eq!(header.mode(), ImageMode::Luma);
}

#[test]
fn structural_errors() {
    // IEND before any image data
    let file = png(&[ihdr(1, 1, 8, 0, 0), chunk(b"IEND", &[])]);
    assert!(PngDecoder::new(ZCursor::new(&file)).decode_headers().is_err());

    // unknown critical chunk
    let file = png(&[ihdr(1, 1, 8, 0, 0), chunk(b"ABCD", &[]), chunk(b"IDAT", &[])]);
    assert!(PngDecoder::new(ZCursor::new(&file)).decode_headers().is_err());

    // IHDR not first
    let file = png(&[chunk(b"gAMA", &[0; 4]), ihdr(1, 1, 8, 0, 0)]);
    assert!(PngDecoder::new(ZCursor::new(&file)).decode_headers().is_err());

    // truncated in the middle of a chunk
    let mut file = png(&[ihdr(1, 1, 8, 0, 0), chunk(b"tEXt", &[b'a'; 100])]);
    file.truncate(60);
    let err = PngDecoder::new(ZCursor::new(&file)).decode_headers().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnexpectedEnd);

    let err = PngDecoder::new(ZCursor::new(b"GIF89a..")).decode_headers().unwrap_err();
    assert!(matches!(err, PngDecodeErrors::BadSignature));
}

#[test]
fn dimension_limits() {
    let file = png(&[ihdr(100, 1, 8, 0, 0), chunk(b"IDAT", &[])]);
    let options = DecoderOptions::default().set_max_width(50);
    let err = PngDecoder::new_with_options(ZCursor::new(&file), options)
        .decode_headers()
        .unwrap_err();

    assert!(matches!(err, PngDecodeErrors::TooLargeDimensions(..)));
}
