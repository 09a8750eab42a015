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
use zune_webp::{probe_webp, WebpDecodeErrors, WebpDecoder};

/// A RIFF/VP8 file with the given frame tag and raw dimension fields
fn webp(tag: u32, width: u16, height: u16) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&100_u32.to_le_bytes());
    out.extend_from_slice(b"WEBPVP8 ");
    out.extend_from_slice(&88_u32.to_le_bytes());
    out.extend_from_slice(&tag.to_le_bytes()[..3]);
    out.extend_from_slice(&[0x9d, 0x01, 0x2a]);
    out.extend_from_slice(&width.to_le_bytes());
    out.extend_from_slice(&height.to_le_bytes());
    out.resize(108, 0);
    out
}

/// key frame, version 0, shown, partition of `size` bytes
fn visible_key_frame(size: u32) -> u32 {
    (size << 5) | (1 << 4)
}

#[test]
fn accept() {
    assert!(probe_webp(b"RIFF\x00\x00\x00\x00WEBPVP8 "));
    assert!(probe_webp(&webp(0, 1, 1)));

    assert!(!probe_webp(b"RIFF\x00\x00\x00\x00WEBPVP8L"));
    assert!(!probe_webp(b"RIFX\x00\x00\x00\x00WEBPVP8 "));
    assert!(!probe_webp(b"RIFF\x00\x00\x00\x00WEBP"));
    assert!(!probe_webp(b""));
}

#[test]
fn key_frame_header() {
    let file = webp(visible_key_frame(1234), 128, 128);
    let header = WebpDecoder::new(ZCursor::new(&file)).decode_headers().unwrap();

    assert_eq!(header.format(), "WEBP");
    assert_eq!(header.mode(), ImageMode::RGB);
    assert_eq!(header.size(), (128, 128));

    let tiles = header.tiles();
    assert_eq!(tiles.len(), 1);
    assert_eq!(tiles[0].decoder_id, "webp");
    assert_eq!(tiles[0].bounding_box, BoundingBox::new(0, 0, 128, 128));
    assert_eq!(tiles[0].source_offset, 0);
    assert_eq!(tiles[0].args.raw_mode, "RGB");
    assert_eq!(tiles[0].args.stride, 0);
    assert_eq!(tiles[0].args.orientation, 1);

    assert_eq!(header.attribute("partition_size"), Some(&AttributeValue::UInt(1234)));
    assert_eq!(header.attribute("riff_size"), Some(&AttributeValue::UInt(100)));
    assert_eq!(header.attribute("vp8_chunk_size"), Some(&AttributeValue::UInt(88)));
}

#[test]
fn scale_bits_are_masked_off() {
    let file = webp(visible_key_frame(10), (2 << 14) | 300, (1 << 14) | 200);
    let header = WebpDecoder::new(ZStream::new(&file[..])).decode_headers().unwrap();

    assert_eq!(header.size(), (300, 200));
    assert_eq!(header.attribute("horizontal_scale"), Some(&AttributeValue::UInt(2)));
    assert_eq!(header.attribute("vertical_scale"), Some(&AttributeValue::UInt(1)));
}

#[test]
fn rejects_hidden_and_inter_frames() {
    // inter frame
    let file = webp(visible_key_frame(10) | 1, 16, 16);
    let err = WebpDecoder::new(ZCursor::new(&file)).decode_headers().unwrap_err();
    assert!(matches!(err, WebpDecodeErrors::NotAVisibleFrame));

    // not shown
    let file = webp(10 << 5, 16, 16);
    let err = WebpDecoder::new(ZCursor::new(&file)).decode_headers().unwrap_err();
    assert!(matches!(err, WebpDecodeErrors::NotAVisibleFrame));
    assert_eq!(err.kind(), ErrorKind::Format);
}

#[test]
fn rejects_bad_signatures() {
    let mut file = webp(visible_key_frame(10), 16, 16);
    file[23] = 0x9e;
    let err = WebpDecoder::new(ZCursor::new(&file)).decode_headers().unwrap_err();
    assert!(matches!(err, WebpDecodeErrors::UnsupportedFrameSignature(_)));

    let err = WebpDecoder::new(ZCursor::new(b"RIFF")).decode_headers().unwrap_err();
    assert!(matches!(err, WebpDecodeErrors::NotAWebpFile));

    let file = webp(visible_key_frame(10), 16, 16);
    let err = WebpDecoder::new(ZCursor::new(&file[..25])).decode_headers().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnexpectedEnd);
}

#[test]
fn truncated_container_is_unexpected_end() {
    let file = webp(visible_key_frame(10), 16, 16);
    let err = WebpDecoder::new(ZCursor::new(&file[..18])).decode_headers().unwrap_err();

    assert!(matches!(err, WebpDecodeErrors::IoErrors(_)));
    assert_eq!(err.kind(), ErrorKind::UnexpectedEnd);
}
