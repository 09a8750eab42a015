/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use zune_core::bytestream::{Layout, Unpacked, Value, ZByteBuffer};
use zune_core::errors::ErrorKind;

fn sample() -> ZByteBuffer {
    ZByteBuffer::from(&[0x01, 0x02, 0x03, 0x04, 0x05, 0x06][..])
}

#[test]
fn slice_has_requested_length_and_content() {
    let buffer = sample();

    for start in 0..=buffer.len() {
        for end in start..=buffer.len() {
            let slice = buffer.slice(start, end).unwrap();
            assert_eq!(slice.len(), end - start);
            assert_eq!(slice.as_bytes(), &buffer.as_bytes()[start..end]);
        }
    }
}

#[test]
fn slice_out_of_range() {
    let buffer = sample();

    assert_eq!(buffer.slice(4, 2).unwrap_err().kind(), ErrorKind::Index);
    assert_eq!(buffer.slice(0, 7).unwrap_err().kind(), ErrorKind::Index);
}

#[test]
fn little_and_big_endian_are_reversed() {
    let buffer = sample();

    assert_eq!(buffer.int16_le(0).unwrap(), 0x0201);
    assert_eq!(buffer.int16_be(0).unwrap(), 0x0102);
    assert_eq!(buffer.int32_le(1).unwrap(), 0x0504_0302);
    assert_eq!(buffer.int32_be(1).unwrap(), 0x0203_0405);
    assert_eq!(
        buffer.int32_le(2).unwrap().swap_bytes(),
        buffer.int32_be(2).unwrap()
    );
}

#[test]
fn integer_read_past_end_does_not_wrap() {
    let buffer = ZByteBuffer::from(vec![1, 2, 3, 4]);

    assert_eq!(buffer.int32_le(0).unwrap(), 0x0403_0201);
    assert_eq!(buffer.int32_le(1).unwrap_err().kind(), ErrorKind::Index);
    assert_eq!(buffer.int16_be(3).unwrap_err().kind(), ErrorKind::Index);
    assert_eq!(buffer.byte_at(4).unwrap_err().kind(), ErrorKind::Index);
    assert_eq!(buffer.byte_at(3).unwrap(), 4);
}

#[test]
fn concat_leaves_operands_alone() {
    let a = ZByteBuffer::from(vec![1, 2]);
    let b = ZByteBuffer::from(vec![3]);
    let joined = a.concat(&b);

    assert_eq!(joined.as_bytes(), &[1, 2, 3]);
    assert_eq!(a.len(), 2);
    assert_eq!(b.len(), 1);
}

#[test]
fn find_and_starts_with() {
    let buffer = ZByteBuffer::from(&b"RIFF....WEBPVP8 "[..]);

    assert!(buffer.starts_with(b"RIFF"));
    assert!(!buffer.starts_with(b"RIFX"));
    assert!(!ZByteBuffer::from(&b"RI"[..]).starts_with(b"RIFF"));

    assert_eq!(buffer.find(b"WEBP"), Some(8));
    assert_eq!(buffer.find(b"VP8L"), None);
    assert_eq!(buffer.find(b""), Some(0));
}

#[test]
fn single_field_unpacks_to_bare_value() {
    let buffer = sample();
    let layout = Layout::parse("<H").unwrap();

    match buffer.unpack(&layout, 0).unwrap() {
        Unpacked::Single(Value::UInt(value)) => assert_eq!(value, 0x0201),
        other => panic!("unexpected {other:?}")
    }
}

#[test]
fn many_fields_unpack_in_order() {
    let buffer = sample();
    let layout = Layout::parse(">BxH").unwrap();
    let values = buffer.unpack(&layout, 1).unwrap().into_values();

    assert_eq!(values, vec![Value::UInt(2), Value::UInt(0x0405)]);
}

#[test]
fn short_layout_is_a_format_error() {
    let buffer = ZByteBuffer::from(vec![1, 2, 3]);
    let layout = Layout::parse("<I").unwrap();

    let err = buffer.unpack(&layout, 0).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Format);
    assert_ne!(err.kind(), ErrorKind::Index);
}
