/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use zune_core::bytestream::{ZAttributeStream, ZByteIoError, ZByteReaderTrait, ZCursor, ZReader};
use zune_core::errors::ErrorKind;

/// An endless run of `x` that counts how much was handed out
struct EndlessSource {
    handed_out: usize
}

impl ZByteReaderTrait for EndlessSource {
    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<usize, ZByteIoError> {
        buf.fill(b'x');
        self.handed_out += buf.len();
        Ok(buf.len())
    }

    fn name(&self) -> &'static str {
        "EndlessSource"
    }
}

#[test]
fn strings_and_values_interleave() {
    let mut data = Vec::new();
    data.extend_from_slice(b"name\0int\0");
    data.extend_from_slice(&4_u32.to_le_bytes());
    data.extend_from_slice(&[1, 0, 0, 0]);
    data.extend_from_slice(b"\0");

    let mut reader = ZReader::new(ZCursor::new(data));
    let mut stream = ZAttributeStream::new(&mut reader);

    assert_eq!(stream.read_string().unwrap(), b"name");
    assert_eq!(stream.read_string().unwrap(), b"int");
    assert_eq!(stream.read(4).unwrap().int32_le(0).unwrap(), 4);
    assert_eq!(stream.read(4).unwrap().as_bytes(), &[1, 0, 0, 0]);
    assert_eq!(stream.read_string().unwrap(), b"");
    assert_eq!(stream.buffered(), 0);
}

#[test]
fn long_strings_span_chunks() {
    let mut data = vec![b'x'; 1500];
    data.push(0);
    data.extend_from_slice(b"tail");

    let mut reader = ZReader::new_with_block_size(ZCursor::new(data), 100);
    let mut stream = ZAttributeStream::new(&mut reader);

    assert_eq!(stream.read_string().unwrap().len(), 1500);
    assert_eq!(stream.read(4).unwrap().as_bytes(), b"tail");
}

#[test]
fn read_tops_up_only_the_shortfall() {
    let mut data = b"ab\0".to_vec();
    data.extend(0..100_u8);

    let mut reader = ZReader::new(ZCursor::new(data));
    let mut stream = ZAttributeStream::new(&mut reader);

    stream.read_string().unwrap();
    // the first chunk already holds everything
    assert_eq!(stream.buffered(), 100);

    let value = stream.read(40).unwrap();
    assert_eq!(value.byte_at(39).unwrap(), 39);
    assert_eq!(stream.buffered(), 60);
}

#[test]
fn unterminated_string_is_unexpected_end() {
    let mut reader = ZReader::new(ZCursor::new(b"no terminator".to_vec()));
    let mut stream = ZAttributeStream::new(&mut reader);

    assert_eq!(
        stream.read_string().unwrap_err().kind(),
        ErrorKind::UnexpectedEnd
    );
}

#[test]
fn partial_value_is_unexpected_end() {
    let mut reader = ZReader::new(ZCursor::new(b"k\0abc".to_vec()));
    let mut stream = ZAttributeStream::new(&mut reader);

    stream.read_string().unwrap();
    assert_eq!(stream.read(8).unwrap_err().kind(), ErrorKind::UnexpectedEnd);
}

#[test]
fn string_length_limit_stops_reading() {
    let mut reader = ZReader::new(EndlessSource { handed_out: 0 });
    let mut stream = ZAttributeStream::new(&mut reader).with_max_string_length(255);

    let err = stream.read_string().unwrap_err();
    assert!(matches!(err, ZByteIoError::StringTooLong(255)));
    assert_eq!(err.kind(), ErrorKind::Format);
    drop(stream);

    // one chunk was enough to see the string is too long
    assert!(reader.consume().handed_out <= 512);
}

#[test]
fn strings_within_the_limit_are_returned() {
    let mut data = vec![b'a'; 255];
    data.push(0);
    data.extend_from_slice(&[b'b'; 256]);
    data.push(0);

    let mut reader = ZReader::new(ZCursor::new(data));
    let mut stream = ZAttributeStream::new(&mut reader).with_max_string_length(255);

    assert_eq!(stream.read_string().unwrap().len(), 255);
    assert!(matches!(
        stream.read_string(),
        Err(ZByteIoError::StringTooLong(255))
    ));
}
