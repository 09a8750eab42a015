/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Chunk checksums, the CRC-32 of ISO 3309 over chunk type and data

const fn make_table() -> [u32; 256] {
    let mut table = [0_u32; 256];
    let mut n = 0;

    while n < 256 {
        let mut c = n as u32;
        let mut k = 0;

        while k < 8 {
            c = if c & 1 == 1 {
                0xedb8_8320 ^ (c >> 1)
            } else {
                c >> 1
            };
            k += 1;
        }
        table[n] = c;
        n += 1;
    }
    table
}

static CRC_TABLE: [u32; 256] = make_table();

/// Update a running crc with `bytes`, start with `u32::MAX` and invert the result
pub(crate) fn crc32_update(crc: u32, bytes: &[u8]) -> u32 {
    bytes.iter().fold(crc, |c, &byte| {
        CRC_TABLE[((c ^ u32::from(byte)) & 0xff) as usize] ^ (c >> 8)
    })
}

/// CRC of a chunk type followed by its data
pub(crate) fn chunk_crc(chunk_type: [u8; 4], data: &[u8]) -> u32 {
    !crc32_update(crc32_update(u32::MAX, &chunk_type), data)
}

#[cfg(test)]
mod tests {
    #[test]
    fn iend_crc() {
        assert_eq!(super::chunk_crc(*b"IEND", &[]), 0xae42_6082);
    }
}
