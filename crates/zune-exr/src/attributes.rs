/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Conversion of raw attribute values into typed values.
//!
//! Every conversion insists on the exact encoded size of its type, a value
//! that is too short or too long does not convert.

use zune_core::bytestream::{Layout, Unpacked, Value, ZByteBuffer};
use zune_core::header::{
    AttributeValue, ChannelDescriptor, ExrCompression, PixelType, Preview, TileDescription
};
use zune_core::log::{trace, warn};

/// Convert `data` according to `type_tag`, keeping the raw bytes when it does not convert
pub(crate) fn convert(type_tag: &str, data: ZByteBuffer) -> AttributeValue {
    match typed_value(type_tag, &data) {
        Some(value) => value,
        None => {
            if is_known_type(type_tag) {
                warn!(
                    "Attribute of type {} could not be converted from {} bytes",
                    type_tag,
                    data.len()
                );
            } else {
                trace!("Keeping attribute of unknown type {} as raw bytes", type_tag);
            }
            AttributeValue::Raw {
                type_tag: type_tag.to_string(),
                data:     data.into_vec()
            }
        }
    }
}

fn is_known_type(type_tag: &str) -> bool {
    matches!(
        type_tag,
        "box2i"
            | "box2f"
            | "chlist"
            | "chromaticities"
            | "compression"
            | "double"
            | "envmap"
            | "float"
            | "int"
            | "keycode"
            | "lineOrder"
            | "m33f"
            | "m44f"
            | "preview"
            | "rational"
            | "string"
            | "stringvector"
            | "tiledesc"
            | "timecode"
            | "v2f"
            | "v2i"
            | "v3f"
            | "v3i"
    )
}

fn typed_value(type_tag: &str, data: &ZByteBuffer) -> Option<AttributeValue> {
    let value = match type_tag {
        "box2i" => AttributeValue::Box2i(ints(&unpack(data, "<4i")?)?),
        "box2f" => AttributeValue::Box2f(floats(&unpack(data, "<4f")?)?),
        "chlist" => AttributeValue::ChannelList(channel_list(data)?),
        "chromaticities" => AttributeValue::Chromaticities(floats(&unpack(data, "<8f")?)?),
        "compression" => AttributeValue::Compression(ExrCompression::from_u8(single_byte(data)?)?),
        "double" => AttributeValue::Double(unpack(data, "<d")?.first()?.as_f64()?),
        "envmap" => AttributeValue::EnvMap(single_byte(data)?),
        "float" => AttributeValue::Float(floats::<1>(&unpack(data, "<f")?)?[0]),
        "int" => AttributeValue::Int(ints::<1>(&unpack(data, "<i")?)?[0]),
        "keycode" => AttributeValue::KeyCode(ints(&unpack(data, "<7i")?)?),
        "lineOrder" => AttributeValue::LineOrder(single_byte(data)?),
        "m33f" => AttributeValue::M33f(floats(&unpack(data, "<9f")?)?),
        "m44f" => AttributeValue::M44f(floats(&unpack(data, "<16f")?)?),
        "preview" => AttributeValue::Preview(preview(data)?),
        "rational" => {
            let values = unpack(data, "<iI")?;
            let numerator = i32::try_from(values.first()?.as_i64()?).ok()?;
            let denominator = u32::try_from(values.get(1)?.as_u64()?).ok()?;
            AttributeValue::Rational(numerator, denominator)
        }
        "string" => AttributeValue::Text(data.as_bytes().to_vec()),
        "stringvector" => AttributeValue::TextList(string_vector(data)?),
        "tiledesc" => {
            let values = unpack(data, "<IIB")?;
            let x_size = u32::try_from(values.first()?.as_u64()?).ok()?;
            let y_size = u32::try_from(values.get(1)?.as_u64()?).ok()?;
            let mode = u8::try_from(values.get(2)?.as_u64()?).ok()?;

            AttributeValue::TileDesc(TileDescription {
                x_size,
                y_size,
                level_mode: mode & 0x0f,
                rounding_mode: mode >> 4
            })
        }
        "timecode" => {
            let values = unpack(data, "<II")?;
            let time = u32::try_from(values.first()?.as_u64()?).ok()?;
            let user = u32::try_from(values.get(1)?.as_u64()?).ok()?;
            AttributeValue::TimeCode(time, user)
        }
        "v2f" => AttributeValue::V2f(floats(&unpack(data, "<2f")?)?),
        "v2i" => AttributeValue::V2i(ints(&unpack(data, "<2i")?)?),
        "v3f" => AttributeValue::V3f(floats(&unpack(data, "<3f")?)?),
        "v3i" => AttributeValue::V3i(ints(&unpack(data, "<3i")?)?),
        _ => return None
    };
    Some(value)
}

/// Unpack `data` with `format`, which must cover all of it
fn unpack(data: &ZByteBuffer, format: &str) -> Option<Vec<Value>> {
    let layout = Layout::parse(format).ok()?;
    if layout.size() != data.len() {
        return None;
    }
    data.unpack(&layout, 0).ok().map(Unpacked::into_values)
}

fn ints<const N: usize>(values: &[Value]) -> Option<[i32; N]> {
    if values.len() != N {
        return None;
    }
    let mut out = [0; N];
    for (slot, value) in out.iter_mut().zip(values) {
        *slot = i32::try_from(value.as_i64()?).ok()?;
    }
    Some(out)
}

fn floats<const N: usize>(values: &[Value]) -> Option<[f32; N]> {
    if values.len() != N {
        return None;
    }
    let mut out = [0.0; N];
    for (slot, value) in out.iter_mut().zip(values) {
        // widened from an f32 when unpacked, narrowing back is exact
        *slot = value.as_f64()? as f32;
    }
    Some(out)
}

fn single_byte(data: &ZByteBuffer) -> Option<u8> {
    if data.len() != 1 {
        return None;
    }
    data.byte_at(0).ok()
}

/// NUL terminated channel names each followed by
/// `pixel_type: i32, p_linear: u8, reserved: [u8; 3], x_sampling: i32, y_sampling: i32`,
/// ending with an empty name
fn channel_list(data: &ZByteBuffer) -> Option<Vec<ChannelDescriptor>> {
    const CHANNEL_FIELDS: usize = 16;

    let mut channels = Vec::new();
    let mut rest = data.clone();

    loop {
        let end = rest.find(&[0])?;
        if end == 0 {
            break;
        }
        let name = String::from_utf8_lossy(rest.slice(0, end).ok()?.as_bytes()).into_owned();
        let fields = rest.slice(end + 1, end + 1 + CHANNEL_FIELDS).ok()?;

        let pixel_type = PixelType::from_i32(fields.int32_le(0).ok()? as i32)?;
        let linear = fields.byte_at(4).ok()? != 0;
        let x_sampling = fields.int32_le(8).ok()? as i32;
        let y_sampling = fields.int32_le(12).ok()? as i32;

        channels.push(ChannelDescriptor {
            name,
            pixel_type,
            linear,
            sampling: (x_sampling, y_sampling)
        });
        rest = rest.slice(end + 1 + CHANNEL_FIELDS, rest.len()).ok()?;
    }
    Some(channels)
}

/// `width: u32, height: u32` followed by `width * height` RGBA pixels
fn preview(data: &ZByteBuffer) -> Option<Preview> {
    let width = data.int32_le(0).ok()?;
    let height = data.int32_le(4).ok()?;

    let expected = (width as usize)
        .checked_mul(height as usize)?
        .checked_mul(4)?;
    if data.len() - 8 != expected {
        return None;
    }
    Some(Preview {
        width,
        height,
        data: data.slice(8, data.len()).ok()?.into_vec()
    })
}

/// A run of `length: i32` prefixed strings
fn string_vector(data: &ZByteBuffer) -> Option<Vec<Vec<u8>>> {
    let mut strings = Vec::new();
    let mut position = 0;

    while position < data.len() {
        let length = usize::try_from(data.int32_le(position).ok()? as i32).ok()?;
        let start = position + 4;
        let end = start.checked_add(length)?;

        strings.push(data.slice(start, end).ok()?.into_vec());
        position = end;
    }
    Some(strings)
}

#[cfg(test)]
mod tests {
    use zune_core::bytestream::ZByteBuffer;
    use zune_core::header::{AttributeValue, ExrCompression, PixelType};

    use super::convert;

    fn le_ints(values: &[i32]) -> ZByteBuffer {
        values
            .iter()
            .flat_map(|v| v.to_le_bytes())
            .collect::<Vec<u8>>()
            .into()
    }

    #[test]
    fn fixed_size_types() {
        assert_eq!(
            convert("box2i", le_ints(&[0, 0, 63, 31])),
            AttributeValue::Box2i([0, 0, 63, 31])
        );
        assert_eq!(
            convert("v2f", ZByteBuffer::from([1.5_f32.to_le_bytes(), (-2.0_f32).to_le_bytes()].concat())),
            AttributeValue::V2f([1.5, -2.0])
        );
        assert_eq!(
            convert("compression", ZByteBuffer::from(vec![3])),
            AttributeValue::Compression(ExrCompression::Zip)
        );
        assert_eq!(
            convert("rational", le_ints(&[-24000, 1001])),
            AttributeValue::Rational(-24000, 1001)
        );
    }

    #[test]
    fn wrong_length_keeps_raw_bytes() {
        let value = convert("box2i", le_ints(&[0, 0, 63]));
        assert_eq!(
            value,
            AttributeValue::Raw {
                type_tag: "box2i".to_string(),
                data:     le_ints(&[0, 0, 63]).into_vec()
            }
        );

        let value = convert("compression", ZByteBuffer::from(vec![42]));
        assert!(matches!(value, AttributeValue::Raw { .. }));

        let value = convert("myOwnType", ZByteBuffer::from(vec![1, 2]));
        assert!(matches!(value, AttributeValue::Raw { type_tag, .. } if type_tag == "myOwnType"));
    }

    #[test]
    fn channel_lists() {
        let mut data = Vec::new();
        for name in [&b"G"[..], b"Z"] {
            data.extend_from_slice(name);
            data.push(0);
            data.extend_from_slice(&1_i32.to_le_bytes());
            data.extend_from_slice(&[1, 0, 0, 0]);
            data.extend_from_slice(&1_i32.to_le_bytes());
            data.extend_from_slice(&2_i32.to_le_bytes());
        }
        data.push(0);

        match convert("chlist", ZByteBuffer::from(data.clone())) {
            AttributeValue::ChannelList(channels) => {
                assert_eq!(channels.len(), 2);
                assert_eq!(channels[1].name, "Z");
                assert_eq!(channels[0].pixel_type, PixelType::Half);
                assert!(channels[0].linear);
                assert_eq!(channels[0].sampling, (1, 2));
            }
            other => panic!("unexpected {other:?}")
        }

        // names that are not utf-8 keep the list
        let mut latin = vec![b'R', 0xE9, 0];
        latin.extend_from_slice(&data[2..18]);
        latin.push(0);
        match convert("chlist", ZByteBuffer::from(latin)) {
            AttributeValue::ChannelList(channels) => assert_eq!(channels[0].name, "R\u{FFFD}"),
            other => panic!("unexpected {other:?}")
        }

        // cut inside the second channel's fields
        data.truncate(25);
        assert!(matches!(
            convert("chlist", ZByteBuffer::from(data)),
            AttributeValue::Raw { .. }
        ));
    }

    #[test]
    fn strings_and_previews() {
        assert_eq!(
            convert("string", ZByteBuffer::from(&b"ACES"[..])),
            AttributeValue::Text(b"ACES".to_vec())
        );

        let mut vector = Vec::new();
        vector.extend_from_slice(&2_i32.to_le_bytes());
        vector.extend_from_slice(b"ab");
        vector.extend_from_slice(&0_i32.to_le_bytes());
        assert_eq!(
            convert("stringvector", ZByteBuffer::from(vector)),
            AttributeValue::TextList(vec![b"ab".to_vec(), Vec::new()])
        );

        let mut preview = Vec::new();
        preview.extend_from_slice(&2_u32.to_le_bytes());
        preview.extend_from_slice(&1_u32.to_le_bytes());
        preview.extend_from_slice(&[7; 8]);
        match convert("preview", ZByteBuffer::from(preview.clone())) {
            AttributeValue::Preview(p) => assert_eq!((p.width, p.height, p.data.len()), (2, 1, 8)),
            other => panic!("unexpected {other:?}")
        }

        preview.pop();
        assert!(matches!(
            convert("preview", ZByteBuffer::from(preview)),
            AttributeValue::Raw { .. }
        ));
    }

    #[test]
    fn tile_descriptions() {
        let mut data = Vec::new();
        data.extend_from_slice(&64_u32.to_le_bytes());
        data.extend_from_slice(&32_u32.to_le_bytes());
        data.push(0x11);

        match convert("tiledesc", ZByteBuffer::from(data)) {
            AttributeValue::TileDesc(desc) => {
                assert_eq!((desc.x_size, desc.y_size), (64, 32));
                assert_eq!((desc.level_mode, desc.rounding_mode), (1, 1));
            }
            other => panic!("unexpected {other:?}")
        }
    }
}
