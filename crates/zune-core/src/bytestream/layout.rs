/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Fixed binary layouts.
//!
//! A [`Layout`] is a sequence of typed fields, each with its own byte order,
//! decoded in one go by [`ZByteBuffer::unpack`](crate::bytestream::ZByteBuffer::unpack).
//! Layouts can be built from [`FieldKind`]s or parsed from the compact
//! notation used by struct packing tools:
//!
//! | prefix | byte order        |
//! |--------|-------------------|
//! | `<`    | little endian     |
//! | `>` `!`| big endian        |
//! | `=` or none | native       |
//!
//! | code | field          | code | field        |
//! |------|----------------|------|--------------|
//! | `x`  | pad byte       | `b` `B` | i8 / u8   |
//! | `h` `H` | i16 / u16   | `i` `I` `l` `L` | i32 / u32 |
//! | `q` `Q` | i64 / u64   | `f` `d` | f32 / f64 |
//! | `c`  | one raw byte   | `s`  | raw bytes, the count is the length |
//!
//! A decimal count before a code repeats it, so `"<4i"` is four little
//! endian `i32`s and `"<8s"` is one run of eight bytes. Fields are packed
//! without alignment padding.
use crate::bytestream::ZByteIoError;

/// Byte order of a multi byte field
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Endian {
    Little,
    Big
}

impl Endian {
    #[cfg(target_endian = "little")]
    pub const NATIVE: Endian = Endian::Little;
    #[cfg(target_endian = "big")]
    pub const NATIVE: Endian = Endian::Big;
}

/// The type of a single field
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum FieldKind {
    /// A byte that is skipped and produces no value
    Pad,
    I8,
    U8,
    I16,
    U16,
    I32,
    U32,
    I64,
    U64,
    F32,
    F64,
    /// A run of raw bytes of the given length, produces one value
    Bytes(usize)
}

impl FieldKind {
    /// Encoded size in bytes
    pub const fn size(self) -> usize {
        match self {
            FieldKind::Pad | FieldKind::I8 | FieldKind::U8 => 1,
            FieldKind::I16 | FieldKind::U16 => 2,
            FieldKind::I32 | FieldKind::U32 | FieldKind::F32 => 4,
            FieldKind::I64 | FieldKind::U64 | FieldKind::F64 => 8,
            FieldKind::Bytes(length) => length
        }
    }
}

/// A field and the byte order it is stored in
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Field {
    pub kind:   FieldKind,
    pub endian: Endian
}

/// A decoded field
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Int(i64),
    UInt(u64),
    Float(f64),
    Bytes(Vec<u8>)
}

impl Value {
    /// The value as a signed integer, if it is an integer that fits
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Value::Int(v) => Some(v),
            Value::UInt(v) => i64::try_from(v).ok(),
            _ => None
        }
    }

    /// The value as an unsigned integer, if it is a non-negative integer
    pub fn as_u64(&self) -> Option<u64> {
        match *self {
            Value::Int(v) => u64::try_from(v).ok(),
            Value::UInt(v) => Some(v),
            _ => None
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Value::Float(v) => Some(v),
            _ => None
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(v) => Some(v),
            _ => None
        }
    }
}

/// The result of unpacking a layout.
///
/// Layouts with a single value field unwrap to [`Unpacked::Single`],
/// everything else (including layouts with no value fields) is [`Unpacked::Many`].
#[derive(Clone, Debug, PartialEq)]
pub enum Unpacked {
    Single(Value),
    Many(Vec<Value>)
}

impl Unpacked {
    pub fn into_values(self) -> Vec<Value> {
        match self {
            Unpacked::Single(value) => vec![value],
            Unpacked::Many(values) => values
        }
    }

    pub fn single(&self) -> Option<&Value> {
        match self {
            Unpacked::Single(value) => Some(value),
            Unpacked::Many(_) => None
        }
    }
}

/// A fixed sequence of fields
#[derive(Clone, Debug, Eq, PartialEq, Default)]
pub struct Layout {
    fields: Vec<Field>
}

impl Layout {
    /// Build a layout where every field uses the same byte order
    pub fn new(endian: Endian, kinds: &[FieldKind]) -> Layout {
        Layout {
            fields: kinds.iter().map(|&kind| Field { kind, endian }).collect()
        }
    }

    /// Build a layout from individually ordered fields
    pub fn from_fields(fields: Vec<Field>) -> Layout {
        Layout { fields }
    }

    /// Parse the compact notation described in the [module docs](self)
    pub fn parse(format: &str) -> Result<Layout, ZByteIoError> {
        let mut chars = format.chars().peekable();

        let endian = match chars.peek() {
            Some('<') => Endian::Little,
            Some('>') | Some('!') => Endian::Big,
            Some('=') => Endian::NATIVE,
            Some('@') => {
                return Err(ZByteIoError::InvalidLayout(
                    "native alignment ('@') is not supported".to_string()
                ))
            }
            _ => Endian::NATIVE
        };
        if matches!(chars.peek(), Some('<' | '>' | '!' | '=')) {
            chars.next();
        }

        let mut fields = Vec::new();
        let mut count: Option<usize> = None;

        for c in chars {
            if let Some(digit) = c.to_digit(10) {
                let next = count
                    .unwrap_or(0)
                    .checked_mul(10)
                    .and_then(|n| n.checked_add(digit as usize))
                    .ok_or_else(|| ZByteIoError::InvalidLayout(format!("count too large in {format:?}")))?;
                count = Some(next);
                continue;
            }
            if c.is_ascii_whitespace() {
                if count.is_some() {
                    return Err(ZByteIoError::InvalidLayout(format!(
                        "count not followed by a format code in {format:?}"
                    )));
                }
                continue;
            }
            let repeat = count.take().unwrap_or(1);

            let kind = match c {
                'x' => FieldKind::Pad,
                'b' => FieldKind::I8,
                'B' => FieldKind::U8,
                'c' => FieldKind::Bytes(1),
                'h' => FieldKind::I16,
                'H' => FieldKind::U16,
                'i' | 'l' => FieldKind::I32,
                'I' | 'L' => FieldKind::U32,
                'q' => FieldKind::I64,
                'Q' => FieldKind::U64,
                'f' => FieldKind::F32,
                'd' => FieldKind::F64,
                's' => {
                    fields.push(Field {
                        kind: FieldKind::Bytes(repeat),
                        endian
                    });
                    continue;
                }
                _ => {
                    return Err(ZByteIoError::InvalidLayout(format!(
                        "unknown format code {c:?} in {format:?}"
                    )))
                }
            };
            fields.extend(core::iter::repeat(Field { kind, endian }).take(repeat));
        }
        if count.is_some() {
            return Err(ZByteIoError::InvalidLayout(format!(
                "trailing count in {format:?}"
            )));
        }
        Ok(Layout { fields })
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Number of bytes this layout occupies
    pub fn size(&self) -> usize {
        self.fields.iter().map(|f| f.kind.size()).sum()
    }

    /// Number of values produced when unpacking, pad bytes produce none
    pub fn num_values(&self) -> usize {
        self.fields
            .iter()
            .filter(|f| f.kind != FieldKind::Pad)
            .count()
    }

    /// Decode `data`, which must be exactly [`size`](Self::size) bytes long
    pub(crate) fn decode(&self, data: &[u8]) -> Unpacked {
        let mut values = Vec::with_capacity(self.num_values());
        let mut position = 0;

        for field in &self.fields {
            let bytes = &data[position..position + field.kind.size()];
            position += field.kind.size();

            macro_rules! read_as {
                ($int_type:tt) => {{
                    let mut space = [0; core::mem::size_of::<$int_type>()];
                    space.copy_from_slice(bytes);
                    match field.endian {
                        Endian::Little => $int_type::from_le_bytes(space),
                        Endian::Big => $int_type::from_be_bytes(space)
                    }
                }};
            }

            let value = match field.kind {
                FieldKind::Pad => continue,
                FieldKind::I8 => Value::Int(i64::from(bytes[0] as i8)),
                FieldKind::U8 => Value::UInt(u64::from(bytes[0])),
                FieldKind::I16 => Value::Int(i64::from(read_as!(i16))),
                FieldKind::U16 => Value::UInt(u64::from(read_as!(u16))),
                FieldKind::I32 => Value::Int(i64::from(read_as!(i32))),
                FieldKind::U32 => Value::UInt(u64::from(read_as!(u32))),
                FieldKind::I64 => Value::Int(read_as!(i64)),
                FieldKind::U64 => Value::UInt(read_as!(u64)),
                FieldKind::F32 => Value::Float(f64::from(read_as!(f32))),
                FieldKind::F64 => Value::Float(read_as!(f64)),
                FieldKind::Bytes(_) => Value::Bytes(bytes.to_vec())
            };
            values.push(value);
        }

        if values.len() == 1 {
            if let Some(value) = values.pop() {
                return Unpacked::Single(value);
            }
        }
        Unpacked::Many(values)
    }
}

#[cfg(test)]
mod tests {
    use super::{Endian, FieldKind, Layout};

    #[test]
    fn parse_counts_and_prefix() {
        let layout = Layout::parse("<4i").unwrap();
        assert_eq!(layout.size(), 16);
        assert_eq!(layout.num_values(), 4);
        assert!(layout.fields().iter().all(|f| f.endian == Endian::Little));

        let layout = Layout::parse(">2xH8s").unwrap();
        assert_eq!(layout.size(), 12);
        assert_eq!(layout.num_values(), 2);
        assert_eq!(layout.fields()[3].kind, FieldKind::Bytes(8));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(Layout::parse("<4z").is_err());
        assert!(Layout::parse("<4").is_err());
        assert!(Layout::parse("@i").is_err());
    }
}
