//! Recursive serializer/deserializer over the [`Value`] model.
//!
//! Wire layout, chunking, and reference-resolution rules are grounded on the
//! reference implementation's `hessian.c`, `string.c`, `list.c`, and
//! `map.c`. Integer and float fields are framed with the `byteorder` crate's
//! big-endian cursor extensions over [`ByteBuffer`]'s `Read`/`Write` impls.

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use pep_buffer::ByteBuffer;
use std::io;

use crate::error::HessianError;
use crate::tag;
use crate::value::Value;

fn io_err(e: io::Error, context: &'static str) -> HessianError {
    match e.kind() {
        io::ErrorKind::UnexpectedEof => HessianError::Truncated {
            context,
            expected: 1,
        },
        _ => HessianError::Allocation(e.to_string()),
    }
}

fn next_byte(buf: &mut ByteBuffer, context: &'static str) -> Result<u8, HessianError> {
    buf.pop_byte().ok_or(HessianError::Truncated {
        context,
        expected: 1,
    })
}

fn read_u16(buf: &mut ByteBuffer, context: &'static str) -> Result<u16, HessianError> {
    buf.read_u16::<BigEndian>().map_err(|e| io_err(e, context))
}

fn read_i32(buf: &mut ByteBuffer, context: &'static str) -> Result<i32, HessianError> {
    buf.read_i32::<BigEndian>().map_err(|e| io_err(e, context))
}

fn read_i64(buf: &mut ByteBuffer, context: &'static str) -> Result<i64, HessianError> {
    buf.read_i64::<BigEndian>().map_err(|e| io_err(e, context))
}

/// Read `n_chars` UTF-8 characters, counting a character whenever the next
/// byte is not a continuation byte (`10xxxxxx`), and reading the
/// continuation bytes a leading byte announces so a chunk boundary never
/// splits a multi-byte sequence.
fn read_utf8_chars(
    buf: &mut ByteBuffer,
    n_chars: usize,
    context: &'static str,
) -> Result<Vec<u8>, HessianError> {
    let mut out = Vec::with_capacity(n_chars);
    for _ in 0..n_chars {
        let lead = next_byte(buf, context)?;
        out.push(lead);
        let continuations = if lead & 0x80 == 0 {
            0
        } else if lead & 0xE0 == 0xC0 {
            1
        } else if lead & 0xF0 == 0xE0 {
            2
        } else if lead & 0xF8 == 0xF0 {
            3
        } else {
            0
        };
        for _ in 0..continuations {
            out.push(next_byte(buf, context)?);
        }
    }
    Ok(out)
}

fn write_type_name(buf: &mut ByteBuffer, name: &str) -> Result<(), HessianError> {
    buf.push_byte(tag::TYPE);
    buf.write_u16::<BigEndian>(name.chars().count() as u16)
        .map_err(|e| io_err(e, "type name"))?;
    buf.push_bytes(name.as_bytes());
    Ok(())
}

fn read_type_name(buf: &mut ByteBuffer) -> Result<String, HessianError> {
    let n_chars = read_u16(buf, "type name length")? as usize;
    let bytes = read_utf8_chars(buf, n_chars, "type name")?;
    Ok(String::from_utf8(bytes)?)
}

/// Write `s` as a counted, chunked string using `chunk_tag` for non-final
/// chunks and `final_tag` for the closing chunk. Chunk size is
/// [`tag::MAX_CHUNK_SIZE`] characters; a chunk boundary never splits a
/// multi-byte UTF-8 sequence because chunks are cut at `char` boundaries.
fn write_counted_string(
    buf: &mut ByteBuffer,
    s: &str,
    chunk_tag: u8,
    final_tag: u8,
) -> Result<(), HessianError> {
    let boundaries: Vec<usize> = s.char_indices().map(|(i, _)| i).collect();
    let total_chars = boundaries.len();
    let mut start_char = 0;

    while total_chars - start_char > tag::MAX_CHUNK_SIZE {
        let end_char = start_char + tag::MAX_CHUNK_SIZE;
        let byte_start = boundaries[start_char];
        let byte_end = boundaries[end_char];
        buf.push_byte(chunk_tag);
        buf.write_u16::<BigEndian>(tag::MAX_CHUNK_SIZE as u16)
            .map_err(|e| io_err(e, "string chunk length"))?;
        buf.push_bytes(s[byte_start..byte_end].as_bytes());
        start_char = end_char;
    }

    let byte_start = boundaries.get(start_char).copied().unwrap_or(s.len());
    let remaining = total_chars - start_char;
    buf.push_byte(final_tag);
    buf.write_u16::<BigEndian>(remaining as u16)
        .map_err(|e| io_err(e, "string final chunk length"))?;
    buf.push_bytes(s[byte_start..].as_bytes());
    Ok(())
}

/// Mirror of [`write_counted_string`] for binary blobs: chunked by byte
/// count rather than character count.
fn write_counted_binary(buf: &mut ByteBuffer, bytes: &[u8]) -> Result<(), HessianError> {
    let total = bytes.len();
    let mut start = 0;

    while total - start > tag::MAX_CHUNK_SIZE {
        let end = start + tag::MAX_CHUNK_SIZE;
        buf.push_byte(tag::BINARY_CHUNK);
        buf.write_u16::<BigEndian>(tag::MAX_CHUNK_SIZE as u16)
            .map_err(|e| io_err(e, "binary chunk length"))?;
        buf.push_bytes(&bytes[start..end]);
        start = end;
    }

    buf.push_byte(tag::BINARY_FINAL);
    buf.write_u16::<BigEndian>((total - start) as u16)
        .map_err(|e| io_err(e, "binary final chunk length"))?;
    buf.push_bytes(&bytes[start..]);
    Ok(())
}

/// Read a chunked counted string/xml body, given the tag of the first
/// chunk already consumed. `chunk_tag`/`final_tag` distinguish String from
/// Xml (they share the same on-wire chunking shape).
fn read_counted_string(
    buf: &mut ByteBuffer,
    mut tag_byte: u8,
    chunk_tag: u8,
    final_tag: u8,
) -> Result<String, HessianError> {
    let mut bytes = Vec::new();
    loop {
        let n_chars = read_u16(buf, "string chunk length")? as usize;
        let chunk = read_utf8_chars(buf, n_chars, "string chunk body")?;
        bytes.extend_from_slice(&chunk);
        if tag_byte == chunk_tag {
            tag_byte = next_byte(buf, "string chunk tag")?;
            if tag_byte != chunk_tag && tag_byte != final_tag {
                return Err(HessianError::UnexpectedTag {
                    tag: tag_byte,
                    tag_char: tag_byte as char,
                    context: "string chunk continuation",
                });
            }
        } else {
            break;
        }
    }
    Ok(String::from_utf8(bytes)?)
}

/// Serialize `value` into `buf`.
pub fn serialize(value: &Value, buf: &mut ByteBuffer) -> Result<(), HessianError> {
    match value {
        Value::Null => buf.push_byte(tag::NULL),
        Value::Boolean(true) => buf.push_byte(tag::TRUE),
        Value::Boolean(false) => buf.push_byte(tag::FALSE),
        Value::Int32(i) => {
            buf.push_byte(tag::INT32);
            buf.write_i32::<BigEndian>(*i)
                .map_err(|e| io_err(e, "int32"))?;
        }
        Value::Int64(i) => {
            buf.push_byte(tag::INT64);
            buf.write_i64::<BigEndian>(*i)
                .map_err(|e| io_err(e, "int64"))?;
        }
        Value::Double(d) => {
            buf.push_byte(tag::DOUBLE);
            buf.write_i64::<BigEndian>(d.to_bits() as i64)
                .map_err(|e| io_err(e, "double"))?;
        }
        Value::Date(ms) => {
            buf.push_byte(tag::DATE);
            buf.write_i64::<BigEndian>(*ms)
                .map_err(|e| io_err(e, "date"))?;
        }
        Value::String(s) => write_counted_string(buf, s, tag::STRING_CHUNK, tag::STRING_FINAL)?,
        Value::Xml(s) => write_counted_string(buf, s, tag::XML_CHUNK, tag::XML_FINAL)?,
        Value::Binary(bytes) => write_counted_binary(buf, bytes)?,
        Value::Remote { r#type, url } => {
            buf.push_byte(tag::REMOTE);
            write_type_name(buf, r#type)?;
            write_counted_string(buf, url, tag::STRING_CHUNK, tag::STRING_FINAL)?;
        }
        Value::List { r#type, elements } => {
            buf.push_byte(tag::LIST);
            if let Some(t) = r#type {
                write_type_name(buf, t)?;
            }
            if !elements.is_empty() {
                buf.push_byte(tag::LENGTH);
                buf.write_i32::<BigEndian>(elements.len() as i32)
                    .map_err(|e| io_err(e, "list length"))?;
            }
            for element in elements {
                serialize(element, buf)?;
            }
            buf.push_byte(tag::END);
        }
        Value::Map { r#type, entries } => {
            buf.push_byte(tag::MAP);
            if let Some(t) = r#type {
                write_type_name(buf, t)?;
            }
            for (key, value) in entries {
                serialize(key, buf)?;
                serialize(value, buf)?;
            }
            buf.push_byte(tag::END);
        }
        Value::Ref(index) => {
            buf.push_byte(tag::REF);
            buf.write_i32::<BigEndian>(*index)
                .map_err(|e| io_err(e, "ref index"))?;
        }
    }
    Ok(())
}

/// Read the next tag from `buf` and deserialize the value it introduces.
pub fn deserialize(buf: &mut ByteBuffer) -> Result<Value, HessianError> {
    let tag_byte = next_byte(buf, "value tag")?;
    deserialize_tag(tag_byte, buf)
}

/// Deserialize a value whose leading tag byte has already been consumed.
pub fn deserialize_tag(tag_byte: u8, buf: &mut ByteBuffer) -> Result<Value, HessianError> {
    match tag_byte {
        tag::NULL => Ok(Value::Null),
        tag::TRUE => Ok(Value::Boolean(true)),
        tag::FALSE => Ok(Value::Boolean(false)),
        tag::INT32 => Ok(Value::Int32(read_i32(buf, "int32 payload")?)),
        tag::INT64 => Ok(Value::Int64(read_i64(buf, "int64 payload")?)),
        tag::DOUBLE => {
            let bits = read_i64(buf, "double payload")? as u64;
            Ok(Value::Double(f64::from_bits(bits)))
        }
        tag::DATE => Ok(Value::Date(read_i64(buf, "date payload")?)),
        tag::STRING_CHUNK | tag::STRING_FINAL => Ok(Value::String(read_counted_string(
            buf,
            tag_byte,
            tag::STRING_CHUNK,
            tag::STRING_FINAL,
        )?)),
        tag::XML_CHUNK | tag::XML_FINAL => Ok(Value::Xml(read_counted_string(
            buf,
            tag_byte,
            tag::XML_CHUNK,
            tag::XML_FINAL,
        )?)),
        tag::BINARY_CHUNK | tag::BINARY_FINAL => {
            let mut bytes = Vec::new();
            let mut t = tag_byte;
            loop {
                let n = read_u16(buf, "binary chunk length")? as usize;
                bytes.extend_from_slice(&buf.read_bytes(n));
                if t == tag::BINARY_CHUNK {
                    t = next_byte(buf, "binary chunk tag")?;
                    if t != tag::BINARY_CHUNK && t != tag::BINARY_FINAL {
                        return Err(HessianError::UnexpectedTag {
                            tag: t,
                            tag_char: t as char,
                            context: "binary chunk continuation",
                        });
                    }
                } else {
                    break;
                }
            }
            Ok(Value::Binary(bytes))
        }
        tag::REMOTE => {
            let type_tag = next_byte(buf, "remote type section")?;
            if type_tag != tag::TYPE {
                return Err(HessianError::UnexpectedTag {
                    tag: type_tag,
                    tag_char: type_tag as char,
                    context: "remote type section",
                });
            }
            let r#type = read_type_name(buf)?;
            let url_tag = next_byte(buf, "remote url section")?;
            let url = read_counted_string(buf, url_tag, tag::STRING_CHUNK, tag::STRING_FINAL)?;
            Ok(Value::Remote { r#type, url })
        }
        tag::LIST => deserialize_list(buf),
        tag::MAP => deserialize_map(buf),
        tag::REF => Ok(Value::Ref(read_i32(buf, "ref payload")?)),
        other => Err(HessianError::UnexpectedTag {
            tag: other,
            tag_char: other as char,
            context: "value tag",
        }),
    }
}

fn deserialize_list(buf: &mut ByteBuffer) -> Result<Value, HessianError> {
    let mut next = next_byte(buf, "list body")?;

    let r#type = if next == tag::TYPE {
        let t = read_type_name(buf)?;
        next = next_byte(buf, "list body")?;
        Some(t)
    } else {
        None
    };

    if next == tag::LENGTH {
        let _informational_length = read_i32(buf, "list length")?;
        next = next_byte(buf, "list body")?;
    }

    let mut refs: Vec<Value> = Vec::new();
    while next != tag::END {
        refs.push(deserialize_tag(next, buf)?);
        next = next_byte(buf, "list body")?;
    }

    let mut elements = Vec::with_capacity(refs.len());
    for item in &refs {
        if let Value::Ref(index) = item {
            let resolved = refs.get(*index as usize).cloned().ok_or(HessianError::RefOutOfRange {
                index: *index,
                table_len: refs.len(),
            })?;
            elements.push(resolved);
        } else {
            elements.push(item.clone());
        }
    }

    Ok(Value::List { r#type, elements })
}

fn deserialize_map(buf: &mut ByteBuffer) -> Result<Value, HessianError> {
    let mut next = next_byte(buf, "map body")?;

    let r#type = if next == tag::TYPE {
        let t = read_type_name(buf)?;
        next = next_byte(buf, "map body")?;
        Some(t)
    } else {
        None
    };

    let mut refs: Vec<(Value, Value)> = Vec::new();
    while next != tag::END {
        let key = deserialize_tag(next, buf)?;
        let value_tag = next_byte(buf, "map pair value")?;
        let value = deserialize_tag(value_tag, buf)?;
        refs.push((key, value));
        next = next_byte(buf, "map body")?;
    }

    let mut entries = Vec::with_capacity(refs.len());
    for (key, value) in &refs {
        let resolved_value = if let Value::Ref(index) = value {
            refs.get(*index as usize)
                .map(|(_, v)| v.clone())
                .ok_or(HessianError::RefOutOfRange {
                    index: *index,
                    table_len: refs.len(),
                })?
        } else {
            value.clone()
        };
        entries.push((key.clone(), resolved_value));
    }

    Ok(Value::Map { r#type, entries })
}
