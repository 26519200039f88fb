//! Raw PDF object primitives.
//!
//! These are the loosely typed nodes handed over by the document parser. The
//! rest of the crate materializes typed views over them.

use crate::error::{Error, Result};
use flate2::read::ZlibDecoder;
use std::collections::HashMap;
use std::io::Read;

/// Dictionary payload shared by dictionaries and streams.
pub type Dictionary = HashMap<String, Object>;

/// PDF object representation.
#[derive(Debug, Clone, PartialEq)]
pub enum Object {
    /// Null object
    Null,
    /// Boolean value
    Boolean(bool),
    /// Integer value
    Integer(i64),
    /// Real (floating-point) value
    Real(f64),
    /// String (byte array)
    String(Vec<u8>),
    /// Name (stored without the leading /)
    Name(String),
    /// Array of objects
    Array(Vec<Object>),
    /// Dictionary (key-value pairs)
    Dictionary(Dictionary),
    /// Stream (dictionary + data)
    Stream {
        /// Stream dictionary
        dict: Dictionary,
        /// Stream data
        data: bytes::Bytes,
    },
    /// Indirect object reference
    Reference(ObjectRef),
}

/// Reference to an indirect object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectRef {
    /// Object number
    pub id: u32,
    /// Generation number
    pub gen: u16,
}

impl ObjectRef {
    /// Create a new object reference.
    pub fn new(id: u32, gen: u16) -> Self {
        Self { id, gen }
    }
}

impl std::fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} R", self.id, self.gen)
    }
}

impl Object {
    /// Convenience constructor for a name object.
    pub fn name(name: impl Into<String>) -> Self {
        Object::Name(name.into())
    }

    /// Convenience constructor for a reference object.
    pub fn reference(id: u32, gen: u16) -> Self {
        Object::Reference(ObjectRef::new(id, gen))
    }

    /// Get the type name of this object (without data).
    pub fn type_name(&self) -> &'static str {
        match self {
            Object::Null => "Null",
            Object::Boolean(_) => "Boolean",
            Object::Integer(_) => "Integer",
            Object::Real(_) => "Real",
            Object::String(_) => "String",
            Object::Name(_) => "Name",
            Object::Array(_) => "Array",
            Object::Dictionary(_) => "Dictionary",
            Object::Stream { .. } => "Stream",
            Object::Reference(_) => "Reference",
        }
    }

    /// Try to cast to integer.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Object::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to cast to a number, accepting both integers and reals.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Object::Integer(i) => Some(*i as f64),
            Object::Real(r) => Some(*r),
            _ => None,
        }
    }

    /// Try to cast to name.
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Object::Name(s) => Some(s),
            _ => None,
        }
    }

    /// Try to cast to dictionary. Works for both Dictionary and Stream objects.
    pub fn as_dict(&self) -> Option<&Dictionary> {
        match self {
            Object::Dictionary(d) => Some(d),
            Object::Stream { dict, .. } => Some(dict),
            _ => None,
        }
    }

    /// Try to cast to array.
    pub fn as_array(&self) -> Option<&Vec<Object>> {
        match self {
            Object::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// Try to cast to reference.
    pub fn as_reference(&self) -> Option<ObjectRef> {
        match self {
            Object::Reference(r) => Some(*r),
            _ => None,
        }
    }

    /// Try to cast to boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Object::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to cast to string (bytes).
    pub fn as_string(&self) -> Option<&[u8]> {
        match self {
            Object::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to read a string object as a PDF text string.
    ///
    /// Returns `None` for anything that is not a string object.
    pub fn as_text_string(&self) -> Option<String> {
        self.as_string().and_then(decode_text_string)
    }

    /// Check if object is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Object::Null)
    }

    /// Decode stream data using the filters in the stream dictionary.
    ///
    /// Only unfiltered and FlateDecode streams are supported; that covers the
    /// embedded ICC profiles this crate inspects.
    pub fn decode_stream_data(&self) -> Result<Vec<u8>> {
        match self {
            Object::Stream { dict, data } => {
                let filters = dict
                    .get("Filter")
                    .map(extract_filter_names)
                    .unwrap_or_default();

                let mut decoded = data.to_vec();
                for filter in &filters {
                    decoded = match filter.as_str() {
                        "FlateDecode" | "Fl" => inflate(&decoded)?,
                        other => return Err(Error::UnsupportedFilter(other.to_string())),
                    };
                }
                Ok(decoded)
            },
            _ => Err(Error::InvalidObjectType {
                expected: "Stream".to_string(),
                found: self.type_name().to_string(),
            }),
        }
    }
}

/// Inflate zlib data, keeping whatever was recovered before a corruption.
fn inflate(input: &[u8]) -> Result<Vec<u8>> {
    let mut decoder = ZlibDecoder::new(input);
    let mut output = Vec::new();
    match decoder.read_to_end(&mut output) {
        Ok(_) => Ok(output),
        Err(e) if !output.is_empty() => {
            log::warn!(
                "FlateDecode partial recovery: extracted {} bytes before corruption: {}",
                output.len(),
                e
            );
            Ok(output)
        },
        Err(e) => Err(Error::Decode(format!("FlateDecode failed: {}", e))),
    }
}

/// Extract filter names from a Filter object.
///
/// The Filter entry can be either:
/// - A single Name (e.g., /FlateDecode)
/// - An Array of Names (e.g., [/ASCII85Decode /FlateDecode])
fn extract_filter_names(filter_obj: &Object) -> Vec<String> {
    match filter_obj {
        Object::Name(name) => vec![name.clone()],
        Object::Array(arr) => arr
            .iter()
            .filter_map(|obj| obj.as_name().map(|s| s.to_string()))
            .collect(),
        _ => vec![],
    }
}

/// Decode a PDF text string.
///
/// Per ISO 32000-1:2008, Section 7.9.2.2 - Text String Type:
/// - 0xFE 0xFF prefix: UTF-16BE
/// - 0xEF 0xBB 0xBF prefix: UTF-8 (PDF 2.0)
/// - otherwise PDFDocEncoding
pub fn decode_text_string(bytes: &[u8]) -> Option<String> {
    if let Some(utf16_bytes) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let utf16_pairs: Vec<u16> = utf16_bytes
            .chunks_exact(2)
            .map(|chunk| u16::from_be_bytes([chunk[0], chunk[1]]))
            .collect();
        String::from_utf16(&utf16_pairs).ok()
    } else if let Some(utf8_bytes) = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]) {
        String::from_utf8(utf8_bytes.to_vec()).ok()
    } else {
        Some(bytes.iter().filter_map(|&b| pdfdoc_encoding_lookup(b)).collect())
    }
}

/// Map a PDFDocEncoding byte to its character (ISO 32000-1:2008, Table D.2).
fn pdfdoc_encoding_lookup(code: u8) -> Option<char> {
    match code {
        0x00..=0x7F => Some(code as char),
        0x80 => Some('•'),
        0x81 => Some('†'),
        0x82 => Some('‡'),
        0x83 => Some('…'),
        0x84 => Some('—'),
        0x85 => Some('–'),
        0x86 => Some('ƒ'),
        0x87 => Some('⁄'),
        0x88 => Some('‹'),
        0x89 => Some('›'),
        0x8A => Some('−'),
        0x8B => Some('‰'),
        0x8C => Some('„'),
        0x8D => Some('\u{201C}'),
        0x8E => Some('\u{201D}'),
        0x8F => Some('\u{2018}'),
        0x90 => Some('\u{2019}'),
        0x91 => Some('‚'),
        0x92 => Some('™'),
        0x93 => Some('ﬁ'),
        0x94 => Some('ﬂ'),
        0x95 => Some('Ł'),
        0x96 => Some('Œ'),
        0x97 => Some('Š'),
        0x98 => Some('Ÿ'),
        0x99 => Some('Ž'),
        0x9A => Some('ı'),
        0x9B => Some('ł'),
        0x9C => Some('œ'),
        0x9D => Some('š'),
        0x9E => Some('ž'),
        0x9F => None,
        0xA0..=0xFF => Some(code as char),
    }
}
