//! Plist serialization.
//!
//! Two pieces live here:
//!
//! - The canonical XML encoder ([`to_xml`]/[`to_xml_string`]), which
//!   renders a [`PlistDocument`] as an Apple XML property list. The
//!   document is lowered to its canonical form first (descending
//!   lexicographic key order in every dictionary), so the output is
//!   byte-reproducible across runs and platforms.
//! - [`PlistValueSerializer`], a `serde::Serializer` that converts any
//!   `T: Serialize` into a [`PlistValue`]. This is the crate's
//!   dynamic-to-typed conversion boundary: the serde data model delivers
//!   booleans, integers, floats and so on as distinct calls, so a boolean
//!   can never be mistaken for an integer, and anything outside the plist
//!   type set fails with [`PlistError::UnsupportedType`].
//!
//! ## Output format
//!
//! XML 1.0 header, the Apple plist DOCTYPE, a `<plist version="1.0">`
//! root, one tab per nesting depth, and the standard element vocabulary:
//! `<true/>`/`<false/>`, `<integer>`, `<real>`, `<string>`, `<date>`
//! (ISO-8601), `<array>`, and `<dict>` with alternating `<key>`/value
//! children.

use serde::{ser, Serialize};

use crate::dict::PlistDict;
use crate::error::{PlistError, PlistResult};
use crate::value::{PlistDocument, PlistValue};

const XML_HEADER: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
    <!DOCTYPE plist PUBLIC \"-//Apple//DTD PLIST 1.0//EN\" \"http://www.apple.com/DTDs/PropertyList-1.0.dtd\">\n\
    <plist version=\"1.0\">\n";
const XML_FOOTER: &str = "</plist>\n";

/// Serializes a document as an XML plist string.
///
/// # Errors
///
/// Fails with [`PlistError::SerializationFailed`] if the tree contains a
/// non-finite real. No partial output is produced on failure.
pub fn to_xml_string(document: &PlistDocument) -> PlistResult<String> {
    let canonical = document.canonical();
    let mut serializer = XmlSerializer::new();
    serializer.write_document(&canonical)?;
    Ok(serializer.into_inner())
}

/// Serializes a document as UTF-8 XML plist bytes.
///
/// # Errors
///
/// Same failure conditions as [`to_xml_string`].
pub fn to_xml(document: &PlistDocument) -> PlistResult<Vec<u8>> {
    to_xml_string(document).map(String::into_bytes)
}

struct XmlSerializer {
    output: String,
    indent_level: usize,
}

impl XmlSerializer {
    fn new() -> Self {
        XmlSerializer {
            output: String::with_capacity(256),
            indent_level: 0,
        }
    }

    fn into_inner(self) -> String {
        self.output
    }

    fn write_document(&mut self, document: &PlistDocument) -> PlistResult<()> {
        self.output.push_str(XML_HEADER);
        self.write_dict(document.root())?;
        self.output.push_str(XML_FOOTER);
        Ok(())
    }

    /// Writes one full line at the current indent level.
    fn write_line(&mut self, content: &str) {
        for _ in 0..self.indent_level {
            self.output.push('\t');
        }
        self.output.push_str(content);
        self.output.push('\n');
    }

    fn write_value(&mut self, value: &PlistValue) -> PlistResult<()> {
        match value {
            PlistValue::Bool(true) => self.write_line("<true/>"),
            PlistValue::Bool(false) => self.write_line("<false/>"),
            PlistValue::Int(i) => self.write_line(&format!("<integer>{i}</integer>")),
            PlistValue::Real(r) => {
                if !r.is_finite() {
                    return Err(PlistError::serialization_failed(format!(
                        "non-finite real value {r}"
                    )));
                }
                self.write_line(&format!("<real>{r}</real>"));
            }
            PlistValue::String(s) => {
                self.write_line(&format!("<string>{}</string>", escape_xml(s)));
            }
            PlistValue::Date(d) => {
                self.write_line(&format!("<date>{}</date>", d.format("%Y-%m-%dT%H:%M:%SZ")));
            }
            PlistValue::Array(items) => {
                if items.is_empty() {
                    self.write_line("<array/>");
                } else {
                    self.write_line("<array>");
                    self.indent_level += 1;
                    for item in items {
                        self.write_value(item)?;
                    }
                    self.indent_level -= 1;
                    self.write_line("</array>");
                }
            }
            PlistValue::Dict(dict) => self.write_dict(dict)?,
        }
        Ok(())
    }

    fn write_dict(&mut self, dict: &PlistDict) -> PlistResult<()> {
        if dict.is_empty() {
            self.write_line("<dict/>");
            return Ok(());
        }

        self.write_line("<dict>");
        self.indent_level += 1;
        for (key, value) in dict.iter() {
            self.write_line(&format!("<key>{}</key>", escape_xml(key)));
            self.write_value(value)?;
        }
        self.indent_level -= 1;
        self.write_line("</dict>");
        Ok(())
    }
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Converts any `T: Serialize` into a [`PlistValue`].
///
/// Most callers should use [`to_value`](crate::to_value) instead.
pub struct PlistValueSerializer;

pub struct SerializeVec {
    vec: Vec<PlistValue>,
}

pub struct SerializeDict {
    dict: PlistDict,
    current_key: Option<String>,
}

impl ser::Serializer for PlistValueSerializer {
    type Ok = PlistValue;
    type Error = PlistError;

    type SerializeSeq = SerializeVec;
    type SerializeTuple = SerializeVec;
    type SerializeTupleStruct = SerializeVec;
    type SerializeTupleVariant = SerializeVec;
    type SerializeMap = SerializeDict;
    type SerializeStruct = SerializeDict;
    type SerializeStructVariant = SerializeDict;

    fn serialize_bool(self, v: bool) -> PlistResult<PlistValue> {
        Ok(PlistValue::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> PlistResult<PlistValue> {
        Ok(PlistValue::Int(v as i64))
    }

    fn serialize_i16(self, v: i16) -> PlistResult<PlistValue> {
        Ok(PlistValue::Int(v as i64))
    }

    fn serialize_i32(self, v: i32) -> PlistResult<PlistValue> {
        Ok(PlistValue::Int(v as i64))
    }

    fn serialize_i64(self, v: i64) -> PlistResult<PlistValue> {
        Ok(PlistValue::Int(v))
    }

    fn serialize_u8(self, v: u8) -> PlistResult<PlistValue> {
        Ok(PlistValue::Int(v as i64))
    }

    fn serialize_u16(self, v: u16) -> PlistResult<PlistValue> {
        Ok(PlistValue::Int(v as i64))
    }

    fn serialize_u32(self, v: u32) -> PlistResult<PlistValue> {
        Ok(PlistValue::Int(v as i64))
    }

    fn serialize_u64(self, v: u64) -> PlistResult<PlistValue> {
        i64::try_from(v)
            .map(PlistValue::Int)
            .map_err(|_| PlistError::unsupported_type("u64 beyond the integer range"))
    }

    fn serialize_f32(self, v: f32) -> PlistResult<PlistValue> {
        Ok(PlistValue::Real(v))
    }

    fn serialize_f64(self, _v: f64) -> PlistResult<PlistValue> {
        // Plist reals are 32-bit here; narrowing a double silently would be lossy.
        Err(PlistError::unsupported_type("f64"))
    }

    fn serialize_char(self, v: char) -> PlistResult<PlistValue> {
        Ok(PlistValue::String(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> PlistResult<PlistValue> {
        Ok(PlistValue::String(v.to_string()))
    }

    fn serialize_bytes(self, _v: &[u8]) -> PlistResult<PlistValue> {
        Err(PlistError::unsupported_type("bytes"))
    }

    fn serialize_none(self) -> PlistResult<PlistValue> {
        Err(PlistError::unsupported_type("none"))
    }

    fn serialize_some<T>(self, value: &T) -> PlistResult<PlistValue>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> PlistResult<PlistValue> {
        Err(PlistError::unsupported_type("unit"))
    }

    fn serialize_unit_struct(self, name: &'static str) -> PlistResult<PlistValue> {
        Err(PlistError::unsupported_type(name))
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> PlistResult<PlistValue> {
        Ok(PlistValue::String(variant.to_string()))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> PlistResult<PlistValue>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> PlistResult<PlistValue>
    where
        T: ?Sized + Serialize,
    {
        Err(PlistError::unsupported_type("newtype variants"))
    }

    fn serialize_seq(self, len: Option<usize>) -> PlistResult<SerializeVec> {
        Ok(SerializeVec::with_capacity(len.unwrap_or(0)))
    }

    fn serialize_tuple(self, len: usize) -> PlistResult<SerializeVec> {
        Ok(SerializeVec::with_capacity(len))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> PlistResult<SerializeVec> {
        Ok(SerializeVec::with_capacity(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> PlistResult<SerializeVec> {
        Err(PlistError::unsupported_type("tuple variants"))
    }

    fn serialize_map(self, _len: Option<usize>) -> PlistResult<SerializeDict> {
        Ok(SerializeDict::new())
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> PlistResult<SerializeDict> {
        Ok(SerializeDict::new())
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> PlistResult<SerializeDict> {
        Err(PlistError::unsupported_type("struct variants"))
    }
}

impl SerializeVec {
    fn with_capacity(capacity: usize) -> Self {
        SerializeVec {
            vec: Vec::with_capacity(capacity),
        }
    }
}

impl SerializeDict {
    fn new() -> Self {
        SerializeDict {
            dict: PlistDict::new(),
            current_key: None,
        }
    }
}

impl ser::SerializeSeq for SerializeVec {
    type Ok = PlistValue;
    type Error = PlistError;

    fn serialize_element<T>(&mut self, value: &T) -> PlistResult<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(value.serialize(PlistValueSerializer)?);
        Ok(())
    }

    fn end(self) -> PlistResult<PlistValue> {
        Ok(PlistValue::Array(self.vec))
    }
}

impl ser::SerializeTuple for SerializeVec {
    type Ok = PlistValue;
    type Error = PlistError;

    fn serialize_element<T>(&mut self, value: &T) -> PlistResult<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(value.serialize(PlistValueSerializer)?);
        Ok(())
    }

    fn end(self) -> PlistResult<PlistValue> {
        Ok(PlistValue::Array(self.vec))
    }
}

impl ser::SerializeTupleStruct for SerializeVec {
    type Ok = PlistValue;
    type Error = PlistError;

    fn serialize_field<T>(&mut self, value: &T) -> PlistResult<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(value.serialize(PlistValueSerializer)?);
        Ok(())
    }

    fn end(self) -> PlistResult<PlistValue> {
        Ok(PlistValue::Array(self.vec))
    }
}

impl ser::SerializeTupleVariant for SerializeVec {
    type Ok = PlistValue;
    type Error = PlistError;

    fn serialize_field<T>(&mut self, value: &T) -> PlistResult<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(value.serialize(PlistValueSerializer)?);
        Ok(())
    }

    fn end(self) -> PlistResult<PlistValue> {
        Ok(PlistValue::Array(self.vec))
    }
}

impl ser::SerializeMap for SerializeDict {
    type Ok = PlistValue;
    type Error = PlistError;

    fn serialize_key<T>(&mut self, key: &T) -> PlistResult<()>
    where
        T: ?Sized + Serialize,
    {
        match key.serialize(PlistValueSerializer)? {
            PlistValue::String(s) => {
                self.current_key = Some(s);
                Ok(())
            }
            _ => Err(PlistError::unsupported_type("non-string dictionary key")),
        }
    }

    fn serialize_value<T>(&mut self, value: &T) -> PlistResult<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self.current_key.take().ok_or_else(|| {
            PlistError::Message("serialize_value called without serialize_key".to_string())
        })?;
        self.dict.insert(key, value.serialize(PlistValueSerializer)?);
        Ok(())
    }

    fn end(self) -> PlistResult<PlistValue> {
        Ok(PlistValue::Dict(self.dict))
    }
}

impl ser::SerializeStruct for SerializeDict {
    type Ok = PlistValue;
    type Error = PlistError;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> PlistResult<()>
    where
        T: ?Sized + Serialize,
    {
        self.dict.insert(key, value.serialize(PlistValueSerializer)?);
        Ok(())
    }

    fn end(self) -> PlistResult<PlistValue> {
        Ok(PlistValue::Dict(self.dict))
    }
}

impl ser::SerializeStructVariant for SerializeDict {
    type Ok = PlistValue;
    type Error = PlistError;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> PlistResult<()>
    where
        T: ?Sized + Serialize,
    {
        self.dict.insert(key, value.serialize(PlistValueSerializer)?);
        Ok(())
    }

    fn end(self) -> PlistResult<PlistValue> {
        Ok(PlistValue::Dict(self.dict))
    }
}
