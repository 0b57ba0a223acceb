//! The plist value model.
//!
//! [`PlistValue`] is a closed tagged union over the property-list node
//! kinds this crate emits: boolean, string, 64-bit integer, 32-bit real,
//! date, array, and string-keyed dictionary. Values are built bottom-up
//! (never by reference), so the recursive structure cannot contain
//! cycles.
//!
//! ## Creating values
//!
//! ```rust
//! use wifi_qr::{plist, PlistValue};
//!
//! let value = plist!({
//!     "Enabled": true,
//!     "Port": 8080,
//!     "Servers": ["a", "b"]
//! });
//! assert!(value.is_dict());
//! assert_eq!(PlistValue::from("text"), PlistValue::String("text".to_string()));
//! ```

use chrono::{DateTime, Utc};

use crate::dict::PlistDict;
use crate::error::PlistResult;

/// Any value that can appear in a property list.
#[derive(Debug, Clone, PartialEq)]
pub enum PlistValue {
    Bool(bool),
    String(String),
    Int(i64),
    Real(f32),
    Date(DateTime<Utc>),
    Array(Vec<PlistValue>),
    Dict(PlistDict),
}

impl PlistValue {
    /// Returns `true` if the value is a boolean.
    #[inline]
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, PlistValue::Bool(_))
    }

    /// Returns `true` if the value is a string.
    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, PlistValue::String(_))
    }

    /// Returns `true` if the value is an integer.
    #[inline]
    #[must_use]
    pub const fn is_int(&self) -> bool {
        matches!(self, PlistValue::Int(_))
    }

    /// Returns `true` if the value is a real.
    #[inline]
    #[must_use]
    pub const fn is_real(&self) -> bool {
        matches!(self, PlistValue::Real(_))
    }

    /// Returns `true` if the value is a date.
    #[inline]
    #[must_use]
    pub const fn is_date(&self) -> bool {
        matches!(self, PlistValue::Date(_))
    }

    /// Returns `true` if the value is an array.
    #[inline]
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, PlistValue::Array(_))
    }

    /// Returns `true` if the value is a dictionary.
    #[inline]
    #[must_use]
    pub const fn is_dict(&self) -> bool {
        matches!(self, PlistValue::Dict(_))
    }

    /// If the value is a boolean, returns it.
    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PlistValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// If the value is a string, returns a reference to it.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PlistValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// If the value is an integer, returns it.
    #[inline]
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            PlistValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// If the value is a real, returns it.
    #[inline]
    #[must_use]
    pub fn as_real(&self) -> Option<f32> {
        match self {
            PlistValue::Real(r) => Some(*r),
            _ => None,
        }
    }

    /// If the value is a date, returns a reference to it.
    #[inline]
    #[must_use]
    pub fn as_date(&self) -> Option<&DateTime<Utc>> {
        match self {
            PlistValue::Date(d) => Some(d),
            _ => None,
        }
    }

    /// If the value is an array, returns a reference to it.
    #[inline]
    #[must_use]
    pub fn as_array(&self) -> Option<&Vec<PlistValue>> {
        match self {
            PlistValue::Array(items) => Some(items),
            _ => None,
        }
    }

    /// If the value is a dictionary, returns a reference to it.
    #[inline]
    #[must_use]
    pub fn as_dict(&self) -> Option<&PlistDict> {
        match self {
            PlistValue::Dict(dict) => Some(dict),
            _ => None,
        }
    }

    /// Lowers the value into its canonical form: every dictionary at every
    /// nesting level has its entries reordered into strict descending
    /// lexicographic key order. Canonical trees serialize identically
    /// across runs and platforms.
    #[must_use]
    pub fn canonical(&self) -> PlistValue {
        match self {
            PlistValue::Array(items) => {
                PlistValue::Array(items.iter().map(PlistValue::canonical).collect())
            }
            PlistValue::Dict(dict) => {
                let mut entries: Vec<(String, PlistValue)> = dict
                    .iter()
                    .map(|(key, value)| (key.clone(), value.canonical()))
                    .collect();
                entries.sort_by(|a, b| b.0.cmp(&a.0));
                PlistValue::Dict(entries.into_iter().collect())
            }
            other => other.clone(),
        }
    }
}

impl From<bool> for PlistValue {
    fn from(value: bool) -> Self {
        PlistValue::Bool(value)
    }
}

impl From<i8> for PlistValue {
    fn from(value: i8) -> Self {
        PlistValue::Int(value as i64)
    }
}

impl From<i16> for PlistValue {
    fn from(value: i16) -> Self {
        PlistValue::Int(value as i64)
    }
}

impl From<i32> for PlistValue {
    fn from(value: i32) -> Self {
        PlistValue::Int(value as i64)
    }
}

impl From<i64> for PlistValue {
    fn from(value: i64) -> Self {
        PlistValue::Int(value)
    }
}

impl From<u8> for PlistValue {
    fn from(value: u8) -> Self {
        PlistValue::Int(value as i64)
    }
}

impl From<u16> for PlistValue {
    fn from(value: u16) -> Self {
        PlistValue::Int(value as i64)
    }
}

impl From<u32> for PlistValue {
    fn from(value: u32) -> Self {
        PlistValue::Int(value as i64)
    }
}

impl From<f32> for PlistValue {
    fn from(value: f32) -> Self {
        PlistValue::Real(value)
    }
}

impl From<&str> for PlistValue {
    fn from(value: &str) -> Self {
        PlistValue::String(value.to_string())
    }
}

impl From<String> for PlistValue {
    fn from(value: String) -> Self {
        PlistValue::String(value)
    }
}

impl From<DateTime<Utc>> for PlistValue {
    fn from(value: DateTime<Utc>) -> Self {
        PlistValue::Date(value)
    }
}

impl From<Vec<PlistValue>> for PlistValue {
    fn from(value: Vec<PlistValue>) -> Self {
        PlistValue::Array(value)
    }
}

impl From<PlistDict> for PlistValue {
    fn from(value: PlistDict) -> Self {
        PlistValue::Dict(value)
    }
}

/// A complete property-list document: a dictionary at the root.
///
/// Lifecycle is construct, serialize, discard; there is no mutation after
/// construction.
#[derive(Debug, Clone, PartialEq)]
pub struct PlistDocument {
    root: PlistDict,
}

impl PlistDocument {
    /// Wraps a root dictionary as a document.
    #[must_use]
    pub fn new(root: PlistDict) -> Self {
        PlistDocument { root }
    }

    #[must_use]
    pub fn root(&self) -> &PlistDict {
        &self.root
    }

    /// The document with every dictionary in canonical descending key order.
    #[must_use]
    pub fn canonical(&self) -> PlistDocument {
        match PlistValue::Dict(self.root.clone()).canonical() {
            PlistValue::Dict(root) => PlistDocument { root },
            _ => unreachable!("canonicalizing a dict yields a dict"),
        }
    }

    /// Serializes the document as UTF-8 XML plist bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the encoder rejects the tree (e.g. a non-finite
    /// real). Nothing is emitted on failure.
    pub fn to_xml(&self) -> PlistResult<Vec<u8>> {
        crate::ser::to_xml(self)
    }

    /// Serializes the document as an XML plist string.
    ///
    /// # Errors
    ///
    /// Same failure conditions as [`PlistDocument::to_xml`].
    pub fn to_xml_string(&self) -> PlistResult<String> {
        crate::ser::to_xml_string(self)
    }
}
