//! # wifi_qr
//!
//! Parsing, validation, and generation for Wi-Fi QR code contents, plus
//! canonical XML plist output for Apple `.mobileconfig` profiles.
//!
//! ## What is the Wi-Fi MeCard format?
//!
//! QR codes that join a device to a wireless network carry a small
//! MeCard-like text record:
//!
//! ```text
//! WIFI:S:mynetwork;T:WPA;P:mypassword;;
//! ```
//!
//! `S` is the SSID, `T` the encryption type (`WEP`, `WPA`, or `nopass`),
//! `P` the password, and `H:true` marks a hidden network. The characters
//! `" , ; : \` are backslash-escaped inside values.
//!
//! ## Key Features
//!
//! - **Honest parsing**: the grammar runs nondeterministically and
//!   collects every candidate reading, so text that matches in more than
//!   one way is reported as [`ParseFailure::Ambiguous`] instead of being
//!   silently guessed at
//! - **Validated credentials**: a successful parse always yields a
//!   [`WiFiCredential`] whose SSID and password invariants have been
//!   checked
//! - **Round-trippable**: [`format`] is the exact inverse of [`parse`]
//! - **Profile generation**: [`MobileConfig::from_credential`] turns a
//!   credential into an installable configuration profile, serialized as
//!   a byte-reproducible XML plist
//! - **Serde Compatible**: any `T: Serialize` can be lowered into a
//!   [`PlistValue`] with [`to_value`]
//!
//! ## Quick Start
//!
//! ```rust
//! use wifi_qr::{format, parse};
//!
//! let credential = parse("WIFI:S:mynetwork;T:WPA;P:mypassword;;").unwrap();
//! assert_eq!(credential.ssid().as_str(), "mynetwork");
//! assert!(!credential.is_hidden());
//!
//! // Rendering the credential reproduces equivalent MeCard text.
//! let text = format(&credential);
//! assert_eq!(parse(&text).unwrap(), credential);
//! ```
//!
//! ### Generating an installable profile
//!
//! ```rust
//! use wifi_qr::mobileconfig::{MobileConfig, OrganizationName, MOBILE_CONFIG_MIME_TYPE};
//! use wifi_qr::parse;
//!
//! let credential = parse("WIFI:S:office;T:WPA;P:hunter2;;").unwrap();
//! let profile = MobileConfig::from_credential(&credential, OrganizationName::new("Acme"));
//!
//! // Serve with this MIME type so iOS offers to install it.
//! assert_eq!(MOBILE_CONFIG_MIME_TYPE, "application/x-apple-aspen-config");
//! let xml = profile.generate_plist().to_xml().unwrap();
//! assert!(xml.starts_with(b"<?xml"));
//! ```
//!
//! ### Dynamic plist values
//!
//! ```rust
//! use wifi_qr::{plist, PlistValue};
//!
//! let value = plist!({
//!     "SSID_STR": "office",
//!     "HIDDEN_NETWORK": false
//! });
//! assert!(value.is_dict());
//! ```
//!
//! ## Canonical output
//!
//! Dictionaries keep insertion order while being built, but serialization
//! always lowers the document to canonical form first: every dictionary
//! at every level is reordered into descending lexicographic key order.
//! Two structurally equal documents therefore serialize to identical
//! bytes regardless of construction order.

pub mod combinator;
pub mod credential;
pub mod dict;
pub mod error;
pub mod format;
pub mod macros;
pub mod mecard;
pub mod mobileconfig;
pub mod ser;
pub mod value;

pub use credential::{EncryptionType, Password, Ssid, WiFiCredential};
pub use dict::PlistDict;
pub use error::{
    ParseFailure, PasswordProblem, PlistError, PlistResult, SemanticProblem, SsidProblem,
};
pub use format::format;
pub use mecard::parse;
pub use mobileconfig::MobileConfig;
pub use ser::{to_xml, to_xml_string, PlistValueSerializer};
pub use value::{PlistDocument, PlistValue};

use serde::Serialize;

/// Convert any `T: Serialize` to a [`PlistValue`].
///
/// The serde data model keeps the plist types apart: a `bool` arrives as
/// a boolean and can never be re-read as an integer, strings stay
/// strings, and so on. Types with no plist counterpart (`f64`, byte
/// arrays, `None`, unit) fail with [`PlistError::UnsupportedType`].
///
/// # Examples
///
/// ```rust
/// use wifi_qr::{to_value, PlistValue};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Network {
///     ssid: String,
///     hidden: bool,
/// }
///
/// let network = Network { ssid: "office".to_string(), hidden: false };
/// let value = to_value(&network).unwrap();
/// assert!(value.is_dict());
/// ```
///
/// # Errors
///
/// Returns an error if the value reaches a type outside the plist model.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_value<T>(value: &T) -> PlistResult<PlistValue>
where
    T: ?Sized + Serialize,
{
    value.serialize(PlistValueSerializer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_format_round_trip() {
        let credential = parse("WIFI:S:mynetwork;T:WPA;P:mypassword;;").unwrap();
        assert_eq!(parse(&format(&credential)), Ok(credential));
    }

    #[test]
    fn to_value_maps_structs_to_dicts() {
        #[derive(Serialize)]
        struct Network {
            ssid: String,
            hidden: bool,
        }

        let value = to_value(&Network {
            ssid: "office".to_string(),
            hidden: true,
        })
        .unwrap();

        let dict = value.as_dict().unwrap();
        assert_eq!(dict.get("ssid").and_then(PlistValue::as_str), Some("office"));
        assert_eq!(dict.get("hidden").and_then(PlistValue::as_bool), Some(true));
    }

    #[test]
    fn credential_to_value_uses_transparent_newtypes() {
        let ssid = Ssid::new("office");
        assert_eq!(
            to_value(&ssid).unwrap(),
            PlistValue::String("office".to_string())
        );
    }
}
