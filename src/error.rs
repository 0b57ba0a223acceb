//! Error types for MeCard parsing, credential validation, and plist
//! serialization.
//!
//! Every failure in this crate is data returned to the immediate caller;
//! nothing is logged, retried, or swallowed, and malformed input never
//! panics. The taxonomy splits along the crate's two halves:
//!
//! - **Parse-level / semantic**: [`ParseFailure`] and [`SemanticProblem`]
//!   classify why a Wi-Fi QR text could not become a credential.
//! - **Serialization**: [`PlistError`] covers the dynamic-to-typed
//!   conversion boundary and XML encoding.

use std::fmt;
use thiserror::Error;

/// Why an SSID failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SsidProblem {
    #[error("SSID must not be empty")]
    Empty,

    /// SSIDs are at most 32 octets on the air.
    #[error("SSID must be at most 32 bytes of UTF-8")]
    GreaterThan32Bytes,
}

/// Why a password failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PasswordProblem {
    #[error("password must not be empty")]
    Empty,
}

/// A structurally valid MeCard code whose fields don't make sense.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SemanticProblem {
    /// The required `S` field is absent.
    #[error("required field S is missing")]
    MissingSsid,

    #[error("invalid SSID: {0}")]
    InvalidSsid(#[from] SsidProblem),

    /// `T` names an encryption type that needs a password, but `P` is absent.
    #[error("encryption type requires a password, but field P is missing")]
    MissingPassword,

    #[error("invalid password: {0}")]
    InvalidPassword(#[from] PasswordProblem),

    /// `T` carries something other than `nopass`, `WEP`, or `WPA`.
    #[error("unknown encryption type {0:?}")]
    UnknownEncryptionType(String),

    /// `H` carries something other than `true` or `false`.
    #[error("invalid hidden-network flag {0:?}")]
    InvalidVisibilityFlag(String),

    /// The same field name occurred more than once in one code.
    #[error("field name {0:?} appears more than once")]
    DuplicateFieldName(String),
}

/// The classified outcome of a failed [`parse`](crate::parse) call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseFailure {
    /// No parse of the input survived.
    #[error("input does not match the Wi-Fi MeCard grammar")]
    Syntax,

    /// Two or more structurally distinct parses survived; refusing to guess.
    #[error("input matches the Wi-Fi MeCard grammar in more than one way")]
    Ambiguous,

    #[error("{0}")]
    Semantic(#[from] SemanticProblem),
}

/// Errors from the plist value model and XML encoder.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlistError {
    /// A value outside the plist type set reached the conversion boundary.
    #[error("unsupported type: {0}")]
    UnsupportedType(String),

    /// The XML encoder rejected the tree (e.g. a non-finite real).
    #[error("plist serialization failed: {0}")]
    SerializationFailed(String),

    /// Generic message, required by the `serde::ser::Error` contract.
    #[error("{0}")]
    Message(String),
}

impl PlistError {
    /// Creates an unsupported-type error naming the offending runtime type.
    pub fn unsupported_type(type_name: impl Into<String>) -> Self {
        PlistError::UnsupportedType(type_name.into())
    }

    /// Creates a serialization failure carrying a debug description.
    pub fn serialization_failed<T: fmt::Display>(debug_info: T) -> Self {
        PlistError::SerializationFailed(debug_info.to_string())
    }
}

impl serde::ser::Error for PlistError {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        PlistError::Message(msg.to_string())
    }
}

pub type PlistResult<T> = std::result::Result<T, PlistError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn semantic_problem_converts_into_parse_failure() {
        let failure: ParseFailure = SemanticProblem::MissingSsid.into();
        assert_eq!(failure, ParseFailure::Semantic(SemanticProblem::MissingSsid));
    }

    #[test]
    fn messages_name_the_offending_text() {
        let problem = SemanticProblem::UnknownEncryptionType("WPA3".to_string());
        assert!(problem.to_string().contains("WPA3"));

        let err = PlistError::unsupported_type("f64");
        assert!(err.to_string().contains("f64"));
    }
}
