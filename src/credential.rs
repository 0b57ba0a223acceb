//! Typed Wi-Fi credential records.
//!
//! [`Ssid`] and [`Password`] are opaque string wrappers; their invariants
//! (byte length, non-emptiness) are enforced at the validation entry
//! points, not by the types themselves. A [`WiFiCredential`] is the
//! immutable record a successful parse produces and the formatter
//! consumes.

use crate::error::{PasswordProblem, SsidProblem};
use serde::Serialize;

/// The byte-faithful identifier of a wireless network.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Ssid(String);

impl Ssid {
    /// Wraps raw octets without validation.
    pub fn new(octets: impl Into<String>) -> Self {
        Ssid(octets.into())
    }

    /// Validates the textual SSID: non-empty and at most 32 UTF-8 bytes.
    pub fn validate(text: &str) -> Result<Self, SsidProblem> {
        if text.is_empty() {
            return Err(SsidProblem::Empty);
        }
        if text.len() > 32 {
            return Err(SsidProblem::GreaterThan32Bytes);
        }
        Ok(Ssid(text.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// An opaque network password.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Password(String);

impl Password {
    /// Wraps password text without validation.
    pub fn new(text: impl Into<String>) -> Self {
        Password(text.into())
    }

    /// Validates the password text: non-empty.
    pub fn validate(text: &str) -> Result<Self, PasswordProblem> {
        if text.is_empty() {
            return Err(PasswordProblem::Empty);
        }
        Ok(Password(text.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// How the network is protected; determines which MeCard fields are emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncryptionType {
    None,
    Wep(Password),
    Wpa(Password),
}

impl EncryptionType {
    /// The MeCard `T` field text for this encryption type.
    pub fn label(&self) -> &'static str {
        match self {
            EncryptionType::None => "nopass",
            EncryptionType::Wep(_) => "WEP",
            EncryptionType::Wpa(_) => "WPA",
        }
    }

    pub fn password(&self) -> Option<&Password> {
        match self {
            EncryptionType::None => None,
            EncryptionType::Wep(password) | EncryptionType::Wpa(password) => Some(password),
        }
    }
}

/// A parsed and validated Wi-Fi QR credential. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WiFiCredential {
    ssid: Ssid,
    encryption: EncryptionType,
    hidden: bool,
}

impl WiFiCredential {
    /// Assembles a credential from already-validated parts.
    pub fn new(ssid: Ssid, encryption: EncryptionType, hidden: bool) -> Self {
        WiFiCredential {
            ssid,
            encryption,
            hidden,
        }
    }

    /// Direct construction path that validates the SSID text.
    ///
    /// This bypasses parsing, so the only possible failure is an invalid
    /// SSID; the encryption type already carries a constructed password.
    pub fn validate(
        ssid_text: &str,
        encryption: EncryptionType,
        hidden: bool,
    ) -> Result<Self, SsidProblem> {
        let ssid = Ssid::validate(ssid_text)?;
        Ok(WiFiCredential {
            ssid,
            encryption,
            hidden,
        })
    }

    pub fn ssid(&self) -> &Ssid {
        &self.ssid
    }

    pub fn encryption(&self) -> &EncryptionType {
        &self.encryption
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ssid_validate_accepts_up_to_32_bytes() {
        let exactly_32 = "a".repeat(32);
        assert!(Ssid::validate(&exactly_32).is_ok());

        let thirty_three = "a".repeat(33);
        assert_eq!(
            Ssid::validate(&thirty_three),
            Err(SsidProblem::GreaterThan32Bytes)
        );
    }

    #[test]
    fn ssid_byte_length_counts_utf8_octets() {
        // 11 flag emoji chars are 8 bytes each.
        let five_flags = "\u{1F1EF}\u{1F1F5}".repeat(5);
        assert_eq!(
            Ssid::validate(&five_flags),
            Err(SsidProblem::GreaterThan32Bytes)
        );
        assert!(Ssid::validate("\u{1F1EF}\u{1F1F5}").is_ok());
    }

    #[test]
    fn ssid_validate_rejects_empty() {
        assert_eq!(Ssid::validate(""), Err(SsidProblem::Empty));
    }

    #[test]
    fn password_validate_rejects_empty() {
        assert_eq!(Password::validate(""), Err(PasswordProblem::Empty));
        assert!(Password::validate("secret").is_ok());
    }

    #[test]
    fn encryption_labels() {
        assert_eq!(EncryptionType::None.label(), "nopass");
        assert_eq!(EncryptionType::Wep(Password::new("x")).label(), "WEP");
        assert_eq!(EncryptionType::Wpa(Password::new("x")).label(), "WPA");
    }

    #[test]
    fn credential_validate_reports_ssid_problem() {
        let too_long = "a".repeat(40);
        assert_eq!(
            WiFiCredential::validate(&too_long, EncryptionType::None, false),
            Err(SsidProblem::GreaterThan32Bytes)
        );

        let credential =
            WiFiCredential::validate("home", EncryptionType::None, true).unwrap();
        assert_eq!(credential.ssid().as_str(), "home");
        assert!(credential.is_hidden());
    }
}
