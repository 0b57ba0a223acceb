//! Rendering a credential back to Wi-Fi MeCard text.
//!
//! The escaping here is the exact inverse of the grammar's escape rule,
//! so `parse(format(credential))` reproduces the credential.

use crate::credential::{EncryptionType, WiFiCredential};
use crate::mecard::{
    ENCRYPTION_FIELD, HIDDEN_FIELD, PASSWORD_FIELD, SPECIAL_CHARACTERS, SSID_FIELD,
};

/// Renders a credential as `WIFI:<fields>;`.
///
/// Field order is fixed: `S`, then `H:true` only when hidden, then `T`/`P`
/// only when the encryption type carries a password.
///
/// # Examples
///
/// ```rust
/// use wifi_qr::{format, EncryptionType, Password, WiFiCredential};
///
/// let credential = WiFiCredential::validate(
///     "home",
///     EncryptionType::Wpa(Password::new("secret")),
///     false,
/// )
/// .unwrap();
/// assert_eq!(format(&credential), "WIFI:S:home;T:WPA;P:secret;;");
/// ```
pub fn format(credential: &WiFiCredential) -> String {
    let mut fields = String::new();
    push_field(&mut fields, SSID_FIELD, &escape(credential.ssid().as_str()));

    if credential.is_hidden() {
        push_field(&mut fields, HIDDEN_FIELD, "true");
    }

    match credential.encryption() {
        EncryptionType::None => {}
        encryption @ (EncryptionType::Wep(password) | EncryptionType::Wpa(password)) => {
            push_field(&mut fields, ENCRYPTION_FIELD, encryption.label());
            push_field(&mut fields, PASSWORD_FIELD, &escape(password.as_str()));
        }
    }

    format!("WIFI:{fields};")
}

fn push_field(out: &mut String, name: &str, value: &str) {
    out.push_str(name);
    out.push(':');
    out.push_str(value);
    out.push(';');
}

/// Backslash-prefixes every special character.
pub(crate) fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if SPECIAL_CHARACTERS.contains(c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credential::Password;

    #[test]
    fn escape_prefixes_every_special_character() {
        assert_eq!(escape(r#""foo;bar\baz""#), r#"\"foo\;bar\\baz\""#);
        assert_eq!(escape("a,b:c"), r"a\,b\:c");
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn hidden_flag_is_emitted_only_when_set() {
        let visible = WiFiCredential::validate("x", EncryptionType::None, false).unwrap();
        assert_eq!(format(&visible), "WIFI:S:x;;");

        let hidden = WiFiCredential::validate("x", EncryptionType::None, true).unwrap();
        assert_eq!(format(&hidden), "WIFI:S:x;H:true;;");
    }

    #[test]
    fn password_fields_follow_the_encryption_label() {
        let credential = WiFiCredential::validate(
            "net",
            EncryptionType::Wep(Password::new("pw")),
            false,
        )
        .unwrap();
        assert_eq!(format(&credential), "WIFI:S:net;T:WEP;P:pw;;");
    }
}
