use proptest::prelude::*;
use wifi_qr::{format, parse, EncryptionType, Password, PlistDict, PlistDocument, WiFiCredential};

/// Characters that exercise both the plain and escaped paths of the
/// grammar.
fn mecard_char() -> impl Strategy<Value = char> {
    prop_oneof![
        proptest::char::range('a', 'z'),
        proptest::char::range('A', 'Z'),
        proptest::char::range('0', '9'),
        Just(' '),
        Just('"'),
        Just(','),
        Just(';'),
        Just(':'),
        Just('\\'),
    ]
}

fn ssid_text() -> impl Strategy<Value = String> {
    proptest::collection::vec(mecard_char(), 1..=32).prop_map(|chars| chars.into_iter().collect())
}

fn password_text() -> impl Strategy<Value = String> {
    proptest::collection::vec(mecard_char(), 1..=24).prop_map(|chars| chars.into_iter().collect())
}

fn encryption() -> impl Strategy<Value = EncryptionType> {
    prop_oneof![
        Just(EncryptionType::None),
        password_text().prop_map(|p| EncryptionType::Wep(Password::new(p))),
        password_text().prop_map(|p| EncryptionType::Wpa(Password::new(p))),
    ]
}

fn credential() -> impl Strategy<Value = WiFiCredential> {
    (ssid_text(), encryption(), any::<bool>()).prop_map(|(ssid, encryption, hidden)| {
        WiFiCredential::validate(&ssid, encryption, hidden).unwrap()
    })
}

proptest! {
    #[test]
    fn format_then_parse_is_identity(credential in credential()) {
        let text = format(&credential);
        prop_assert_eq!(parse(&text), Ok(credential));
    }

    #[test]
    fn formatted_text_is_never_ambiguous(credential in credential()) {
        // Exactly one reading must survive; Err(Ambiguous) would mean the
        // escape rules leak.
        prop_assert!(parse(&format(&credential)).is_ok());
    }

    #[test]
    fn formatted_text_has_the_wifi_frame(credential in credential()) {
        let text = format(&credential);
        prop_assert!(text.starts_with("WIFI:S:"));
        prop_assert!(text.ends_with(";;"));
    }

    #[test]
    fn xml_output_is_independent_of_insertion_order(
        entries in proptest::collection::hash_map("[A-Za-z]{1,8}", any::<i64>(), 1..8)
    ) {
        let pairs: Vec<(String, i64)> = entries.into_iter().collect();

        let mut forward = PlistDict::new();
        for (key, value) in &pairs {
            forward.insert(key.clone(), *value);
        }

        let mut backward = PlistDict::new();
        for (key, value) in pairs.iter().rev() {
            backward.insert(key.clone(), *value);
        }

        prop_assert_eq!(
            PlistDocument::new(forward).to_xml_string().unwrap(),
            PlistDocument::new(backward).to_xml_string().unwrap()
        );
    }
}
