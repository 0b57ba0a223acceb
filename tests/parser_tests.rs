use wifi_qr::{
    parse, EncryptionType, ParseFailure, Password, SemanticProblem, SsidProblem, WiFiCredential,
};

fn credential(ssid: &str, encryption: EncryptionType, hidden: bool) -> WiFiCredential {
    WiFiCredential::validate(ssid, encryption, hidden).unwrap()
}

#[test]
fn empty_input_is_a_syntax_failure() {
    assert_eq!(parse(""), Err(ParseFailure::Syntax));
}

#[test]
fn text_without_the_wifi_prefix_is_a_syntax_failure() {
    assert_eq!(parse("INVALID"), Err(ParseFailure::Syntax));
}

#[test]
fn code_without_fields_is_missing_the_ssid() {
    assert_eq!(
        parse("WIFI:;"),
        Err(ParseFailure::Semantic(SemanticProblem::MissingSsid))
    );
}

#[test]
fn broken_escape_sequence_is_a_syntax_failure() {
    // The backslash swallows the field terminator, so no parse survives.
    assert_eq!(parse("WIFI:S:broken_escape\\;;"), Err(ParseFailure::Syntax));
}

#[test]
fn ssid_only_code_defaults_to_open_and_visible() {
    assert_eq!(
        parse("WIFI:S:ssid_only;;"),
        Ok(credential("ssid_only", EncryptionType::None, false))
    );
}

#[test]
fn multibyte_ssids_parse() {
    assert_eq!(
        parse("WIFI:S:\u{1F1EF}\u{1F1F5};;"),
        Ok(credential("\u{1F1EF}\u{1F1F5}", EncryptionType::None, false))
    );
}

#[test]
fn hidden_network_flag_parses() {
    assert_eq!(
        parse("WIFI:S:hidden_ssid;H:true;;"),
        Ok(credential("hidden_ssid", EncryptionType::None, true))
    );
}

#[test]
fn explicit_nopass_parses_as_open() {
    assert_eq!(
        parse("WIFI:S:explicit_nopass;T:nopass;;"),
        Ok(credential("explicit_nopass", EncryptionType::None, false))
    );
}

#[test]
fn wep_without_a_password_is_rejected() {
    assert_eq!(
        parse("WIFI:S:wep;T:WEP;;"),
        Err(ParseFailure::Semantic(SemanticProblem::MissingPassword))
    );
}

#[test]
fn wep_with_a_password_parses() {
    assert_eq!(
        parse("WIFI:S:wep;T:WEP;P:password;;"),
        Ok(credential(
            "wep",
            EncryptionType::Wep(Password::new("password")),
            false
        ))
    );
}

#[test]
fn wpa_without_a_password_is_rejected() {
    assert_eq!(
        parse("WIFI:S:wpa;T:WPA;;"),
        Err(ParseFailure::Semantic(SemanticProblem::MissingPassword))
    );
}

#[test]
fn wpa_with_a_password_parses() {
    assert_eq!(
        parse("WIFI:S:wpa;T:WPA;P:password;;"),
        Ok(credential(
            "wpa",
            EncryptionType::Wpa(Password::new("password")),
            false
        ))
    );
}

#[test]
fn field_order_does_not_matter() {
    // Field order emitted by zxing and several Android generators.
    assert_eq!(
        parse("WIFI:T:WPA;S:mynetwork;P:mypass;;"),
        Ok(credential(
            "mynetwork",
            EncryptionType::Wpa(Password::new("mypass")),
            false
        ))
    );
}

#[test]
fn escaped_special_characters_are_unescaped() {
    assert_eq!(
        parse("WIFI:S:\\\"foo\\;bar\\\\baz\\\";;"),
        Ok(credential("\"foo;bar\\baz\"", EncryptionType::None, false))
    );
}

#[test]
fn unknown_encryption_type_is_rejected() {
    assert_eq!(
        parse("WIFI:S:x;T:WPA3-SAE;;"),
        Err(ParseFailure::Semantic(
            SemanticProblem::UnknownEncryptionType("WPA3-SAE".to_string())
        ))
    );
}

#[test]
fn overlong_ssid_is_rejected() {
    let ssid = "a".repeat(33);
    assert_eq!(
        parse(&format!("WIFI:S:{ssid};;")),
        Err(ParseFailure::Semantic(SemanticProblem::InvalidSsid(
            SsidProblem::GreaterThan32Bytes
        )))
    );
}

#[test]
fn duplicate_field_is_rejected() {
    assert_eq!(
        parse("WIFI:S:one;S:two;;"),
        Err(ParseFailure::Semantic(SemanticProblem::DuplicateFieldName(
            "S".to_string()
        )))
    );
}

#[test]
fn invalid_hidden_flag_is_rejected() {
    assert_eq!(
        parse("WIFI:S:x;H:yes;;"),
        Err(ParseFailure::Semantic(
            SemanticProblem::InvalidVisibilityFlag("yes".to_string())
        ))
    );
}

#[test]
fn hidden_flag_false_parses_as_visible() {
    assert_eq!(
        parse("WIFI:S:x;H:false;;"),
        Ok(credential("x", EncryptionType::None, false))
    );
}

#[test]
fn parses_with_trailing_garbage() {
    // The grammar matches a prefix; anything after the final terminator
    // is ignored.
    assert_eq!(
        parse("WIFI:S:x;;and more text"),
        Ok(credential("x", EncryptionType::None, false))
    );
}

#[test]
fn encryption_type_matches_case_insensitively() {
    assert_eq!(
        parse("WIFI:S:x;T:wep;P:pw;;"),
        Ok(credential("x", EncryptionType::Wep(Password::new("pw")), false))
    );
}
