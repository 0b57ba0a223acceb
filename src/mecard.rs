//! The Wi-Fi MeCard grammar and its semantic validation.
//!
//! The grammar recognizes `WIFI:(<name>:<value>;)*;` where names and
//! values may escape any of the special characters `" , ; : \` with a
//! backslash. Parsing is nondeterministic: [`parse`] runs the grammar
//! once, collects every surviving candidate, and refuses to guess when
//! the text matches in more than one structurally distinct way.
//!
//! The grammar deliberately does not require the whole input to be
//! consumed; trailing characters after a structurally valid prefix are
//! ignored.

use crate::combinator::{
    alternative, expect, literal, many, none_of, one_of, one_or_more_string, succeed, Parser,
};
use crate::credential::{EncryptionType, Password, Ssid, WiFiCredential};
use crate::error::{ParseFailure, SemanticProblem};
use indexmap::IndexMap;

/// Characters that must be backslash-escaped inside field names/values.
pub(crate) const SPECIAL_CHARACTERS: &str = "\",;:\\";

const ESCAPE_PREFIX: char = '\\';
const SEPARATOR: char = ':';
const TERMINATOR: char = ';';

pub(crate) const SSID_FIELD: &str = "S";
pub(crate) const ENCRYPTION_FIELD: &str = "T";
pub(crate) const PASSWORD_FIELD: &str = "P";
pub(crate) const HIDDEN_FIELD: &str = "H";

/// `\` followed by one special character, producing the unescaped character.
fn escaped_char<'a>() -> Parser<'a, char> {
    expect(ESCAPE_PREFIX).bind(|_| one_of(SPECIAL_CHARACTERS))
}

/// One field-name/field-value character: an escape or any non-special char.
///
/// The two alternatives are mutually exclusive per character, so repetition
/// over this parser cannot blow up combinatorially.
fn field_char<'a>() -> Parser<'a, char> {
    alternative(escaped_char(), none_of(SPECIAL_CHARACTERS))
}

/// `<name>:<value>;` producing the unescaped `(name, value)` pair.
fn field<'a>() -> Parser<'a, (String, String)> {
    one_or_more_string(field_char()).bind(|name| {
        expect(SEPARATOR).bind(move |_| {
            let name = name.clone();
            one_or_more_string(field_char()).bind(move |value| {
                let name = name.clone();
                expect(TERMINATOR).bind(move |_| succeed((name.clone(), value.clone())))
            })
        })
    })
}

/// `WIFI:(<field>)*;` producing the raw field list of one candidate parse.
fn qr_content<'a>() -> Parser<'a, Vec<(String, String)>> {
    literal("WIFI:")
        .bind(|_| many(field()).bind(|fields| expect(TERMINATOR).bind(move |_| succeed(fields.clone()))))
}

/// Parses Wi-Fi QR text into a validated credential.
///
/// Zero surviving parses is a [`ParseFailure::Syntax`]; two or more is a
/// [`ParseFailure::Ambiguous`]. Exactly one candidate proceeds to the
/// semantic checks, whose failures surface as
/// [`ParseFailure::Semantic`].
pub fn parse(text: &str) -> Result<WiFiCredential, ParseFailure> {
    let candidates: Vec<Vec<(String, String)>> = qr_content()
        .run(text)
        .into_iter()
        .map(|(fields, _remaining)| fields)
        .collect();

    if candidates.len() >= 2 {
        return Err(ParseFailure::Ambiguous);
    }

    let fields = candidates.into_iter().next().ok_or(ParseFailure::Syntax)?;
    let map = field_map(fields)?;
    Ok(build_credential(&map)?)
}

/// Folds the field list into a map; a repeated field name is a hard error.
fn field_map(fields: Vec<(String, String)>) -> Result<IndexMap<String, String>, SemanticProblem> {
    let mut map = IndexMap::with_capacity(fields.len());
    for (name, value) in fields {
        if map.contains_key(&name) {
            return Err(SemanticProblem::DuplicateFieldName(name));
        }
        map.insert(name, value);
    }
    Ok(map)
}

/// Runs all three semantic checks; the SSID failure takes precedence,
/// then encryption, then the hidden flag.
fn build_credential(
    fields: &IndexMap<String, String>,
) -> Result<WiFiCredential, SemanticProblem> {
    let ssid = ssid_field(fields);
    let encryption = encryption_field(fields);
    let hidden = hidden_field(fields);

    match (ssid, encryption, hidden) {
        (Ok(ssid), Ok(encryption), Ok(hidden)) => {
            Ok(WiFiCredential::new(ssid, encryption, hidden))
        }
        (Err(problem), _, _) | (_, Err(problem), _) | (_, _, Err(problem)) => Err(problem),
    }
}

fn ssid_field(fields: &IndexMap<String, String>) -> Result<Ssid, SemanticProblem> {
    let text = fields.get(SSID_FIELD).ok_or(SemanticProblem::MissingSsid)?;
    Ssid::validate(text).map_err(SemanticProblem::InvalidSsid)
}

fn encryption_field(
    fields: &IndexMap<String, String>,
) -> Result<EncryptionType, SemanticProblem> {
    let Some(text) = fields.get(ENCRYPTION_FIELD) else {
        return Ok(EncryptionType::None);
    };

    match text.to_lowercase().as_str() {
        "nopass" => Ok(EncryptionType::None),
        "wep" => password_field(fields).map(EncryptionType::Wep),
        "wpa" => password_field(fields).map(EncryptionType::Wpa),
        _ => Err(SemanticProblem::UnknownEncryptionType(text.clone())),
    }
}

fn password_field(fields: &IndexMap<String, String>) -> Result<Password, SemanticProblem> {
    let text = fields
        .get(PASSWORD_FIELD)
        .ok_or(SemanticProblem::MissingPassword)?;
    Password::validate(text).map_err(SemanticProblem::InvalidPassword)
}

fn hidden_field(fields: &IndexMap<String, String>) -> Result<bool, SemanticProblem> {
    let Some(text) = fields.get(HIDDEN_FIELD) else {
        return Ok(false);
    };

    let lowered = text.to_lowercase();
    match lowered.as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(SemanticProblem::InvalidVisibilityFlag(lowered)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_unescapes_specials() {
        let results = field().run("S:a\\;b;");
        assert_eq!(
            results,
            vec![(("S".to_string(), "a;b".to_string()), "")]
        );
    }

    #[test]
    fn field_requires_nonempty_value() {
        assert!(field().run("S:;").is_empty());
    }

    #[test]
    fn qr_content_yields_exactly_one_candidate_for_plain_input() {
        let results = qr_content().run("WIFI:S:a;T:WPA;P:b;;");
        assert_eq!(results.len(), 1);
        let (fields, remaining) = &results[0];
        assert_eq!(fields.len(), 3);
        assert_eq!(*remaining, "");
    }

    #[test]
    fn duplicate_field_names_are_a_hard_error() {
        assert_eq!(
            parse("WIFI:S:one;S:two;;"),
            Err(ParseFailure::Semantic(SemanticProblem::DuplicateFieldName(
                "S".to_string()
            )))
        );
    }

    #[test]
    fn ssid_failure_takes_precedence() {
        // Both the SSID and the hidden flag are invalid; SSID wins.
        let long_ssid = "a".repeat(33);
        let text = format!("WIFI:S:{long_ssid};H:maybe;;");
        assert_eq!(
            parse(&text),
            Err(ParseFailure::Semantic(SemanticProblem::InvalidSsid(
                crate::error::SsidProblem::GreaterThan32Bytes
            )))
        );
    }

    #[test]
    fn encryption_type_is_case_insensitive() {
        let credential = parse("WIFI:S:x;T:wpa;P:secret;;").unwrap();
        assert_eq!(
            credential.encryption(),
            &EncryptionType::Wpa(Password::new("secret"))
        );
    }

    #[test]
    fn visibility_flag_error_carries_folded_text() {
        assert_eq!(
            parse("WIFI:S:x;H:Maybe;;"),
            Err(ParseFailure::Semantic(
                SemanticProblem::InvalidVisibilityFlag("maybe".to_string())
            ))
        );
    }

    #[test]
    fn unknown_encryption_error_carries_raw_text() {
        assert_eq!(
            parse("WIFI:S:x;T:Wpa3;;"),
            Err(ParseFailure::Semantic(
                SemanticProblem::UnknownEncryptionType("Wpa3".to_string())
            ))
        );
    }
}
