//! Identifier normalization and attribute parsing.
//!
//! Source identifiers in the command class catalog are SCREAMING_SNAKE tokens
//! (e.g. `COMMAND_CLASS_SWITCH_BINARY`, `SWITCH_BINARY_SET`). Targets either keep
//! them verbatim or want them camel-cased:
//!
//! | Style | `SWITCH_BINARY` | `SWITCH_MULTILEVEL_V2` |
//! |-------|-----------------|------------------------|
//! | [`IdentifierStyle::Verbatim`] | `SWITCH_BINARY` | `SWITCH_MULTILEVEL_V2` |
//! | [`IdentifierStyle::UpperCamel`] | `SwitchBinary` | `SwitchMultilevelV2` |

use serde::Serialize;

/// Prefix every command class name carries in the source document.
pub const COMMAND_CLASS_PREFIX: &str = "COMMAND_CLASS_";

/// Casing policy applied to identifiers before they are emitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentifierStyle {
    /// Keep the source token unchanged.
    #[default]
    Verbatim,
    /// Capitalize each separator-delimited run and drop the separators.
    UpperCamel,
}

/// Normalize a source token according to `style`.
///
/// Total over every input: malformed tokens yield a best-effort result and
/// `""` stays `""`.
pub fn normalize(token: &str, style: IdentifierStyle) -> String {
    match style {
        IdentifierStyle::Verbatim => token.to_string(),
        IdentifierStyle::UpperCamel => to_upper_camel(token),
    }
}

/// Convert a SCREAMING_SNAKE token to UpperCamel.
///
/// - `"SWITCH_BINARY"` → `"SwitchBinary"`
/// - `"BASIC"` → `"Basic"`
/// - `"METER_TBL_V2"` → `"MeterTblV2"`
pub fn to_upper_camel(token: &str) -> String {
    let mut out = String::with_capacity(token.len());
    let mut at_boundary = true;
    for c in token.chars() {
        if !c.is_alphanumeric() {
            at_boundary = true;
            continue;
        }
        if at_boundary {
            out.extend(c.to_uppercase());
        } else {
            out.extend(c.to_lowercase());
        }
        at_boundary = false;
    }
    out
}

/// Whether `ident` can be emitted as an identifier in every supported target.
///
/// Non-empty, not starting with a digit, ASCII alphanumerics and `_` only.
pub fn is_valid_identifier(ident: &str) -> bool {
    let mut chars = ident.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Normalize `token` and keep the result only if it is a valid identifier.
pub fn normalize_identifier(token: &str, style: IdentifierStyle) -> Option<String> {
    let ident = normalize(token, style);
    is_valid_identifier(&ident).then_some(ident)
}

/// Strip the `COMMAND_CLASS_` prefix from a command class name.
///
/// Returns `None` when the prefix is absent.
pub fn strip_command_class_prefix(name: &str) -> Option<&str> {
    name.strip_prefix(COMMAND_CLASS_PREFIX)
}

/// Strip `<class_short_name>_` from the front of a command name.
///
/// Falls back to the full name when the prefix does not match:
/// - `("BASIC", "BASIC_SET")` → `"SET"`
/// - `("BASIC", "VERSION_GET")` → `"VERSION_GET"`
pub fn shorten_command_name<'a>(class_short_name: &str, name: &'a str) -> &'a str {
    name.strip_prefix(class_short_name)
        .and_then(|rest| rest.strip_prefix('_'))
        .unwrap_or(name)
}

/// Parse a `0x`-prefixed hex code into an 8-bit value.
///
/// - `"0x20"` → `Some(0x20)`
/// - `"0X5"` → `Some(0x05)`
/// - `"20"`, `"0xZZ"`, `"0x100"`, `"0x"` → `None`
pub fn parse_hex_code(key: &str) -> Option<u8> {
    let digits = key
        .strip_prefix("0x")
        .or_else(|| key.strip_prefix("0X"))?;
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    u8::from_str_radix(digits, 16).ok()
}

/// Parse a decimal, non-negative version number.
///
/// Signs and whitespace are rejected: `"2"` → `Some(2)`, `"+2"`, `" 2"`, `"-1"` → `None`.
pub fn parse_version(version: &str) -> Option<u32> {
    if version.is_empty() || !version.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    version.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upper_camel_conversion() {
        assert_eq!(
            normalize("SWITCH_BINARY", IdentifierStyle::UpperCamel),
            "SwitchBinary"
        );
        assert_eq!(normalize("BASIC", IdentifierStyle::UpperCamel), "Basic");
        assert_eq!(
            normalize("SWITCH_MULTILEVEL_V2", IdentifierStyle::UpperCamel),
            "SwitchMultilevelV2"
        );
        assert_eq!(
            normalize("DOOR_LOCK_LOGGING", IdentifierStyle::UpperCamel),
            "DoorLockLogging"
        );
    }

    #[test]
    fn verbatim_is_unchanged() {
        assert_eq!(
            normalize("SWITCH_BINARY", IdentifierStyle::Verbatim),
            "SWITCH_BINARY"
        );
        assert_eq!(normalize("odd-Token", IdentifierStyle::Verbatim), "odd-Token");
    }

    #[test]
    fn empty_token_stays_empty() {
        assert_eq!(normalize("", IdentifierStyle::Verbatim), "");
        assert_eq!(normalize("", IdentifierStyle::UpperCamel), "");
    }

    #[test]
    fn upper_camel_best_effort_on_malformed_input() {
        assert_eq!(to_upper_camel("NOSEPARATORS"), "Noseparators");
        assert_eq!(to_upper_camel("__LEADING__DOUBLE_"), "LeadingDouble");
        assert_eq!(to_upper_camel("a-b.c"), "ABC");
        assert_eq!(to_upper_camel("___"), "");
    }

    #[test]
    fn upper_camel_digit_after_separator() {
        assert_eq!(to_upper_camel("METER_2_X"), "Meter2X");
    }

    #[test]
    fn identifier_validity() {
        assert!(is_valid_identifier("Basic"));
        assert!(is_valid_identifier("SWITCH_BINARY"));
        assert!(is_valid_identifier("_PRIVATE"));
        assert!(!is_valid_identifier(""));
        assert!(!is_valid_identifier("2ND"));
        assert!(!is_valid_identifier("NAME-WITH-DASH"));
        assert!(!is_valid_identifier("WITH SPACE"));
    }

    #[test]
    fn normalize_identifier_rejects_invalid() {
        assert_eq!(
            normalize_identifier("SET", IdentifierStyle::UpperCamel),
            Some("Set".to_string())
        );
        assert_eq!(normalize_identifier("", IdentifierStyle::UpperCamel), None);
        assert_eq!(normalize_identifier("___", IdentifierStyle::UpperCamel), None);
        assert_eq!(normalize_identifier("A-B", IdentifierStyle::Verbatim), None);
        // Camel-casing drops the dash, so the same token is accepted there.
        assert_eq!(
            normalize_identifier("A-B", IdentifierStyle::UpperCamel),
            Some("AB".to_string())
        );
    }

    #[test]
    fn command_class_prefix() {
        assert_eq!(
            strip_command_class_prefix("COMMAND_CLASS_BASIC"),
            Some("BASIC")
        );
        assert_eq!(strip_command_class_prefix("BASIC"), None);
        assert_eq!(strip_command_class_prefix("command_class_basic"), None);
    }

    #[test]
    fn command_name_shortening() {
        assert_eq!(shorten_command_name("BASIC", "BASIC_SET"), "SET");
        assert_eq!(
            shorten_command_name("SWITCH_BINARY", "SWITCH_BINARY_REPORT"),
            "REPORT"
        );
        assert_eq!(shorten_command_name("BASIC", "VERSION_GET"), "VERSION_GET");
        // Prefix must be followed by the separator.
        assert_eq!(shorten_command_name("BASIC", "BASICSET"), "BASICSET");
        assert_eq!(shorten_command_name("BASIC", "BASIC_"), "");
    }

    #[test]
    fn hex_code_parsing() {
        assert_eq!(parse_hex_code("0x20"), Some(0x20));
        assert_eq!(parse_hex_code("0xff"), Some(0xFF));
        assert_eq!(parse_hex_code("0X5"), Some(0x05));
        assert_eq!(parse_hex_code("0x00"), Some(0));
        assert_eq!(parse_hex_code("20"), None);
        assert_eq!(parse_hex_code("0xZZ"), None);
        assert_eq!(parse_hex_code("0x100"), None);
        assert_eq!(parse_hex_code("0x"), None);
        assert_eq!(parse_hex_code("0x+1"), None);
        assert_eq!(parse_hex_code(""), None);
    }

    #[test]
    fn version_parsing() {
        assert_eq!(parse_version("0"), Some(0));
        assert_eq!(parse_version("12"), Some(12));
        assert_eq!(parse_version("-1"), None);
        assert_eq!(parse_version("+2"), None);
        assert_eq!(parse_version(" 2"), None);
        assert_eq!(parse_version("v2"), None);
        assert_eq!(parse_version(""), None);
        assert_eq!(parse_version("99999999999"), None);
    }
}
