//! Command list extraction for a single command class.

use serde::Serialize;
use tracing::debug;

use crate::document::RawCommand;
use crate::naming::{self, IdentifierStyle};

/// A command belonging to a command class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandEntry {
    /// Source name as declared, e.g. `"BASIC_SET"`.
    pub raw_name: String,

    /// Command code, scoped to the owning command class.
    pub code: u8,

    /// Emitted identifier, e.g. `"Set"` or `"SET"`.
    pub display_name: String,
}

/// Extract the commands of one command class.
///
/// `class_short_name` is the class name with `COMMAND_CLASS_` removed
/// (e.g. `"SWITCH_BINARY"`). Each command name is shortened by that prefix
/// when present and used in full otherwise.
///
/// Invalid nodes are skipped. Duplicate codes and duplicate display names are
/// passed through in document order. Returns the entries and the number of
/// nodes skipped.
pub fn parse_commands(
    class_short_name: &str,
    raw: &[RawCommand],
    style: IdentifierStyle,
) -> (Vec<CommandEntry>, usize) {
    let mut entries = Vec::with_capacity(raw.len());
    let mut skipped = 0;

    for node in raw {
        match parse_command(class_short_name, node, style) {
            Some(entry) => entries.push(entry),
            None => skipped += 1,
        }
    }

    (entries, skipped)
}

fn parse_command(
    class_short_name: &str,
    node: &RawCommand,
    style: IdentifierStyle,
) -> Option<CommandEntry> {
    let Some(name) = node.name.as_deref() else {
        debug!(class = class_short_name, key = ?node.key, "skipping command without name");
        return None;
    };
    let Some(code) = node.key.as_deref().and_then(naming::parse_hex_code) else {
        debug!(class = class_short_name, name, key = ?node.key, "skipping command with invalid key");
        return None;
    };

    let short = naming::shorten_command_name(class_short_name, name);
    let Some(display_name) = naming::normalize_identifier(short, style) else {
        debug!(class = class_short_name, name, "skipping command with invalid identifier");
        return None;
    };

    Some(CommandEntry {
        raw_name: name.to_string(),
        code,
        display_name,
    })
}
