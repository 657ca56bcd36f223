//! Command class catalog and version resolution.
//!
//! The source document may declare the same command class several times, once
//! per protocol revision, and a class may be renamed between revisions while
//! keeping its numeric code. [`CatalogBuilder`] reduces the stream to a single
//! entry per code: the one with the highest version, under that version's
//! display name, carrying only that version's commands.
//!
//! Entries are tracked by code (`code → display name`) and by display name
//! (`display name → entry`). Both indexes are updated together so eviction by
//! code never needs a scan.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;
use tracing::{debug, warn};

use crate::commands::{CommandEntry, parse_commands};
use crate::document::{RawCommandClass, RawDocument};
use crate::naming::{self, IdentifierStyle};

/// A resolved command class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandClassEntry {
    /// Source name as declared, e.g. `"COMMAND_CLASS_SWITCH_BINARY"`.
    pub raw_name: String,

    /// Command class code.
    pub code: u8,

    /// Command class version; higher is newer.
    pub version: u32,

    /// Catalog key, e.g. `"SwitchBinary"` or `"SWITCH_BINARY"`.
    pub display_name: String,

    /// Commands of this version, in document order.
    pub commands: Vec<CommandEntry>,
}

impl CommandClassEntry {
    /// The class name without the `COMMAND_CLASS_` prefix, e.g. `"SWITCH_BINARY"`.
    pub fn short_name(&self) -> &str {
        naming::strip_command_class_prefix(&self.raw_name).unwrap_or(&self.raw_name)
    }

    /// UpperCamel type name derived from the source name, independent of the
    /// active identifier style.
    pub fn type_name(&self) -> String {
        naming::to_upper_camel(self.short_name())
    }
}

/// Counters collected while ingesting a document.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct IngestStats {
    /// Command class nodes read from the document.
    pub classes_seen: usize,
    /// Nodes installed into the catalog (including ones later evicted).
    pub classes_accepted: usize,
    /// Nodes dropped because an attribute failed validation.
    pub classes_invalid: usize,
    /// Installed entries evicted by a newer version of the same code.
    pub classes_superseded: usize,
    /// Nodes dropped because an equal or newer version was already installed.
    pub classes_discarded: usize,
    /// Installed entries replaced by a different code claiming the same display name.
    pub classes_displaced: usize,
    /// Command nodes dropped because an attribute failed validation.
    pub commands_invalid: usize,
}

/// The resolved catalog, ordered by display name.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Catalog {
    style: IdentifierStyle,
    entries: BTreeMap<String, CommandClassEntry>,
    #[serde(skip)]
    names_by_code: HashMap<u8, String>,
    #[serde(skip)]
    versions: HashMap<u8, u32>,
}

impl Catalog {
    /// Identifier style the catalog was built with.
    pub fn style(&self) -> IdentifierStyle {
        self.style
    }

    /// Look up an entry by display name.
    pub fn get(&self, display_name: &str) -> Option<&CommandClassEntry> {
        self.entries.get(display_name)
    }

    /// Look up the current entry for a code.
    pub fn get_by_code(&self, code: u8) -> Option<&CommandClassEntry> {
        self.names_by_code
            .get(&code)
            .and_then(|name| self.entries.get(name))
    }

    /// Latest version recorded for `code`, including codes whose entry was
    /// later displaced by a display-name collision.
    pub fn version_of(&self, code: u8) -> Option<u32> {
        self.versions.get(&code).copied()
    }

    /// Entries in display-name order.
    pub fn iter(&self) -> impl Iterator<Item = &CommandClassEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Accumulates command class nodes into a [`Catalog`].
///
/// Nodes must be fed in document order; the outcome depends on it.
#[derive(Debug)]
pub struct CatalogBuilder {
    catalog: Catalog,
    stats: IngestStats,
}

impl CatalogBuilder {
    pub fn new(style: IdentifierStyle) -> Self {
        Self {
            catalog: Catalog {
                style,
                ..Catalog::default()
            },
            stats: IngestStats::default(),
        }
    }

    /// Ingest one command class node.
    ///
    /// Invalid nodes and nodes whose version does not exceed the recorded
    /// version for their code are dropped without error.
    pub fn ingest(&mut self, raw: &RawCommandClass) {
        self.stats.classes_seen += 1;

        let Some(candidate) = validate(raw, self.catalog.style) else {
            self.stats.classes_invalid += 1;
            return;
        };
        let Candidate {
            raw_name,
            short_name,
            code,
            version,
            display_name,
        } = candidate;

        if let Some(prior) = self.catalog.versions.get(&code).copied() {
            if version <= prior {
                debug!(
                    name = %raw_name,
                    code,
                    version,
                    prior,
                    "discarding command class: version not newer than installed"
                );
                self.stats.classes_discarded += 1;
                return;
            }
            self.evict_code(code, version);
        }

        let (commands, commands_invalid) =
            parse_commands(short_name, &raw.commands, self.catalog.style);
        self.stats.commands_invalid += commands_invalid;

        self.install(CommandClassEntry {
            raw_name: raw_name.to_string(),
            code,
            version,
            display_name,
            commands,
        });
    }

    /// Ingest every command class node of `document` in order.
    pub fn ingest_document(&mut self, document: &RawDocument) {
        for raw in &document.command_classes {
            self.ingest(raw);
        }
    }

    /// Counters so far.
    pub fn stats(&self) -> &IngestStats {
        &self.stats
    }

    /// Finish ingestion.
    pub fn finish(self) -> (Catalog, IngestStats) {
        (self.catalog, self.stats)
    }

    /// Remove the entry currently installed for `code`, whatever its display name.
    fn evict_code(&mut self, code: u8, incoming_version: u32) {
        self.catalog.versions.remove(&code);
        if let Some(name) = self.catalog.names_by_code.remove(&code) {
            if let Some(old) = self.catalog.entries.remove(&name) {
                debug!(
                    name = %old.display_name,
                    code,
                    version = old.version,
                    incoming_version,
                    "superseding command class"
                );
                self.stats.classes_superseded += 1;
            }
        }
    }

    fn install(&mut self, entry: CommandClassEntry) {
        let code = entry.code;
        let name = entry.display_name.clone();

        self.catalog.versions.insert(code, entry.version);
        self.catalog.names_by_code.insert(code, name.clone());
        if let Some(displaced) = self.catalog.entries.insert(name, entry) {
            // Same display name, different code (same code was evicted above).
            warn!(
                name = %displaced.display_name,
                displaced_code = displaced.code,
                code,
                "display name collision: replacing command class"
            );
            self.catalog.names_by_code.remove(&displaced.code);
            self.stats.classes_displaced += 1;
        }
        self.stats.classes_accepted += 1;
    }
}

/// Build a catalog from a whole document.
pub fn build_catalog(document: &RawDocument, style: IdentifierStyle) -> (Catalog, IngestStats) {
    let mut builder = CatalogBuilder::new(style);
    builder.ingest_document(document);
    builder.finish()
}

/// Validated attributes of a command class node.
struct Candidate<'a> {
    raw_name: &'a str,
    short_name: &'a str,
    code: u8,
    version: u32,
    display_name: String,
}

fn validate(raw: &RawCommandClass, style: IdentifierStyle) -> Option<Candidate<'_>> {
    let Some(raw_name) = raw.name.as_deref() else {
        debug!(key = ?raw.key, "skipping command class without name");
        return None;
    };
    let Some(code) = raw.key.as_deref().and_then(naming::parse_hex_code) else {
        debug!(name = raw_name, key = ?raw.key, "skipping command class with invalid key");
        return None;
    };
    let Some(version) = raw.version.as_deref().and_then(naming::parse_version) else {
        debug!(name = raw_name, version = ?raw.version, "skipping command class with invalid version");
        return None;
    };
    let Some(short_name) = naming::strip_command_class_prefix(raw_name) else {
        debug!(name = raw_name, "skipping command class without COMMAND_CLASS_ prefix");
        return None;
    };
    let Some(display_name) = naming::normalize_identifier(short_name, style) else {
        debug!(name = raw_name, "skipping command class with invalid identifier");
        return None;
    };

    Some(Candidate {
        raw_name,
        short_name,
        code,
        version,
        display_name,
    })
}
