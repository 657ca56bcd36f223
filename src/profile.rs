//! Target-language output profiles.
//!
//! Each profile renders the resolved catalog into source text for one target:
//!
//! | Profile | Index artifact | Per-class artifact | Default style |
//! |---------|----------------|--------------------|---------------|
//! | [`Profile::Java`] | `CommandClass.java` | `<Type>Command.java` | Verbatim |
//! | [`Profile::JavaScript`] | `CommandClass.js` | `<Type>Command.js` | UpperCamel |
//!
//! `<Type>` is the UpperCamel form of the class name without its
//! `COMMAND_CLASS_` prefix. Rendering is pure: no I/O, no shared state.

use std::fmt::Write;

use crate::catalog::{Catalog, CommandClassEntry};
use crate::naming::IdentifierStyle;

const GENERATED_HEADER: &str =
    "// Generated by zwave-cc-gen from the Z-Wave command class catalog. Do not edit.";

/// Closed set of supported output targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Java enums with constant identifiers, `getValue()`, a throwing
    /// `fromValue(int)` and a null-returning `lookup(int)`.
    Java,
    /// Frozen ES module objects mapping identifiers to codes, a reverse
    /// code map and a membership test.
    JavaScript,
}

impl Profile {
    /// Identifier style the target idiomatically uses.
    pub fn default_style(self) -> IdentifierStyle {
        match self {
            Profile::Java => IdentifierStyle::Verbatim,
            Profile::JavaScript => IdentifierStyle::UpperCamel,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Profile::Java => "java",
            Profile::JavaScript => "javascript",
        }
    }

    fn extension(self) -> &'static str {
        match self {
            Profile::Java => "java",
            Profile::JavaScript => "js",
        }
    }

    /// File name of the command class index artifact.
    pub fn index_file_name(self) -> String {
        format!("CommandClass.{}", self.extension())
    }

    /// File name of the command artifact for `entry`.
    pub fn command_file_name(self, entry: &CommandClassEntry) -> String {
        format!("{}.{}", command_type_name(entry), self.extension())
    }

    /// Render the command class index.
    pub fn render_index(self, catalog: &Catalog, package: &str) -> String {
        match self {
            Profile::Java => java_index(catalog, package),
            Profile::JavaScript => javascript_index(catalog),
        }
    }

    /// Render the command enumeration of one command class.
    pub fn render_commands(self, entry: &CommandClassEntry, package: &str) -> String {
        match self {
            Profile::Java => java_commands(entry, package),
            Profile::JavaScript => javascript_commands(entry),
        }
    }
}

/// Type name of the per-class command enumeration, e.g. `SwitchBinaryCommand`.
pub fn command_type_name(entry: &CommandClassEntry) -> String {
    format!("{}Command", entry.type_name())
}

fn class_annotation(entry: &CommandClassEntry) -> String {
    format!(
        "{} (0x{:02X}), version {}",
        entry.raw_name, entry.code, entry.version
    )
}

// ── Java ───────────────────────────────────────────────────────────────

fn java_preamble(out: &mut String, package: &str) {
    writeln!(out, "{GENERATED_HEADER}").unwrap();
    if !package.is_empty() {
        writeln!(out, "package {package};").unwrap();
    }
    writeln!(out).unwrap();
    writeln!(out, "import java.util.HashMap;").unwrap();
    writeln!(out, "import java.util.Map;").unwrap();
}

/// Write `NAME(args),` lines terminated by `;`, as a Java enum body requires.
fn java_constants(out: &mut String, constants: &[String]) {
    if constants.is_empty() {
        writeln!(out, "\t;").unwrap();
        return;
    }
    let last = constants.len() - 1;
    for (i, constant) in constants.iter().enumerate() {
        let sep = if i == last { ";" } else { "," };
        writeln!(out, "\t{constant}{sep}").unwrap();
    }
}

/// Write the reverse lookup shared by every generated Java enum.
fn java_lookup(out: &mut String, type_name: &str, what: &str) {
    writeln!(out).unwrap();
    writeln!(
        out,
        "\tprivate static final Map<Integer, {type_name}> BY_VALUE = new HashMap<>();"
    )
    .unwrap();
    writeln!(out).unwrap();
    writeln!(out, "\tstatic {{").unwrap();
    writeln!(out, "\t\tfor ({type_name} e : values()) {{").unwrap();
    writeln!(out, "\t\t\tBY_VALUE.put(e.value, e);").unwrap();
    writeln!(out, "\t\t}}").unwrap();
    writeln!(out, "\t}}").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "\tpublic int getValue() {{").unwrap();
    writeln!(out, "\t\treturn value;").unwrap();
    writeln!(out, "\t}}").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "\t/** Returns the constant for {{@code value}}, failing on unknown codes. */").unwrap();
    writeln!(out, "\tpublic static {type_name} fromValue(int value) {{").unwrap();
    writeln!(out, "\t\t{type_name} e = BY_VALUE.get(value);").unwrap();
    writeln!(out, "\t\tif (e == null) {{").unwrap();
    writeln!(
        out,
        "\t\t\tthrow new IllegalArgumentException(String.format(\"Unknown {what} 0x%02X\", value));"
    )
    .unwrap();
    writeln!(out, "\t\t}}").unwrap();
    writeln!(out, "\t\treturn e;").unwrap();
    writeln!(out, "\t}}").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "\t/** Returns the constant for {{@code value}}, or {{@code null}}. */").unwrap();
    writeln!(out, "\tpublic static {type_name} lookup(int value) {{").unwrap();
    writeln!(out, "\t\treturn BY_VALUE.get(value);").unwrap();
    writeln!(out, "\t}}").unwrap();
}

fn java_index(catalog: &Catalog, package: &str) -> String {
    let mut out = String::new();
    java_preamble(&mut out, package);

    writeln!(out).unwrap();
    writeln!(out, "public enum CommandClass {{").unwrap();
    let constants: Vec<String> = catalog
        .iter()
        .map(|e| format!("{}(0x{:02X}, {})", e.display_name, e.code, e.version))
        .collect();
    java_constants(&mut out, &constants);

    writeln!(out).unwrap();
    writeln!(out, "\tprivate final int value;").unwrap();
    writeln!(out, "\tprivate final int version;").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "\tCommandClass(int value, int version) {{").unwrap();
    writeln!(out, "\t\tthis.value = value;").unwrap();
    writeln!(out, "\t\tthis.version = version;").unwrap();
    writeln!(out, "\t}}").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "\tpublic int getVersion() {{").unwrap();
    writeln!(out, "\t\treturn version;").unwrap();
    writeln!(out, "\t}}").unwrap();

    java_lookup(&mut out, "CommandClass", "command class");
    writeln!(out, "}}").unwrap();
    out
}

fn java_commands(entry: &CommandClassEntry, package: &str) -> String {
    let type_name = command_type_name(entry);
    let mut out = String::new();
    java_preamble(&mut out, package);

    writeln!(out).unwrap();
    writeln!(out, "/** Commands of {}. */", class_annotation(entry)).unwrap();
    writeln!(out, "public enum {type_name} {{").unwrap();
    let constants: Vec<String> = entry
        .commands
        .iter()
        .map(|c| format!("{}(0x{:02X})", c.display_name, c.code))
        .collect();
    java_constants(&mut out, &constants);

    writeln!(out).unwrap();
    writeln!(out, "\tprivate final int value;").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "\t{type_name}(int value) {{").unwrap();
    writeln!(out, "\t\tthis.value = value;").unwrap();
    writeln!(out, "\t}}").unwrap();

    java_lookup(&mut out, &type_name, &format!("{} command", entry.display_name));
    writeln!(out, "}}").unwrap();
    out
}

// ── JavaScript ─────────────────────────────────────────────────────────

fn javascript_membership(out: &mut String, function: &str, map: &str) {
    writeln!(out).unwrap();
    writeln!(out, "export function {function}(code) {{").unwrap();
    writeln!(
        out,
        "\treturn Object.prototype.hasOwnProperty.call({map}, code);"
    )
    .unwrap();
    writeln!(out, "}}").unwrap();
}

fn javascript_index(catalog: &Catalog) -> String {
    let mut out = String::new();
    writeln!(out, "{GENERATED_HEADER}").unwrap();

    writeln!(out).unwrap();
    writeln!(out, "export const CommandClass = Object.freeze({{").unwrap();
    for entry in catalog.iter() {
        writeln!(out, "\t{}: 0x{:02X},", entry.display_name, entry.code).unwrap();
    }
    writeln!(out, "}});").unwrap();

    writeln!(out).unwrap();
    writeln!(out, "export const CommandClassByCode = Object.freeze({{").unwrap();
    for entry in catalog.iter() {
        writeln!(
            out,
            "\t0x{:02X}: Object.freeze({{ name: '{}', version: {} }}),",
            entry.code, entry.display_name, entry.version
        )
        .unwrap();
    }
    writeln!(out, "}});").unwrap();

    javascript_membership(&mut out, "isCommandClass", "CommandClassByCode");
    out
}

fn javascript_commands(entry: &CommandClassEntry) -> String {
    let type_name = command_type_name(entry);
    let mut out = String::new();
    writeln!(out, "{GENERATED_HEADER}").unwrap();
    writeln!(out, "// Commands of {}.", class_annotation(entry)).unwrap();

    writeln!(out).unwrap();
    writeln!(out, "export const {type_name} = Object.freeze({{").unwrap();
    for command in &entry.commands {
        writeln!(out, "\t{}: 0x{:02X},", command.display_name, command.code).unwrap();
    }
    writeln!(out, "}});").unwrap();

    writeln!(out).unwrap();
    writeln!(out, "export const {type_name}ByCode = Object.freeze({{").unwrap();
    for command in &entry.commands {
        writeln!(out, "\t0x{:02X}: '{}',", command.code, command.display_name).unwrap();
    }
    writeln!(out, "}});").unwrap();

    javascript_membership(&mut out, &format!("is{type_name}"), &format!("{type_name}ByCode"));
    out
}
