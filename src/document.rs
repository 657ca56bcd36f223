//! Command class catalog document loading.
//!
//! The catalog is an XML document of the form:
//!
//! ```xml
//! <zw_classes>
//!   <cmd_class key="0x20" version="1" name="COMMAND_CLASS_BASIC">
//!     <cmd key="0x01" name="BASIC_SET">
//!       <param key="0x00" name="Value" type="BYTE" />
//!     </cmd>
//!   </cmd_class>
//! </zw_classes>
//! ```
//!
//! Loading only checks that the markup is well-formed. Attributes are kept as
//! raw strings; validating them is the job of [`crate::catalog`] and
//! [`crate::commands`], which drop bad nodes instead of failing the run.

use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::error::{Error, Result};

/// Element name of a command class node.
pub const COMMAND_CLASS_ELEMENT: &[u8] = b"cmd_class";

/// Element name of a command node.
pub const COMMAND_ELEMENT: &[u8] = b"cmd";

/// Nesting depth of command class nodes (direct children of the root).
const COMMAND_CLASS_DEPTH: usize = 2;

/// Nesting depth of command nodes (direct children of a command class).
const COMMAND_DEPTH: usize = 3;

/// A loaded catalog document: command class nodes in document order.
#[derive(Debug, Default)]
pub struct RawDocument {
    pub command_classes: Vec<RawCommandClass>,
}

/// An unvalidated `<cmd_class>` node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawCommandClass {
    /// `name` attribute, e.g. `"COMMAND_CLASS_BASIC"`.
    pub name: Option<String>,

    /// `key` attribute, e.g. `"0x20"`.
    pub key: Option<String>,

    /// `version` attribute, e.g. `"2"`.
    pub version: Option<String>,

    /// Direct `<cmd>` children, in document order.
    pub commands: Vec<RawCommand>,
}

/// An unvalidated `<cmd>` node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawCommand {
    /// `name` attribute, e.g. `"BASIC_SET"`.
    pub name: Option<String>,

    /// `key` attribute, e.g. `"0x01"`.
    pub key: Option<String>,
}

/// Load a catalog document from disk.
pub fn load_document(path: &Path) -> Result<RawDocument> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_document(&content, path)
}

/// Parse a catalog document held in memory.
///
/// `origin` is only used to label errors.
pub fn parse_document(xml: &str, origin: &Path) -> Result<RawDocument> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let xml_error = |position: usize, message: String| Error::Xml {
        path: origin.to_path_buf(),
        message: format!("at byte {position}: {message}"),
    };

    let mut document = RawDocument::default();
    let mut current: Option<RawCommandClass> = None;
    let mut depth = 0usize;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| xml_error(reader.buffer_position(), e.to_string()))?;
        match event {
            Event::Start(element) => {
                depth += 1;
                visit_element(&element, depth, &mut current, &mut document)
                    .map_err(|e| xml_error(reader.buffer_position(), e.to_string()))?;
            }
            Event::Empty(element) => {
                visit_element(&element, depth + 1, &mut current, &mut document)
                    .map_err(|e| xml_error(reader.buffer_position(), e.to_string()))?;
                if depth + 1 == COMMAND_CLASS_DEPTH {
                    if let Some(class) = current.take() {
                        document.command_classes.push(class);
                    }
                }
            }
            Event::End(_) => {
                if depth == COMMAND_CLASS_DEPTH {
                    if let Some(class) = current.take() {
                        document.command_classes.push(class);
                    }
                }
                depth = depth.saturating_sub(1);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if depth != 0 {
        return Err(xml_error(
            reader.buffer_position(),
            format!("document ended with {depth} unclosed element(s)"),
        ));
    }

    Ok(document)
}

/// Record `element` if it is a command class or command at the expected depth.
///
/// Matching elements at any other depth are ignored.
fn visit_element(
    element: &BytesStart<'_>,
    depth: usize,
    current: &mut Option<RawCommandClass>,
    document: &mut RawDocument,
) -> std::result::Result<(), quick_xml::Error> {
    let tag = element.name();
    if depth == COMMAND_CLASS_DEPTH && tag.as_ref() == COMMAND_CLASS_ELEMENT {
        let mut class = RawCommandClass::default();
        for attr in element.attributes() {
            let attr = attr?;
            let value = attr.unescape_value()?.into_owned();
            match attr.key.as_ref() {
                b"name" => class.name = Some(value),
                b"key" => class.key = Some(value),
                b"version" => class.version = Some(value),
                _ => {}
            }
        }
        // A stray open class (should not happen with balanced markup) is flushed first.
        if let Some(previous) = current.replace(class) {
            document.command_classes.push(previous);
        }
    } else if depth == COMMAND_DEPTH && tag.as_ref() == COMMAND_ELEMENT {
        let Some(class) = current.as_mut() else {
            return Ok(());
        };
        let mut command = RawCommand::default();
        for attr in element.attributes() {
            let attr = attr?;
            let value = attr.unescape_value()?.into_owned();
            match attr.key.as_ref() {
                b"name" => command.name = Some(value),
                b"key" => command.key = Some(value),
                _ => {}
            }
        }
        class.commands.push(command);
    }
    Ok(())
}
