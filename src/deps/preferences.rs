//! Reading and editing the display server's preference file.
//!
//! Reads go through a [`PreferenceReader`]. On macOS that is the
//! `defaults` tool; elsewhere (and in tests) the textual property list is
//! parsed directly. Values are reported the way `defaults read` prints
//! them: booleans as `1`/`0`, numbers and strings verbatim.
//!
//! Edits are plain text transformations on an XML property list. They are
//! check-then-insert, so applying the same edit twice yields the same file.

use regex::Regex;
use std::fs;
use std::path::PathBuf;

use super::host::HostContext;
use crate::shell::Invocation;

/// Minimal property list used when no preference file exists yet.
pub const MINIMAL_PLIST: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
</dict>
</plist>
"#;

/// Source of preference values.
pub trait PreferenceReader {
    /// Read `key` from `domain`. `None` when the key, the file or the
    /// reader itself is unavailable.
    fn read(&self, domain: &str, key: &str) -> Option<String>;
}

/// Reads through `defaults read <domain> <key>`.
pub struct DefaultsReader<'a> {
    host: &'a HostContext<'a>,
}

impl<'a> DefaultsReader<'a> {
    pub fn new(host: &'a HostContext<'a>) -> Self {
        Self { host }
    }
}

impl PreferenceReader for DefaultsReader<'_> {
    fn read(&self, domain: &str, key: &str) -> Option<String> {
        self.host
            .query(&Invocation::new("defaults", ["read", domain, key]))
    }
}

/// Parses a textual property list on disk. Binary lists read as absent.
pub struct PlistFileReader {
    path: PathBuf,
}

impl PlistFileReader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PreferenceReader for PlistFileReader {
    fn read(&self, _domain: &str, key: &str) -> Option<String> {
        let content = fs::read_to_string(&self.path).ok()?;
        if !is_textual(&content) {
            tracing::debug!("{} is not a textual plist", self.path.display());
            return None;
        }
        read_value(&content, key)
    }
}

/// Whether `content` is an XML property list rather than a binary one.
pub fn is_textual(content: &str) -> bool {
    let head = content.trim_start();
    head.starts_with("<?xml") || head.starts_with("<!DOCTYPE plist") || head.starts_with("<plist")
}

/// Look up a top-level scalar value by key.
pub fn read_value(content: &str, key: &str) -> Option<String> {
    let pattern = format!(
        r"<key>\s*{}\s*</key>\s*(?:<(true|false)\s*/>|<(integer|real|string)>([^<]*)</(?:integer|real|string)>)",
        regex::escape(key)
    );
    let re = Regex::new(&pattern).ok()?;
    let caps = re.captures(content)?;

    match caps.get(1).map(|m| m.as_str()) {
        Some("true") => Some("1".to_string()),
        Some(_) => Some("0".to_string()),
        None => caps.get(3).map(|m| m.as_str().trim().to_string()),
    }
}

/// Set a boolean key in a textual property list.
///
/// An existing value for `key` is replaced in place; otherwise the entry is
/// inserted before the closing tag of the outermost dictionary. Returns
/// `None` if the content has no dictionary to insert into.
pub fn set_bool_key(content: &str, key: &str, value: bool) -> Option<String> {
    let literal = if value { "<true/>" } else { "<false/>" };
    let escaped = regex::escape(key);

    let head = Regex::new(&format!(r"<key>\s*{}\s*</key>\s*", escaped)).ok()?;
    if let Some(m) = head.find(content) {
        if let Some(len) = value_len(&content[m.end()..]) {
            let mut edited = String::with_capacity(content.len());
            edited.push_str(&content[..m.end()]);
            edited.push_str(literal);
            edited.push_str(&content[m.end() + len..]);
            return Some(edited);
        }
    }

    let entry = format!("\t<key>{}</key>\n\t{}\n", key, literal);

    if let Some(idx) = content.rfind("</dict>") {
        let mut edited = String::with_capacity(content.len() + entry.len());
        edited.push_str(&content[..idx]);
        if !edited.ends_with('\n') {
            edited.push('\n');
        }
        edited.push_str(&entry);
        edited.push_str(&content[idx..]);
        return Some(edited);
    }

    // An empty dictionary written as a self-closing tag.
    if let Some(idx) = content.rfind("<dict/>") {
        let mut edited = String::with_capacity(content.len() + entry.len() + 16);
        edited.push_str(&content[..idx]);
        edited.push_str("<dict>\n");
        edited.push_str(&entry);
        edited.push_str("</dict>");
        edited.push_str(&content[idx + "<dict/>".len()..]);
        return Some(edited);
    }

    None
}

/// Byte length of the value element at the start of `rest`, nested
/// containers included.
fn value_len(rest: &str) -> Option<usize> {
    let tag = Regex::new(r"<(/?)[A-Za-z]+\s*(/?)>").ok()?;
    let mut depth = 0usize;
    for caps in tag.captures_iter(rest) {
        let m = caps.get(0)?;
        if depth == 0 && m.start() != 0 {
            return None;
        }
        if caps[1].is_empty() && caps[2].is_empty() {
            depth += 1;
        } else if !caps[1].is_empty() {
            depth = depth.checked_sub(1)?;
        }
        if depth == 0 {
            return Some(m.end());
        }
    }
    None
}
