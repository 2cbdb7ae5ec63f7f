//! Format-preserving INI reader and writer.
//!
//! Both the install configuration and the installed `settings.ini` are plain
//! INI files.  [`IniDocument`] keeps every line of the source so that a
//! document can be edited in place and written back with untouched lines
//! byte-identical to the input.
use anyhow::{Context as _, Result, bail};
use std::path::Path;

/// A `key = value` line inside a section.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    section: String,
    key: String,
    value: String,
    /// Raw text up to the first character of the value (key, separator, padding).
    lead: String,
    /// Original line terminator (`"\n"`, `"\r\n"`, or empty on the last line).
    eol: String,
    /// The line exactly as read.
    raw: String,
    /// Set once the value has been replaced.
    dirty: bool,
}

impl Entry {
    fn render(&self) -> String {
        if self.dirty {
            format!("{}{}{}", self.lead, self.value, self.eol)
        } else {
            self.raw.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Line {
    /// Blank lines, comments, and section headers are kept verbatim.
    Verbatim(String),
    Entry(Entry),
}

/// A parsed INI document that remembers its original layout.
///
/// Keys are case-sensitive.  Both `=` and `:` separate a key from its
/// value; lines starting with `#` or `;` are comments.
///
/// # Examples
///
/// ```
/// use benchtool_installer::config::ini::IniDocument;
///
/// let mut doc = IniDocument::parse("[paths]\n# root\ninstall_dir = /old\n").unwrap();
/// assert_eq!(doc.get("paths", "install_dir"), Some("/old"));
///
/// doc.set("paths", "install_dir", "/new");
/// assert_eq!(doc.render(), "[paths]\n# root\ninstall_dir = /new\n");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IniDocument {
    lines: Vec<Line>,
    sections: Vec<String>,
}

impl IniDocument {
    /// Read and parse an INI file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is malformed.
    pub fn load(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("parsing {}", path.display()))
    }

    /// Parse INI content from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A line inside a section is neither a comment nor a key-value pair
    /// - An entry appears outside of a section header
    pub fn parse(content: &str) -> Result<Self> {
        let mut doc = Self::default();
        let mut current: Option<String> = None;

        for (line_num, raw) in content.split_inclusive('\n').enumerate() {
            let (body, eol) = split_eol(raw);
            let trimmed = body.trim();

            if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with(';') {
                doc.lines.push(Line::Verbatim(raw.to_string()));
                continue;
            }

            if let Some(header) = parse_header(trimmed) {
                if !doc.sections.contains(&header) {
                    doc.sections.push(header.clone());
                }
                current = Some(header);
                doc.lines.push(Line::Verbatim(raw.to_string()));
                continue;
            }

            let Some(section) = current.clone() else {
                bail!(
                    "entry outside of section at line {}: {}",
                    line_num + 1,
                    trimmed
                );
            };

            let Some((key, value, value_start)) = parse_kv_line(body) else {
                bail!(
                    "invalid key-value pair at line {}: {}",
                    line_num + 1,
                    trimmed
                );
            };

            let mut lead = body.get(..value_start).unwrap_or(body).to_string();
            if value.is_empty() && !lead.ends_with(char::is_whitespace) {
                lead.push(' ');
            }

            doc.lines.push(Line::Entry(Entry {
                section,
                key,
                value,
                lead,
                eol: eol.to_string(),
                raw: raw.to_string(),
                dirty: false,
            }));
        }

        Ok(doc)
    }

    /// Section names in order of first appearance.
    #[must_use]
    pub fn sections(&self) -> &[String] {
        &self.sections
    }

    /// Value of `key` in `section`; the last occurrence wins.
    #[must_use]
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.entries()
            .filter(|e| e.section == section && e.key == key)
            .last()
            .map(|e| e.value.as_str())
    }

    /// All `(key, value)` pairs of `section` in file order.
    ///
    /// Repeated keys are reported once, at their first position, with the
    /// last value.
    #[must_use]
    pub fn section_entries(&self, section: &str) -> Vec<(&str, &str)> {
        let mut out: Vec<(&str, &str)> = Vec::new();
        for entry in self.entries().filter(|e| e.section == section) {
            if let Some(slot) = out.iter_mut().find(|(k, _)| *k == entry.key) {
                slot.1 = entry.value.as_str();
            } else {
                out.push((entry.key.as_str(), entry.value.as_str()));
            }
        }
        out
    }

    /// Replace the value of every `key` line in `section`.
    ///
    /// Returns `true` if at least one line was changed.
    pub fn set(&mut self, section: &str, key: &str, value: &str) -> bool {
        let mut found = false;
        for line in &mut self.lines {
            if let Line::Entry(entry) = line
                && entry.section == section
                && entry.key == key
            {
                entry.value = value.to_string();
                entry.dirty = true;
                found = true;
            }
        }
        found
    }

    /// Reassemble the document; unchanged lines are emitted exactly as read.
    #[must_use]
    pub fn render(&self) -> String {
        self.lines
            .iter()
            .map(|line| match line {
                Line::Verbatim(raw) => raw.clone(),
                Line::Entry(entry) => entry.render(),
            })
            .collect()
    }

    fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.lines.iter().filter_map(|line| match line {
            Line::Entry(entry) => Some(entry),
            Line::Verbatim(_) => None,
        })
    }
}

/// Split a raw line into its body and terminator.
fn split_eol(raw: &str) -> (&str, &str) {
    if let Some(body) = raw.strip_suffix("\r\n") {
        (body, "\r\n")
    } else if let Some(body) = raw.strip_suffix('\n') {
        (body, "\n")
    } else {
        (raw, "")
    }
}

/// Parse a `[header]` line preserving original case.
fn parse_header(line: &str) -> Option<String> {
    let inner = line.strip_prefix('[')?.strip_suffix(']')?;
    let trimmed = inner.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_string())
}

/// Parse a `key = value` (or `key: value`) line.
///
/// Returns the key, the trimmed value, and the byte offset where the value
/// starts in `line`.
///
/// # Examples
///
/// - `"install_dir = /opt/app"` → `("install_dir", "/opt/app", 14)`
/// - `"key: value"` → `("key", "value", 5)`
fn parse_kv_line(line: &str) -> Option<(String, String, usize)> {
    let sep = line.find(['=', ':'])?;
    let key = line.get(..sep)?.trim();
    if key.is_empty() {
        return None;
    }
    let rest = line.get(sep + 1..)?;
    let value_start = sep + 1 + (rest.len() - rest.trim_start().len());
    Some((key.to_string(), rest.trim().to_string(), value_start))
}
