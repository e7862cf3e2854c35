use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// A heading and the content fragments that followed it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub heading: String,
    pub content: Vec<String>,
}

impl Section {
    pub fn new(heading: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            content: Vec::new(),
        }
    }
}

/// Represents a scraped page with its heading-scoped sections
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRecord {
    /// URL of the page
    pub url: String,

    /// Trimmed `<title>` text, or "No Title"
    pub title: String,

    /// Sections in document order
    #[serde(rename = "content")]
    pub sections: Vec<Section>,
}

impl PageRecord {
    pub fn new(url: String, title: String, sections: Vec<Section>) -> Self {
        Self {
            url,
            title,
            sections,
        }
    }

    /// True when at least one section carries content
    pub fn has_content(&self) -> bool {
        self.sections.iter().any(|section| !section.content.is_empty())
    }
}

/// Serialize records as a pretty JSON array with 4-space indentation.
/// Non-ASCII characters are written as-is.
pub fn write_records<W: Write>(records: &[PageRecord], writer: W) -> Result<()> {
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(writer, formatter);
    records.serialize(&mut serializer)?;
    Ok(())
}

pub fn to_json_string(records: &[PageRecord]) -> Result<String> {
    let mut buf = Vec::new();
    write_records(records, &mut buf)?;
    // serde_json only emits valid UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Write the record set to `path`
pub fn write_json<P: AsRef<Path>>(records: &[PageRecord], path: P) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_records(records, &mut writer)?;
    writer.flush()?;
    Ok(())
}
