//! Manifest serialization
//!
//! Renders the static manifest fields followed by the generated
//! `configurations` list. JSON output is tab-indented and, unless disabled,
//! goes through two presentation-only passes over the serialized text:
//!
//! 1. arrays and objects holding exactly one string (or one `"key": "value"`
//!    pair) are collapsed onto a single line;
//! 2. a separator line is inserted before the first top-level occurrence of
//!    each section field.
//!
//! Neither pass changes the parsed value of the document. Rendering is fully
//! deterministic, so the same input always produces byte-identical output.

use regex::{Captures, Regex};
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::defaults::{default_sections, CONFIGURATIONS_FIELD};
use crate::error::{Error, Result};
use crate::fragment::Fragment;
use crate::generator::ConfigurationSet;

/// Matches a bracket whose only member is a string or a string pair, e.g.
/// `[\n\t\t\t"GL_30"\n\t\t]`. Indents are compared in code since the regex
/// crate has no backreferences.
const SINGLE_ITEM_PATTERN: &str = r#"(?P<open>[\[\{])\n(?P<indent>\t+)\t(?P<item>"(?:\\"|[^"])*"(?:: "(?:\\"|[^"])*")?)\n(?P<close_indent>\t+)(?P<close>[\]\}])"#;

/// Inserted before each section field.
const SECTION_SEPARATOR: &str = "\t\n";

/// Output document format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Tab-indented JSON
    #[default]
    Json,
    /// YAML
    Yaml,
}

/// Rendering settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitOptions {
    pub format: OutputFormat,
    /// Apply the collapse and section passes (JSON only).
    pub cosmetic: bool,
    /// Top-level fields preceded by a separator line.
    pub sections: Vec<String>,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            format: OutputFormat::Json,
            cosmetic: true,
            sections: default_sections(),
        }
    }
}

/// The document written out: manifest fields, then `configurations`.
#[derive(Debug, Clone, Copy)]
pub struct Manifest<'a> {
    header: &'a Fragment,
    configurations: &'a ConfigurationSet,
}

impl<'a> Manifest<'a> {
    pub fn new(header: &'a Fragment, configurations: &'a ConfigurationSet) -> Self {
        Self {
            header,
            configurations,
        }
    }
}

impl Serialize for Manifest<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.header.len() + 1))?;
        for (field, value) in self.header.iter() {
            map.serialize_entry(field, value)?;
        }
        map.serialize_entry(CONFIGURATIONS_FIELD, self.configurations)?;
        map.end()
    }
}

/// Render `manifest` to text, terminated by a newline.
pub fn render(manifest: &Manifest<'_>, options: &EmitOptions) -> Result<String> {
    match options.format {
        OutputFormat::Json => {
            let mut text = to_json(manifest)?;
            if options.cosmetic {
                text = collapse_single_items(&text)?;
                text = separate_sections(&text, &options.sections)?;
            }
            text.push('\n');
            Ok(text)
        }
        OutputFormat::Yaml => Ok(serde_yaml::to_string(manifest)?),
    }
}

/// Serialize `value` as JSON indented with tabs.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut buffer = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    value.serialize(&mut serializer)?;
    String::from_utf8(buffer).map_err(|e| Error::Serialization {
        message: e.to_string(),
    })
}

/// Put single-member arrays and objects back on one line.
pub fn collapse_single_items(text: &str) -> Result<String> {
    let pattern = Regex::new(SINGLE_ITEM_PATTERN)?;
    let collapsed = pattern.replace_all(text, |caps: &Captures<'_>| {
        if caps["indent"] == caps["close_indent"] {
            format!("{}{}{}", &caps["open"], &caps["item"], &caps["close"])
        } else {
            caps[0].to_string()
        }
    });
    Ok(collapsed.into_owned())
}

/// Insert a separator line before the first top-level occurrence of each
/// section field. Fields that never occur are ignored.
pub fn separate_sections(text: &str, sections: &[String]) -> Result<String> {
    let mut output = text.to_string();
    for section in sections {
        let pattern = Regex::new(&format!(r#"(?m)^\t"{}""#, regex::escape(section)))?;
        if let Some(found) = pattern.find(&output) {
            output.insert_str(found.start(), SECTION_SEPARATOR);
        }
    }
    Ok(output)
}
