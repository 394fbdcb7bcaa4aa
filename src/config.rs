//! # Matrix File Schema and Parsing
//!
//! This module defines the matrix file that feeds the generator and the logic
//! for turning it into typed [`Axis`] tables. The file is YAML (JSON is
//! accepted too, being a subset):
//!
//! ```yaml
//! manifest:
//!   name: bindbc-imgui
//!   dependencies: {bindbc-common: "~>1.0"}
//! sections: [dependencies, sourceFiles-posix, configurations]
//! axes:
//!   - name: linkage
//!     options:
//!       dynamic:
//!         dependencies: {bindbc-loader: "~>1.1"}
//!       static:
//!         versions: [BindImGui_Static]
//!   - name: frontend
//!     options:
//!       Allegro5:
//!         versions: [ImGui_Impl_Allegro5]
//!       GLFW:
//!         versions: [ImGui_Impl_GLFW]
//!     disabled: [Allegro5]
//! ```
//!
//! ## Key Components
//!
//! - **`Matrix`**: the parsed file: static manifest fields, section names for
//!   the emitter, and the ordered axes.
//! - **`parse`** / **`from_file`**: entry points. Every contract violation
//!   (duplicate option, malformed field, reserved field, unknown disabled
//!   option) is reported here, before anything is generated.
//!
//! Option tables are read entry by entry rather than through a map type, so a
//! repeated option name is reported as [`Error::DuplicateOption`] instead of
//! one definition silently replacing the other.

use std::fmt;
use std::path::Path;

use log::debug;
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use serde_yaml::Value as YamlValue;

use crate::axis::Axis;
use crate::defaults::{default_sections, CONFIGURATIONS_FIELD};
use crate::error::{Error, Result};
use crate::fragment::Fragment;
use crate::generator::{self, ConfigurationSet};

/// A fully validated matrix file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix {
    /// Static top-level manifest fields, emitted before `configurations`.
    pub manifest: Fragment,
    /// Top-level fields preceded by a separator line in JSON output.
    pub sections: Vec<String>,
    /// Axes in expansion order, outermost first.
    pub axes: Vec<Axis>,
}

impl Matrix {
    /// Expand the axes into configurations.
    pub fn generate(&self) -> Result<ConfigurationSet> {
        generator::generate(&self.axes)
    }

    /// Number of configurations [`Matrix::generate`] will produce.
    pub fn expected_count(&self) -> usize {
        generator::expected_count(&self.axes)
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawMatrix {
    #[serde(default)]
    manifest: YamlValue,
    #[serde(default = "default_sections")]
    sections: Vec<String>,
    axes: Vec<RawAxis>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawAxis {
    name: String,
    #[serde(default)]
    options: OptionEntries,
    #[serde(default)]
    disabled: Vec<String>,
}

/// Option name/fragment pairs in file order, duplicates included.
#[derive(Debug, Default)]
struct OptionEntries(Vec<(String, YamlValue)>);

impl<'de> Deserialize<'de> for OptionEntries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(OptionEntriesVisitor)
    }
}

struct OptionEntriesVisitor;

impl<'de> Visitor<'de> for OptionEntriesVisitor {
    type Value = OptionEntries;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a mapping of option names to fragments")
    }

    fn visit_unit<E: serde::de::Error>(self) -> std::result::Result<Self::Value, E> {
        Ok(OptionEntries::default())
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<Self::Value, A::Error> {
        let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((name, fragment)) = access.next_entry::<String, YamlValue>()? {
            entries.push((name, fragment));
        }
        Ok(OptionEntries(entries))
    }
}

/// Parses a matrix from YAML (or JSON) text.
///
/// # Errors
///
/// - `Error::MatrixParse` for syntax errors, unknown keys or duplicate axis
///   names
/// - `Error::MalformedField` for values outside the supported kinds
/// - `Error::ReservedField` if an option defines `name` or the manifest
///   defines `configurations`
/// - `Error::DuplicateOption` / `Error::UnknownOption` for bad option tables
pub fn parse(yaml_content: &str) -> Result<Matrix> {
    let raw: RawMatrix = serde_yaml::from_str(yaml_content).map_err(|e| {
        let message = e.to_string();
        Error::MatrixParse {
            hint: hint_for(&message),
            message,
        }
    })?;

    let manifest = match &raw.manifest {
        YamlValue::Null => Fragment::new(),
        value => Fragment::from_yaml(value, "manifest")?,
    };
    if manifest.contains_field(CONFIGURATIONS_FIELD) {
        return Err(Error::ReservedField {
            path: "manifest".to_string(),
            field: CONFIGURATIONS_FIELD.to_string(),
        });
    }

    let mut axes: Vec<Axis> = Vec::with_capacity(raw.axes.len());
    for raw_axis in raw.axes {
        if raw_axis.name.is_empty() {
            return Err(Error::MatrixParse {
                message: "Axis with an empty name".to_string(),
                hint: None,
            });
        }
        if axes.iter().any(|axis| axis.name() == raw_axis.name) {
            return Err(Error::MatrixParse {
                message: format!("Duplicate axis name '{}'", raw_axis.name),
                hint: Some("Each axis needs a distinct name".to_string()),
            });
        }
        axes.push(build_axis(raw_axis)?);
    }

    debug!(
        "Parsed matrix with {} manifest fields and {} axes",
        manifest.len(),
        axes.len()
    );

    Ok(Matrix {
        manifest,
        sections: raw.sections,
        axes,
    })
}

fn build_axis(raw: RawAxis) -> Result<Axis> {
    let mut axis = Axis::new(raw.name);

    for (option, value) in raw.options.0 {
        let fragment = match &value {
            YamlValue::Null => Fragment::new(),
            value => Fragment::from_yaml(value, &format!("{}.{}", axis.name(), option))?,
        };
        axis.add_option(option, fragment)?;
    }
    for option in &raw.disabled {
        axis.disable(option)?;
    }

    Ok(axis)
}

fn hint_for(message: &str) -> Option<String> {
    if message.contains("unknown field") {
        Some(
            "Top-level keys are 'manifest', 'sections' and 'axes'; \
             each axis takes 'name', 'options' and 'disabled'"
                .to_string(),
        )
    } else if message.contains("missing field `axes`") {
        Some("Add an 'axes:' list, outermost axis first".to_string())
    } else {
        None
    }
}

/// Parse a Matrix from a YAML file path
pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Matrix> {
    let content = std::fs::read_to_string(path).map_err(Error::Io)?;
    parse(&content)
}
