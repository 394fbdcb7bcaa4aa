//! # Axes of Build Options
//!
//! An [`Axis`] is one dimension of build choice (linkage mode, UI frontend,
//! renderer backend). It holds an ordered list of named options, each
//! contributing a [`Fragment`]. Option order is significant: it is the order
//! in which the generator visits them and therefore the order of the emitted
//! configurations.
//!
//! Axes enforce their contract at construction time:
//!
//! - option names are non-empty and unique within the axis;
//! - option fragments do not define the reserved `name` field.
//!
//! Options can be disabled. A disabled option is still validated (so a table
//! of currently unused backends cannot rot), but the generator skips it.

use crate::defaults::RESERVED_NAME_FIELD;
use crate::error::{Error, Result};
use crate::fragment::Fragment;

/// A single named choice on an axis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AxisOption {
    name: String,
    fragment: Fragment,
    enabled: bool,
}

impl AxisOption {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fragment(&self) -> &Fragment {
        &self.fragment
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

/// An ordered, duplicate-free table of options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Axis {
    name: String,
    options: Vec<AxisOption>,
}

impl Axis {
    /// Create an empty axis. An empty axis is legal; it simply stops the
    /// expansion at the previous depth.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: Vec::new(),
        }
    }

    /// Builder-style [`Axis::add_option`].
    pub fn with_option(mut self, name: impl Into<String>, fragment: Fragment) -> Result<Self> {
        self.add_option(name, fragment)?;
        Ok(self)
    }

    /// Append an enabled option.
    ///
    /// # Errors
    ///
    /// - `Error::DuplicateOption` if an option with this name already exists
    /// - `Error::ReservedField` if the fragment defines `name`
    /// - `Error::MatrixParse` if the option name is empty
    pub fn add_option(&mut self, name: impl Into<String>, fragment: Fragment) -> Result<()> {
        let name = name.into();

        if name.is_empty() {
            return Err(Error::MatrixParse {
                message: format!("Axis '{}' has an option with an empty name", self.name),
                hint: None,
            });
        }
        if self.option(&name).is_some() {
            return Err(Error::DuplicateOption {
                axis: self.name.clone(),
                option: name,
            });
        }
        if fragment.contains_field(RESERVED_NAME_FIELD) {
            return Err(Error::ReservedField {
                path: format!("axis '{}' option '{}'", self.name, name),
                field: RESERVED_NAME_FIELD.to_string(),
            });
        }

        self.options.push(AxisOption {
            name,
            fragment,
            enabled: true,
        });
        Ok(())
    }

    /// Mark an existing option as disabled.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnknownOption` if the axis has no such option.
    pub fn disable(&mut self, option: &str) -> Result<()> {
        match self.options.iter_mut().find(|o| o.name == option) {
            Some(entry) => {
                entry.enabled = false;
                Ok(())
            }
            None => Err(Error::UnknownOption {
                axis: self.name.clone(),
                option: option.to_string(),
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn option(&self, name: &str) -> Option<&AxisOption> {
        self.options.iter().find(|o| o.name == name)
    }

    /// All options, enabled or not, in declaration order.
    pub fn options(&self) -> &[AxisOption] {
        &self.options
    }

    /// The options the generator will expand, in declaration order.
    pub fn enabled_options(&self) -> impl Iterator<Item = &AxisOption> {
        self.options.iter().filter(|o| o.enabled)
    }

    pub fn enabled_len(&self) -> usize {
        self.enabled_options().count()
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}
