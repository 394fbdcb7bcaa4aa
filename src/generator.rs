//! # Combination Generator
//!
//! Expands an ordered list of [`Axis`] tables into every named
//! [`Configuration`] they describe.
//!
//! ## Process
//!
//! 1.  **Seed**: expansion starts from an empty fragment with no name.
//! 2.  **Depth-first expansion**: for each enabled option of the first axis,
//!     the option's fragment is merged onto the seed, the result is appended,
//!     and the same step is repeated for the next axis using that result as
//!     the parent. Every sibling is merged onto the original parent, never
//!     onto a previous sibling.
//! 3.  **Every depth is emitted**: partial combinations are kept, so three
//!     axes of sizes `n0`, `n1`, `n2` yield `n0 + n0*n1 + n0*n1*n2`
//!     configurations.
//! 4.  **Naming**: a configuration is named by joining the chosen option
//!     names with `-`, outer axis first.
//!
//! An axis with no enabled options is legal and stops the expansion below
//! it. The generator holds no state between calls: it is a pure function of
//! the axes it is given.

use std::collections::HashSet;

use log::{debug, warn};
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::axis::Axis;
use crate::defaults::{NAME_DELIMITER, RESERVED_NAME_FIELD};
use crate::error::{Error, Result};
use crate::fragment::Fragment;
use crate::merge::merge;

/// A named, fully merged configuration.
///
/// Serializes as a mapping with `name` first, followed by the fragment's
/// fields in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    name: String,
    fragment: Fragment,
    depth: usize,
}

impl Configuration {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fragment(&self) -> &Fragment {
        &self.fragment
    }

    /// Number of axes that contributed to this configuration (1 for the
    /// outermost axis).
    pub fn depth(&self) -> usize {
        self.depth
    }
}

impl Serialize for Configuration {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fragment.len() + 1))?;
        map.serialize_entry(RESERVED_NAME_FIELD, &self.name)?;
        for (field, value) in self.fragment.iter() {
            map.serialize_entry(field, value)?;
        }
        map.end()
    }
}

/// Every configuration produced by [`generate`], in depth-first order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigurationSet {
    configurations: Vec<Configuration>,
}

impl ConfigurationSet {
    pub fn iter(&self) -> std::slice::Iter<'_, Configuration> {
        self.configurations.iter()
    }

    pub fn as_slice(&self) -> &[Configuration] {
        &self.configurations
    }

    pub fn get(&self, name: &str) -> Option<&Configuration> {
        self.configurations.iter().find(|c| c.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.configurations.iter().map(Configuration::name)
    }

    /// Configurations whose name matches the glob `pattern`, in generation
    /// order.
    ///
    /// # Errors
    ///
    /// Returns `Error::Glob` if `pattern` is not a valid glob.
    pub fn matching(&self, pattern: &str) -> Result<Vec<&Configuration>> {
        let pattern = glob::Pattern::new(pattern)?;
        Ok(self
            .configurations
            .iter()
            .filter(|c| pattern.matches(&c.name))
            .collect())
    }

    pub fn len(&self) -> usize {
        self.configurations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configurations.is_empty()
    }
}

impl<'a> IntoIterator for &'a ConfigurationSet {
    type Item = &'a Configuration;
    type IntoIter = std::slice::Iter<'a, Configuration>;

    fn into_iter(self) -> Self::IntoIter {
        self.configurations.iter()
    }
}

impl Serialize for ConfigurationSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(&self.configurations)
    }
}

/// Number of configurations [`generate`] will produce for `axes`, without
/// building them.
pub fn expected_count(axes: &[Axis]) -> usize {
    axes.iter()
        .scan(1usize, |width, axis| {
            *width = width.saturating_mul(axis.enabled_len());
            Some(*width)
        })
        .fold(0usize, |total, width| total.saturating_add(width))
}

/// Expand `axes` into the full set of configurations.
///
/// # Errors
///
/// - `Error::Expansion` (wrapping `Error::KindMismatch`) if an option cannot
///   be merged onto its parent
/// - `Error::DuplicateConfiguration` if two option paths produce the same
///   name, which can happen when option names contain the delimiter
///
/// # Examples
///
/// ```
/// use config_matrix::axis::Axis;
/// use config_matrix::fragment::{Fragment, Value};
/// use config_matrix::generator::generate;
///
/// let linkage = Axis::new("linkage")
///     .with_option("static", Fragment::new().with("versions", Value::sequence(["S"])))
///     .unwrap();
/// let frontend = Axis::new("frontend")
///     .with_option("GLFW", Fragment::new())
///     .unwrap();
///
/// let set = generate(&[linkage, frontend]).unwrap();
/// let names: Vec<_> = set.names().collect();
/// assert_eq!(names, ["static", "static-GLFW"]);
/// ```
pub fn generate(axes: &[Axis]) -> Result<ConfigurationSet> {
    debug!(
        "Expanding {} axes: {}",
        axes.len(),
        axes.iter()
            .map(|axis| format!("{}({})", axis.name(), axis.enabled_len()))
            .collect::<Vec<_>>()
            .join(" x ")
    );

    if let Some((depth, axis)) = axes
        .iter()
        .enumerate()
        .find(|(_, axis)| axis.enabled_len() == 0)
    {
        if depth + 1 < axes.len() {
            warn!(
                "Axis '{}' has no enabled options; nothing deeper than depth {} will be generated",
                axis.name(),
                depth
            );
        }
    }

    let mut expansion = Expansion {
        configurations: Vec::with_capacity(expected_count(axes)),
        seen: HashSet::new(),
    };
    expansion.expand(None, axes)?;

    debug!("Generated {} configurations", expansion.configurations.len());
    Ok(ConfigurationSet {
        configurations: expansion.configurations,
    })
}

struct Expansion {
    configurations: Vec<Configuration>,
    seen: HashSet<String>,
}

impl Expansion {
    fn expand(&mut self, parent: Option<&Configuration>, axes: &[Axis]) -> Result<()> {
        let Some((axis, deeper)) = axes.split_first() else {
            return Ok(());
        };

        let seed = Fragment::new();
        let base = parent.map_or(&seed, Configuration::fragment);

        for option in axis.enabled_options() {
            let name = match parent {
                Some(parent) => format!("{}{}{}", parent.name, NAME_DELIMITER, option.name()),
                None => option.name().to_string(),
            };

            let fragment = merge(base, option.fragment()).map_err(|source| Error::Expansion {
                configuration: name.clone(),
                source: Box::new(source),
            })?;

            if !self.seen.insert(name.clone()) {
                return Err(Error::DuplicateConfiguration { name });
            }

            let child = Configuration {
                name,
                fragment,
                depth: parent.map_or(1, |p| p.depth + 1),
            };
            self.configurations.push(child.clone());
            self.expand(Some(&child), deeper)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fragment::Value;

    fn versions(tags: &[&str]) -> Fragment {
        Fragment::new().with("versions", Value::sequence(tags.iter().copied()))
    }

    fn axis(name: &str, options: Vec<(&str, Fragment)>) -> Axis {
        let mut axis = Axis::new(name);
        for (option, fragment) in options {
            axis.add_option(option, fragment).unwrap();
        }
        axis
    }

    fn scenario_axes() -> Vec<Axis> {
        vec![
            axis(
                "linkage",
                vec![("static", versions(&["S"])), ("dyn", versions(&["D"]))],
            ),
            axis(
                "frontend",
                vec![(
                    "GLFW",
                    Fragment::new().with("dependencies", Fragment::new().with("glfw", "1")),
                )],
            ),
            Axis::new("renderer"),
        ]
    }

    #[test]
    fn test_generate_emits_every_depth_in_depth_first_order() {
        let set = generate(&scenario_axes()).unwrap();

        let names: Vec<_> = set.names().collect();
        assert_eq!(names, vec!["static", "static-GLFW", "dyn", "dyn-GLFW"]);

        let static_glfw = set.get("static-GLFW").unwrap();
        assert_eq!(
            static_glfw.fragment().get("versions"),
            Some(&Value::sequence(["S"]))
        );
        assert_eq!(
            static_glfw.fragment().get("dependencies"),
            Some(&Value::Nested(Fragment::new().with("glfw", "1")))
        );
        assert_eq!(static_glfw.depth(), 2);
    }

    #[test]
    fn test_siblings_do_not_see_each_other() {
        let axes = vec![
            axis("linkage", vec![("static", versions(&["S"]))]),
            axis(
                "renderer",
                vec![
                    ("OpenGL3", versions(&["ImGui_Impl_OpenGL3", "GL_30"])),
                    ("Vulkan", versions(&["ImGui_Impl_Vulkan"])),
                ],
            ),
        ];

        let set = generate(&axes).unwrap();
        assert_eq!(
            set.get("static-Vulkan").unwrap().fragment(),
            &versions(&["S", "ImGui_Impl_Vulkan"])
        );
        assert_eq!(set.get("static").unwrap().fragment(), &versions(&["S"]));
    }

    #[test]
    fn test_generate_counts_three_full_axes() {
        let axes = vec![
            axis("a", vec![("a1", Fragment::new()), ("a2", Fragment::new())]),
            axis(
                "b",
                vec![
                    ("b1", Fragment::new()),
                    ("b2", Fragment::new()),
                    ("b3", Fragment::new()),
                ],
            ),
            axis("c", vec![("c1", Fragment::new()), ("c2", Fragment::new())]),
        ];

        let set = generate(&axes).unwrap();
        assert_eq!(set.len(), 2 + 2 * 3 + 2 * 3 * 2);
        assert_eq!(expected_count(&axes), set.len());
        assert_eq!(set.as_slice().last().unwrap().name(), "a2-b3-c2");
        assert_eq!(set.as_slice().last().unwrap().depth(), 3);
    }

    #[test]
    fn test_empty_middle_axis_stops_expansion() {
        let axes = vec![
            axis("linkage", vec![("static", Fragment::new())]),
            Axis::new("frontend"),
            axis("renderer", vec![("Vulkan", Fragment::new())]),
        ];

        let set = generate(&axes).unwrap();
        let names: Vec<_> = set.names().collect();
        assert_eq!(names, vec!["static"]);
        assert_eq!(expected_count(&axes), 1);
    }

    #[test]
    fn test_no_axes_yields_empty_set() {
        let set = generate(&[]).unwrap();
        assert!(set.is_empty());
        assert_eq!(expected_count(&[]), 0);
    }

    #[test]
    fn test_disabled_options_are_skipped() {
        let mut frontend = axis(
            "frontend",
            vec![("Allegro5", Fragment::new()), ("GLFW", Fragment::new())],
        );
        frontend.disable("Allegro5").unwrap();
        let axes = vec![axis("linkage", vec![("static", Fragment::new())]), frontend];

        let set = generate(&axes).unwrap();
        let names: Vec<_> = set.names().collect();
        assert_eq!(names, vec!["static", "static-GLFW"]);
    }

    #[test]
    fn test_repeated_tags_are_preserved() {
        let axes = vec![
            axis("linkage", vec![("static", versions(&["A"]))]),
            axis("frontend", vec![("GLFW", versions(&["A"]))]),
        ];

        let set = generate(&axes).unwrap();
        assert_eq!(
            set.get("static-GLFW").unwrap().fragment(),
            &versions(&["A", "A"])
        );
    }

    #[test]
    fn test_name_collision_is_rejected() {
        let axes = vec![
            axis(
                "linkage",
                vec![("dynamic", Fragment::new()), ("dynamic-docking", Fragment::new())],
            ),
            axis("frontend", vec![("docking", Fragment::new())]),
        ];

        let err = generate(&axes).unwrap_err();
        assert!(matches!(
            err,
            Error::DuplicateConfiguration { ref name } if name == "dynamic-docking"
        ));
    }

    #[test]
    fn test_kind_mismatch_names_configuration() {
        let axes = vec![
            axis("linkage", vec![("static", versions(&["S"]))]),
            axis("frontend", vec![("GLFW", Fragment::new().with("versions", "GLFW"))]),
        ];

        let err = generate(&axes).unwrap_err();
        match err {
            Error::Expansion {
                configuration,
                source,
            } => {
                assert_eq!(configuration, "static-GLFW");
                assert!(matches!(*source, Error::KindMismatch { .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_configuration_serializes_name_first() {
        let set = generate(&scenario_axes()).unwrap();
        let json = serde_json::to_string(set.get("dyn-GLFW").unwrap()).unwrap();
        assert_eq!(
            json,
            r#"{"name":"dyn-GLFW","versions":["D"],"dependencies":{"glfw":"1"}}"#
        );
    }

    #[test]
    fn test_matching_filters_by_glob() {
        let set = generate(&scenario_axes()).unwrap();

        let names: Vec<_> = set
            .matching("*-GLFW")
            .unwrap()
            .into_iter()
            .map(Configuration::name)
            .collect();
        assert_eq!(names, vec!["static-GLFW", "dyn-GLFW"]);
    }

    #[test]
    fn test_matching_rejects_invalid_glob() {
        let set = generate(&scenario_axes()).unwrap();

        let err = set.matching("[unclosed").unwrap_err();
        assert!(matches!(err, Error::Glob(_)));
        assert!(err.to_string().starts_with("Glob pattern error"));
    }
}
