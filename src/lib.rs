//! # Configuration Matrix Library
//!
//! This library generates the `configurations` section of a package manifest
//! by combining independent axes of build options (library linkage mode, UI
//! frontend, renderer backend) into a flat list of named configurations. It
//! backs the `config-matrix` command-line tool but has no I/O of its own
//! beyond reading a matrix file.
//!
//! ## Quick Example
//!
//! ```
//! use config_matrix::config;
//! use config_matrix::emit::{render, EmitOptions, Manifest};
//!
//! let matrix = config::parse(r#"
//! manifest:
//!   name: bindbc-demo
//! axes:
//!   - name: linkage
//!     options:
//!       static: {versions: [Demo_Static]}
//!       dynamic: {dependencies: {bindbc-loader: "~>1.1"}}
//!   - name: renderer
//!     options:
//!       OpenGL3: {versions: [Demo_OpenGL3, GL_30]}
//! "#).unwrap();
//!
//! let set = matrix.generate().unwrap();
//! let names: Vec<_> = set.names().collect();
//! assert_eq!(names, ["static", "static-OpenGL3", "dynamic", "dynamic-OpenGL3"]);
//!
//! let text = render(&Manifest::new(&matrix.manifest, &set), &EmitOptions::default()).unwrap();
//! assert!(text.contains("\"name\": \"static-OpenGL3\""));
//! ```
//!
//! ## Core Concepts
//!
//! - **Fragments (`fragment`)**: typed, ordered pieces of configuration whose
//!   values are strings, lists of strings or nested fragments.
//! - **Merge (`merge`)**: the type-aware deep merge that combines fragments.
//! - **Axes (`axis`)**: ordered option tables, validated at construction.
//! - **Generator (`generator`)**: depth-first expansion of the axes into a
//!   `ConfigurationSet`, keeping every partial combination.
//! - **Matrix files (`config`)**: loading axes and static manifest fields.
//! - **Emitter (`emit`)**: JSON/YAML rendering with the cosmetic passes.
//!
//! ## Execution Flow
//!
//! 1.  **Load**: parse the matrix file; every contract violation is reported
//!     here.
//! 2.  **Generate**: expand the axes, outermost first.
//! 3.  **Render**: serialize manifest fields plus configurations to text.
//!
//! Nothing is written until rendering has succeeded, so a failure never
//! leaves partial output behind.

pub mod axis;
pub mod config;
pub mod defaults;
pub mod emit;
pub mod error;
pub mod fragment;
pub mod generator;
pub mod merge;
pub mod output;

#[cfg(test)]
mod merge_proptest;
