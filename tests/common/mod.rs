//! Shared test utilities for the CLI end-to-end tests.
//!
//! Add `mod common;` to a test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_matrix(matrices::SCENARIO);
//!     fixture.command().arg("ls").assert().success();
//! }
//! ```

use assert_fs::prelude::*;
use std::path::{Path, PathBuf};

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_fs::prelude::*;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::bundled_matrix_path;
    #[allow(unused_imports)]
    pub use super::matrices;
    pub use super::TestFixture;
}

/// Matrix file snippets for testing.
#[allow(dead_code)]
pub mod matrices {
    /// Two linkage modes, one frontend, an empty renderer axis.
    pub const SCENARIO: &str = r#"
manifest:
  name: demo
  dependencies: {bindbc-common: "~>1.0"}
axes:
  - name: linkage
    options:
      static: {versions: [S]}
      dyn: {versions: [D]}
  - name: frontend
    options:
      GLFW: {dependencies: {glfw: "1"}}
  - name: renderer
    options: {}
"#;

    /// A disabled frontend next to an enabled one.
    pub const WITH_DISABLED: &str = r#"
axes:
  - name: linkage
    options:
      static: {versions: [S]}
  - name: frontend
    options:
      Allegro5: {versions: [ImGui_Impl_Allegro5]}
      GLFW: {versions: [ImGui_Impl_GLFW]}
    disabled: [Allegro5]
"#;

    /// Repeats an option name within one axis.
    pub const DUPLICATE_OPTION: &str = r#"
axes:
  - name: renderer
    options:
      Vulkan: {versions: [A]}
      Vulkan: {versions: [B]}
"#;

    /// Overlays a scalar onto a sequence.
    pub const KIND_MISMATCH: &str = r#"
axes:
  - name: linkage
    options:
      static: {versions: [S]}
  - name: frontend
    options:
      GLFW: {versions: GLFW}
"#;

    /// Uses a number where a string is required.
    pub const MALFORMED: &str = r#"
axes:
  - name: renderer
    options:
      Vulkan: {dependencies: {erupted: 2}}
"#;

    /// An axis with nothing enabled ahead of a populated one.
    pub const EMPTY_MIDDLE_AXIS: &str = r#"
axes:
  - name: linkage
    options:
      static: {}
  - name: frontend
    options: {}
  - name: renderer
    options:
      Vulkan: {}
"#;
}

/// Path to the bindbc-imgui matrix shipped with the crate.
#[allow(dead_code)]
pub fn bundled_matrix_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("matrices")
        .join("bindbc-imgui.yaml")
}

/// A temporary directory holding a `configs.yaml` matrix.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

impl TestFixture {
    /// Create a new test fixture with an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Write `configs.yaml` with the given content.
    pub fn with_matrix(self, content: &str) -> Self {
        self.temp_dir
            .child("configs.yaml")
            .write_str(content)
            .expect("Failed to write matrix file");
        self
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Get the path to the matrix file.
    #[allow(dead_code)]
    pub fn matrix_path(&self) -> PathBuf {
        self.temp_dir.path().join("configs.yaml")
    }

    /// Create a child path in the temp directory.
    #[allow(dead_code)]
    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(path)
    }

    /// Create a command running in this fixture's directory, with
    /// `CONFIG_MATRIX_FILE` and `RUST_LOG` cleared.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("config-matrix");
        cmd.current_dir(self.path())
            .env_remove("CONFIG_MATRIX_FILE")
            .env_remove("RUST_LOG");
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_with_matrix() {
        let fixture = TestFixture::new().with_matrix(matrices::SCENARIO);
        assert!(fixture.matrix_path().exists());
    }

    #[test]
    fn test_matrices_are_valid_yaml() {
        let snippets = [
            matrices::SCENARIO,
            matrices::WITH_DISABLED,
            matrices::KIND_MISMATCH,
            matrices::MALFORMED,
            matrices::EMPTY_MIDDLE_AXIS,
        ];

        for snippet in snippets {
            serde_yaml::from_str::<serde_yaml::Value>(snippet).expect("Matrix should be valid YAML");
        }
    }

    #[test]
    fn test_bundled_matrix_exists() {
        assert!(bundled_matrix_path().exists());
    }
}
