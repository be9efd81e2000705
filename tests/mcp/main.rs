use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde_json::Value;
use tempfile::TempDir;

mod tools;

/// Test fixture for MCP integration tests
///
/// Manages a temporary project with YAML language files under `bot/lang/`
pub struct McpTestFixture {
    _temp_dir: TempDir,
    project_root: PathBuf,
}

impl McpTestFixture {
    /// Create an empty test project
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project_root = temp_dir.path().canonicalize()?;

        fs::create_dir_all(project_root.join(".git"))?;
        fs::create_dir_all(project_root.join("bot/lang"))?;

        Ok(Self {
            _temp_dir: temp_dir,
            project_root,
        })
    }

    /// Create a test project with language files
    ///
    /// # Example
    /// ```ignore
    /// let fixture = McpTestFixture::with_languages(vec![
    ///     ("en.yml", "greeting: Hello\n"),
    ///     ("de.yml", "greeting: Hallo\n"),
    /// ])?;
    /// ```
    pub fn with_languages(files: Vec<(&str, &str)>) -> Result<Self> {
        let fixture = Self::new()?;
        for (name, content) in files {
            fixture.write_language_file(name, content)?;
        }
        Ok(fixture)
    }

    /// Write a language file to bot/lang/<name>
    pub fn write_language_file(&self, name: &str, content: &str) -> Result<()> {
        let path = self.project_root.join("bot/lang").join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content)
            .with_context(|| format!("Failed to write language file: {}", path.display()))?;
        Ok(())
    }

    /// Write a .langdexrc.json config file
    pub fn write_config(&self, content: &Value) -> Result<()> {
        let path = self.project_root.join(".langdexrc.json");
        let json_str = serde_json::to_string_pretty(content)?;
        fs::write(&path, format!("{}\n", json_str))?;
        Ok(())
    }

    /// Get the project root path as a string (for MCP parameters)
    pub fn root(&self) -> String {
        self.project_root.to_string_lossy().to_string()
    }

    /// Get the project root path as a Path reference
    pub fn root_path(&self) -> &Path {
        &self.project_root
    }
}

// ============================================================================
// Fixture Generators
// ============================================================================

/// English and German bot strings, German missing one key and adding another
pub fn fixture_bot_languages() -> Result<McpTestFixture> {
    McpTestFixture::with_languages(vec![
        (
            "en.yml",
            "moderation:\n  ban:\n    success: Banned {user}\n  kick: Kicked\ngeneral:\n  ok: OK\n",
        ),
        (
            "de.yml",
            "moderation:\n  ban:\n    success: Gebannt {user}\ngeneral:\n  ok: Okay\n  only_de: Nur Deutsch\n",
        ),
    ])
}

/// Parse the JSON text content of a successful tool result.
pub fn extract_tool_result_json(result: &rmcp::model::CallToolResult) -> Value {
    // Check for errors using is_error field
    if let Some(true) = result.is_error {
        panic!("Tool call returned an error: {:?}", result);
    }

    assert!(
        !result.content.is_empty(),
        "Tool result should have content"
    );

    let content_item = &result.content[0];
    let text_content = content_item
        .as_text()
        .expect("Tool result content should be text");

    serde_json::from_str(&text_content.text).expect("Tool result should be valid JSON")
}
