use std::{
    fs,
    path::{Component, Path, PathBuf},
};

use anyhow::{Context, Ok, Result};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::core::Settings;

pub const CONFIG_FILE_NAME: &str = ".langdexrc.json";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Folder with the language files, relative to the project root.
    #[serde(default = "default_language_folder_path")]
    pub language_folder_path: String,
    #[serde(default = "default_language")]
    pub default_language: String,
    #[serde(default = "default_language")]
    pub fallback_language: String,
    #[serde(default)]
    pub ignores: Vec<String>,
}

fn default_language_folder_path() -> String {
    "bot/lang".to_string()
}

fn default_language() -> String {
    "en".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language_folder_path: default_language_folder_path(),
            default_language: default_language(),
            fallback_language: default_language(),
            ignores: Vec::new(),
        }
    }
}

/// Trim and drop one pair of matching surrounding quotes.
fn normalize_setting(value: &str) -> String {
    let value = value.trim();
    ['"', '\'']
        .iter()
        .find_map(|q| value.strip_prefix(*q).and_then(|rest| rest.strip_suffix(*q)))
        .unwrap_or(value)
        .trim()
        .to_string()
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if any glob patterns in `ignores` are invalid.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            if pattern.contains('*') || pattern.contains('?') {
                Pattern::new(pattern).with_context(|| {
                    format!("Invalid glob pattern in 'ignores': \"{}\"", pattern)
                })?;
            }
        }
        Ok(())
    }

    /// Clean up hand-edited values: whitespace, stray quotes, Windows separators.
    pub fn normalized(mut self) -> Self {
        self.language_folder_path =
            normalize_setting(&self.language_folder_path).replace('\\', "/");
        self.default_language = normalize_setting(&self.default_language);
        self.fallback_language = normalize_setting(&self.fallback_language);
        self
    }

    /// Folder with the language files, resolved against `root_dir`.
    pub fn language_folder(&self, root_dir: &Path) -> PathBuf {
        let folder = Path::new(&self.language_folder_path);
        if folder.is_absolute() {
            return folder.to_path_buf();
        }
        let is_cur_dir = root_dir
            .components()
            .all(|c| matches!(c, Component::CurDir));
        let rel = folder.strip_prefix(Path::new(".")).unwrap_or(folder);
        if is_cur_dir {
            rel.to_path_buf()
        } else {
            root_dir.join(rel)
        }
    }

    pub fn settings(&self, root_dir: &Path) -> Settings {
        Settings::new(
            self.language_folder(root_dir),
            &self.default_language,
            &self.fallback_language,
        )
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            let config = config.normalized();
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}

/// Command line values that take precedence over the config file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub language_folder: Option<PathBuf>,
    pub default_language: Option<String>,
    pub fallback_language: Option<String>,
}

/// Configuration resolved for one project root (CLI > config file > defaults).
#[derive(Debug, Clone)]
pub struct Workspace {
    pub root_dir: PathBuf,
    pub config: Config,
    /// True if a config file was found.
    pub from_file: bool,
    pub settings: Settings,
}

impl Workspace {
    pub fn load(root_dir: &Path, overrides: &ConfigOverrides) -> Result<Self> {
        let ConfigLoadResult {
            mut config,
            from_file,
        } = load_config(root_dir)?;

        if let Some(ref folder) = overrides.language_folder {
            config.language_folder_path = folder.to_string_lossy().to_string();
        }
        if let Some(ref language) = overrides.default_language {
            config.default_language = language.clone();
        }
        if let Some(ref language) = overrides.fallback_language {
            config.fallback_language = language.clone();
        }
        let config = config.normalized();
        let settings = config.settings(root_dir);

        Ok(Self {
            root_dir: root_dir.to_path_buf(),
            config,
            from_file,
            settings,
        })
    }
}
