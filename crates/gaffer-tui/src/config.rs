// Configuration loading and parsing (gaffer.toml).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use gaffer_core::assembler::MAX_SQUAD_SIZE;
use gaffer_core::formation::PitchGeometry;

/// Built-in copy of `defaults/gaffer.toml`, written out when the app runs
/// from a directory that has neither `defaults/` nor `config/`.
const BUILTIN_DEFAULTS: &str = include_str!("../defaults/gaffer.toml");

const CONFIG_FILE: &str = "gaffer.toml";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// gaffer.toml structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    #[serde(default)]
    pub squad: SquadConfig,
    #[serde(default)]
    pub pitch: PitchConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    #[serde(default = "default_true")]
    pub check_health: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SquadConfig {
    /// CSV to pre-load the squad from, relative to the working directory.
    #[serde(default)]
    pub import_path: Option<String>,
    #[serde(default = "default_max_players")]
    pub max_players: usize,
}

impl Default for SquadConfig {
    fn default() -> Self {
        SquadConfig {
            import_path: None,
            max_players: MAX_SQUAD_SIZE,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PitchConfig {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
}

impl Default for PitchConfig {
    fn default() -> Self {
        let g = PitchGeometry::default();
        PitchConfig {
            width: g.width,
            height: g.height,
            padding: g.padding,
        }
    }
}

impl PitchConfig {
    pub fn geometry(&self) -> PitchGeometry {
        PitchGeometry {
            width: self.width,
            height: self.height,
            padding: self.padding,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_max_players() -> usize {
    MAX_SQUAD_SIZE
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate `config/gaffer.toml` relative to `base_dir`.
///
/// Does not copy defaults; see [`load_config`].
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = base_dir.join("config").join(CONFIG_FILE);
    let text = read_file(&path)?;
    let config: Config = toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        source: e,
    })?;
    validate(&config)?;
    Ok(config)
}

/// Ensure all config files exist by copying missing ones from `defaults/`.
/// Returns the list of files that were copied. Skips `.example` files.
pub fn ensure_config_files(base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let defaults_dir = base_dir.join("defaults");
    let config_dir = base_dir.join("config");

    if !defaults_dir.exists() {
        if !config_dir.exists() {
            return Err(ConfigError::DefaultsCopyError {
                message: format!(
                    "neither defaults/ nor config/ directory found in {}",
                    base_dir.display()
                ),
            });
        }
        return Ok(vec![]);
    }

    std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to create config directory: {e}"),
    })?;

    let entries = std::fs::read_dir(&defaults_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to read defaults directory: {e}"),
    })?;

    let mut copied = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| ConfigError::DefaultsCopyError {
            message: format!("failed to read defaults entry: {e}"),
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name() else {
            continue;
        };
        if file_name.to_str().is_some_and(|n| n.ends_with(".example")) {
            continue;
        }

        let target = config_dir.join(file_name);
        let content = std::fs::read(&path).map_err(|e| ConfigError::DefaultsCopyError {
            message: format!("failed to read {}: {e}", path.display()),
        })?;
        if write_new(&target, &content)? {
            copied.push(target);
        }
    }

    Ok(copied)
}

/// Write the built-in default config into `base_dir/config/` if no config
/// file is there yet. Returns whether a file was written.
pub fn install_builtin_defaults(base_dir: &Path) -> Result<bool, ConfigError> {
    let config_dir = base_dir.join("config");
    std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to create {}: {e}", config_dir.display()),
    })?;
    write_new(&config_dir.join(CONFIG_FILE), BUILTIN_DEFAULTS.as_bytes())
}

/// Pick the directory config is read from: the working directory when it
/// carries `defaults/` or `config/`, otherwise the per-user config directory.
pub fn resolve_base_dir() -> Result<PathBuf, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    if cwd.join("defaults").exists() || cwd.join("config").exists() {
        return Ok(cwd);
    }
    directories::ProjectDirs::from("", "", "gaffer")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| ConfigError::DefaultsCopyError {
            message: "no usable working directory config and no home directory".into(),
        })
}

/// Resolve the config location, initialize it from defaults if needed and
/// load it.
pub fn load_config() -> Result<Config, ConfigError> {
    let base = resolve_base_dir()?;
    if base.join("defaults").exists() {
        ensure_config_files(&base)?;
    } else {
        install_builtin_defaults(&base)?;
    }
    load_config_from(&base)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

/// Create `target` with `content` unless it already exists.
fn write_new(target: &Path, content: &[u8]) -> Result<bool, ConfigError> {
    match std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(target)
    {
        Ok(mut dest) => {
            std::io::Write::write_all(&mut dest, content).map_err(|e| {
                ConfigError::DefaultsCopyError {
                    message: format!("failed to write {}: {e}", target.display()),
                }
            })?;
            Ok(true)
        }
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => Ok(false),
        Err(e) => Err(ConfigError::DefaultsCopyError {
            message: format!("failed to create {}: {e}", target.display()),
        }),
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn invalid(field: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError {
        field: field.to_string(),
        message: message.into(),
    }
}

fn validate(config: &Config) -> Result<(), ConfigError> {
    let url = config.api.base_url.trim();
    if url.is_empty() {
        return Err(invalid("api.base_url", "must not be empty"));
    }
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(invalid(
            "api.base_url",
            format!("must start with http:// or https://, got {url:?}"),
        ));
    }

    if config.squad.max_players == 0 || config.squad.max_players > MAX_SQUAD_SIZE {
        return Err(invalid(
            "squad.max_players",
            format!(
                "must be between 1 and {MAX_SQUAD_SIZE}, got {}",
                config.squad.max_players
            ),
        ));
    }
    if let Some(path) = &config.squad.import_path {
        if path.trim().is_empty() {
            return Err(invalid("squad.import_path", "must not be blank when set"));
        }
    }

    let pitch = &config.pitch;
    for (field, value) in [("pitch.width", pitch.width), ("pitch.height", pitch.height)] {
        if !value.is_finite() || value <= 0.0 {
            return Err(invalid(field, format!("must be positive, got {value}")));
        }
    }
    if !pitch.padding.is_finite() || pitch.padding < 0.0 {
        return Err(invalid(
            "pitch.padding",
            format!("must be non-negative, got {}", pitch.padding),
        ));
    }
    if pitch.padding * 2.0 >= pitch.height {
        return Err(invalid(
            "pitch.padding",
            format!(
                "twice the padding ({}) must be less than the height ({})",
                pitch.padding * 2.0,
                pitch.height
            ),
        ));
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    /// Crate root holding `defaults/`, whether tests run from the crate or
    /// the workspace root.
    fn project_root() -> PathBuf {
        let cwd = std::env::current_dir().unwrap();
        if cwd.join("defaults").exists() {
            cwd
        } else if cwd.join("crates/gaffer-tui/defaults").exists() {
            cwd.join("crates/gaffer-tui")
        } else {
            panic!("Cannot locate defaults/ directory from CWD {:?}", cwd);
        }
    }

    /// Fresh temp dir with `config/gaffer.toml` holding `toml_text`.
    fn temp_config(name: &str, toml_text: &str) -> PathBuf {
        let tmp = std::env::temp_dir().join(name);
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(tmp.join("config")).unwrap();
        fs::write(tmp.join("config").join(CONFIG_FILE), toml_text).unwrap();
        tmp
    }

    fn expect_field(err: ConfigError, expected: &str) {
        match err {
            ConfigError::ValidationError { field, .. } => assert_eq!(field, expected),
            other => panic!("expected ValidationError for {expected}, got: {other}"),
        }
    }

    #[test]
    fn defaults_file_loads_and_validates() {
        let tmp = temp_config(
            "gaffer_config_defaults",
            &fs::read_to_string(project_root().join("defaults/gaffer.toml")).unwrap(),
        );
        let config = load_config_from(&tmp).expect("defaults should load");
        assert_eq!(config.api.base_url, "http://localhost:8000");
        assert!(config.api.check_health);
        assert!(config.squad.import_path.is_none());
        assert_eq!(config.squad.max_players, 25);
        assert_eq!(config.pitch.geometry(), PitchGeometry::default());
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn builtin_defaults_match_defaults_file() {
        let on_disk = fs::read_to_string(project_root().join("defaults/gaffer.toml")).unwrap();
        assert_eq!(BUILTIN_DEFAULTS, on_disk);
    }

    #[test]
    fn optional_sections_fall_back() {
        let tmp = temp_config(
            "gaffer_config_minimal",
            "[api]\nbase_url = \"https://analysis.example.org\"\n",
        );
        let config = load_config_from(&tmp).unwrap();
        assert!(config.api.check_health);
        assert_eq!(config.squad.max_players, MAX_SQUAD_SIZE);
        assert_eq!(config.pitch.width, 360.0);
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn missing_config_is_file_not_found() {
        let tmp = std::env::temp_dir().join("gaffer_config_missing");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(&tmp).unwrap();
        match load_config_from(&tmp).unwrap_err() {
            ConfigError::FileNotFound { path } => assert!(path.ends_with("gaffer.toml")),
            other => panic!("expected FileNotFound, got: {other}"),
        }
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn invalid_toml_is_parse_error() {
        let tmp = temp_config("gaffer_config_invalid", "this is not valid [[[ toml");
        assert!(matches!(
            load_config_from(&tmp).unwrap_err(),
            ConfigError::ParseError { .. }
        ));
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn bad_base_url_names_field() {
        let tmp = temp_config("gaffer_config_bad_url", "[api]\nbase_url = \"localhost:8000\"\n");
        expect_field(load_config_from(&tmp).unwrap_err(), "api.base_url");
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn max_players_out_of_range_names_field() {
        let tmp = temp_config(
            "gaffer_config_bad_max",
            "[api]\nbase_url = \"http://x\"\n[squad]\nmax_players = 30\n",
        );
        expect_field(load_config_from(&tmp).unwrap_err(), "squad.max_players");
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn oversized_padding_names_field() {
        let tmp = temp_config(
            "gaffer_config_bad_pitch",
            "[api]\nbase_url = \"http://x\"\n[pitch]\nwidth = 100.0\nheight = 50.0\npadding = 30.0\n",
        );
        expect_field(load_config_from(&tmp).unwrap_err(), "pitch.padding");
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_files_copies_and_skips_examples() {
        let tmp = std::env::temp_dir().join("gaffer_config_ensure");
        let _ = fs::remove_dir_all(&tmp);
        let defaults_dir = tmp.join("defaults");
        fs::create_dir_all(&defaults_dir).unwrap();
        fs::copy(project_root().join("defaults/gaffer.toml"), defaults_dir.join("gaffer.toml")).unwrap();
        fs::write(defaults_dir.join("squad.csv.example"), "name,position\n").unwrap();

        let copied = ensure_config_files(&tmp).unwrap();
        assert_eq!(copied.len(), 1);
        assert!(tmp.join("config/gaffer.toml").exists());
        assert!(!tmp.join("config/squad.csv.example").exists());

        // Second run leaves the edited copy alone.
        fs::write(tmp.join("config/gaffer.toml"), "# custom\n").unwrap();
        assert!(ensure_config_files(&tmp).unwrap().is_empty());
        assert_eq!(fs::read_to_string(tmp.join("config/gaffer.toml")).unwrap(), "# custom\n");
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_files_errors_when_both_dirs_missing() {
        let tmp = std::env::temp_dir().join("gaffer_config_both_missing");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(&tmp).unwrap();
        match ensure_config_files(&tmp).unwrap_err() {
            ConfigError::DefaultsCopyError { message } => {
                assert!(message.contains("neither defaults/ nor config/"))
            }
            other => panic!("expected DefaultsCopyError, got: {other}"),
        }
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn install_builtin_defaults_writes_once() {
        let tmp = std::env::temp_dir().join("gaffer_config_builtin");
        let _ = fs::remove_dir_all(&tmp);
        assert!(install_builtin_defaults(&tmp).unwrap());
        assert!(!install_builtin_defaults(&tmp).unwrap());
        let config = load_config_from(&tmp).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:8000");
        let _ = fs::remove_dir_all(&tmp);
    }
}
