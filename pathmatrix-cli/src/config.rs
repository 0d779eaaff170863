//! Configuration options.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use log::debug;
use serde::Deserialize;
use thiserror::Error;

use pathmatrix_core::Mode;

const DEFAULT_CONFIG_FILE_NAME: &'static str = ".pathmatrix";

/// Which path search variants to run.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ModeSel {
    Min,
    Max,
    Both,
}

impl ModeSel {
    pub fn modes(self) -> &'static [Mode] {
        match self {
            ModeSel::Min => &[Mode::Minimize],
            ModeSel::Max => &[Mode::Maximize],
            ModeSel::Both => &[Mode::Minimize, Mode::Maximize],
        }
    }
}

/// Output format.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Text,
    Json,
}

/// Config file errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file [{}]: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("Config file [{}] must be a valid JSON file: {source}", .path.display())]
    Parse { path: PathBuf, source: serde_json::Error },
}

/// Options loaded from the config file (`~/.pathmatrix` by default). Every field is optional.
#[derive(Clone, Default, PartialEq, Eq, Debug, Deserialize)]
pub struct Opts {
    /// Which variants to run when not given on the command line.
    #[serde(rename = "mode")]
    pub mode: Option<ModeSel>,

    /// Output format when not given on the command line.
    #[serde(rename = "format")]
    pub format: Option<Format>,

    /// Whether to print step matrices even without `--steps`.
    #[serde(rename = "showSteps")]
    pub show_steps: Option<bool>,
}

/// Effective settings, after command line flags are applied on top of the config file.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Settings {
    pub mode: ModeSel,
    pub format: Format,
    pub show_steps: bool,
}

impl Opts {
    /// Load options from the given config file, which must exist,
    /// or from the default location, where a missing file means default options.
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = config_file {
            return Self::read_config_file(path);
        }

        match Self::default_config_file_location() {
            Some(path) => Ok(Self::read_optional_config_file(&path)?.unwrap_or_default()),
            None => Ok(Opts::default()), // Unable to locate HOME dir - unsupported platform?
        }
    }

    /// Command line values take precedence over the config file.
    pub fn into_settings(self, mode: Option<ModeSel>, format: Option<Format>, show_steps: bool) -> Settings {
        Settings {
            mode: mode.or(self.mode).unwrap_or(ModeSel::Min),
            format: format.or(self.format).unwrap_or(Format::Text),
            show_steps: show_steps || self.show_steps.unwrap_or(false),
        }
    }

    fn default_config_file_location() -> Option<PathBuf> {
        dirs::home_dir().map(|mut path| {
            path.push(DEFAULT_CONFIG_FILE_NAME);
            path
        })
    }

    fn parse_config(json: &[u8], file_path: &Path) -> Result<Self, ConfigError> {
        serde_json::from_slice(json).map_err(|source| ConfigError::Parse { path: file_path.to_path_buf(), source })
    }

    fn read_config_file(file_path: &Path) -> Result<Self, ConfigError> {
        debug!("Reading config file [{}]", file_path.display());
        let json = fs::read(file_path).map_err(|source| ConfigError::Read { path: file_path.to_path_buf(), source })?;
        Self::parse_config(&json, file_path)
    }

    fn read_optional_config_file(file_path: &Path) -> Result<Option<Self>, ConfigError> {
        match Self::read_config_file(file_path) {
            Ok(conf) => Ok(Some(conf)),
            Err(ConfigError::Read { source, .. }) if source.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }
}

#[test]
fn test_into_settings() {
    let defaults = Settings { mode: ModeSel::Min, format: Format::Text, show_steps: false };
    assert_eq!(Opts::default().into_settings(None, None, false), defaults);

    let opts = Opts { mode: Some(ModeSel::Both), format: Some(Format::Json), show_steps: Some(true) };
    assert_eq!(
        opts.clone().into_settings(None, None, false),
        Settings { mode: ModeSel::Both, format: Format::Json, show_steps: true }
    );
    assert_eq!(
        opts.into_settings(Some(ModeSel::Max), Some(Format::Text), false),
        Settings { mode: ModeSel::Max, format: Format::Text, show_steps: true }
    );
    assert_eq!(Opts::default().into_settings(None, None, true), Settings { show_steps: true, ..defaults });
}

#[test]
fn test_parse_config() {
    let p = Path::new("test");
    let c = |json: &str| -> Opts { Opts::parse_config(json.as_bytes(), p).expect("bad test config") };

    assert_eq!(c(r#"{}"#), Opts::default());
    assert_eq!(c(r#"{ "unknown": "foo" }"#), Opts::default());
    assert_eq!(c(r#"{ "mode": "max" }"#), Opts { mode: Some(ModeSel::Max), ..Opts::default() });
    assert_eq!(c(r#"{ "format": "json" }"#), Opts { format: Some(Format::Json), ..Opts::default() });
    assert_eq!(
        c(r#"{ "mode": "both", "format": "text", "showSteps": true }"#),
        Opts { mode: Some(ModeSel::Both), format: Some(Format::Text), show_steps: Some(true) }
    );

    assert!(matches!(Opts::parse_config(br#"{ "mode": "sideways" }"#, p), Err(ConfigError::Parse { .. })));
    assert!(matches!(Opts::parse_config(b"not json", p), Err(ConfigError::Parse { .. })));
}

#[test]
fn test_missing_config_file() {
    let missing = Path::new("/nonexistent/pathmatrix/config");
    assert!(matches!(Opts::read_optional_config_file(missing), Ok(None)));
    assert!(matches!(Opts::load(Some(missing)), Err(ConfigError::Read { .. })));
}

#[test]
fn test_mode_sel() {
    assert_eq!(ModeSel::Min.modes(), &[Mode::Minimize]);
    assert_eq!(ModeSel::Both.modes(), &[Mode::Minimize, Mode::Maximize]);
}
