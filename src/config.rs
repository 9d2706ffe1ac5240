use serde::{Deserialize, Serialize};
use clap::Parser;
use dirs_next::home_dir;
use std::{fmt, fs, path::{Path, PathBuf}, str::FromStr};
use thiserror::Error;

use crate::constants::{MEDIA_TIMEOUT, NEUTRAL_COLOR};

/// Error type for config loading/validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Where frames go
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PanelKind {
    /// PNG/text files under a per-device directory
    #[default]
    Frames,
    /// In-memory recorder, dry runs
    Mock,
}

impl FromStr for PanelKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "frames" => Ok(PanelKind::Frames),
            "mock" => Ok(PanelKind::Mock),
            other => Err(ConfigError::Validation(format!("unknown panel kind '{}' (frames|mock)", other))),
        }
    }
}

impl fmt::Display for PanelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PanelKind::Frames => write!(f, "frames"),
            PanelKind::Mock => write!(f, "mock"),
        }
    }
}

/// Effective app configuration after all layers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Panel device address (BLE MAC)
    pub device_address: String,
    /// wttr.in location
    pub location: String,
    pub log_level: Option<String>,
    /// Clock digit color, hex RGB
    pub color: String,
    pub media_timeout_ms: u64,
    pub lms: LmsConfig,
    pub panel: PanelConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LmsConfig {
    pub host: String,
    pub port: u16,
    /// Player MAC or name, "-" for the first player
    pub player: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelConfig {
    pub kind: PanelKind,
    pub dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            device_address: "95:0B:57:BF:8F:8D".to_string(),
            location: "Strasbourg".to_string(),
            log_level: None,
            color: NEUTRAL_COLOR.to_string(),
            media_timeout_ms: MEDIA_TIMEOUT.as_millis() as u64,
            lms: LmsConfig {
                host: "localhost".to_string(),
                port: 9000,
                player: "-".to_string(),
            },
            panel: PanelConfig {
                kind: PanelKind::Frames,
                dir: PathBuf::from("./frames"),
            },
        }
    }
}

impl Config {
    pub fn media_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.media_timeout_ms)
    }
}

/// YAML layer. All fields are Options so we can layer them over defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigFile {
    pub device_address: Option<String>,
    pub location: Option<String>,
    pub log_level: Option<String>,
    pub color: Option<String>,
    pub media_timeout_ms: Option<u64>,
    pub lms: Option<LmsFile>,
    pub panel: Option<PanelFile>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LmsFile {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub player: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PanelFile {
    pub kind: Option<PanelKind>,
    pub dir: Option<PathBuf>,
}

/// CLI overrides (highest precedence).
#[derive(Debug, Parser, Clone)]
#[command(name = "pixsync", version, about = "Album art, titles and a weather clock on a 32x32 pixel panel")]
pub struct Cli {
    /// Clock digit color as hex RGB, e.g. ff8800 [default: ffffff]
    #[arg(value_name = "COLOR")]
    pub color: Option<String>,
}

/// Public entry point: read YAML, environment and CLI, merge, validate.
pub fn load(cli: Option<&Cli>) -> Result<Config, ConfigError> {
    // 1) defaults (from `Default` impl)
    let mut cfg = Config::default();

    // 2) YAML file (explicit path or search)
    if let Some(p) = std::env::var_os("PIXSYNC_CONFIG").map(PathBuf::from) {
        if !p.exists() {
            return Err(ConfigError::Validation(format!(
                "Config file not found: {}",
                p.display()
            )));
        }
        merge(&mut cfg, read_yaml(&p)?);
    } else if let Some(p) = find_config_file() {
        merge(&mut cfg, read_yaml(&p)?);
    }

    // 3) environment
    apply_env_overrides(&mut cfg, |k| std::env::var(k).ok())?;

    // 4) CLI overrides
    if let Some(cli) = cli {
        apply_cli_overrides(&mut cfg, cli);
    }

    // 5) Validate
    validate(&cfg)?;
    Ok(cfg)
}

/// Try common locations in order (first hit wins).
fn find_config_file() -> Option<PathBuf> {
    // XDG-style: ~/.config/pixsync/config.yaml
    if let Some(home) = home_dir() {
        let p = home.join(".config/pixsync/config.yaml");
        if p.exists() { return Some(p) }
        let p = home.join(".config/pixsync.yaml");
        if p.exists() { return Some(p) }
    }
    // project local
    for candidate in &["pixsync.yaml", "config.yaml"] {
        let p = PathBuf::from(candidate);
        if p.exists() { return Some(p) }
    }
    None
}

fn read_yaml(path: &Path) -> Result<ConfigFile, ConfigError> {
    let s = fs::read_to_string(path)?;
    parse_yaml(&s)
}

pub fn parse_yaml(s: &str) -> Result<ConfigFile, ConfigError> {
    // an empty file is a valid, empty layer
    if s.trim().is_empty() {
        return Ok(ConfigFile::default());
    }
    Ok(serde_yaml::from_str(s)?)
}

/// Shallow merge `src` into `dst`, Option-by-Option.
pub fn merge(dst: &mut Config, src: ConfigFile) {
    // top-level
    if let Some(v) = src.device_address   { dst.device_address = v; }
    if let Some(v) = src.location         { dst.location = v; }
    if src.log_level.is_some()            { dst.log_level = src.log_level; }
    if let Some(v) = src.color            { dst.color = v; }
    if let Some(v) = src.media_timeout_ms { dst.media_timeout_ms = v; }
    // lms
    if let Some(lms) = src.lms {
        if let Some(v) = lms.host   { dst.lms.host = v; }
        if let Some(v) = lms.port   { dst.lms.port = v; }
        if let Some(v) = lms.player { dst.lms.player = v; }
    }
    // panel
    if let Some(panel) = src.panel {
        if let Some(v) = panel.kind { dst.panel.kind = v; }
        if let Some(v) = panel.dir  { dst.panel.dir = v; }
    }
}

/// Environment layer, `lookup` is `std::env::var` outside tests.
pub fn apply_env_overrides<F>(cfg: &mut Config, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |k: &str| lookup(k).filter(|v| !v.trim().is_empty());

    if let Some(v) = get("DEVICE_MAC") { cfg.device_address = v; }
    if let Some(v) = get("LOCATION")   { cfg.location = v; }
    if let Some(v) = get("LMS_HOST")   { cfg.lms.host = v; }
    if let Some(v) = get("LMS_PORT") {
        cfg.lms.port = v.trim().parse().map_err(|_| {
            ConfigError::Validation(format!("LMS_PORT must be a port number, got '{}'", v))
        })?;
    }
    if let Some(v) = get("LMS_PLAYER") { cfg.lms.player = v; }
    if let Some(v) = get("PANEL_KIND") { cfg.panel.kind = v.parse()?; }
    if let Some(v) = get("PANEL_DIR")  { cfg.panel.dir = PathBuf::from(v); }
    Ok(())
}

fn apply_cli_overrides(cfg: &mut Config, cli: &Cli) {
    if let Some(v) = &cli.color { cfg.color = v.clone(); }
}

/// Put any invariants here (required fields, ranges, etc.)
pub fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.device_address.trim().is_empty() {
        return Err(ConfigError::Validation("device address must not be empty".into()));
    }
    if cfg.location.trim().is_empty() {
        return Err(ConfigError::Validation("location must not be empty".into()));
    }
    if cfg.lms.port == 0 {
        return Err(ConfigError::Validation("LMS port must be > 0".into()));
    }
    if cfg.media_timeout_ms == 0 {
        return Err(ConfigError::Validation("media_timeout_ms must be > 0".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn test_defaults_are_valid() {
        let cfg = Config::default();
        assert_eq!(cfg.device_address, "95:0B:57:BF:8F:8D");
        assert_eq!(cfg.location, "Strasbourg");
        assert_eq!(cfg.lms.port, 9000);
        assert_eq!(cfg.panel.kind, PanelKind::Frames);
        assert_eq!(cfg.media_timeout(), MEDIA_TIMEOUT);
        assert!(validate(&cfg).is_ok());
    }

    #[test]
    fn test_yaml_then_env_layering() {
        let mut cfg = Config::default();
        let y = parse_yaml("location: Paris\nlms:\n  host: nas.local\n  player: Kitchen\npanel:\n  kind: mock\n").unwrap();
        merge(&mut cfg, y);
        assert_eq!(cfg.location, "Paris");
        assert_eq!(cfg.lms.host, "nas.local");
        assert_eq!(cfg.lms.port, 9000);
        assert_eq!(cfg.panel.kind, PanelKind::Mock);

        apply_env_overrides(&mut cfg, env(&[("LOCATION", "Lyon"), ("LMS_PORT", "9001"), ("PANEL_KIND", "frames"), ("DEVICE_MAC", "")])).unwrap();
        assert_eq!(cfg.location, "Lyon");
        assert_eq!(cfg.lms.port, 9001);
        assert_eq!(cfg.lms.player, "Kitchen");
        assert_eq!(cfg.panel.kind, PanelKind::Frames);
        // blank env values do not clobber
        assert_eq!(cfg.device_address, "95:0B:57:BF:8F:8D");
    }

    #[test]
    fn test_bad_values_rejected() {
        let mut cfg = Config::default();
        assert!(matches!(apply_env_overrides(&mut cfg, env(&[("LMS_PORT", "http")])), Err(ConfigError::Validation(_))));
        assert!(matches!(apply_env_overrides(&mut cfg, env(&[("PANEL_KIND", "ble")])), Err(ConfigError::Validation(_))));
        assert!(matches!(parse_yaml("lms: [1, 2"), Err(ConfigError::Yaml(_))));

        let mut cfg = Config::default();
        cfg.lms.port = 0;
        assert!(validate(&cfg).is_err());
        let mut cfg = Config::default();
        cfg.location = " ".to_string();
        assert!(validate(&cfg).is_err());
    }

    #[test]
    fn test_cli_color() {
        let cli = Cli::try_parse_from(["pixsync"]).unwrap();
        assert_eq!(cli.color, None);
        let mut cfg = Config::default();
        apply_cli_overrides(&mut cfg, &cli);
        assert_eq!(cfg.color, "ffffff");

        let cli = Cli::try_parse_from(["pixsync", "ff8800"]).unwrap();
        apply_cli_overrides(&mut cfg, &cli);
        assert_eq!(cfg.color, "ff8800");
        assert_eq!(parse_yaml("").unwrap().location, None);
    }

    #[test]
    fn test_yaml_color_survives_bare_cli() {
        let mut cfg = Config::default();
        merge(&mut cfg, parse_yaml("color: ff0000\n").unwrap());
        apply_cli_overrides(&mut cfg, &Cli::try_parse_from(["pixsync"]).unwrap());
        assert_eq!(cfg.color, "ff0000");

        apply_cli_overrides(&mut cfg, &Cli::try_parse_from(["pixsync", "00ff00"]).unwrap());
        assert_eq!(cfg.color, "00ff00");
    }
}
