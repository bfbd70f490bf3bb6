//! Config file loading for CLI defaults.
//!
//! The file is a flat `key = value` subset of TOML:
//!
//! ```toml
//! base_url = "https://library.example.com/api/v1"
//! connect_timeout_secs = 5
//! read_timeout_secs = 20
//! borrow_endpoints = "legacy"   # or "by-id"
//! session_file = "/tmp/library-session.json"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use library_client::session::default_config_dir;
use library_client::{BorrowEndpointMode, ClientConfig};

const CONFIG_FILE_NAME: &str = "config.toml";

/// Values read from `config.toml`. Unset keys keep the library defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileConfig {
    pub base_url: Option<String>,
    pub connect_timeout_secs: Option<u64>,
    pub read_timeout_secs: Option<u64>,
    pub borrow_endpoints: Option<BorrowEndpointMode>,
    pub session_file: Option<PathBuf>,
}

impl FileConfig {
    /// Layers the file values over `base`.
    #[must_use]
    pub fn apply_to(&self, mut base: ClientConfig) -> ClientConfig {
        if let Some(base_url) = &self.base_url {
            base.base_url.clone_from(base_url);
        }
        if let Some(secs) = self.connect_timeout_secs {
            base.connect_timeout_secs = secs;
        }
        if let Some(secs) = self.read_timeout_secs {
            base.read_timeout_secs = secs;
        }
        if let Some(mode) = self.borrow_endpoints {
            base.borrow_endpoints = mode;
        }
        base
    }

    fn validate(&self) -> Result<()> {
        validate_timeout_secs("connect_timeout_secs", self.connect_timeout_secs)?;
        validate_timeout_secs("read_timeout_secs", self.read_timeout_secs)?;
        if let Some(base_url) = &self.base_url {
            ClientConfig::with_base_url(base_url.clone())
                .validate()
                .map_err(|error| anyhow!("Invalid config value for `base_url`: {error}"))?;
        }
        Ok(())
    }
}

fn validate_timeout_secs(field: &str, value: Option<u64>) -> Result<()> {
    let Some(value) = value else {
        return Ok(());
    };
    if !(1..=3600).contains(&value) {
        bail!("Invalid config value for `{field}`: {value}. Expected range: 1..=3600");
    }
    Ok(())
}

/// Loaded config metadata.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// Resolved config path if a base directory is known.
    pub path: Option<PathBuf>,
    /// Parsed file config when a config file exists and was valid.
    pub config: Option<FileConfig>,
}

impl LoadedConfig {
    #[must_use]
    pub fn loaded_from_file(&self) -> bool {
        self.config.is_some()
    }
}

/// Loads `config.toml` from `path`, or the default location, if present.
pub fn load_file_config(path: Option<&Path>) -> Result<LoadedConfig> {
    let path = path
        .map(Path::to_path_buf)
        .or_else(|| default_config_dir().ok().map(|dir| dir.join(CONFIG_FILE_NAME)));
    let Some(path_ref) = path.as_deref() else {
        return Ok(LoadedConfig { path, config: None });
    };

    if !path_ref.exists() {
        return Ok(LoadedConfig { path, config: None });
    }

    let raw = fs::read_to_string(path_ref)
        .with_context(|| format!("Failed to read config file '{}'", path_ref.display()))?;
    let config = parse_config_str(&raw)
        .with_context(|| format!("Failed to parse config file '{}'", path_ref.display()))?;
    Ok(LoadedConfig {
        path,
        config: Some(config),
    })
}

fn parse_config_str(raw: &str) -> Result<FileConfig> {
    let mut cfg = FileConfig::default();
    for (line_index, raw_line) in raw.lines().enumerate() {
        let line_no = line_index + 1;
        let line = strip_inline_comment(raw_line).trim();
        if line.is_empty() {
            continue;
        }

        let Some((raw_key, raw_value)) = line.split_once('=') else {
            bail!("Invalid config syntax on line {line_no}: expected key = value");
        };

        let key = raw_key.trim();
        let value = raw_value.trim();

        match key {
            "base_url" => {
                let parsed = parse_string_literal(value)
                    .with_context(|| format!("Invalid `base_url` value on line {line_no}"))?;
                cfg.base_url = Some(parsed);
            }
            "connect_timeout_secs" => {
                let parsed = parse_integer_u64(value).with_context(|| {
                    format!("Invalid `connect_timeout_secs` value on line {line_no}")
                })?;
                cfg.connect_timeout_secs = Some(parsed);
            }
            "read_timeout_secs" => {
                let parsed = parse_integer_u64(value).with_context(|| {
                    format!("Invalid `read_timeout_secs` value on line {line_no}")
                })?;
                cfg.read_timeout_secs = Some(parsed);
            }
            "borrow_endpoints" => {
                let parsed = parse_string_literal(value).with_context(|| {
                    format!("Invalid `borrow_endpoints` value on line {line_no}")
                })?;
                let mode = parsed.parse::<BorrowEndpointMode>().with_context(|| {
                    format!("Invalid `borrow_endpoints` value '{parsed}' on line {line_no}")
                })?;
                cfg.borrow_endpoints = Some(mode);
            }
            "session_file" => {
                let parsed = parse_string_literal(value)
                    .with_context(|| format!("Invalid `session_file` value on line {line_no}"))?;
                cfg.session_file = Some(PathBuf::from(parsed));
            }
            unknown => {
                bail!("Unknown configuration key: '{unknown}' on line {line_no}");
            }
        }
    }
    cfg.validate()?;
    Ok(cfg)
}

fn strip_inline_comment(line: &str) -> &str {
    let mut in_string = false;
    for (index, ch) in line.char_indices() {
        match ch {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..index],
            _ => {}
        }
    }
    line
}

fn parse_string_literal(raw_value: &str) -> Result<String> {
    if raw_value.len() < 2 || !raw_value.starts_with('"') || !raw_value.ends_with('"') {
        bail!("Expected double-quoted string");
    }
    Ok(raw_value[1..raw_value.len() - 1].to_string())
}

fn parse_integer_u64(raw_value: &str) -> Result<u64> {
    let token = raw_value.trim();
    if token.is_empty() {
        bail!("Expected integer value");
    }
    let value = token.parse::<i128>()?;
    if value < 0 {
        bail!("Expected non-negative integer");
    }
    u64::try_from(value).map_err(|_| anyhow!("Integer value out of range for u64"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config_partial_fields() {
        let cfg = parse_config_str(
            r#"
base_url = "https://library.example.com/api/v1"
read_timeout_secs = 20
"#,
        )
        .expect("partial config should parse");
        assert_eq!(
            cfg.base_url.as_deref(),
            Some("https://library.example.com/api/v1")
        );
        assert_eq!(cfg.read_timeout_secs, Some(20));
        assert!(cfg.connect_timeout_secs.is_none());
        assert!(cfg.borrow_endpoints.is_none());
    }

    #[test]
    fn test_parse_config_borrow_endpoints() {
        let cfg =
            parse_config_str(r#"borrow_endpoints = "legacy""#).expect("mode should parse");
        assert_eq!(cfg.borrow_endpoints, Some(BorrowEndpointMode::Legacy));

        let err = parse_config_str(r#"borrow_endpoints = "sideways""#)
            .expect_err("unknown mode expected");
        assert!(err.to_string().contains("borrow_endpoints"));
    }

    #[test]
    fn test_parse_config_rejects_invalid_timeout() {
        let err = parse_config_str("connect_timeout_secs = 0")
            .expect_err("invalid timeout expected");
        assert!(err.to_string().contains("connect_timeout_secs"));

        let err = parse_config_str("read_timeout_secs = 3601")
            .expect_err("invalid timeout expected");
        assert!(err.to_string().contains("read_timeout_secs"));
    }

    #[test]
    fn test_parse_config_rejects_invalid_base_url() {
        let err = parse_config_str(r#"base_url = "ftp://nope""#).expect_err("invalid url expected");
        assert!(err.to_string().contains("base_url"));
    }

    #[test]
    fn test_parse_config_rejects_unknown_key() {
        let err = parse_config_str("concurrency = 4").expect_err("unknown key expected");
        assert!(err.to_string().contains("Unknown configuration key"));
    }

    #[test]
    fn test_parse_config_rejects_unquoted_string() {
        let err = parse_config_str("base_url = http://localhost").expect_err("quotes expected");
        assert!(err.to_string().contains("base_url"));
    }

    #[test]
    fn test_parse_config_supports_inline_comments() {
        let cfg = parse_config_str(
            r#"
connect_timeout_secs = 4 # fail fast
session_file = "/tmp/s#1.json" # hash inside quotes is kept
"#,
        )
        .expect("config with comments should parse");
        assert_eq!(cfg.connect_timeout_secs, Some(4));
        assert_eq!(cfg.session_file, Some(PathBuf::from("/tmp/s#1.json")));
    }

    #[test]
    fn test_apply_to_overrides_only_set_values() {
        let cfg = FileConfig {
            read_timeout_secs: Some(5),
            borrow_endpoints: Some(BorrowEndpointMode::Legacy),
            ..FileConfig::default()
        };
        let merged = cfg.apply_to(ClientConfig::default());
        assert_eq!(merged.read_timeout_secs, 5);
        assert_eq!(merged.borrow_endpoints, BorrowEndpointMode::Legacy);
        assert_eq!(merged.base_url, ClientConfig::default().base_url);
    }

    #[test]
    fn test_load_file_config_missing_file_is_not_an_error() {
        let dir = tempfile::TempDir::new().expect("tempdir");
        let loaded = load_file_config(Some(&dir.path().join("config.toml"))).expect("load");
        assert!(!loaded.loaded_from_file());
    }

    #[test]
    fn test_load_file_config_reads_file() {
        let dir = tempfile::TempDir::new().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "read_timeout_secs = 7\n").expect("write");
        let loaded = load_file_config(Some(&path)).expect("load");
        assert_eq!(loaded.config.expect("config").read_timeout_secs, Some(7));
    }
}
