use crate::cli_args::{Cli, Command};
use crate::llm::openai::ModelSettings;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::PathBuf;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;

/// Final resolved configuration for kommiter.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub model: ModelSettings,
    /// Only used by `generate`; the server reads keys from request headers.
    pub api_key: Option<String>,
}

impl Config {
    /// Build the final config from CLI flags, environment, TOML file, and defaults.
    ///
    /// Precedence:
    ///   1. CLI flags (`--model`, `--api-base-url`, `--host`, `--port`, `--api-key`)
    ///   2. Env vars `KOMMITER_MODEL`, `KOMMITER_API_BASE_URL`, `KOMMITER_HOST`,
    ///      `KOMMITER_PORT`, `GROQ_API_KEY`
    ///   3. TOML `~/.config/kommiter.toml`
    ///   4. Hardcoded defaults (Groq, llama-4-scout, 0.0.0.0:8080)
    pub fn from_sources(cli: &Cli) -> Result<Self> {
        let file_cfg = load_file_config().unwrap_or_default();
        Self::resolve(cli, |key| env::var(key).ok(), file_cfg)
    }

    fn resolve<F>(cli: &Cli, env_var: F, file_cfg: FileConfig) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = ModelSettings::default();

        let (host_cli, port_cli) = match &cli.command {
            Some(Command::Serve(args)) => (args.host.clone(), args.port),
            _ => (None, None),
        };

        let port_env = env_var("KOMMITER_PORT")
            .map(|p| p.parse::<u16>())
            .transpose()
            .context("KOMMITER_PORT must be a port number")?;

        let host = host_cli
            .or_else(|| env_var("KOMMITER_HOST"))
            .or(file_cfg.host)
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = port_cli.or(port_env).or(file_cfg.port).unwrap_or(DEFAULT_PORT);

        let model = cli
            .model
            .clone()
            .or_else(|| env_var("KOMMITER_MODEL"))
            .or(file_cfg.model)
            .unwrap_or(defaults.model);

        let api_base_url = cli
            .api_base_url
            .clone()
            .or_else(|| env_var("KOMMITER_API_BASE_URL"))
            .or(file_cfg.api_base_url)
            .unwrap_or(defaults.api_base_url);

        let api_key = cli
            .api_key
            .clone()
            .or_else(|| env_var("GROQ_API_KEY"))
            .or(file_cfg.groq_api_key)
            .filter(|k| !k.is_empty());

        Ok(Config {
            host,
            port,
            model: ModelSettings {
                model,
                api_base_url,
                temperature: file_cfg.temperature.unwrap_or(defaults.temperature),
                max_tokens: file_cfg.max_tokens.unwrap_or(defaults.max_tokens),
                timeout_secs: file_cfg.timeout_secs.unwrap_or(defaults.timeout_secs),
            },
            api_key,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    /// Default model to use when not provided via CLI or env.
    pub model: Option<String>,
    pub api_base_url: Option<String>,
    pub temperature: Option<f64>,
    pub max_tokens: Option<u32>,
    pub timeout_secs: Option<u64>,
    pub groq_api_key: Option<String>,
}

/// Return `~/.config/kommiter.toml`
fn config_path() -> Option<PathBuf> {
    let home = dirs::home_dir()?;
    Some(home.join(".config").join("kommiter.toml"))
}

fn load_file_config() -> Option<FileConfig> {
    let path = config_path()?;
    if !path.exists() {
        return None;
    }

    let data = fs::read_to_string(&path).ok()?;
    match toml::from_str::<FileConfig>(&data) {
        Ok(cfg) => Some(cfg),
        Err(e) => {
            log::warn!("Ignoring invalid config file {}: {e}", path.display());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::collections::HashMap;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("kommiter").chain(args.iter().copied()))
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let cfg = Config::resolve(&cli(&[]), env_from(&[]), FileConfig::default()).unwrap();
        assert_eq!(cfg.host, "0.0.0.0");
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.model, ModelSettings::default());
        assert_eq!(cfg.api_key, None);
    }

    #[test]
    fn cli_beats_env_beats_file() {
        let file_cfg: FileConfig = toml::from_str(
            r#"
            port = 9000
            model = "file-model"
            api_base_url = "http://file"
            temperature = 0.2
            groq_api_key = "file-key"
            "#,
        )
        .unwrap();
        let env = env_from(&[
            ("KOMMITER_PORT", "9100"),
            ("KOMMITER_MODEL", "env-model"),
        ]);

        let cfg = Config::resolve(
            &cli(&["--model", "cli-model", "serve", "--host", "127.0.0.1"]),
            env,
            file_cfg,
        )
        .unwrap();

        assert_eq!(cfg.host, "127.0.0.1");
        assert_eq!(cfg.port, 9100);
        assert_eq!(cfg.model.model, "cli-model");
        assert_eq!(cfg.model.api_base_url, "http://file");
        assert_eq!(cfg.model.temperature, 0.2);
        assert_eq!(cfg.model.max_tokens, 1024);
        assert_eq!(cfg.api_key.as_deref(), Some("file-key"));
    }

    #[test]
    fn bad_port_in_env_is_an_error() {
        let err = Config::resolve(
            &cli(&[]),
            env_from(&[("KOMMITER_PORT", "eighty")]),
            FileConfig::default(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("KOMMITER_PORT"));
    }
}
