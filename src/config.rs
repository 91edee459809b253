use anyhow::{Result, bail};
use clap::Parser;
use serde::Deserialize;
use serde_yaml;
use std::env;
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "bookmarks")]
#[command(about = "Runs the bookmarks service", long_about = None)]
pub struct Cli {
    #[arg(short = 'c', long = "config")]
    pub config_path: Option<String>,
}

pub fn default_config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".bookmarks")
}

pub fn default_config_path() -> PathBuf {
    default_config_dir().join("config.yaml")
}

/// Used when no config file is given and none exists at the default path.
/// Everything comes from the environment (or a `.env` file).
const ENV_TEMPLATE: &str = r#"
app:
  port: ${PORT:-8000}
  environment: ${APP_ENV:-development}
  api_token: "${API_TOKEN:-}"
database:
  path: "${DATABASE:-bookmarks.db}"
  url: "${DATABASE_URL:-}"
  auth_token: "${DATABASE_AUTH_TOKEN:-}"
"#;

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Test,
    Production,
}

impl Environment {
    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct App {
    port: u16,
    #[serde(default)]
    pub environment: Environment,
    api_token: String,
    #[serde(default)]
    expose_internal_errors: Option<bool>,
}

impl App {
    pub fn get_port(&self) -> u16 {
        self.port
    }

    pub fn get_api_token(&self) -> &str {
        &self.api_token
    }

    /// Internal error detail is shown everywhere except production unless
    /// the config says otherwise.
    pub fn expose_internal_errors(&self) -> bool {
        self.expose_internal_errors
            .unwrap_or(!self.environment.is_production())
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct Storage {
    #[serde(default = "default_database_path")]
    pub path: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub auth_token: Option<String>,
}

fn default_database_path() -> String {
    "bookmarks.db".to_string()
}

impl Storage {
    /// Returns the url and token of a remote libsql server, if both are set.
    pub fn remote(&self) -> Option<(&str, &str)> {
        match (self.url.as_deref(), self.auth_token.as_deref()) {
            (Some(url), Some(token)) if !url.is_empty() && !token.is_empty() => Some((url, token)),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub app: App,
    #[serde(default)]
    pub database: Storage,
}

impl Config {
    pub fn new(path: &str) -> Result<Self> {
        let yaml_str = fs::read_to_string(path)?;
        Config::parse(&yaml_str)
    }

    pub fn from_env() -> Result<Self> {
        Config::parse(ENV_TEMPLATE)
    }

    pub fn parse(yaml_str: &str) -> Result<Self> {
        Config::parse_with(yaml_str, |name| env::var(name).ok())
    }

    fn parse_with(yaml_str: &str, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let yaml_with_env = Config::substitute_vars(yaml_str, lookup)?;
        let config: Config = serde_yaml::from_str(&yaml_with_env)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.app.api_token.trim().is_empty() {
            bail!("app.api_token must be set (API_TOKEN)");
        }
        Ok(())
    }

    /// Replaces `${VAR}` and `${VAR:-default}`. A value landing inside a
    /// quoted scalar is escaped for that quoting style so it reads back
    /// unchanged.
    fn substitute_vars(yaml_str: &str, lookup: impl Fn(&str) -> Option<String>) -> Result<String> {
        let mut result = yaml_str.to_string();
        let mut offset = 0;

        while let Some(start) = result[offset..].find("${") {
            let actual_start = offset + start;
            if let Some(end) = result[actual_start..].find("}") {
                let var_name = &result[actual_start + 2..actual_start + end];

                // ${VAR:-default}
                let raw_value = if let Some(default_start) = var_name.find(":-") {
                    let actual_var = &var_name[..default_start];
                    let default_val = &var_name[default_start + 2..];
                    lookup(actual_var).unwrap_or_else(|| default_val.to_string())
                } else {
                    lookup(var_name).unwrap_or_else(|| {
                        eprintln!("Warning: Environment variable '{}' not found", var_name);
                        String::new()
                    })
                };

                let env_value = match result[..actual_start].chars().next_back() {
                    Some('"') => escape_double_quoted(&raw_value),
                    Some('\'') => raw_value.replace('\'', "''"),
                    _ => raw_value,
                };

                result.replace_range(actual_start..actual_start + end + 1, &env_value);
                offset = actual_start + env_value.len();
            } else {
                break;
            }
        }

        Ok(result)
    }
}

fn escape_double_quoted(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out
}
