use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub admin: AdminConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub path: String,
}

/// Admin credentials.
///
/// `password_hash` (argon2 PHC string) wins over `password` when both are set.
#[derive(Debug, Deserialize, Clone)]
pub struct AdminConfig {
    pub email: String,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub password_hash: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    #[serde(default)]
    pub jwt_secret: Option<String>,
    #[serde(default = "default_token_lifetime_hours")]
    pub token_lifetime_hours: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: None,
            token_lifetime_hours: default_token_lifetime_hours(),
        }
    }
}

fn default_token_lifetime_hours() -> i64 {
    12
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    pub upload_dir: String,
    #[serde(default = "default_public_path")]
    pub public_path: String,
}

fn default_public_path() -> String {
    "/uploads".into()
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub dir: String,
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            dir: "target/logs".into(),
            filter: "info,sqlx=warn,sea_orm=warn".into(),
        }
    }
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[server]
host = "0.0.0.0"
port = 3000

[database]
path = "target/db/storefront.db"

[admin]
email = "admin@storefront.local"
password = "change-me"

[auth]
token_lifetime_hours = 12

[storage]
upload_dir = "target/uploads"
public_path = "/uploads"

[logging]
dir = "target/logs"
filter = "info,sqlx=warn,sea_orm=warn"
"#;

/// Where the active configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    Embedded,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::File(path) => write!(f, "{}", path.display()),
            ConfigSource::Embedded => write!(f, "embedded defaults"),
        }
    }
}

/// Load configuration from config.toml file
///
/// Search order:
/// 1. `STOREFRONT_CONFIG` environment variable
/// 2. Next to the executable (for production)
/// 3. Current working directory (development)
/// 4. Falls back to embedded default config
///
/// Environment overrides are applied on top of whichever file was used.
/// Runs before logging is set up, so the caller reports the returned source.
pub fn load_config() -> anyhow::Result<(Config, ConfigSource)> {
    let mut candidates = Vec::new();
    if let Ok(path) = std::env::var("STOREFRONT_CONFIG") {
        candidates.push(PathBuf::from(path));
    }
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.push(exe_dir.join("config.toml"));
        }
    }
    candidates.push(PathBuf::from("config.toml"));

    let (mut config, source) = load_first(&candidates)?;
    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    Ok((config, source))
}

fn load_first(candidates: &[PathBuf]) -> anyhow::Result<(Config, ConfigSource)> {
    match candidates.iter().find(|p| p.exists()) {
        Some(path) => {
            let contents = std::fs::read_to_string(path)?;
            Ok((parse_config(&contents)?, ConfigSource::File(path.clone())))
        }
        None => Ok((default_config()?, ConfigSource::Embedded)),
    }
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    Ok(toml::from_str(contents)?)
}

/// Embedded defaults, used by tests and as the last fallback
pub fn default_config() -> anyhow::Result<Config> {
    parse_config(DEFAULT_CONFIG)
}

/// `ADMIN_EMAIL`, `ADMIN_PASSWORD`, `JWT_SECRET`, `DATABASE_PATH`
fn apply_env_overrides(config: &mut Config, get: impl Fn(&str) -> Option<String>) {
    if let Some(email) = get("ADMIN_EMAIL").filter(|v| !v.trim().is_empty()) {
        config.admin.email = email;
    }
    if let Some(password) = get("ADMIN_PASSWORD").filter(|v| !v.is_empty()) {
        config.admin.password = Some(password);
        config.admin.password_hash = None;
    }
    if let Some(secret) = get("JWT_SECRET").filter(|v| !v.is_empty()) {
        config.auth.jwt_secret = Some(secret);
    }
    if let Some(path) = get("DATABASE_PATH").filter(|v| !v.trim().is_empty()) {
        config.database.path = path;
    }
}

/// Resolve a configured path.
/// Relative paths are taken relative to the working directory.
pub fn resolve_path(path: &str) -> anyhow::Result<PathBuf> {
    let p = Path::new(path);
    if p.is_absolute() {
        return Ok(p.to_path_buf());
    }
    Ok(std::env::current_dir()?.join(p))
}
