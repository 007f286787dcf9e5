use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;

/// Default MIME allow-list for uploads.
pub const DEFAULT_UPLOAD_MIME_TYPES: &[&str] = &[
    "image/jpeg", "image/jpg", "image/png", "image/webp", "image/gif",
    "video/mp4", "video/webm", "video/mov",
];

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub uploads: UploadConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 8080, worker_threads: Some(4) }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
    #[serde(default = "default_max_lifetime")]
    pub max_lifetime_secs: u64,
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
    #[serde(default)]
    pub sqlx_logging: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_secs: default_connect_timeout(),
            idle_timeout_secs: default_idle_timeout(),
            max_lifetime_secs: default_max_lifetime(),
            acquire_timeout_secs: default_acquire_timeout(),
            sqlx_logging: false,
        }
    }
}

fn default_max_connections() -> u32 { 10 }
fn default_min_connections() -> u32 { 2 }
fn default_connect_timeout() -> u64 { 30 }
fn default_idle_timeout() -> u64 { 600 }
fn default_max_lifetime() -> u64 { 3600 }
fn default_acquire_timeout() -> u64 { 30 }

/// Admin authentication settings.
///
/// `jwt_secret` left empty means a random secret is generated per process.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub jwt_secret: Option<String>,
    #[serde(default = "default_token_ttl")]
    pub token_ttl_secs: u64,
    #[serde(default)]
    pub admin_username: Option<String>,
    #[serde(default)]
    pub admin_password: Option<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self { jwt_secret: None, token_ttl_secs: default_token_ttl(), admin_username: None, admin_password: None }
    }
}

fn default_token_ttl() -> u64 { 12 * 60 * 60 }

#[derive(Debug, Clone, Deserialize)]
pub struct UploadConfig {
    #[serde(default = "default_upload_dir")]
    pub dir: String,
    #[serde(default = "default_public_prefix")]
    pub public_prefix: String,
    #[serde(default = "default_upload_max_bytes")]
    pub max_bytes: usize,
    #[serde(default = "default_allowed_mime_types")]
    pub allowed_mime_types: Vec<String>,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            dir: default_upload_dir(),
            public_prefix: default_public_prefix(),
            max_bytes: default_upload_max_bytes(),
            allowed_mime_types: default_allowed_mime_types(),
        }
    }
}

fn default_upload_dir() -> String { "public/uploads".into() }
fn default_public_prefix() -> String { "/uploads".into() }
fn default_upload_max_bytes() -> usize { 10 * 1024 * 1024 }
fn default_allowed_mime_types() -> Vec<String> {
    DEFAULT_UPLOAD_MIME_TYPES.iter().map(|s| s.to_string()).collect()
}

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let cfg: AppConfig = toml::from_str(&content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Load `config.toml` (or `CONFIG_PATH`), falling back to defaults when the
    /// file is missing, then apply environment overrides and validate.
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = match load_default() {
            Ok(cfg) => cfg,
            Err(e) if is_not_found(&e) => AppConfig::default(),
            Err(e) => return Err(e),
        };
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize_from_env();
        self.server.normalize()?;
        self.database.normalize_from_env();
        self.database.validate()?;
        self.auth.normalize_from_env();
        self.auth.validate()?;
        self.uploads.normalize_from_env();
        self.uploads.validate()?;
        Ok(())
    }
}

fn is_not_found(e: &anyhow::Error) -> bool {
    e.downcast_ref::<std::io::Error>()
        .map(|io| io.kind() == std::io::ErrorKind::NotFound)
        .unwrap_or(false)
}

fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

impl ServerConfig {
    fn normalize_from_env(&mut self) {
        if let Some(host) = env_non_empty("SERVER_HOST") { self.host = host; }
        if let Some(port) = env_non_empty("SERVER_PORT").and_then(|p| p.parse::<u16>().ok()) { self.port = port; }
        if let Some(w) = env_non_empty("TOKIO_WORKER_THREADS").and_then(|v| v.parse::<usize>().ok()) {
            self.worker_threads = Some(w);
        }
    }

    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be within 1..=65535"));
        }
        match self.worker_threads {
            Some(0) | None => self.worker_threads = Some(4),
            Some(_) => {}
        }
        Ok(())
    }
}

impl DatabaseConfig {
    pub fn normalize_from_env(&mut self) {
        // DATABASE_URL only fills in when the TOML leaves the URL empty
        if self.url.trim().is_empty() {
            if let Ok(url) = std::env::var("DATABASE_URL") {
                self.url = url;
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(anyhow!("database.url is empty; set it in config.toml or DATABASE_URL"));
        }
        let lower = self.url.to_lowercase();
        if !(lower.starts_with("postgresql://") || lower.starts_with("postgres://") || lower.starts_with("sqlite:")) {
            return Err(anyhow!("database.url must start with postgres://, postgresql:// or sqlite:"));
        }
        if self.min_connections == 0 {
            return Err(anyhow!("database.min_connections must be >= 1"));
        }
        if self.max_connections < self.min_connections {
            return Err(anyhow!("database.max_connections must be >= min_connections"));
        }
        if self.connect_timeout_secs == 0 || self.acquire_timeout_secs == 0 {
            return Err(anyhow!("database timeouts must be positive seconds"));
        }
        Ok(())
    }
}

impl AuthConfig {
    pub fn normalize_from_env(&mut self) {
        if let Some(secret) = env_non_empty("JWT_SECRET") { self.jwt_secret = Some(secret); }
        if let Some(ttl) = env_non_empty("TOKEN_TTL_SECS").and_then(|v| v.parse::<u64>().ok()) { self.token_ttl_secs = ttl; }
        if let Some(user) = env_non_empty("ADMIN_USERNAME") { self.admin_username = Some(user); }
        if let Some(pass) = env_non_empty("ADMIN_PASSWORD") { self.admin_password = Some(pass); }
        if self.jwt_secret.as_deref().map(str::trim) == Some("") { self.jwt_secret = None; }
    }

    pub fn validate(&self) -> Result<()> {
        if self.token_ttl_secs == 0 {
            return Err(anyhow!("auth.token_ttl_secs must be > 0"));
        }
        if let Some(secret) = &self.jwt_secret {
            if secret.len() < 16 {
                return Err(anyhow!("auth.jwt_secret must be at least 16 bytes"));
            }
        }
        if self.admin_username.is_some() != self.admin_password.is_some() {
            return Err(anyhow!("auth.admin_username and auth.admin_password must be set together"));
        }
        Ok(())
    }
}

impl UploadConfig {
    pub fn normalize_from_env(&mut self) {
        if let Some(dir) = env_non_empty("UPLOAD_DIR") { self.dir = dir; }
        if let Some(max) = env_non_empty("UPLOAD_MAX_BYTES").and_then(|v| v.parse::<usize>().ok()) { self.max_bytes = max; }
        if !self.public_prefix.starts_with('/') {
            self.public_prefix = format!("/{}", self.public_prefix);
        }
        while self.public_prefix.len() > 1 && self.public_prefix.ends_with('/') {
            self.public_prefix.pop();
        }
        for m in self.allowed_mime_types.iter_mut() {
            *m = m.trim().to_ascii_lowercase();
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.dir.trim().is_empty() {
            return Err(anyhow!("uploads.dir must not be empty"));
        }
        if self.max_bytes == 0 {
            return Err(anyhow!("uploads.max_bytes must be > 0"));
        }
        if self.allowed_mime_types.is_empty() {
            return Err(anyhow!("uploads.allowed_mime_types must not be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_partial_toml_with_defaults() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [server]
            host = "0.0.0.0"
            port = 9000

            [database]
            url = "sqlite::memory:"

            [uploads]
            max_bytes = 1024
            "#,
        )
        .expect("parse");
        assert_eq!(cfg.server.port, 9000);
        assert_eq!(cfg.database.max_connections, 10);
        assert_eq!(cfg.uploads.max_bytes, 1024);
        assert_eq!(cfg.uploads.public_prefix, "/uploads");
        assert!(cfg.uploads.allowed_mime_types.iter().any(|m| m == "image/png"));
        assert_eq!(cfg.auth.token_ttl_secs, 12 * 60 * 60);
    }

    #[test]
    fn database_url_scheme_is_checked() {
        let mut db = DatabaseConfig { url: "mysql://localhost/x".into(), ..Default::default() };
        assert!(db.validate().is_err());
        db.url = "postgres://u:p@localhost/site".into();
        assert!(db.validate().is_ok());
        db.url = "sqlite://data/site.db?mode=rwc".into();
        assert!(db.validate().is_ok());
    }

    #[test]
    fn admin_credentials_must_come_in_pairs() {
        let auth = AuthConfig { admin_username: Some("admin".into()), ..Default::default() };
        assert!(auth.validate().is_err());
        let auth = AuthConfig {
            admin_username: Some("admin".into()),
            admin_password: Some("correct horse".into()),
            ..Default::default()
        };
        assert!(auth.validate().is_ok());
    }

    #[test]
    fn short_jwt_secret_is_rejected() {
        let auth = AuthConfig { jwt_secret: Some("short".into()), ..Default::default() };
        assert!(auth.validate().is_err());
    }

    #[test]
    fn missing_config_file_is_not_found() {
        let path = std::env::temp_dir().join(format!("missing-{}.toml", uuid::Uuid::new_v4()));
        let err = load_from_file(path.to_str().unwrap()).unwrap_err();
        assert!(is_not_found(&err));
    }
}
