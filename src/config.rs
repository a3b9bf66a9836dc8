use clap::{Parser, ValueEnum};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "folio", about = "A personal portfolio server")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Host to bind to
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind to
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Path to data directory
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Where content collections live
    #[arg(long, value_enum)]
    pub backend: Option<ContentBackend>,

    /// Print a bcrypt hash for admin_password_hash and exit
    #[arg(long, value_name = "PASSWORD")]
    pub hash_password: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub storage: StorageConfig,
    pub auth: AuthConfig,
    pub content: ContentConfig,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct DatabaseConfig {
    pub path: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct StorageConfig {
    /// Uploads directory
    pub path: Option<PathBuf>,
    pub max_upload_bytes: usize,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct AuthConfig {
    pub cookie_name: String,
    pub session_hours: u64,
    pub admin_email: String,
    /// bcrypt hash. Empty disables admin login entirely.
    pub admin_password_hash: String,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ContentConfig {
    pub backend: ContentBackend,
    /// Start empty collections from the bundled sample content.
    pub seed: bool,
}

#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ContentBackend {
    /// Reset from seed on every start
    #[default]
    Memory,
    /// Persisted in the SQLite database
    Sqlite,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: None,
            max_upload_bytes: 5 * 1024 * 1024,
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            cookie_name: "folio_session".to_string(),
            session_hours: 720,
            admin_email: "admin@localhost".to_string(),
            admin_password_hash: String::new(),
        }
    }
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            backend: ContentBackend::Memory,
            seed: true,
        }
    }
}

impl Config {
    pub fn load(cli: &Cli) -> anyhow::Result<Self> {
        let data_dir = Self::data_dir(cli)?;
        let config_path = cli
            .config
            .clone()
            .unwrap_or_else(|| data_dir.join("config.toml"));

        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content)?
        } else {
            Config::default()
        };

        // CLI overrides
        if let Some(ref host) = cli.host {
            config.server.host = host.clone();
        }
        if let Some(port) = cli.port {
            config.server.port = port;
        }
        if let Some(backend) = cli.backend {
            config.content.backend = backend;
        }

        // Resolve paths relative to data dir
        if config.database.path.is_none() {
            config.database.path = Some(data_dir.join("folio.db"));
        }
        if config.storage.path.is_none() {
            config.storage.path = Some(data_dir.join("uploads"));
        }

        Ok(config)
    }

    pub fn data_dir(cli: &Cli) -> anyhow::Result<PathBuf> {
        match cli.data_dir {
            Some(ref dir) => Ok(dir.clone()),
            None => dirs::home_dir()
                .map(|home| home.join(".folio"))
                .ok_or_else(|| anyhow::anyhow!("Could not determine home directory")),
        }
    }

    pub fn db_path(&self) -> PathBuf {
        self.database
            .path
            .clone()
            .unwrap_or_else(|| PathBuf::from("folio.db"))
    }

    pub fn uploads_path(&self) -> PathBuf {
        self.storage
            .path
            .clone()
            .unwrap_or_else(|| PathBuf::from("uploads"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli_with_dir(dir: PathBuf) -> Cli {
        Cli {
            config: None,
            host: None,
            port: None,
            data_dir: Some(dir),
            backend: None,
            hash_password: None,
        }
    }

    #[test]
    fn default_config_has_expected_values() {
        let config = Config::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.auth.cookie_name, "folio_session");
        assert_eq!(config.auth.session_hours, 720);
        assert!(config.auth.admin_password_hash.is_empty());
        assert_eq!(config.content.backend, ContentBackend::Memory);
        assert!(config.content.seed);
        assert_eq!(config.storage.max_upload_bytes, 5 * 1024 * 1024);
        assert!(config.database.path.is_none());
        assert!(config.storage.path.is_none());
    }

    #[test]
    fn data_dir_uses_cli_override() {
        let cli = cli_with_dir(PathBuf::from("/tmp/test-folio"));
        assert_eq!(
            Config::data_dir(&cli).unwrap(),
            PathBuf::from("/tmp/test-folio")
        );
    }

    #[test]
    fn load_with_no_config_file_uses_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let cli = cli_with_dir(tmp.path().to_path_buf());
        let config = Config::load(&cli).unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.db_path(), tmp.path().join("folio.db"));
        assert_eq!(config.uploads_path(), tmp.path().join("uploads"));
    }

    #[test]
    fn load_applies_cli_overrides() {
        let tmp = tempfile::tempdir().unwrap();
        let mut cli = cli_with_dir(tmp.path().to_path_buf());
        cli.host = Some("127.0.0.1".to_string());
        cli.port = Some(8080);
        cli.backend = Some(ContentBackend::Sqlite);

        let config = Config::load(&cli).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.content.backend, ContentBackend::Sqlite);
    }

    #[test]
    fn load_reads_toml_file() {
        let tmp = tempfile::tempdir().unwrap();
        let config_path = tmp.path().join("config.toml");
        std::fs::write(
            &config_path,
            r#"
[server]
host = "192.168.1.1"
port = 9000

[auth]
admin_email = "me@example.com"
session_hours = 24

[content]
backend = "sqlite"
seed = false
"#,
        )
        .unwrap();

        let mut cli = cli_with_dir(tmp.path().to_path_buf());
        cli.config = Some(config_path);

        let config = Config::load(&cli).unwrap();
        assert_eq!(config.server.host, "192.168.1.1");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.auth.admin_email, "me@example.com");
        assert_eq!(config.auth.session_hours, 24);
        assert_eq!(config.auth.cookie_name, "folio_session");
        assert_eq!(config.content.backend, ContentBackend::Sqlite);
        assert!(!config.content.seed);
    }

    #[test]
    fn cli_overrides_beat_toml_values() {
        let tmp = tempfile::tempdir().unwrap();
        let config_path = tmp.path().join("config.toml");
        std::fs::write(
            &config_path,
            r#"
[server]
port = 9000

[content]
backend = "sqlite"
"#,
        )
        .unwrap();

        let mut cli = cli_with_dir(tmp.path().to_path_buf());
        cli.config = Some(config_path);
        cli.port = Some(4000);
        cli.backend = Some(ContentBackend::Memory);

        let config = Config::load(&cli).unwrap();
        assert_eq!(config.server.port, 4000);
        assert_eq!(config.content.backend, ContentBackend::Memory);
    }
}
