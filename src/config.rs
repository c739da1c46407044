//! Process configuration.
//!
//! Every flag can also be supplied through an `HNOTE_*` environment variable.
//! Flags take precedence over the environment.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_TLS_PORT: u16 = 443;
const DEFAULT_PLAINTEXT_PORT: u16 = 8080;
const DEFAULT_CERT_FILE: &str = "cert.pem";
const DEFAULT_KEY_FILE: &str = "key.pem";

#[derive(Debug, Default, Parser)]
#[command(name = "hnote")]
#[command(about = "Minimal note-taking HTTP API")]
pub struct Cli {
    /// Address to listen on (HNOTE_HOST)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on (HNOTE_PORT); 443 with TLS, 8080 without
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Path of the note database (HNOTE_DATABASE)
    #[arg(short, long)]
    pub database: Option<PathBuf>,

    /// TLS certificate in PEM format (HNOTE_CERT)
    #[arg(long)]
    pub cert: Option<PathBuf>,

    /// TLS private key in PEM format (HNOTE_KEY)
    #[arg(long)]
    pub key: Option<PathBuf>,

    /// Serve plain HTTP instead of TLS (HNOTE_PLAINTEXT)
    #[arg(long)]
    pub plaintext: bool,
}

/// Certificate and key read once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlsConfig {
    pub cert: PathBuf,
    pub key: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    /// `None` selects the platform data directory.
    pub database: Option<PathBuf>,
    /// `None` means plain HTTP.
    pub tls: Option<TlsConfig>,
}

impl ServerConfig {
    /// Resolve the configuration from parsed flags and the process environment.
    pub fn from_cli(cli: Cli) -> anyhow::Result<Self> {
        Self::resolve(cli, |key| std::env::var(key).ok())
    }

    fn resolve(cli: Cli, env: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let plaintext = cli.plaintext
            || env("HNOTE_PLAINTEXT")
                .map(|v| matches!(v.trim(), "1" | "true" | "yes"))
                .unwrap_or(false);

        let host = cli
            .host
            .or_else(|| env("HNOTE_HOST"))
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match cli.port {
            Some(port) => port,
            None => match env("HNOTE_PORT") {
                Some(raw) => raw
                    .trim()
                    .parse()
                    .with_context(|| format!("HNOTE_PORT is not a valid port: {raw}"))?,
                None if plaintext => DEFAULT_PLAINTEXT_PORT,
                None => DEFAULT_TLS_PORT,
            },
        };

        let addr = format!("{host}:{port}")
            .parse()
            .with_context(|| format!("invalid listen address {host}:{port}"))?;

        let database = cli.database.or_else(|| env("HNOTE_DATABASE").map(PathBuf::from));

        let tls = if plaintext {
            None
        } else {
            Some(TlsConfig {
                cert: cli
                    .cert
                    .or_else(|| env("HNOTE_CERT").map(PathBuf::from))
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_CERT_FILE)),
                key: cli
                    .key
                    .or_else(|| env("HNOTE_KEY").map(PathBuf::from))
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_KEY_FILE)),
            })
        };

        Ok(Self {
            addr,
            database,
            tls,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn resolve(cli: Cli, vars: &[(&str, &str)]) -> anyhow::Result<ServerConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::resolve(cli, |key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_to_tls_on_443() {
        let config = resolve(Cli::default(), &[]).unwrap();
        assert_eq!(config.addr, "0.0.0.0:443".parse().unwrap());
        assert_eq!(
            config.tls,
            Some(TlsConfig {
                cert: PathBuf::from("cert.pem"),
                key: PathBuf::from("key.pem"),
            })
        );
        assert!(config.database.is_none());
    }

    #[test]
    fn plaintext_defaults_to_8080_without_tls() {
        let cli = Cli {
            plaintext: true,
            ..Cli::default()
        };
        let config = resolve(cli, &[]).unwrap();
        assert_eq!(config.addr.port(), 8080);
        assert!(config.tls.is_none());
    }

    #[test]
    fn environment_fills_missing_flags() {
        let config = resolve(
            Cli::default(),
            &[
                ("HNOTE_PLAINTEXT", "true"),
                ("HNOTE_HOST", "127.0.0.1"),
                ("HNOTE_PORT", "9000"),
                ("HNOTE_DATABASE", "/tmp/hnote.db"),
            ],
        )
        .unwrap();
        assert_eq!(config.addr, "127.0.0.1:9000".parse().unwrap());
        assert_eq!(config.database, Some(PathBuf::from("/tmp/hnote.db")));
        assert!(config.tls.is_none());
    }

    #[test]
    fn flags_override_environment() {
        let cli = Cli {
            port: Some(7000),
            cert: Some(PathBuf::from("/etc/hnote/cert.pem")),
            ..Cli::default()
        };
        let config = resolve(cli, &[("HNOTE_PORT", "9000"), ("HNOTE_CERT", "env.pem")]).unwrap();
        assert_eq!(config.addr.port(), 7000);
        assert_eq!(
            config.tls.map(|tls| tls.cert),
            Some(PathBuf::from("/etc/hnote/cert.pem"))
        );
    }

    #[test]
    fn rejects_invalid_port() {
        assert!(resolve(Cli::default(), &[("HNOTE_PORT", "not-a-port")]).is_err());
    }

    #[test]
    fn parses_flags() {
        let cli = Cli::parse_from(["hnote", "--plaintext", "--port", "3000", "-d", "notes.db"]);
        assert!(cli.plaintext);
        assert_eq!(cli.port, Some(3000));
        assert_eq!(cli.database, Some(PathBuf::from("notes.db")));
    }
}
