use crate::error::{BadEnvVarSnafu, ParsePortSnafu, RegistrarResult};
use secrecy::{ExposeSecret, SecretString};
use snafu::ResultExt;
use std::sync::Arc;

const DEFAULT_SERVER_IP: &str = "127.0.0.1:8080";

fn required(name: &'static str) -> RegistrarResult<String> {
    dotenvy::var(name).context(BadEnvVarSnafu { name })
}

fn optional(name: &'static str) -> Option<String> {
    dotenvy::var(name).ok()
}

/// Only an explicit `true` (any case) turns a flag on.
fn is_enabled(flag: Option<&str>) -> bool {
    flag.is_some_and(|value| value.trim().eq_ignore_ascii_case("true"))
}

#[derive(Clone, Debug)]
pub struct RuntimeConfiguration {
    database: Arc<DatabaseConfig>,
    server_ip: String,
    secure_cookies: bool,
}

impl RuntimeConfiguration {
    pub fn new() -> RegistrarResult<Self> {
        Ok(Self {
            database: Arc::new(DatabaseConfig::from_env()?),
            server_ip: optional("REGISTRAR_SERVER_IP")
                .unwrap_or_else(|| DEFAULT_SERVER_IP.to_string()),
            secure_cookies: is_enabled(optional("REGISTRAR_SECURE_COOKIES").as_deref()),
        })
    }

    pub fn database(&self) -> Arc<DatabaseConfig> {
        self.database.clone()
    }

    pub fn server_ip(&self) -> &str {
        &self.server_ip
    }

    pub const fn secure_cookies(&self) -> bool {
        self.secure_cookies
    }
}

/// Where the Postgres holding classes and students lives. The password never shows up in `Debug`.
#[derive(Debug)]
pub struct DatabaseConfig {
    host: String,
    port: u16,
    username: String,
    password: SecretString,
    name: String,
}

impl DatabaseConfig {
    pub fn from_env() -> RegistrarResult<Self> {
        let port = required("DB_PORT")?;

        Ok(Self {
            host: required("DB_PATH")?,
            port: port.trim().parse().context(ParsePortSnafu)?,
            username: required("DB_USER")?,
            password: required("DB_PASSWORD")?.into(),
            name: required("DB_NAME")?,
        })
    }

    pub fn connection_url(&self) -> String {
        let Self {
            host,
            port,
            username,
            password,
            name,
        } = self;

        format!(
            "postgres://{username}:{}@{host}:{port}/{name}",
            password.expose_secret()
        )
    }
}
