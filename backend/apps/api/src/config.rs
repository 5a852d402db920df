//! Server configuration

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use anyhow::Context;
use axum::http::HeaderValue;
use platform::env::{env_list, env_parse, env_string};

const DEFAULT_PORT: u16 = 31113;
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:3000";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    pub database_url: String,
    pub database_max_connections: u32,
    pub frontend_origins: Vec<String>,
}

impl ServerConfig {
    /// `DATABASE_URL` is required; everything else has a default.
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url =
            env_string("DATABASE_URL").context("DATABASE_URL must be set in environment")?;

        let mut frontend_origins = env_list("FRONTEND_ORIGINS");
        if frontend_origins.is_empty() {
            frontend_origins = DEFAULT_ORIGINS.split(',').map(str::to_string).collect();
        }

        Ok(Self {
            host: env_parse("HOST").unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED)),
            port: env_parse("PORT").unwrap_or(DEFAULT_PORT),
            database_url,
            database_max_connections: env_parse("DATABASE_MAX_CONNECTIONS")
                .unwrap_or(DEFAULT_MAX_CONNECTIONS),
            frontend_origins,
        })
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Origins that parse as header values
    pub fn allowed_origins(&self) -> Vec<HeaderValue> {
        self.frontend_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect()
    }
}
