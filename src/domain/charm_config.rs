use anyhow::{Context, Result};
use serde::Deserialize;

pub const HTTPS_PORT: u16 = 443;

/// Charm options that decide how the terminal server is exposed.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct ServiceConfig {
    pub port: u16,
    #[serde(default = "default_tls")]
    pub tls: bool,
    #[serde(default)]
    pub dns_name: Option<String>,
    #[serde(default)]
    pub tls_cert: Option<String>,
}

fn default_tls() -> bool {
    true
}

impl ServiceConfig {
    pub fn from_yaml(raw: &str) -> Result<Self> {
        serde_yml::from_str(raw).context("decodificando configuração do serviço")
    }

    /// DNS name, ignored when blank.
    pub fn dns_name(&self) -> Option<&str> {
        self.dns_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }

    fn has_tls_cert(&self) -> bool {
        self.tls_cert.as_deref().is_some_and(|cert| !cert.is_empty())
    }

    /// Ports to open. A DNS name with TLS enabled means Let's Encrypt, which
    /// only serves on 443.
    pub fn ports(&self) -> Vec<u16> {
        if self.tls && self.dns_name().is_some() {
            vec![HTTPS_PORT]
        } else {
            vec![self.port]
        }
    }

    /// URL of the metrics endpoint.
    pub fn service_url(&self) -> String {
        let host = self.dns_name();
        let scheme = if host.is_some() || self.has_tls_cert() {
            "https"
        } else {
            "http"
        };
        format!(
            "{scheme}://{}:{}/metrics",
            host.unwrap_or("localhost"),
            self.port
        )
    }
}

/// Where the termserver image resource is stored before import.
pub fn termserver_path(limited: bool) -> &'static str {
    if limited {
        "/var/tmp/termserver-limited.tar.gz"
    } else {
        "/var/tmp/termserver.tar.gz"
    }
}
