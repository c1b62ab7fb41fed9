use crate::domain::ContainerRuntime;
use crate::infra::lxc_adapter::BRIDGE_NETWORK;
use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// Daemon initialization and image management
pub struct LxdSetup {
    runtime: Arc<dyn ContainerRuntime>,
}

impl LxdSetup {
    pub fn new(runtime: Arc<dyn ContainerRuntime>) -> Self {
        Self { runtime }
    }

    /// Initializes LXD unless its bridge network already exists, then waits
    /// for the daemon.
    pub fn setup_lxd(&self) -> Result<()> {
        let networks = self.runtime.list_networks()?;
        if networks.iter().any(|n| n == BRIDGE_NETWORK) {
            debug!("rede {BRIDGE_NETWORK} encontrada, LXD já inicializado");
        } else {
            info!(" Inicializando LXD...");
            self.runtime.init()?;
        }
        info!(" Aguardando LXD...");
        self.runtime.wait_ready()
    }

    /// Makes `alias` point at the image stored at `path`, importing it only
    /// when no local image has the same fingerprint.
    pub fn import_lxd_image(&self, alias: &str, path: &Path) -> Result<()> {
        let fingerprint = fingerprint(path)?;
        let images = self.runtime.list_images()?;

        if let Some(image) = images.iter().find(|i| i.fingerprint == fingerprint) {
            if image.has_alias(alias) {
                info!(" Imagem {alias} já importada");
            } else {
                info!(" Imagem já importada, criando alias {alias}");
                self.runtime.add_image_alias(alias, &fingerprint)?;
            }
            return Ok(());
        }

        if images.iter().any(|i| i.has_alias(alias)) {
            info!(" Alias {alias} aponta para outra imagem, removendo");
            self.runtime.delete_image_alias(alias)?;
        }

        info!(" Importando imagem {alias} de {:?}", path);
        self.runtime.import_image(path)?;
        self.runtime.add_image_alias(alias, &fingerprint)
    }
}

/// LXD fingerprint of an image tarball: the SHA-256 of its content.
pub fn fingerprint(path: &Path) -> Result<String> {
    let data = fs::read(path).with_context(|| format!("lendo imagem {:?}", path))?;
    Ok(format!("{:x}", Sha256::digest(&data)))
}
