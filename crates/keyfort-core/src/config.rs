//! Configuration surface consumed by the outer layer.
//!
//! The core does not parse config files or CLI flags; it receives a typed
//! [`Config`] and builds the selected backends from it. Each concern is one
//! small capability set: where the master secret lives, and which signature
//! scheme gates requests.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::{
    authority::TrustAuthority,
    error::InitError,
    registry::RelyingPartyRegistry,
    service::TrustService,
    signature::{AesCfbScheme, SignatureScheme},
    storage::{FileMasterSecretStore, MasterSecretStore, MemoryMasterSecretStore},
};

/// Default random seed, matching the seed the original deployment shipped
/// with so an unconfigured dev instance reproduces its key material.
const DEFAULT_SEED: &str = "3b6c64666d6e766a6a666579346f38793772766264666f6f6665";

/// Master secret storage backend selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StorageKind {
    /// Ephemeral in-memory store; lost on restart.
    #[default]
    Memory,
    /// Durable plain-text file store.
    PlainTextFile,
}

/// Request signature scheme selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VerifierKind {
    /// AES-128-CFB with a leading IV block.
    #[default]
    AesCfb,
}

/// Typed authority configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where the master secret is persisted.
    pub storage: StorageKind,
    /// Which signature scheme gates issuance requests.
    pub verifier: VerifierKind,
    /// Hex seed for the deterministic random generator.
    pub seed_hex: String,
    /// Directory for the file-backed store; `None` resolves the
    /// `KEYFORT_HOME` environment variable.
    pub home_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage: StorageKind::default(),
            verifier: VerifierKind::default(),
            seed_hex: DEFAULT_SEED.to_owned(),
            home_dir: None,
        }
    }
}

impl Config {
    /// Build the configured master secret store.
    pub fn build_secret_store(&self) -> Box<dyn MasterSecretStore> {
        match self.storage {
            StorageKind::Memory => Box::new(MemoryMasterSecretStore::new()),
            StorageKind::PlainTextFile => match &self.home_dir {
                Some(dir) => Box::new(FileMasterSecretStore::with_directory(dir)),
                None => Box::new(FileMasterSecretStore::new()),
            },
        }
    }

    /// Build the configured signature scheme.
    pub fn build_signature_scheme(&self) -> Box<dyn SignatureScheme> {
        match self.verifier {
            VerifierKind::AesCfb => Box::new(AesCfbScheme::new()),
        }
    }

    /// Assemble a ready [`TrustService`] from this configuration.
    ///
    /// This is the startup path: a bad seed or an unreadable secret store
    /// surfaces here, before the process begins serving.
    ///
    /// # Errors
    ///
    /// [`InitError`] for a malformed seed, a storage failure, or unusable
    /// stored secret bytes.
    pub fn build_service(&self) -> Result<TrustService, InitError> {
        let store = self.build_secret_store();
        let authority = TrustAuthority::init(&self.seed_hex, store.as_ref())?;
        Ok(TrustService::new(authority, RelyingPartyRegistry::new(), self.build_signature_scheme()))
    }
}
