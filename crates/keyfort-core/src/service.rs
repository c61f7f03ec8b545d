//! Authenticated-request pipeline.
//!
//! Every issuance endpoint runs the same sequence: check parameters, decode
//! the signature, resolve the relying party, verify the signature over the
//! application id, then dispatch to the requested issuance operation. The
//! pipeline is factored here once and parameterized by [`IssuanceRequest`]
//! instead of being restated per endpoint.

use base64::{Engine, engine::general_purpose::URL_SAFE};

use crate::{
    authority::TrustAuthority,
    error::{AuthenticationError, ServiceError},
    registry::{RelyingParty, RelyingPartyRegistry},
    signature::SignatureScheme,
};

/// Which artifact an authenticated request asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssuanceRequest {
    /// The identity-independent server secret.
    ServerSecret,
    /// A client secret for one identity.
    ClientSecret {
        /// The client identity to derive for
        client_id: String,
    },
    /// A time permit for one identity, bound to the current epoch day.
    TimePermit {
        /// The client identity to derive for
        client_id: String,
    },
}

impl IssuanceRequest {
    fn client_id(&self) -> Option<&str> {
        match self {
            Self::ServerSecret => None,
            Self::ClientSecret { client_id } | Self::TimePermit { client_id } => Some(client_id),
        }
    }
}

/// The contract surface the outer request layer consumes.
///
/// Owns the authority, the relying-party registry, and the configured
/// signature scheme as one explicit service object; handlers share it by
/// reference. Construct it once via [`crate::Config::build_service`] or
/// [`TrustService::new`].
pub struct TrustService {
    authority: TrustAuthority,
    registry: RelyingPartyRegistry,
    scheme: Box<dyn SignatureScheme>,
}

impl TrustService {
    /// Assemble a service from its parts.
    pub fn new(
        authority: TrustAuthority,
        registry: RelyingPartyRegistry,
        scheme: Box<dyn SignatureScheme>,
    ) -> Self {
        Self { authority, registry, scheme }
    }

    /// Run one authenticated issuance request.
    ///
    /// `signature_b64` is the base64url-encoded signature over `app_id`
    /// under the application's registered key. On any authentication
    /// failure the issuance operation is never invoked.
    ///
    /// # Errors
    ///
    /// - [`ServiceError::Authentication`] for missing parameters, a
    ///   malformed signature encoding, an unknown application id, or a
    ///   signature mismatch
    /// - [`ServiceError::Crypto`] when the pairing primitive rejects the
    ///   issuance inputs
    pub fn handle_issuance(
        &self,
        app_id: &str,
        signature_b64: &str,
        request: IssuanceRequest,
    ) -> Result<Vec<u8>, ServiceError> {
        if app_id.is_empty() {
            return Err(AuthenticationError::MissingParameter { name: "app_id" }.into());
        }
        if request.client_id().is_some_and(str::is_empty) {
            return Err(AuthenticationError::MissingParameter { name: "client_id" }.into());
        }
        if signature_b64.is_empty() {
            return Err(AuthenticationError::MissingParameter { name: "signature" }.into());
        }

        let signature = URL_SAFE
            .decode(signature_b64)
            .map_err(|_| AuthenticationError::MalformedSignature)?;

        let app = self.registry.get(app_id);
        if !app.is_registered() {
            tracing::warn!(app_id = %app_id, "issuance request for unknown application");
            return Err(
                AuthenticationError::UnknownApplication { app_id: app_id.to_owned() }.into()
            );
        }

        if !self.scheme.verify_signature(&signature, &app.key, app_id) {
            tracing::warn!(app_id = %app_id, "signature verification failed");
            return Err(AuthenticationError::SignatureMismatch.into());
        }

        let artifact = match &request {
            IssuanceRequest::ServerSecret => self.authority.issue_server_secret()?,
            IssuanceRequest::ClientSecret { client_id } => {
                let hashed = keyfort_crypto::hash_identity(client_id);
                self.authority.issue_client_secret(&hashed)?
            },
            IssuanceRequest::TimePermit { client_id } => {
                let hashed = keyfort_crypto::hash_identity(client_id);
                self.authority.issue_time_permit(&hashed)?
            },
        };

        Ok(artifact)
    }

    /// Register a relying-party application and mint its key.
    ///
    /// # Errors
    ///
    /// [`AuthenticationError::MissingParameter`] when the id is empty or
    /// blank — a malformed registration is rejected, never inserted as a
    /// default-valued record.
    pub fn register_rpa(&self, app_id: &str) -> Result<RelyingParty, AuthenticationError> {
        if app_id.trim().is_empty() {
            return Err(AuthenticationError::MissingParameter { name: "app_id" });
        }
        Ok(self.registry.register(app_id))
    }

    /// The registered record for `app_id`; empty key when unknown.
    pub fn rpa(&self, app_id: &str) -> RelyingParty {
        self.registry.get(app_id)
    }

    /// Snapshot of all registered applications.
    pub fn rpas(&self) -> Vec<RelyingParty> {
        self.registry.list()
    }

    /// Delete a registration; a no-op when absent.
    pub fn delete_rpa(&self, app_id: &str) {
        self.registry.delete(app_id);
    }

    /// Verify a raw (already decoded) signature against a key.
    ///
    /// Exposed for outer layers that transport signatures in another
    /// encoding.
    pub fn verify_signature(&self, signature: &[u8], key: &[u8], expected: &str) -> bool {
        self.scheme.verify_signature(signature, key, expected)
    }
}

impl std::fmt::Debug for TrustService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrustService").field("registry", &self.registry).finish_non_exhaustive()
    }
}
