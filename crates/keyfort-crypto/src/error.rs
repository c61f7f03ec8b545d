//! Error types for the pairing primitive layer.

use thiserror::Error;

/// Errors reported by the pairing primitives.
///
/// These correspond to the primitive rejecting its inputs; a valid master
/// secret combined with a valid hashed identity never fails.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// A caller-supplied hashed identity did not decode to a curve point.
    #[error("hashed identity is not a valid G1 element ({len} bytes)")]
    InvalidPoint {
        /// Length of the rejected encoding
        len: usize,
    },

    /// Stored master secret bytes are not a canonical scalar encoding.
    #[error("master secret bytes are not a canonical scalar")]
    InvalidScalar,
}
