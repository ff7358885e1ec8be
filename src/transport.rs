//! Transport layer capabilities.
//!
//! The facade never speaks the wire protocol itself. Everything that touches key
//! material, authorization keys or raw byte buffers is forwarded to an externally
//! supplied transport layer, described here as a small set of capability traits.
//!
//! # Key Components
//!
//! - [`KeyStore`]: Registry of trusted server public keys.
//! - [`AuthKeyProvider`]: Construction and decryption of [`AuthKey`] values.
//! - [`Utility`]: Buffer/string conversion and random byte generation.
//! - [`TransportLayer`]: All of the above; implemented automatically for any type
//!   providing the three capabilities.
//!
//! Implementations report failures through [`TransportError`]. The facade passes
//! these errors back to the caller untouched.
use std::error::Error;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("invalid key material: {0}")]
    InvalidKey(String),
    #[error("failed to decrypt auth key: {0}")]
    Decryption(String),
    #[error("buffer conversion failed: {0}")]
    Conversion(String),
    #[error("transport error: {0}")]
    Other(#[from] Box<dyn Error + Send + Sync>),
}

/// Server public key as published by the remote side.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyDescriptor {
    pub fingerprint: String,
    pub modulus: String,
    pub exponent: String,
}

impl KeyDescriptor {
    pub fn new(
        fingerprint: impl Into<String>,
        modulus: impl Into<String>,
        exponent: impl Into<String>,
    ) -> Self {
        Self {
            fingerprint: fingerprint.into(),
            modulus: modulus.into(),
            exponent: exponent.into(),
        }
    }
}

/// Authorization key produced by the transport layer.
///
/// Opaque to this crate: it is only ever handed back to the caller.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthKey {
    id: Vec<u8>,
    body: Vec<u8>,
}

impl AuthKey {
    pub fn new(id: Vec<u8>, body: Vec<u8>) -> Self {
        Self { id, body }
    }

    pub fn id(&self) -> &[u8] {
        &self.id
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }
}

// Key bodies stay out of logs.
impl std::fmt::Debug for AuthKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthKey")
            .field("id", &self.id)
            .field("body", &format_args!("<{} bytes>", self.body.len()))
            .finish()
    }
}

pub trait KeyStore {
    fn add_public_key(&self, key: KeyDescriptor) -> Result<(), TransportError>;
}

pub trait AuthKeyProvider {
    fn create_auth_key(&self, id: &[u8], body: &[u8]) -> Result<AuthKey, TransportError>;

    fn decrypt_auth_key(&self, buffer: &[u8], password: &str) -> Result<AuthKey, TransportError>;
}

pub trait Utility {
    fn string_to_buffer(&self, value: &str, length: usize) -> Result<Vec<u8>, TransportError>;

    fn buffer_to_string(&self, buffer: &[u8], length: usize) -> Result<String, TransportError>;

    /// Fill a buffer of `size` bytes from a secure random source.
    fn random_bytes(&self, size: usize) -> Result<Vec<u8>, TransportError>;
}

/// Full set of capabilities required from a transport layer.
pub trait TransportLayer: KeyStore + AuthKeyProvider + Utility + Send + Sync {}

impl<T> TransportLayer for T where T: KeyStore + AuthKeyProvider + Utility + Send + Sync {}
