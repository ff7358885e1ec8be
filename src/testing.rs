//! Test doubles for the transport layer.
use std::sync::Mutex;

use crate::transport::{AuthKey, AuthKeyProvider, KeyDescriptor, KeyStore, TransportError, Utility};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    AddPublicKey(KeyDescriptor),
    CreateAuthKey { id: Vec<u8>, body: Vec<u8> },
    DecryptAuthKey { buffer: Vec<u8>, password: String },
    StringToBuffer { value: String, length: usize },
    BufferToString { buffer: Vec<u8>, length: usize },
    RandomBytes(usize),
}

/// Transport layer recording every call it receives.
///
/// Hex strings stand in for the real conversions; random bytes count up from zero.
#[derive(Debug, Default)]
pub(crate) struct RecordingTransport {
    calls: Mutex<Vec<Call>>,
}

impl RecordingTransport {
    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

impl KeyStore for RecordingTransport {
    fn add_public_key(&self, key: KeyDescriptor) -> Result<(), TransportError> {
        let valid = key.fingerprint.starts_with("0x");
        self.record(Call::AddPublicKey(key.clone()));

        if valid {
            Ok(())
        } else {
            Err(TransportError::InvalidKey(format!(
                "fingerprint '{}' is not hex",
                key.fingerprint
            )))
        }
    }
}

impl AuthKeyProvider for RecordingTransport {
    fn create_auth_key(&self, id: &[u8], body: &[u8]) -> Result<AuthKey, TransportError> {
        self.record(Call::CreateAuthKey {
            id: id.to_vec(),
            body: body.to_vec(),
        });

        if id.len() != 8 {
            return Err(TransportError::InvalidKey("auth key id must be 8 bytes".into()));
        }
        Ok(AuthKey::new(id.to_vec(), body.to_vec()))
    }

    fn decrypt_auth_key(&self, buffer: &[u8], password: &str) -> Result<AuthKey, TransportError> {
        self.record(Call::DecryptAuthKey {
            buffer: buffer.to_vec(),
            password: password.to_string(),
        });

        if password != "secret" {
            return Err(TransportError::Decryption("wrong password".into()));
        }
        let (id, body) = buffer.split_at(buffer.len().min(8));
        Ok(AuthKey::new(id.to_vec(), body.to_vec()))
    }
}

impl Utility for RecordingTransport {
    fn string_to_buffer(&self, value: &str, length: usize) -> Result<Vec<u8>, TransportError> {
        self.record(Call::StringToBuffer {
            value: value.to_string(),
            length,
        });

        if value.len() != length * 2 {
            return Err(TransportError::Conversion(format!(
                "expected {} hex digits",
                length * 2
            )));
        }
        (0..length)
            .map(|i| {
                u8::from_str_radix(&value[i * 2..i * 2 + 2], 16)
                    .map_err(|e| TransportError::Conversion(e.to_string()))
            })
            .collect()
    }

    fn buffer_to_string(&self, buffer: &[u8], length: usize) -> Result<String, TransportError> {
        self.record(Call::BufferToString {
            buffer: buffer.to_vec(),
            length,
        });

        Ok(buffer.iter().take(length).map(|b| format!("{b:02x}")).collect())
    }

    fn random_bytes(&self, size: usize) -> Result<Vec<u8>, TransportError> {
        self.record(Call::RandomBytes(size));
        Ok((0..size).map(|i| i as u8).collect())
    }
}
