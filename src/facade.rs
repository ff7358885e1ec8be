//! Single entry point composing the transport and schema layers.
//!
//! The [`Facade`] owns a reference to each layer and the most recently imported
//! schema. Everything else it offers is forwarded to the transport layer as is.
//!
//! # Example
//! ```rust,ignore
//! let mut facade = Facade::builder()
//!     .transport(transport)
//!     .schema_layer(Arc::new(StandardSchemaLayer::new()))
//!     .build()?;
//!
//! facade.import_schema(&SchemaDescription::from_path("schema.json")?)?;
//! let client = facade.create_client()?;
//! ```
use std::sync::Arc;

use log::{debug, info, warn};
use thiserror::Error;

use crate::{
    client::Client,
    schema::{self, ImportOptions, ImportedSchema, SchemaDescription, SchemaError, SchemaLayer},
    transport::{AuthKey, KeyDescriptor, TransportError, TransportLayer},
};

/// Size in bytes of the random buffer behind [`Facade::create_random_password`].
pub const DEFAULT_PASSWORD_SIZE: usize = 128;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConstructionError {
    #[error("no transport layer provided")]
    MissingTransport,
    #[error("no schema layer provided")]
    MissingSchemaLayer,
}

#[derive(Debug, Error)]
pub enum FacadeError {
    #[error("no schema imported yet")]
    NotInitialized,
    #[error(transparent)]
    Construction(#[from] ConstructionError),
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error(transparent)]
    Transport(#[from] TransportError),
}

pub struct Facade {
    transport: Arc<dyn TransportLayer>,
    schema_layer: Arc<dyn SchemaLayer>,
    schema: Option<Arc<ImportedSchema>>,
}

#[derive(Default)]
pub struct FacadeBuilder {
    transport: Option<Arc<dyn TransportLayer>>,
    schema_layer: Option<Arc<dyn SchemaLayer>>,
}

impl FacadeBuilder {
    pub fn transport(mut self, transport: Arc<dyn TransportLayer>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn schema_layer(mut self, schema_layer: Arc<dyn SchemaLayer>) -> Self {
        self.schema_layer = Some(schema_layer);
        self
    }

    pub fn build(self) -> Result<Facade, ConstructionError> {
        let transport = self.transport.ok_or(ConstructionError::MissingTransport)?;
        let schema_layer = self
            .schema_layer
            .ok_or(ConstructionError::MissingSchemaLayer)?;
        Ok(Facade::new(transport, schema_layer))
    }
}

impl Facade {
    pub fn new(transport: Arc<dyn TransportLayer>, schema_layer: Arc<dyn SchemaLayer>) -> Self {
        Self {
            transport,
            schema_layer,
            schema: None,
        }
    }

    pub fn builder() -> FacadeBuilder {
        FacadeBuilder::default()
    }

    pub fn transport(&self) -> &Arc<dyn TransportLayer> {
        &self.transport
    }

    pub fn schema_layer(&self) -> &Arc<dyn SchemaLayer> {
        &self.schema_layer
    }

    /// Most recently imported schema, if any.
    pub fn schema(&self) -> Option<&Arc<ImportedSchema>> {
        self.schema.as_ref()
    }

    /// Import `description` under the default `Telegram.type` / `Telegram.service` roots.
    pub fn import_schema(&mut self, description: &SchemaDescription) -> Result<(), SchemaError> {
        self.import_schema_with(description, &ImportOptions::default())
    }

    /// Import `description`, replacing the current schema entirely.
    ///
    /// On failure the previously imported schema is kept.
    pub fn import_schema_with(
        &mut self,
        description: &SchemaDescription,
        options: &ImportOptions,
    ) -> Result<(), SchemaError> {
        match schema::import(description, options, &*self.schema_layer) {
            Ok(imported) => {
                if self.schema.is_some() {
                    info!("replacing previously imported schema");
                }
                self.schema = Some(Arc::new(imported));
                Ok(())
            }
            Err(e) => {
                warn!("schema import failed: {e}");
                Err(e)
            }
        }
    }

    /// Create a client bound to the current schema.
    ///
    /// # Errors
    /// [`FacadeError::NotInitialized`] if no schema has been imported.
    pub fn create_client(&self) -> Result<Client, FacadeError> {
        let schema = self.schema.as_ref().ok_or(FacadeError::NotInitialized)?;
        debug!("creating client for '{}'", schema.service().id());

        Ok(Client::new(
            Arc::clone(schema),
            Arc::clone(&self.transport),
            Arc::clone(&self.schema_layer),
        ))
    }

    pub fn add_public_key(&self, key: KeyDescriptor) -> Result<(), TransportError> {
        debug!("adding public key {}", key.fingerprint);
        self.transport.add_public_key(key)
    }

    pub fn create_auth_key(&self, id: &[u8], body: &[u8]) -> Result<AuthKey, TransportError> {
        self.transport.create_auth_key(id, body)
    }

    pub fn decrypt_key(&self, buffer: &[u8], password: &str) -> Result<AuthKey, TransportError> {
        self.transport.decrypt_auth_key(buffer, password)
    }

    pub fn string_to_buffer(&self, value: &str, length: usize) -> Result<Vec<u8>, TransportError> {
        self.transport.string_to_buffer(value, length)
    }

    pub fn buffer_to_string(&self, buffer: &[u8], length: usize) -> Result<String, TransportError> {
        self.transport.buffer_to_string(buffer, length)
    }

    pub fn create_random_password(&self) -> Result<String, TransportError> {
        self.create_random_password_of(DEFAULT_PASSWORD_SIZE)
    }

    pub fn create_random_password_of(&self, size: usize) -> Result<String, TransportError> {
        let bytes = self.transport.random_bytes(size)?;
        self.transport.buffer_to_string(&bytes, bytes.len())
    }
}
