//! Schema import and client factory over pluggable MTProto layers.
//!
//! `tlfacade` loads a flat TL schema description into two prefixed namespace trees
//! (`type` and `service`) and hands immutable snapshots of them to per-session
//! [`Client`]s. The wire protocol, cryptography and value serialization stay with the
//! externally supplied transport and schema layers, reached through the traits in
//! [`transport`] and [`schema`].
pub mod client;
pub mod facade;
pub mod schema;
pub mod transport;

#[cfg(test)]
pub(crate) mod testing;

pub use client::Client;
pub use facade::{ConstructionError, DEFAULT_PASSWORD_SIZE, Facade, FacadeBuilder, FacadeError};
pub use schema::{
    Declaration, ImportOptions, ImportedSchema, SchemaDescription, SchemaError, SchemaLayer,
    StandardSchemaLayer,
};
pub use transport::{AuthKey, KeyDescriptor, TransportError, TransportLayer};
