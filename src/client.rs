//! Session-scoped client handles.
//!
//! A [`Client`] is bound to the schema that was current when it was created. Later
//! imports on the facade swap the facade's schema for a new one but never touch a
//! client that already exists.
use std::sync::Arc;

use crate::{
    schema::{ImportedSchema, MethodDef, SchemaLayer, TypeDef},
    transport::TransportLayer,
};

#[derive(Clone)]
pub struct Client {
    schema: Arc<ImportedSchema>,
    transport: Arc<dyn TransportLayer>,
    schema_layer: Arc<dyn SchemaLayer>,
}

impl Client {
    pub(crate) fn new(
        schema: Arc<ImportedSchema>,
        transport: Arc<dyn TransportLayer>,
        schema_layer: Arc<dyn SchemaLayer>,
    ) -> Self {
        Self {
            schema,
            transport,
            schema_layer,
        }
    }

    pub fn schema(&self) -> &Arc<ImportedSchema> {
        &self.schema
    }

    pub fn transport(&self) -> &Arc<dyn TransportLayer> {
        &self.transport
    }

    pub fn schema_layer(&self) -> &Arc<dyn SchemaLayer> {
        &self.schema_layer
    }

    /// Type under the dotted `path` of this client's type namespace.
    pub fn type_def(&self, path: &str) -> Option<&TypeDef> {
        self.schema.type_def(path)
    }

    /// Method under the dotted `path` of this client's service namespace.
    pub fn method(&self, path: &str) -> Option<&MethodDef> {
        self.schema.method(path)
    }

    /// Whether both clients were created from the same import.
    pub fn same_schema(&self, other: &Client) -> bool {
        Arc::ptr_eq(&self.schema, &other.schema)
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("types", &self.schema.types().id())
            .field("service", &self.schema.service().id())
            .finish_non_exhaustive()
    }
}
