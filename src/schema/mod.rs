//! Schema import.
//!
//! This module turns a flat schema description, where every constructor and method is
//! keyed by a dot-delimited name, into two addressable namespace trees: one for types
//! and one for service methods.
//!
//! # Overview
//!
//! A schema description carries two flat maps:
//!
//! - `constructors`: `"auth.Authorization"` → declaration of a type constructor.
//! - `methods`: `"auth.sendCode"` → declaration of a remote procedure.
//!
//! Importing the description splits every name on `.` and inserts it below a root
//! branch whose id is a configurable prefix (`Telegram.type` and `Telegram.service`
//! by default). Intermediate branches are created on demand. The two trees are
//! independent, so a constructor and a method sharing a dotted name never conflict.
//!
//! Every node carries an id equal to its fully qualified dotted path:
//!
//! ```text
//! Telegram.type                 (root)
//! └── auth                      Telegram.type.auth
//!     └── Authorization         Telegram.type.auth.Authorization
//! ```
//!
//! Leaves are resolved through a [`SchemaLayer`], which decides what a declaration
//! means (wire ids, parameter validation) while this module only decides where it lives.
//!
//! # Key Components
//!
//! - [`SchemaDescription`]: Raw input, loadable from JSON.
//! - [`ImportedSchema`]: The pair of namespace roots produced by one import.
//! - [`import`]: Runs one import against a schema layer.
//! - [`StandardSchemaLayer`]: Bundled schema layer validating type references.
//!
//! # Example
//! ```rust
//! use tlfacade::schema::{self, Declaration, ImportOptions, SchemaDescription, StandardSchemaLayer};
//!
//! let description = SchemaDescription::new()
//!     .with_constructor("foo.TypeFoo", Declaration::new("Foo"))
//!     .with_method("foo.callFoo", Declaration::new("Foo"));
//!
//! let imported =
//!     schema::import(&description, &ImportOptions::default(), &StandardSchemaLayer::new()).unwrap();
//!
//! assert_eq!(imported.types().id(), "Telegram.type");
//! assert_eq!(imported.type_def("foo.TypeFoo").unwrap().id, "Telegram.type.foo.TypeFoo");
//! assert_eq!(imported.method("foo.callFoo").unwrap().id, "Telegram.service.foo.callFoo");
//! ```
mod builder;
mod description;
mod import;
mod layer;
mod namespace;

use std::io;

use thiserror::Error;

pub use builder::{LeafKind, LeafRequest, TypeCatalog, build_namespace};
pub use description::{Declaration, Param, SchemaDescription};
pub use import::{DEFAULT_SERVICE_PREFIX, DEFAULT_TYPE_PREFIX, ImportOptions, import};
pub use layer::{Resolved, SchemaLayer, StandardSchemaLayer};
pub use namespace::{Branch, ImportedSchema, Leaf, MethodDef, NamespaceNode, TypeDef};

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("schema description is missing '{0}'")]
    MissingSection(&'static str),

    #[error("invalid namespace prefix '{0}'")]
    InvalidPrefix(String),

    #[error("invalid declaration name '{0}'")]
    InvalidName(String),

    #[error("'{path}' is already occupied")]
    Collision { path: String },

    #[error("declaration '{declaration}' has invalid id '{id}'")]
    InvalidId { declaration: String, id: String },

    #[error("declaration '{declaration}' references undefined type '{reference}'")]
    UndefinedType {
        declaration: String,
        reference: String,
    },

    #[error("failed to parse schema description: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("failed to read schema description: {0}")]
    Io(#[from] io::Error),
}
