use log::info;

use super::{
    ImportedSchema, LeafKind, SchemaDescription, SchemaError, SchemaLayer, TypeCatalog,
    build_namespace,
};

pub const DEFAULT_TYPE_PREFIX: &str = "Telegram.type";
pub const DEFAULT_SERVICE_PREFIX: &str = "Telegram.service";

/// Root prefixes for the two namespaces of an import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportOptions {
    pub type_prefix: String,
    pub service_prefix: String,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            type_prefix: DEFAULT_TYPE_PREFIX.to_string(),
            service_prefix: DEFAULT_SERVICE_PREFIX.to_string(),
        }
    }
}

impl ImportOptions {
    pub fn with_type_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.type_prefix = prefix.into();
        self
    }

    pub fn with_service_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.service_prefix = prefix.into();
        self
    }
}

fn check_prefix(prefix: &str) -> Result<(), SchemaError> {
    if prefix.split('.').any(str::is_empty) {
        return Err(SchemaError::InvalidPrefix(prefix.to_string()));
    }
    Ok(())
}

/// Import `description` into a fresh pair of namespace trees.
///
/// Either both trees are built or an error is returned; nothing partial escapes.
pub fn import(
    description: &SchemaDescription,
    options: &ImportOptions,
    layer: &dyn SchemaLayer,
) -> Result<ImportedSchema, SchemaError> {
    let constructors = description
        .constructors
        .as_ref()
        .ok_or(SchemaError::MissingSection("constructors"))?;
    let methods = description
        .methods
        .as_ref()
        .ok_or(SchemaError::MissingSection("methods"))?;

    check_prefix(&options.type_prefix)?;
    check_prefix(&options.service_prefix)?;

    let catalog = TypeCatalog::from_constructors(constructors);
    let types = build_namespace(
        &options.type_prefix,
        constructors,
        LeafKind::Type,
        &catalog,
        layer,
    )?;
    let service = build_namespace(
        &options.service_prefix,
        methods,
        LeafKind::Method,
        &catalog,
        layer,
    )?;

    info!(
        "imported {} constructors under '{}' and {} methods under '{}'",
        constructors.len(),
        options.type_prefix,
        methods.len(),
        options.service_prefix
    );
    Ok(ImportedSchema::new(types, service))
}

#[cfg(test)]
mod tests {
    use crate::schema::{Declaration, StandardSchemaLayer};

    use super::*;

    fn foo_schema() -> SchemaDescription {
        SchemaDescription::new()
            .with_constructor("foo.TypeFoo", Declaration::new("Foo"))
            .with_method("foo.callFoo", Declaration::new("Foo"))
    }

    fn run(description: &SchemaDescription, options: &ImportOptions) -> Result<ImportedSchema, SchemaError> {
        import(description, options, &StandardSchemaLayer::new())
    }

    #[test]
    fn default_prefixes() {
        let imported = run(&foo_schema(), &ImportOptions::default()).unwrap();

        assert_eq!(imported.types().id(), "Telegram.type");
        assert_eq!(imported.service().id(), "Telegram.service");
        assert_eq!(
            imported.types().get("foo.TypeFoo").unwrap().id(),
            "Telegram.type.foo.TypeFoo"
        );
        assert_eq!(
            imported.service().get("foo.callFoo").unwrap().id(),
            "Telegram.service.foo.callFoo"
        );
    }

    #[test]
    fn custom_prefixes() {
        let options = ImportOptions::default()
            .with_type_prefix("Api.type")
            .with_service_prefix("Api.service");
        let imported = run(&foo_schema(), &options).unwrap();

        assert_eq!(imported.types().id(), "Api.type");
        assert_eq!(imported.type_def("foo.TypeFoo").unwrap().id, "Api.type.foo.TypeFoo");
        assert_eq!(imported.method("foo.callFoo").unwrap().id, "Api.service.foo.callFoo");
    }

    #[test]
    fn same_path_in_both_namespaces() {
        let description = SchemaDescription::new()
            .with_constructor("a.b.C", Declaration::new("C"))
            .with_method("a.b.C", Declaration::new("C"));
        let imported = run(&description, &ImportOptions::default()).unwrap();

        assert_eq!(imported.type_def("a.b.C").unwrap().id, "Telegram.type.a.b.C");
        assert_eq!(imported.method("a.b.C").unwrap().id, "Telegram.service.a.b.C");
    }

    #[test]
    fn root_keys_are_first_segments() {
        let description = SchemaDescription::new()
            .with_constructor("auth.SentCode", Declaration::new("auth.SentCode"))
            .with_constructor("Peer", Declaration::new("Peer"))
            .with_method("auth.sendCode", Declaration::new("auth.SentCode"))
            .with_method("help.getConfig", Declaration::new("Peer"));
        let imported = run(&description, &ImportOptions::default()).unwrap();

        let type_keys = imported.types().children().keys().collect::<Vec<_>>();
        assert_eq!(type_keys, vec!["Peer", "auth"]);
        let service_keys = imported.service().children().keys().collect::<Vec<_>>();
        assert_eq!(service_keys, vec!["auth", "help"]);
    }

    #[test]
    fn repeated_import_is_structurally_identical() {
        let first = run(&foo_schema(), &ImportOptions::default()).unwrap();
        let second = run(&foo_schema(), &ImportOptions::default()).unwrap();

        assert_eq!(first.types().ids(), second.types().ids());
        assert_eq!(first.service().ids(), second.service().ids());
        assert_eq!(first, second);
    }

    #[test]
    fn missing_methods() {
        let description = SchemaDescription {
            methods: None,
            ..SchemaDescription::new()
        };

        let err = run(&description, &ImportOptions::default()).unwrap_err();
        assert!(matches!(err, SchemaError::MissingSection("methods")));
    }

    #[test]
    fn missing_constructors() {
        let description = SchemaDescription {
            constructors: None,
            ..SchemaDescription::new()
        };

        let err = run(&description, &ImportOptions::default()).unwrap_err();
        assert!(matches!(err, SchemaError::MissingSection("constructors")));
    }

    #[test]
    fn invalid_prefixes() {
        for prefix in ["", "Telegram.", ".type", "Telegram..type"] {
            let options = ImportOptions::default().with_service_prefix(prefix);
            let err = run(&foo_schema(), &options).unwrap_err();
            assert!(matches!(err, SchemaError::InvalidPrefix(p) if p == prefix));
        }
    }

    #[test]
    fn method_referencing_undefined_type() {
        let description = foo_schema().with_method("foo.callBar", Declaration::new("Bar"));

        let err = run(&description, &ImportOptions::default()).unwrap_err();
        assert!(matches!(err, SchemaError::UndefinedType { reference, .. } if reference == "Bar"));
    }
}
