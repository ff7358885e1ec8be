use super::{LeafRequest, Param, SchemaError, TypeCatalog};

/// Built-in TL types every schema may reference without declaring them.
const PRIMITIVES: &[&str] = &[
    "#", "!X", "X", "Bool", "Object", "Type", "bytes", "double", "int", "int128", "int256", "long",
    "string", "true",
];

/// Leaf-resolution capability of a schema layer.
///
/// The namespace builder decides where a declaration lives; the schema layer decides
/// what it means. Errors are returned to the importer's caller unchanged.
pub trait SchemaLayer: Send + Sync {
    fn resolve(&self, request: &LeafRequest<'_>) -> Result<Resolved, SchemaError>;
}

/// Definition resolved from a declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub wire_id: Option<u32>,
    pub params: Vec<Param>,
    pub result: String,
}

/// Schema layer checking ids and type references against the schema being imported.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardSchemaLayer;

impl StandardSchemaLayer {
    pub fn new() -> Self {
        Self
    }

    fn check_reference(
        &self,
        request: &LeafRequest<'_>,
        reference: &str,
    ) -> Result<(), SchemaError> {
        if is_known(reference, request.catalog) {
            Ok(())
        } else {
            Err(SchemaError::UndefinedType {
                declaration: request.name.to_string(),
                reference: reference.to_string(),
            })
        }
    }
}

impl SchemaLayer for StandardSchemaLayer {
    fn resolve(&self, request: &LeafRequest<'_>) -> Result<Resolved, SchemaError> {
        let declaration = request.declaration;
        let wire_id = declaration
            .id
            .as_deref()
            .map(|id| {
                parse_wire_id(id).ok_or_else(|| SchemaError::InvalidId {
                    declaration: request.name.to_string(),
                    id: id.to_string(),
                })
            })
            .transpose()?;

        for param in &declaration.params {
            self.check_reference(request, &param.ty)?;
        }
        self.check_reference(request, &declaration.result)?;

        Ok(Resolved {
            wire_id,
            params: declaration.params.clone(),
            result: declaration.result.clone(),
        })
    }
}

/// Parse a wire id written as `0x`-prefixed hex or as a (possibly negative) decimal.
fn parse_wire_id(id: &str) -> Option<u32> {
    match id.strip_prefix("0x").or_else(|| id.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16).ok(),
        None => id
            .parse::<i32>()
            .map(|signed| signed as u32)
            .or_else(|_| id.parse::<u32>())
            .ok(),
    }
}

fn is_known(reference: &str, catalog: &TypeCatalog) -> bool {
    let reference = reference.strip_prefix('%').unwrap_or(reference);

    // flags.0?true
    if let Some((_, inner)) = reference.split_once('?') {
        return is_known(inner, catalog);
    }

    let generic = reference
        .strip_prefix("Vector<")
        .or_else(|| reference.strip_prefix("vector<"))
        .and_then(|rest| rest.strip_suffix('>'));
    if let Some(inner) = generic {
        return is_known(inner, catalog);
    }

    PRIMITIVES.contains(&reference) || catalog.contains(reference)
}
