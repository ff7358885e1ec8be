use std::collections::{BTreeMap, BTreeSet};

use log::debug;

use super::{Branch, Declaration, Leaf, MethodDef, SchemaError, SchemaLayer, TypeDef};

/// Which namespace a declaration is being built into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeafKind {
    /// Type constructor, decoded from the wire.
    Type,
    /// Service method, invoked over the wire.
    Method,
}

/// Names a declaration may refer to: every constructor name and every type a
/// constructor produces.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeCatalog {
    names: BTreeSet<String>,
}

impl TypeCatalog {
    pub fn from_constructors(constructors: &BTreeMap<String, Declaration>) -> Self {
        let names = constructors
            .iter()
            .flat_map(|(name, declaration)| [name.clone(), declaration.result.clone()])
            .collect();
        Self { names }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }
}

/// Everything a schema layer needs to resolve one leaf.
#[derive(Debug, Clone, Copy)]
pub struct LeafRequest<'a> {
    pub kind: LeafKind,
    /// Fully qualified id the leaf will carry.
    pub id: &'a str,
    /// Dotted name as declared.
    pub name: &'a str,
    pub declaration: &'a Declaration,
    pub catalog: &'a TypeCatalog,
}

/// Build a namespace tree rooted at `prefix` from flat dotted declarations.
pub fn build_namespace(
    prefix: &str,
    declarations: &BTreeMap<String, Declaration>,
    kind: LeafKind,
    catalog: &TypeCatalog,
    layer: &dyn SchemaLayer,
) -> Result<Branch, SchemaError> {
    let mut root = Branch::new(prefix);

    for (name, declaration) in declarations {
        root.insert(name, |id| {
            let resolved = layer.resolve(&LeafRequest {
                kind,
                id: &id,
                name: name.as_str(),
                declaration,
                catalog,
            })?;
            debug!("resolved {kind:?} {id}");

            Ok(match kind {
                LeafKind::Type => Leaf::Type(TypeDef {
                    id,
                    name: name.clone(),
                    constructor_id: resolved.wire_id,
                    params: resolved.params,
                    result: resolved.result,
                }),
                LeafKind::Method => Leaf::Method(MethodDef {
                    id,
                    name: name.clone(),
                    method_id: resolved.wire_id,
                    params: resolved.params,
                    returns: resolved.result,
                }),
            })
        })?;
    }

    Ok(root)
}
