use std::{collections::BTreeMap, fmt};

use super::{Param, SchemaError};

/// Node of a namespace tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamespaceNode {
    Branch(Branch),
    Leaf(Leaf),
}

/// Namespace segment holding child nodes keyed by the next path segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branch {
    id: String,
    children: BTreeMap<String, NamespaceNode>,
}

/// Resolved definition stored at the end of a dotted path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Leaf {
    Type(TypeDef),
    Method(MethodDef),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDef {
    /// Fully qualified id, prefix included.
    pub id: String,
    /// Name as declared in the schema description.
    pub name: String,
    pub constructor_id: Option<u32>,
    pub params: Vec<Param>,
    pub result: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDef {
    /// Fully qualified id, prefix included.
    pub id: String,
    /// Name as declared in the schema description.
    pub name: String,
    pub method_id: Option<u32>,
    pub params: Vec<Param>,
    pub returns: String,
}

/// Result of one schema import: the `type` and `service` roots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportedSchema {
    types: Branch,
    service: Branch,
}

impl NamespaceNode {
    pub fn id(&self) -> &str {
        match self {
            NamespaceNode::Branch(branch) => branch.id(),
            NamespaceNode::Leaf(leaf) => leaf.id(),
        }
    }

    pub fn as_branch(&self) -> Option<&Branch> {
        match self {
            NamespaceNode::Branch(branch) => Some(branch),
            NamespaceNode::Leaf(_) => None,
        }
    }

    pub fn as_leaf(&self) -> Option<&Leaf> {
        match self {
            NamespaceNode::Leaf(leaf) => Some(leaf),
            NamespaceNode::Branch(_) => None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, NamespaceNode::Leaf(_))
    }
}

impl Branch {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            children: BTreeMap::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn children(&self) -> &BTreeMap<String, NamespaceNode> {
        &self.children
    }

    pub fn child(&self, key: &str) -> Option<&NamespaceNode> {
        self.children.get(key)
    }

    /// Resolve a dotted path relative to this branch.
    pub fn get(&self, path: &str) -> Option<&NamespaceNode> {
        let mut segments = path.split('.');
        let mut node = self.children.get(segments.next()?)?;

        for segment in segments {
            node = node.as_branch()?.children.get(segment)?;
        }
        Some(node)
    }

    /// Ids of this branch and every node below it, depth first.
    pub fn ids(&self) -> Vec<&str> {
        let mut out = vec![self.id.as_str()];
        for child in self.children.values() {
            match child {
                NamespaceNode::Branch(branch) => out.extend(branch.ids()),
                NamespaceNode::Leaf(leaf) => out.push(leaf.id()),
            }
        }
        out
    }

    /// Number of leaves below this branch.
    pub fn leaf_count(&self) -> usize {
        self.children
            .values()
            .map(|child| match child {
                NamespaceNode::Branch(branch) => branch.leaf_count(),
                NamespaceNode::Leaf(_) => 1,
            })
            .sum()
    }

    /// Insert a leaf at the dotted `name` below this branch, creating the
    /// intermediate branches. `build` receives the id the leaf must carry.
    pub(crate) fn insert<F>(&mut self, name: &str, build: F) -> Result<(), SchemaError>
    where
        F: FnOnce(String) -> Result<Leaf, SchemaError>,
    {
        let segments = name.split('.').collect::<Vec<&str>>();
        if segments.iter().any(|s| s.is_empty()) {
            return Err(SchemaError::InvalidName(name.to_string()));
        }

        let mut branch = self;
        let (last, parents) = segments
            .split_last()
            .ok_or_else(|| SchemaError::InvalidName(name.to_string()))?;

        for segment in parents {
            let id = format!("{}.{segment}", branch.id);
            let node = branch
                .children
                .entry(segment.to_string())
                .or_insert_with(|| NamespaceNode::Branch(Branch::new(id.clone())));

            branch = match node {
                NamespaceNode::Branch(next) => next,
                NamespaceNode::Leaf(_) => return Err(SchemaError::Collision { path: id }),
            };
        }

        let id = format!("{}.{last}", branch.id);
        if branch.children.contains_key(*last) {
            return Err(SchemaError::Collision { path: id });
        }

        let leaf = build(id)?;
        branch
            .children
            .insert(last.to_string(), NamespaceNode::Leaf(leaf));
        Ok(())
    }

    fn write_tree(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        for (key, child) in &self.children {
            write!(f, "{:indent$}", "", indent = depth * 2)?;
            match child {
                NamespaceNode::Branch(branch) => {
                    writeln!(f, "{key}")?;
                    branch.write_tree(f, depth + 1)?;
                }
                NamespaceNode::Leaf(leaf) => writeln!(f, "{key}: {leaf}")?,
            }
        }
        Ok(())
    }
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.id)?;
        self.write_tree(f, 1)
    }
}

impl Leaf {
    pub fn id(&self) -> &str {
        match self {
            Leaf::Type(def) => &def.id,
            Leaf::Method(def) => &def.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Leaf::Type(def) => &def.name,
            Leaf::Method(def) => &def.name,
        }
    }

    pub fn params(&self) -> &[Param] {
        match self {
            Leaf::Type(def) => &def.params,
            Leaf::Method(def) => &def.params,
        }
    }

    pub fn as_type(&self) -> Option<&TypeDef> {
        match self {
            Leaf::Type(def) => Some(def),
            Leaf::Method(_) => None,
        }
    }

    pub fn as_method(&self) -> Option<&MethodDef> {
        match self {
            Leaf::Method(def) => Some(def),
            Leaf::Type(_) => None,
        }
    }
}

impl fmt::Display for Leaf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (wire_id, result) = match self {
            Leaf::Type(def) => (def.constructor_id, &def.result),
            Leaf::Method(def) => (def.method_id, &def.returns),
        };

        if let Some(wire_id) = wire_id {
            write!(f, "#{wire_id:08x} ")?;
        }
        for param in self.params() {
            write!(f, "{}:{} ", param.name, param.ty)?;
        }
        write!(f, "= {result}")
    }
}

impl ImportedSchema {
    pub(crate) fn new(types: Branch, service: Branch) -> Self {
        Self { types, service }
    }

    /// Root of the `type` namespace.
    pub fn types(&self) -> &Branch {
        &self.types
    }

    /// Root of the `service` namespace.
    pub fn service(&self) -> &Branch {
        &self.service
    }

    /// Type declared under the dotted `path`, relative to the type root.
    pub fn type_def(&self, path: &str) -> Option<&TypeDef> {
        self.types.get(path)?.as_leaf()?.as_type()
    }

    /// Method declared under the dotted `path`, relative to the service root.
    pub fn method(&self, path: &str) -> Option<&MethodDef> {
        self.service.get(path)?.as_leaf()?.as_method()
    }
}

impl fmt::Display for ImportedSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.types, self.service)
    }
}
