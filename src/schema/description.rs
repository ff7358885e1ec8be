use std::{collections::BTreeMap, fs::File, io::Read, path::Path};

use serde::{Deserialize, Serialize};

use super::SchemaError;

/// Flat schema description: dotted names mapped to declarations.
///
/// Either map may be absent; the importer rejects such descriptions, the loader
/// does not.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaDescription {
    pub constructors: Option<BTreeMap<String, Declaration>>,
    pub methods: Option<BTreeMap<String, Declaration>>,
}

/// A single constructor or method declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    /// Wire identifier, hex (`0x...`) or decimal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub params: Vec<Param>,
    #[serde(rename = "type")]
    pub result: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
}

impl SchemaDescription {
    /// Description with both sections present and empty.
    pub fn new() -> Self {
        Self {
            constructors: Some(BTreeMap::new()),
            methods: Some(BTreeMap::new()),
        }
    }

    pub fn with_constructor(mut self, name: impl Into<String>, declaration: Declaration) -> Self {
        self.constructors
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), declaration);
        self
    }

    pub fn with_method(mut self, name: impl Into<String>, declaration: Declaration) -> Self {
        self.methods
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), declaration);
        self
    }

    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, SchemaError> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let file = File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file))
    }
}

impl Declaration {
    pub fn new(result: impl Into<String>) -> Self {
        Self {
            id: None,
            params: Vec::new(),
            result: result.into(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_param(mut self, name: impl Into<String>, ty: impl Into<String>) -> Self {
        self.params.push(Param {
            name: name.into(),
            ty: ty.into(),
        });
        self
    }
}
