//! Document model: the simplified, serializable output of the visitor.
//!
//! Every record flattens a [`DocBase`] and adds its kind-specific fields.
//! Absent values are omitted from the serialized form.

use serde::{Serialize, Serializer};

/// Tag carried by every document entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DocKind {
    Interface,
    Class,
    Property,
    Method,
    Signature,
    Parameter,
}

/// The two top-level entry kinds. Both share one member mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerKind {
    Interface,
    Class,
}

impl From<ContainerKind> for DocKind {
    fn from(kind: ContainerKind) -> Self {
        match kind {
            ContainerKind::Interface => DocKind::Interface,
            ContainerKind::Class => DocKind::Class,
        }
    }
}

/// Rendered documentation, opaque to the visitor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Block(String);

impl Block {
    pub fn new(content: impl Into<String>) -> Self {
        Block(content.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Deprecation status: a bare `@deprecated`, or one with a reason.
///
/// Serializes as `true` or as the reason string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Deprecation {
    Deprecated,
    Reason(String),
}

impl Serialize for Deprecation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Deprecation::Deprecated => serializer.serialize_bool(true),
            Deprecation::Reason(reason) => serializer.serialize_str(reason),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocFlags {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_deprecated: Option<Deprecation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_exported: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_external: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_optional: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_private: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_protected: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_public: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_rest: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_static: Option<bool>,
}

/// Fields shared by every document entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocBase {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documentation: Option<Block>,
    /// Source file relative to the working directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flags: Option<DocFlags>,
    kind: DocKind,
    pub name: String,
}

impl DocBase {
    pub(crate) fn new(kind: DocKind, name: impl Into<String>) -> Self {
        DocBase {
            documentation: None,
            file_name: None,
            flags: None,
            kind,
            name: name.into(),
        }
    }

    /// The kind is fixed when the entry is built.
    pub fn kind(&self) -> DocKind {
        self.kind
    }
}

/// An interface or a class with its visible members.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContainerDoc {
    #[serde(flatten)]
    pub base: DocBase,
    pub methods: Vec<MethodDoc>,
    pub properties: Vec<PropertyDoc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDoc {
    #[serde(flatten)]
    pub base: DocBase,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    #[serde(rename = "type")]
    pub r#type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodDoc {
    #[serde(flatten)]
    pub base: DocBase,
    pub signatures: Vec<SignatureDoc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureDoc {
    #[serde(flatten)]
    pub base: DocBase,
    pub parameters: Vec<ParameterDoc>,
    pub return_type: String,
    /// The whole signature as text, e.g. `(x: number) => string`.
    #[serde(rename = "type")]
    pub r#type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterDoc {
    #[serde(flatten)]
    pub base: DocBase,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    #[serde(rename = "type")]
    pub r#type: String,
}
