//! Reflection graph: the input object model handed over by the extraction step.
//!
//! Shaped after the JSON project file TypeDoc writes with `--json`: camelCase
//! keys, numeric kind bits, and a `type`-tagged union for type references.
//! The graph is fully built before visiting starts and is never mutated.

use anyhow::{Context, Result};
use serde::Deserialize;

/// Kind of a reflection, decoded from TypeDoc's kind bit values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "u32")]
pub enum ReflectionKind {
    /// Root of the graph (TypeDoc calls this `Global`).
    #[default]
    Project,
    ExternalModule,
    Module,
    Enum,
    Function,
    Class,
    Interface,
    Constructor,
    Property,
    Method,
    CallSignature,
    Parameter,
    TypeLiteral,
    TypeParameter,
    /// Any kind this crate has no use for, kept with its raw bits.
    Other(u32),
}

impl From<u32> for ReflectionKind {
    fn from(bits: u32) -> Self {
        match bits {
            0 => ReflectionKind::Project,
            1 => ReflectionKind::ExternalModule,
            2 => ReflectionKind::Module,
            4 => ReflectionKind::Enum,
            64 => ReflectionKind::Function,
            128 => ReflectionKind::Class,
            256 => ReflectionKind::Interface,
            512 => ReflectionKind::Constructor,
            1024 => ReflectionKind::Property,
            2048 => ReflectionKind::Method,
            4096 => ReflectionKind::CallSignature,
            32768 => ReflectionKind::Parameter,
            65536 => ReflectionKind::TypeLiteral,
            131072 => ReflectionKind::TypeParameter,
            other => ReflectionKind::Other(other),
        }
    }
}

/// A node of the reflection graph.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reflection {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub kind: ReflectionKind,
    pub flags: Option<ReflectionFlags>,
    pub comment: Option<Comment>,
    /// Declared type for properties and parameters, return type for signatures.
    #[serde(rename = "type")]
    pub r#type: Option<TypeRef>,
    pub default_value: Option<String>,
    #[serde(default)]
    pub sources: Vec<SourceReference>,
    #[serde(default)]
    pub signatures: Vec<Reflection>,
    #[serde(default)]
    pub parameters: Vec<Reflection>,
    #[serde(default)]
    pub children: Vec<Reflection>,
    #[serde(default, rename = "typeParameter")]
    pub type_parameters: Vec<Reflection>,
}

impl Reflection {
    /// Parse a serialized project graph.
    pub fn from_json(input: &str) -> Result<Self> {
        serde_json::from_str(input).context("failed to parse reflection graph")
    }

    /// True only when the reflection carries `isExported: true`.
    pub fn is_exported(&self) -> bool {
        self.flags
            .as_ref()
            .and_then(|f| f.is_exported)
            .unwrap_or(false)
    }

    /// Direct children of the given kind, in declaration order.
    pub fn children_of_kind(&self, kind: ReflectionKind) -> impl Iterator<Item = &Reflection> {
        self.children.iter().filter(move |c| c.kind == kind)
    }

    /// All descendants of the given kind, depth-first in discovery order.
    ///
    /// Only `children` are walked; signatures, parameters and inline type
    /// literals never hold containers.
    pub fn reflections_by_kind(&self, kind: ReflectionKind) -> Vec<&Reflection> {
        let mut found = Vec::new();
        collect_by_kind(&self.children, kind, &mut found);
        found
    }
}

fn collect_by_kind<'a>(nodes: &'a [Reflection], kind: ReflectionKind, found: &mut Vec<&'a Reflection>) {
    for node in nodes {
        if node.kind == kind {
            found.push(node);
        }
        collect_by_kind(&node.children, kind, found);
    }
}

/// Flag set of a reflection. Every field keeps its absence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReflectionFlags {
    pub is_exported: Option<bool>,
    pub is_external: Option<bool>,
    pub is_optional: Option<bool>,
    pub is_private: Option<bool>,
    pub is_protected: Option<bool>,
    pub is_public: Option<bool>,
    pub is_rest: Option<bool>,
    pub is_static: Option<bool>,
}

/// Parsed doc comment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(default)]
    pub short_text: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub tags: Vec<CommentTag>,
}

impl Comment {
    /// First tag with the given name (without the leading `@`).
    pub fn tag(&self, name: &str) -> Option<&CommentTag> {
        self.tags.iter().find(|t| t.tag_name == name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CommentTag {
    #[serde(rename = "tag", alias = "tagName")]
    pub tag_name: String,
    #[serde(default)]
    pub text: String,
}

/// Where a declaration lives in the source tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceReference {
    /// Path as written by the extractor, usually relative to its base dir.
    #[serde(default)]
    pub file_name: String,
    /// Resolved absolute path, when the extractor knows it.
    pub full_file_name: Option<String>,
    #[serde(default)]
    pub line: u32,
    #[serde(default)]
    pub character: u32,
}

/// Type reference as produced by the extractor's type resolution.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum TypeRef {
    Intrinsic {
        name: String,
    },
    Reference {
        name: String,
        #[serde(default, rename = "typeArguments")]
        type_arguments: Vec<TypeRef>,
    },
    Array {
        #[serde(rename = "elementType")]
        element_type: Box<TypeRef>,
    },
    Union {
        types: Vec<TypeRef>,
    },
    Intersection {
        types: Vec<TypeRef>,
    },
    Tuple {
        #[serde(default)]
        elements: Vec<TypeRef>,
    },
    StringLiteral {
        value: String,
    },
    TypeParameter {
        name: String,
    },
    TypeOperator {
        operator: String,
        target: Box<TypeRef>,
    },
    /// Inline type literal; the declaration holds its members or call signature.
    Reflection {
        declaration: Box<Reflection>,
    },
    Unknown {
        name: String,
    },
    #[serde(other)]
    Other,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn reflection(value: serde_json::Value) -> Reflection {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn kind_bits_decode() {
        assert_eq!(ReflectionKind::from(256), ReflectionKind::Interface);
        assert_eq!(ReflectionKind::from(128), ReflectionKind::Class);
        assert_eq!(ReflectionKind::from(8), ReflectionKind::Other(8));
    }

    #[test]
    fn parse_minimal_project() {
        let project = Reflection::from_json(r#"{"id":0,"name":"demo","kind":0}"#).unwrap();
        assert_eq!(project.kind, ReflectionKind::Project);
        assert!(project.flags.is_none());
        assert!(project.children.is_empty());
        assert_eq!(project.name, "demo");
    }

    #[test]
    fn parse_rejects_garbage() {
        let err = Reflection::from_json("not json").unwrap_err();
        assert!(err.to_string().contains("failed to parse reflection graph"));
    }

    #[test]
    fn flags_keep_absence() {
        let r = reflection(json!({"name": "x", "kind": 1024, "flags": {"isOptional": false}}));
        let flags = r.flags.unwrap();
        assert_eq!(flags.is_optional, Some(false));
        assert_eq!(flags.is_exported, None);
    }

    #[test]
    fn exported_requires_explicit_true() {
        assert!(!reflection(json!({"kind": 1024})).is_exported());
        assert!(!reflection(json!({"kind": 1024, "flags": {}})).is_exported());
        assert!(reflection(json!({"kind": 1024, "flags": {"isExported": true}})).is_exported());
    }

    #[test]
    fn comment_tags_accept_both_keys() {
        let r = reflection(json!({
            "kind": 1024,
            "comment": {"shortText": "S", "tags": [
                {"tag": "default", "text": "1"},
                {"tagName": "see", "text": "other"}
            ]}
        }));
        let comment = r.comment.unwrap();
        assert_eq!(comment.tag("default").unwrap().text, "1");
        assert_eq!(comment.tag("see").unwrap().text, "other");
        assert!(comment.tag("deprecated").is_none());
    }

    #[test]
    fn reflections_by_kind_walks_depth_first() {
        let project = reflection(json!({
            "kind": 0,
            "children": [
                {"name": "a", "kind": 1, "children": [
                    {"name": "A", "kind": 256},
                    {"name": "inner", "kind": 2, "children": [{"name": "B", "kind": 256}]}
                ]},
                {"name": "C", "kind": 256},
                {"name": "K", "kind": 128}
            ]
        }));
        let names: Vec<_> = project
            .reflections_by_kind(ReflectionKind::Interface)
            .iter()
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(names, ["A", "B", "C"]);
    }

    #[test]
    fn unknown_type_shape_is_other() {
        let r = reflection(json!({"kind": 1024, "type": {"type": "conditional", "checkType": {}}}));
        assert!(matches!(r.r#type, Some(TypeRef::Other)));
    }
}
