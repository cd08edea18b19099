//! Visitor: maps a project's reflection graph onto the document model.
//!
//! Interfaces and classes become [`ContainerDoc`]s; their methods,
//! properties, signatures and parameters are mapped recursively. Comment
//! text goes through the injected [`BlockRenderer`], types through the
//! injected [`TypeResolver`].

use crate::config::VisitorOptions;
use crate::model::*;
use crate::paths;
use crate::reflection::{Comment, Reflection, ReflectionKind};
use crate::render::BlockRenderer;
use crate::types::TypeResolver;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Tags that drive derived fields and are left out of the documentation text.
const CONSUMED_TAGS: &[&str] = &["default", "deprecated"];

pub struct Visitor<'a> {
    renderer: &'a dyn BlockRenderer,
    types: &'a dyn TypeResolver,
    options: VisitorOptions,
    /// Base for `fileName`; resolved once by the caller.
    cwd: PathBuf,
}

impl<'a> Visitor<'a> {
    pub fn new(
        renderer: &'a dyn BlockRenderer,
        types: &'a dyn TypeResolver,
        options: VisitorOptions,
        cwd: impl Into<PathBuf>,
    ) -> Self {
        Visitor {
            renderer,
            types,
            options,
            cwd: cwd.into(),
        }
    }

    /// All interfaces of the project, then all classes, each in discovery order.
    pub fn visit_project(&self, project: &Reflection) -> Vec<ContainerDoc> {
        let interfaces = project
            .reflections_by_kind(ReflectionKind::Interface)
            .into_iter()
            .map(|r| self.visit_interface(r));
        let classes = project
            .reflections_by_kind(ReflectionKind::Class)
            .into_iter()
            .map(|r| self.visit_class(r));
        interfaces.chain(classes).collect()
    }

    pub fn visit_interface(&self, reflection: &Reflection) -> ContainerDoc {
        self.visit_container(reflection, ContainerKind::Interface)
    }

    pub fn visit_class(&self, reflection: &Reflection) -> ContainerDoc {
        self.visit_container(reflection, ContainerKind::Class)
    }

    fn visit_container(&self, reflection: &Reflection, kind: ContainerKind) -> ContainerDoc {
        debug!(name = %reflection.name, ?kind, "visiting container");
        ContainerDoc {
            base: self.base(reflection, kind.into()),
            methods: self
                .included(reflection.children_of_kind(ReflectionKind::Method))
                .map(|m| self.visit_method(m))
                .collect(),
            properties: self
                .included(reflection.children_of_kind(ReflectionKind::Property))
                .map(|p| self.visit_property(p))
                .collect(),
        }
    }

    pub fn visit_property(&self, reflection: &Reflection) -> PropertyDoc {
        PropertyDoc {
            base: self.base(reflection, DocKind::Property),
            default_value: default_value(reflection),
            r#type: self.types.type_string(reflection.r#type.as_ref()),
        }
    }

    pub fn visit_method(&self, reflection: &Reflection) -> MethodDoc {
        MethodDoc {
            base: self.base(reflection, DocKind::Method),
            signatures: reflection
                .signatures
                .iter()
                .map(|s| self.visit_signature(s))
                .collect(),
        }
    }

    pub fn visit_signature(&self, reflection: &Reflection) -> SignatureDoc {
        SignatureDoc {
            base: self.base(reflection, DocKind::Signature),
            parameters: self
                .included(reflection.parameters.iter())
                .map(|p| self.visit_parameter(p))
                .collect(),
            return_type: self.types.type_string(reflection.r#type.as_ref()),
            r#type: self.types.signature_string(reflection),
        }
    }

    pub fn visit_parameter(&self, reflection: &Reflection) -> ParameterDoc {
        ParameterDoc {
            base: self.base(reflection, DocKind::Parameter),
            default_value: default_value(reflection),
            r#type: self.types.type_string(reflection.r#type.as_ref()),
        }
    }

    fn base(&self, reflection: &Reflection, kind: DocKind) -> DocBase {
        let mut base = DocBase::new(kind, reflection.name.as_str());
        base.documentation = self.documentation(reflection);
        base.file_name = self.file_name(reflection);
        base.flags = flags(reflection);
        base
    }

    fn documentation(&self, reflection: &Reflection) -> Option<Block> {
        let comment = reflection.comment.as_ref()?;
        Some(self.renderer.render_block(&comment_text(comment)))
    }

    fn file_name(&self, reflection: &Reflection) -> Option<String> {
        let full = reflection.sources.first()?.full_file_name.as_deref()?;
        Some(paths::relative_path(&self.cwd, Path::new(full)))
    }

    /// Children that pass the export filter. Each child is judged on its own flag.
    fn included<'r>(
        &self,
        children: impl Iterator<Item = &'r Reflection>,
    ) -> impl Iterator<Item = &'r Reflection> {
        let include_all = self.options.include_non_exported;
        children.filter(move |child| {
            let keep = include_all || child.is_exported();
            if !keep {
                debug!(name = %child.name, kind = ?child.kind, "skipping non-exported member");
            }
            keep
        })
    }
}

/// Plain documentation text: short text, long text, then the remaining tags.
pub fn comment_text(comment: &Comment) -> String {
    let mut text = comment.short_text.clone();

    if !comment.text.is_empty() {
        text.push_str("\n\n");
        text.push_str(&comment.text);
    }

    let tags: Vec<String> = comment
        .tags
        .iter()
        .filter(|t| !CONSUMED_TAGS.contains(&t.tag_name.as_str()))
        // extractors leave a trailing newline in tag text
        .map(|t| format!("@{} {}", t.tag_name, t.text).trim_end().to_string())
        .collect();
    if !tags.is_empty() {
        text.push_str("\n\n");
        text.push_str(&tags.join("\n"));
    }

    text
}

/// Explicit default value, else the trimmed `@default` tag.
pub fn default_value(reflection: &Reflection) -> Option<String> {
    if let Some(ref value) = reflection.default_value {
        return Some(value.clone());
    }
    reflection
        .comment
        .as_ref()?
        .tag("default")
        .map(|t| t.text.trim().to_string())
}

pub fn flags(reflection: &Reflection) -> Option<DocFlags> {
    let f = reflection.flags.as_ref()?;
    Some(DocFlags {
        is_deprecated: deprecation(reflection),
        is_exported: f.is_exported,
        is_external: f.is_external,
        is_optional: f.is_optional,
        is_private: f.is_private,
        is_protected: f.is_protected,
        is_public: f.is_public,
        is_rest: f.is_rest,
        is_static: f.is_static,
    })
}

pub fn deprecation(reflection: &Reflection) -> Option<Deprecation> {
    let tag = reflection.comment.as_ref()?.tag("deprecated")?;
    let reason = tag.text.trim();
    if reason.is_empty() {
        Some(Deprecation::Deprecated)
    } else {
        Some(Deprecation::Reason(reason.to_string()))
    }
}
