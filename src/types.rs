//! Type resolution: turns type references and signatures into display strings.

use crate::reflection::{Reflection, ReflectionKind, TypeRef};
use regex::Regex;
use std::sync::LazyLock;

/// Property names that can be written without quotes.
static RE_IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").unwrap());

/// Capability the visitor uses to stringify types.
pub trait TypeResolver {
    /// Canonical display string of a declared type. `None` means undeclared.
    fn type_string(&self, ty: Option<&TypeRef>) -> String;

    /// Full signature text: type parameters, parameter list and return type.
    fn signature_string(&self, signature: &Reflection) -> String;
}

/// Renders types with TypeScript syntax.
#[derive(Debug, Default, Clone, Copy)]
pub struct TypeScriptResolver;

impl TypeResolver for TypeScriptResolver {
    fn type_string(&self, ty: Option<&TypeRef>) -> String {
        match ty {
            Some(ty) => render_type(ty),
            None => "any".to_string(),
        }
    }

    fn signature_string(&self, signature: &Reflection) -> String {
        format!(
            "{}({}) => {}",
            type_parameters(signature),
            parameter_list(signature),
            self.type_string(signature.r#type.as_ref())
        )
    }
}

fn render_type(ty: &TypeRef) -> String {
    match ty {
        TypeRef::Intrinsic { name }
        | TypeRef::TypeParameter { name }
        | TypeRef::Unknown { name } => name.clone(),
        TypeRef::Reference {
            name,
            type_arguments,
        } => {
            if type_arguments.is_empty() {
                name.clone()
            } else {
                format!("{}<{}>", name, join(type_arguments, ", ", render_type))
            }
        }
        TypeRef::Array { element_type } => format!("{}[]", render_operand(element_type)),
        TypeRef::Union { types } => join(types, " | ", render_type),
        TypeRef::Intersection { types } => join(types, " & ", render_operand),
        TypeRef::Tuple { elements } => format!("[{}]", join(elements, ", ", render_type)),
        TypeRef::StringLiteral { value } => format!("\"{}\"", value.replace('"', "\\\"")),
        TypeRef::TypeOperator { operator, target } => {
            format!("{} {}", operator, render_operand(target))
        }
        TypeRef::Reflection { declaration } => render_literal(declaration),
        TypeRef::Other => "unknown".to_string(),
    }
}

/// Render a type that sits next to an operator, parenthesizing if it would bind loosely.
fn render_operand(ty: &TypeRef) -> String {
    let loose = match ty {
        TypeRef::Union { .. } | TypeRef::Intersection { .. } => true,
        TypeRef::Reflection { declaration } => is_function_literal(declaration),
        _ => false,
    };
    if loose {
        format!("({})", render_type(ty))
    } else {
        render_type(ty)
    }
}

fn is_function_literal(declaration: &Reflection) -> bool {
    declaration.children.is_empty() && !declaration.signatures.is_empty()
}

/// Inline type literal: an arrow type when it only has a call signature,
/// otherwise an object type listing its members.
fn render_literal(declaration: &Reflection) -> String {
    if declaration.children.is_empty() {
        return match declaration.signatures.first() {
            Some(sig) => TypeScriptResolver.signature_string(sig),
            None => "{}".to_string(),
        };
    }

    let members: Vec<String> = declaration
        .children
        .iter()
        .map(|member| {
            let name = member_name(&member.name);
            match (member.kind, member.signatures.first()) {
                (ReflectionKind::Method, Some(sig)) => format!(
                    "{}{}({}): {}",
                    name,
                    type_parameters(sig),
                    parameter_list(sig),
                    render_or_any(sig.r#type.as_ref())
                ),
                _ => format!(
                    "{}{}: {}",
                    name,
                    if is_optional(member) { "?" } else { "" },
                    render_or_any(member.r#type.as_ref())
                ),
            }
        })
        .collect();
    format!("{{ {} }}", members.join("; "))
}

fn member_name(name: &str) -> String {
    if RE_IDENTIFIER.is_match(name) {
        name.to_string()
    } else {
        format!("\"{}\"", name.replace('"', "\\\""))
    }
}

fn type_parameters(signature: &Reflection) -> String {
    if signature.type_parameters.is_empty() {
        return String::new();
    }
    let params: Vec<String> = signature
        .type_parameters
        .iter()
        .map(|tp| match tp.r#type {
            Some(ref constraint) => format!("{} extends {}", tp.name, render_type(constraint)),
            None => tp.name.clone(),
        })
        .collect();
    format!("<{}>", params.join(", "))
}

fn parameter_list(signature: &Reflection) -> String {
    let params: Vec<String> = signature
        .parameters
        .iter()
        .map(|param| {
            let flags = param.flags.as_ref();
            let rest = flags.and_then(|f| f.is_rest).unwrap_or(false);
            format!(
                "{}{}{}: {}",
                if rest { "..." } else { "" },
                param.name,
                if is_optional(param) { "?" } else { "" },
                render_or_any(param.r#type.as_ref())
            )
        })
        .collect();
    params.join(", ")
}

fn is_optional(reflection: &Reflection) -> bool {
    reflection
        .flags
        .as_ref()
        .and_then(|f| f.is_optional)
        .unwrap_or(false)
}

fn render_or_any(ty: Option<&TypeRef>) -> String {
    ty.map(render_type).unwrap_or_else(|| "any".to_string())
}

fn join(types: &[TypeRef], sep: &str, render: fn(&TypeRef) -> String) -> String {
    types.iter().map(render).collect::<Vec<_>>().join(sep)
}
