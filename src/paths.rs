//! Lexical path helpers. Nothing here touches the filesystem.

use std::path::{Component, Path};

/// Path of `target` relative to `base`, with `/` separators.
///
/// A relative `target` is taken to be relative to `base` already. When the
/// two paths do not share a root the normalized `target` comes back whole.
pub fn relative_path(base: &Path, target: &Path) -> String {
    let target = path_clean::clean(base.join(target));
    let base = path_clean::clean(base);

    let base_parts: Vec<Component> = base.components().collect();
    let target_parts: Vec<Component> = target.components().collect();

    let common = base_parts
        .iter()
        .zip(&target_parts)
        .take_while(|(a, b)| a == b)
        .count();

    if base.has_root() != target.has_root() || (base.has_root() && common == 0) {
        return target.to_string_lossy().into_owned();
    }

    let mut parts: Vec<String> = Vec::new();
    parts.extend(std::iter::repeat("..".to_string()).take(base_parts.len() - common));
    parts.extend(
        target_parts[common..]
            .iter()
            .map(|c| c.as_os_str().to_string_lossy().into_owned()),
    );

    if parts.is_empty() {
        ".".to_string()
    } else {
        parts.join("/")
    }
}
