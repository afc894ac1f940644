//! Row decorations (icons).

use std::borrow::Cow;
use std::sync::Arc;

use crate::node::Node;

/// Reference to an image asset, resolved by the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssetRef(Cow<'static, str>);

impl AssetRef {
    pub const fn from_static(path: &'static str) -> Self {
        Self(Cow::Borrowed(path))
    }

    pub fn new(path: impl Into<String>) -> Self {
        Self(Cow::Owned(path.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AssetRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Maps a decoration tag to an asset. Unknown tags resolve to `None`.
pub trait DecorationResolver: Send + Sync {
    fn resolve(&self, tag: &str) -> Option<AssetRef>;
}

/// Caller-supplied per-node decoration, used instead of tag resolution.
pub type DecorateFn = Arc<dyn Fn(&Node) -> Option<AssetRef> + Send + Sync>;

/// Tag -> asset table used by [`BuiltinDecorations`].
const ASSETS: &[(&str, &str)] = &[
    ("text", "icons/text.png"),
    ("image", "icons/image.png"),
    ("button", "icons/button.png"),
    ("input", "icons/input.png"),
    ("container", "icons/container.png"),
    ("row", "icons/row.png"),
    ("column", "icons/column.png"),
    ("stack", "icons/stack.png"),
    ("scroll", "icons/scroll.png"),
    ("list", "icons/list.png"),
    ("padding", "icons/padding.png"),
    ("align", "icons/align.png"),
    ("gesture", "icons/gesture.png"),
    ("animation", "icons/animation.png"),
    ("theme", "icons/theme.png"),
    ("root", "icons/root.png"),
];

/// The fixed tag mapping.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinDecorations;

impl DecorationResolver for BuiltinDecorations {
    fn resolve(&self, tag: &str) -> Option<AssetRef> {
        ASSETS
            .iter()
            .find(|(t, _)| *t == tag)
            .map(|(_, path)| AssetRef::from_static(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_known_and_unknown_tags() {
        assert_eq!(
            BuiltinDecorations.resolve("text"),
            Some(AssetRef::from_static("icons/text.png"))
        );
        assert_eq!(BuiltinDecorations.resolve("Text"), None);
        assert_eq!(BuiltinDecorations.resolve("widget"), None);
    }

    #[test]
    fn test_each_tag_maps_once() {
        let mut tags: Vec<_> = ASSETS.iter().map(|(t, _)| *t).collect();
        tags.sort_unstable();
        tags.dedup();
        assert_eq!(tags.len(), ASSETS.len());
    }
}
