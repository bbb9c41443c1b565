//! Mapping of (language, theme | template) to template source paths.
//!
//! Layout under the content root:
//!
//! ```text
//! <root>/<lang>/themes/<theme>.<ext>
//! <root>/<lang>/bodies/<template>.<ext>
//! ```
//!
//! Resolution is pure path arithmetic; reading the file is up to the caller.

use std::path::PathBuf;

use super::error::{PreviewError, PreviewResult};

/// Which half of an email a template source provides
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TemplateKind {
    /// Outer HTML shell receiving `title` and `body`
    Theme,
    /// Inner message content
    Body,
}

impl TemplateKind {
    pub(crate) fn dir_name(self) -> &'static str {
        match self {
            TemplateKind::Theme => "themes",
            TemplateKind::Body => "bodies",
        }
    }
}

#[derive(Debug, Clone)]
pub struct TemplateResolver {
    root: PathBuf,
    extension: String,
}

impl TemplateResolver {
    pub fn new(root: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            extension: extension.into(),
        }
    }

    /// `<root>/<lang>/themes/<theme>.<ext>`
    pub fn resolve_theme(&self, lang: &str, theme: &str) -> PreviewResult<PathBuf> {
        self.resolve(TemplateKind::Theme, lang, theme)
    }

    /// `<root>/<lang>/bodies/<template>.<ext>`
    pub fn resolve_body(&self, lang: &str, template: &str) -> PreviewResult<PathBuf> {
        self.resolve(TemplateKind::Body, lang, template)
    }

    pub(crate) fn resolve(&self, kind: TemplateKind, lang: &str, name: &str) -> PreviewResult<PathBuf> {
        validate_segment(lang)?;
        validate_segment(name)?;

        Ok(self
            .root
            .join(lang)
            .join(kind.dir_name())
            .join(format!("{}.{}", name, self.extension)))
    }
}

/// Reject segments that could escape their directory once joined into a path.
pub(crate) fn validate_segment(segment: &str) -> PreviewResult<()> {
    let invalid = segment.is_empty()
        || segment == "."
        || segment == ".."
        || segment.contains(['/', '\\', '\0']);

    if invalid {
        return Err(PreviewError::InvalidSegment(segment.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> TemplateResolver {
        TemplateResolver::new("/srv/emails", "hbs")
    }

    #[test]
    fn test_resolve_theme() {
        let path = resolver().resolve_theme("en", "acme").unwrap();
        assert_eq!(path, PathBuf::from("/srv/emails/en/themes/acme.hbs"));
    }

    #[test]
    fn test_resolve_body() {
        let path = resolver().resolve_body("fr", "welcome").unwrap();
        assert_eq!(path, PathBuf::from("/srv/emails/fr/bodies/welcome.hbs"));
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let resolver = resolver();
        assert_eq!(
            resolver.resolve_body("en", "welcome").unwrap(),
            resolver.resolve_body("en", "welcome").unwrap()
        );
    }

    #[test]
    fn test_custom_extension() {
        let resolver = TemplateResolver::new("emails", "handlebars");
        let path = resolver.resolve_theme("en", "acme").unwrap();
        assert_eq!(path, PathBuf::from("emails/en/themes/acme.handlebars"));
    }

    #[test]
    fn test_rejects_traversal() {
        let resolver = resolver();
        for bad in ["..", ".", "", "../etc", "a/b", "a\\b", "nul\0"] {
            assert!(
                matches!(
                    resolver.resolve_theme("en", bad),
                    Err(PreviewError::InvalidSegment(_))
                ),
                "segment {:?} should be rejected",
                bad
            );
            assert!(matches!(
                resolver.resolve_body(bad, "welcome"),
                Err(PreviewError::InvalidSegment(_))
            ));
        }
    }

    #[test]
    fn test_dots_inside_names_are_allowed() {
        let path = resolver().resolve_body("en", "order.shipped").unwrap();
        assert_eq!(path, PathBuf::from("/srv/emails/en/bodies/order.shipped.hbs"));
    }
}
