//! Example template type

use crate::error::TemplateError;
use serde::Serialize;

/// A named, read-only triple of playground fragments
///
/// Selecting a template overwrites all three source buffers at once, so the
/// fragments are only ever handed out together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExampleTemplate {
    name: String,
    title: Option<String>,
    structure: String,
    presentation: String,
    behavior: String,
}

impl ExampleTemplate {
    /// Create a template from its three fragments
    ///
    /// # Errors
    /// Returns [`TemplateError::InvalidName`] if `name` is not a valid key.
    pub fn new(
        name: impl Into<String>,
        structure: impl Into<String>,
        presentation: impl Into<String>,
        behavior: impl Into<String>,
    ) -> Result<Self, TemplateError> {
        let name = name.into();
        validate_name(&name)?;
        Ok(Self {
            name,
            title: None,
            structure: structure.into(),
            presentation: presentation.into(),
            behavior: behavior.into(),
        })
    }

    /// Attach a human-readable title for selector controls
    #[inline]
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Unique registry key
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Display title, falling back to the name
    #[inline]
    #[must_use]
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.name)
    }

    /// Structure (markup) fragment
    #[inline]
    #[must_use]
    pub fn structure(&self) -> &str {
        &self.structure
    }

    /// Presentation (style) fragment
    #[inline]
    #[must_use]
    pub fn presentation(&self) -> &str {
        &self.presentation
    }

    /// Behavior (script) fragment
    #[inline]
    #[must_use]
    pub fn behavior(&self) -> &str {
        &self.behavior
    }
}

/// Check that a template name is a usable registry key
///
/// Names are non-empty and limited to `[a-z0-9_-]` so they can double as
/// directory names and selector option values.
///
/// # Errors
/// Returns [`TemplateError::InvalidName`] otherwise.
pub fn validate_name(name: &str) -> Result<(), TemplateError> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(TemplateError::InvalidName(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn template_accessors() {
        let template = ExampleTemplate::new("demo", "<p>hi</p>", "p{}", "1+1").unwrap();
        assert_eq!(template.name(), "demo");
        assert_eq!(template.structure(), "<p>hi</p>");
        assert_eq!(template.presentation(), "p{}");
        assert_eq!(template.behavior(), "1+1");
    }

    #[test]
    fn title_falls_back_to_name() {
        let template = ExampleTemplate::new("demo", "", "", "").unwrap();
        assert_eq!(template.title(), "demo");

        let titled = template.with_title("Demo Card");
        assert_eq!(titled.title(), "Demo Card");
    }

    #[test]
    fn rejects_invalid_names() {
        assert!(ExampleTemplate::new("", "", "", "").is_err());
        assert!(ExampleTemplate::new("Card", "", "", "").is_err());
        assert!(ExampleTemplate::new("my card", "", "", "").is_err());
        assert!(ExampleTemplate::new("../etc", "", "", "").is_err());
    }

    #[test]
    fn accepts_dashes_and_digits() {
        assert!(validate_name("todo-2").is_ok());
        assert!(validate_name("snake_case").is_ok());
    }

    proptest! {
        #[test]
        fn prop_valid_names_round_trip(name in "[a-z0-9_-]{1,24}") {
            let template = ExampleTemplate::new(name.clone(), "", "", "").unwrap();
            prop_assert_eq!(template.name(), name.as_str());
        }

        #[test]
        fn prop_uppercase_is_rejected(name in "[a-z]{0,8}[A-Z][a-z]{0,8}") {
            prop_assert!(validate_name(&name).is_err());
        }
    }
}
