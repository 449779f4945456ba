//! Template registry
//!
//! Provides [`TemplateRegistry`], the closed set of templates a playground
//! selector can choose from.

use crate::builtin;
use crate::template::ExampleTemplate;
use std::collections::BTreeMap;

/// Registry of example templates keyed by name
///
/// Populated at startup and treated as immutable once handed to a
/// playground. Iteration is sorted by name so selector options are stable.
#[derive(Debug, Default, Clone)]
pub struct TemplateRegistry {
    templates: BTreeMap<String, ExampleTemplate>,
}

impl TemplateRegistry {
    /// Create new empty registry
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            templates: BTreeMap::new(),
        }
    }

    /// Create registry with the built-in templates
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for template in builtin::all() {
            registry.register(template);
        }
        registry
    }

    /// Register a template, replacing any template with the same name
    ///
    /// Returns the replaced template, if any.
    pub fn register(&mut self, template: ExampleTemplate) -> Option<ExampleTemplate> {
        self.templates.insert(template.name().to_string(), template)
    }

    /// Register every template from an iterator
    pub fn extend(&mut self, templates: impl IntoIterator<Item = ExampleTemplate>) {
        for template in templates {
            self.register(template);
        }
    }

    /// Look up a template by name
    #[inline]
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ExampleTemplate> {
        self.templates.get(name)
    }

    /// Check if template exists
    #[inline]
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }

    /// Remove template
    #[inline]
    pub fn remove(&mut self, name: &str) -> Option<ExampleTemplate> {
        self.templates.remove(name)
    }

    /// List all template names, sorted
    #[inline]
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.templates.keys().map(String::as_str).collect()
    }

    /// Get number of registered templates
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Check if registry is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Iterate over templates in name order
    pub fn iter(&self) -> impl Iterator<Item = &ExampleTemplate> {
        self.templates.values()
    }
}

impl FromIterator<ExampleTemplate> for TemplateRegistry {
    fn from_iter<I: IntoIterator<Item = ExampleTemplate>>(iter: I) -> Self {
        let mut registry = Self::new();
        registry.extend(iter);
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template(name: &str, structure: &str) -> ExampleTemplate {
        ExampleTemplate::new(name, structure, "", "").unwrap()
    }

    #[test]
    fn registry_new_empty() {
        let registry = TemplateRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn registry_with_builtins() {
        let registry = TemplateRegistry::with_builtins();
        assert_eq!(registry.len(), 4);
        assert!(registry.contains("card"));
        assert!(registry.contains("calculator"));
        assert!(registry.contains("todo"));
        assert!(registry.contains("clock"));
    }

    #[test]
    fn registry_register_replaces() {
        let mut registry = TemplateRegistry::new();
        assert!(registry.register(template("custom", "<p>one</p>")).is_none());

        let replaced = registry.register(template("custom", "<p>two</p>"));
        assert_eq!(replaced.unwrap().structure(), "<p>one</p>");
        assert_eq!(registry.get("custom").unwrap().structure(), "<p>two</p>");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn registry_remove() {
        let mut registry = TemplateRegistry::with_builtins();
        assert!(registry.remove("clock").is_some());
        assert!(!registry.contains("clock"));
        assert!(registry.remove("clock").is_none());
    }

    #[test]
    fn registry_get_missing() {
        let registry = TemplateRegistry::with_builtins();
        assert!(registry.get("nonexistent").is_none());
    }

    #[test]
    fn registry_names_sorted() {
        let registry: TemplateRegistry = ["zeta", "alpha", "mid"]
            .into_iter()
            .map(|name| template(name, ""))
            .collect();
        assert_eq!(registry.names(), vec!["alpha", "mid", "zeta"]);

        let iterated: Vec<&str> = registry.iter().map(ExampleTemplate::name).collect();
        assert_eq!(iterated, registry.names());
    }
}
