//! Localizable field labels and the collaborator that resolves them

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A label that can be resolved to localized text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Localizable {
    /// Localization key looked up in a message source
    #[serde(default)]
    pub code:    Option<String>,
    /// Text used when the key has no translation
    #[serde(default, rename = "default")]
    pub default: Option<String>,
}

impl Localizable {
    /// A label identified by a localization key
    pub fn code(code: impl Into<String>) -> Self {
        Self {
            code:    Some(code.into()),
            default: None,
        }
    }

    /// A plain label with no localization key
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            code:    None,
            default: Some(text.into()),
        }
    }

    /// Attach default text to a keyed label
    #[must_use]
    pub fn with_default(mut self, text: impl Into<String>) -> Self {
        self.default = Some(text.into());
        self
    }
}

/// Resolves localization keys to text
pub trait Localizer: Send + Sync {
    /// Text for `code`, if the message source knows it
    fn message(&self, code: &str) -> Option<String>;

    /// Resolve a label: the keyed message first, then the label's default text
    fn localize(&self, label: &Localizable) -> Option<String> {
        label
            .code
            .as_deref()
            .and_then(|code| self.message(code))
            .or_else(|| label.default.clone())
    }
}

/// A localizer without a message source: only default texts resolve
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLocalization;

impl Localizer for NoLocalization {
    fn message(&self, _code: &str) -> Option<String> { None }
}

/// In-memory message catalog keyed by localization code
#[derive(Debug, Clone, Default)]
pub struct MessageCatalog {
    messages: HashMap<String, String>,
}

impl MessageCatalog {
    /// Create an empty catalog
    pub fn new() -> Self { Self::default() }

    /// Add a message
    #[must_use]
    pub fn with_message(mut self, code: impl Into<String>, text: impl Into<String>) -> Self {
        self.messages.insert(code.into(), text.into());
        self
    }

    /// Number of messages
    pub fn len(&self) -> usize { self.messages.len() }

    /// True when the catalog has no messages
    pub fn is_empty(&self) -> bool { self.messages.is_empty() }
}

impl From<HashMap<String, String>> for MessageCatalog {
    fn from(messages: HashMap<String, String>) -> Self { Self { messages } }
}

impl Localizer for MessageCatalog {
    fn message(&self, code: &str) -> Option<String> { self.messages.get(code).cloned() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_prefers_keyed_message() {
        let catalog = MessageCatalog::new().with_message("person.name", "Full name");
        let label = Localizable::code("person.name").with_default("Name");
        assert_eq!(catalog.localize(&label), Some("Full name".to_string()));
    }

    #[test]
    fn test_default_text_fallback() {
        let catalog = MessageCatalog::new();
        let label = Localizable::code("person.name").with_default("Name");
        assert_eq!(catalog.localize(&label), Some("Name".to_string()));
        assert_eq!(NoLocalization.localize(&Localizable::code("missing")), None);
        assert_eq!(
            NoLocalization.localize(&Localizable::text("Age")),
            Some("Age".to_string())
        );
    }
}
