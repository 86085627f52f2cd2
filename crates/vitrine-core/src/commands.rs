//! Markup-triggered commands
//!
//! Controls in the page do not call controllers directly. They carry a
//! `data-action` attribute naming a command, and the [`CommandRegistry`]
//! resolves that name to a [`PageCommand`] the page knows how to run. Only
//! registered names resolve; anything else is ignored.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::dom::{Document, ElementId};
use crate::Error;

/// Attribute that binds a control to a command
pub const ACTION_ATTRIBUTE: &str = "data-action";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliderCommand {
    Next,
    Previous,
    /// Requested slide; out-of-range values are resolved by the slider
    GoTo(i64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageCommand {
    Slider(SliderCommand),
    ToggleTheme,
}

impl fmt::Display for PageCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageCommand::Slider(SliderCommand::Next) => f.write_str("slider:next"),
            PageCommand::Slider(SliderCommand::Previous) => f.write_str("slider:prev"),
            PageCommand::Slider(SliderCommand::GoTo(index)) => write!(f, "slider:goto:{index}"),
            PageCommand::ToggleTheme => f.write_str("theme:toggle"),
        }
    }
}

impl FromStr for PageCommand {
    type Err = Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        let parts: Vec<&str> = s.trim().split(':').collect();
        match parts.as_slice() {
            ["slider", "next"] => Ok(PageCommand::Slider(SliderCommand::Next)),
            ["slider", "prev"] => Ok(PageCommand::Slider(SliderCommand::Previous)),
            ["slider", "goto", index] => index
                .parse()
                .map(|i| PageCommand::Slider(SliderCommand::GoTo(i)))
                .map_err(|_| Error::Other(format!("Invalid slide index in {s:?}"))),
            ["theme", "toggle"] => Ok(PageCommand::ToggleTheme),
            _ => Err(Error::Other(format!("Unknown command {s:?}"))),
        }
    }
}

/// Command namespaces the markup layer is allowed to invoke
#[derive(Debug, Clone, Default)]
pub struct CommandRegistry {
    namespaces: BTreeSet<String>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allow commands under `namespace` (e.g. "slider")
    pub fn register(&mut self, namespace: &str) {
        self.namespaces.insert(namespace.to_string());
    }

    pub fn unregister(&mut self, namespace: &str) {
        self.namespaces.remove(namespace);
    }

    pub fn is_registered(&self, namespace: &str) -> bool {
        self.namespaces.contains(namespace)
    }

    /// Resolve a command name if its namespace is registered
    pub fn resolve(&self, name: &str) -> Option<PageCommand> {
        let namespace = name.split(':').next()?;
        if !self.is_registered(namespace) {
            return None;
        }
        name.parse().ok()
    }

    /// Resolve the command bound to a clicked element
    pub fn resolve_element(&self, doc: &Document, target: ElementId) -> Option<PageCommand> {
        self.resolve(doc.attr(target, ACTION_ATTRIBUTE)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        for name in ["slider:next", "slider:prev", "slider:goto:3", "theme:toggle"] {
            let command: PageCommand = name.parse().unwrap();
            assert_eq!(command.to_string(), name);
        }
        assert!("slider:goto:x".parse::<PageCommand>().is_err());
        assert_eq!(
            "slider:goto:-1".parse::<PageCommand>().unwrap(),
            PageCommand::Slider(SliderCommand::GoTo(-1))
        );
        assert!("window:close".parse::<PageCommand>().is_err());
    }

    #[test]
    fn test_only_registered_namespaces_resolve() {
        let mut registry = CommandRegistry::new();
        assert_eq!(registry.resolve("slider:next"), None);

        registry.register("slider");
        assert_eq!(
            registry.resolve("slider:goto:1"),
            Some(PageCommand::Slider(SliderCommand::GoTo(1)))
        );
        assert_eq!(registry.resolve("theme:toggle"), None);

        registry.unregister("slider");
        assert_eq!(registry.resolve("slider:next"), None);
    }

    #[test]
    fn test_resolve_element() {
        let mut doc = Document::new(100.0);
        let button = doc.create_element("button");
        doc.append_child(doc.body(), button);
        doc.set_attr(button, ACTION_ATTRIBUTE, "theme:toggle");

        let mut registry = CommandRegistry::new();
        registry.register("theme");
        assert_eq!(registry.resolve_element(&doc, button), Some(PageCommand::ToggleTheme));
        assert_eq!(registry.resolve_element(&doc, doc.body()), None);
    }
}
