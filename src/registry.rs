//! Open mapping from normalized content types to part handlers

use crate::error::{Result, SelectError};
use crate::selector::{flatten_children, resolve_alternative};
use crate::types::{NormalizedType, PartHandler};
use std::collections::HashMap;

/// Registry of the content types a selector knows how to handle.
///
/// Entries are only ever added; a key stays bound to at most one handler
/// for the lifetime of the registry.
#[derive(Debug, Clone, Default)]
pub struct HandlerRegistry {
    handlers: HashMap<NormalizedType, PartHandler>,
}

impl HandlerRegistry {
    /// Registry with no entries
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry seeded with the built-in leaf and container types
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut handlers = HashMap::new();

        for key in ["text/html", "text/plain", "message/delivery-status"] {
            handlers.insert(NormalizedType::from_normalized(key), PartHandler::Leaf);
        }
        for key in ["multipart/mixed", "multipart/related"] {
            handlers.insert(
                NormalizedType::from_normalized(key),
                PartHandler::Composite(flatten_children),
            );
        }
        handlers.insert(
            NormalizedType::from_normalized("multipart/alternative"),
            PartHandler::Composite(resolve_alternative),
        );

        Self { handlers }
    }

    /// Bind `key` to `handler`.
    ///
    /// Re-binding a key to the handler it already holds is a no-op;
    /// binding it to a different handler fails with
    /// [`SelectError::HandlerConflict`].
    pub fn bind(&mut self, key: NormalizedType, handler: PartHandler) -> Result<()> {
        match self.handlers.get(&key) {
            Some(existing) if *existing == handler => Ok(()),
            Some(_) => Err(SelectError::HandlerConflict(key)),
            None => {
                self.handlers.insert(key, handler);
                Ok(())
            }
        }
    }

    /// Handler bound to `key`, if any
    #[must_use]
    pub fn get(&self, key: &NormalizedType) -> Option<PartHandler> {
        self.handlers.get(key).copied()
    }

    /// Whether `key` has a handler
    #[must_use]
    pub fn contains(&self, key: &NormalizedType) -> bool {
        self.handlers.contains_key(key)
    }

    /// Number of registered types
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}
