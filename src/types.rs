//! Core types for part selection

use crate::error::{Result, SelectError};
use crate::selector::Selector;
use mailparse::ParsedMail;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Registry key for a content type: lowercase `discrete/composite`,
/// parameters stripped
///
/// Two nodes with equal keys are treated identically by the selector,
/// whatever their bodies contain.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct NormalizedType(String);

impl NormalizedType {
    /// Parse a raw content-type value (e.g. `Text/HTML; charset=utf-8`)
    /// into its normalized form
    pub fn parse(raw: &str) -> Result<Self> {
        let essence = raw.split(';').next().unwrap_or(raw).trim();

        let Some((discrete, composite)) = essence.split_once('/') else {
            return Err(SelectError::MalformedContentType(raw.to_string()));
        };

        let discrete = discrete.trim();
        let composite = composite.trim();
        if discrete.is_empty()
            || composite.is_empty()
            || discrete.contains(char::is_whitespace)
            || composite.contains(char::is_whitespace)
            || composite.contains('/')
        {
            return Err(SelectError::MalformedContentType(raw.to_string()));
        }

        Ok(Self(format!(
            "{}/{}",
            discrete.to_lowercase(),
            composite.to_lowercase()
        )))
    }

    /// Build a key from a literal that is already in normalized form.
    /// Only used for the built-in seed set.
    pub(crate) fn from_normalized(key: &str) -> Self {
        Self(key.to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NormalizedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Resolver installed for a composite (container) content type.
///
/// Receives the selector so it can recurse into the node's children via
/// [`Selector::select`], the node itself, and the preference context
/// forwarded from the caller. Returns the resolved descendant parts.
pub type CompositeFn = for<'a> fn(
    &Selector,
    &'a ParsedMail<'a>,
    Preference<'_>,
) -> Result<Vec<&'a ParsedMail<'a>>>;

/// How the selector treats one registered content type
#[derive(Debug, Clone, Copy)]
pub enum PartHandler {
    /// Directly viewable node, returned as-is
    Leaf,

    /// Container node, resolved by recursing over its children
    Composite(CompositeFn),
}

impl PartialEq for PartHandler {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Leaf, Self::Leaf) => true,
            (Self::Composite(a), Self::Composite(b)) => std::ptr::fn_addr_eq(*a, *b),
            _ => false,
        }
    }
}

/// Input to a selection call: a single tree root or an ordered list of
/// sibling nodes
///
/// A single node is selected exactly like a one-element list, so a
/// non-multipart message yields its one part.
#[derive(Clone, Copy)]
pub enum PartInput<'a> {
    Node(&'a ParsedMail<'a>),
    Nodes(&'a [ParsedMail<'a>]),
}

impl<'a> From<&'a ParsedMail<'a>> for PartInput<'a> {
    fn from(node: &'a ParsedMail<'a>) -> Self {
        Self::Node(node)
    }
}

impl<'a> From<&'a [ParsedMail<'a>]> for PartInput<'a> {
    fn from(nodes: &'a [ParsedMail<'a>]) -> Self {
        Self::Nodes(nodes)
    }
}

impl<'a> From<&'a Vec<ParsedMail<'a>>> for PartInput<'a> {
    fn from(nodes: &'a Vec<ParsedMail<'a>>) -> Self {
        Self::Nodes(nodes)
    }
}

/// Ranking context forwarded through a traversal, consulted when an
/// alternative block has to pick among equivalent renditions
#[derive(Debug, Clone, Copy, Default)]
pub enum Preference<'a> {
    /// Use the selector's combined html + text lists as both tiers
    #[default]
    Default,

    /// Caller-supplied two-tier ranking: `preferred` wins outright,
    /// `acceptable` is only consulted when no preferred rendition exists
    Ranked {
        preferred: &'a [NormalizedType],
        acceptable: &'a [NormalizedType],
    },
}
