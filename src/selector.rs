//! Selection of viewable parts from a parsed MIME tree

use crate::error::Result;
use crate::registry::HandlerRegistry;
use crate::types::{NormalizedType, PartHandler, PartInput, Preference};
use mailparse::ParsedMail;
use std::slice;
use tracing::{debug, trace};

/// Picks the parts of a MIME tree a mail client would display.
///
/// A selector owns its handler registry and its two preference lists;
/// independent instances share no state. [`Selector::new`] seeds the
/// stock set of viewable and container types, and the `register_*`
/// calls teach it new ones at runtime.
#[derive(Debug, Clone)]
pub struct Selector {
    registry: HandlerRegistry,
    html_types: Vec<NormalizedType>,
    text_types: Vec<NormalizedType>,
}

impl Default for Selector {
    fn default() -> Self {
        Self::new()
    }
}

impl Selector {
    /// Selector with the built-in types registered: `text/html`,
    /// `text/plain` and `message/delivery-status` as viewable leaves,
    /// `multipart/mixed`, `multipart/related` and `multipart/alternative`
    /// as containers
    #[must_use]
    pub fn new() -> Self {
        Self {
            registry: HandlerRegistry::with_defaults(),
            html_types: vec![NormalizedType::from_normalized("text/html")],
            text_types: vec![
                NormalizedType::from_normalized("text/plain"),
                NormalizedType::from_normalized("message/delivery-status"),
            ],
        }
    }

    /// Selector with nothing registered; every part is invisible until
    /// types are taught via the `register_*` calls
    #[must_use]
    pub fn empty() -> Self {
        Self {
            registry: HandlerRegistry::new(),
            html_types: Vec::new(),
            text_types: Vec::new(),
        }
    }

    /// The traversal primitive behind the part accessors.
    ///
    /// Walks `input` in order and collects every node whose content type
    /// resolves to a viewable part under `prefs`, depth-first and
    /// left-to-right. Nodes with no registered handler are skipped;
    /// a content type that cannot be normalized aborts the whole call.
    /// Composite resolvers recurse through this same entry point.
    pub fn select<'a>(
        &self,
        input: impl Into<PartInput<'a>>,
        prefs: Preference<'_>,
    ) -> Result<Vec<&'a ParsedMail<'a>>> {
        let nodes = match input.into() {
            PartInput::Node(node) => slice::from_ref(node),
            PartInput::Nodes(nodes) => nodes,
        };

        let mut parts = Vec::new();
        for node in nodes {
            let key = NormalizedType::parse(&node.ctype.mimetype)?;
            match self.registry.get(&key) {
                Some(PartHandler::Leaf) => parts.push(node),
                Some(PartHandler::Composite(resolve)) => {
                    parts.extend(resolve(self, node, prefs)?);
                }
                None => trace!("No handler for {}, part is not viewable", key),
            }
        }
        Ok(parts)
    }

    /// Every viewable part of the tree, in tree order.
    ///
    /// Alternative blocks keep all renditions that match any known
    /// viewable type, so callers get the full set to choose from.
    pub fn viewable_parts<'a>(
        &self,
        input: impl Into<PartInput<'a>>,
    ) -> Result<Vec<&'a ParsedMail<'a>>> {
        let parts = self.select(input, Preference::Default)?;
        debug!("Selected {} viewable parts", parts.len());
        Ok(parts)
    }

    /// The HTML rendition of the tree: html-typed parts everywhere they
    /// exist, with alternative blocks resolved in favor of html.
    ///
    /// The result is restricted to the html types, so an alternative
    /// block whose only rendition is text contributes nothing here even
    /// though that rendition won the in-block resolution. Callers that
    /// want the text fallback use [`Selector::viewable_parts`] or rank
    /// explicitly via [`Selector::select`].
    pub fn html_parts<'a>(
        &self,
        input: impl Into<PartInput<'a>>,
    ) -> Result<Vec<&'a ParsedMail<'a>>> {
        let prefs = Preference::Ranked {
            preferred: &self.html_types,
            acceptable: &self.text_types,
        };
        let parts = self.select(input, prefs)?;
        let parts = filter_by_type(&parts, &self.html_types)?;
        debug!("Selected {} html parts", parts.len());
        Ok(parts)
    }

    /// The text rendition of the tree; mirror image of
    /// [`Selector::html_parts`]
    pub fn text_parts<'a>(
        &self,
        input: impl Into<PartInput<'a>>,
    ) -> Result<Vec<&'a ParsedMail<'a>>> {
        let prefs = Preference::Ranked {
            preferred: &self.text_types,
            acceptable: &self.html_types,
        };
        let parts = self.select(input, prefs)?;
        let parts = filter_by_type(&parts, &self.text_types)?;
        debug!("Selected {} text parts", parts.len());
        Ok(parts)
    }

    /// First viewable part in tree order, for callers that want one
    /// representative part rather than all of them
    pub fn first_viewable_part<'a>(
        &self,
        input: impl Into<PartInput<'a>>,
    ) -> Result<Option<&'a ParsedMail<'a>>> {
        Ok(self.viewable_parts(input)?.into_iter().next())
    }

    /// Teach the selector a new content type.
    ///
    /// `content_type` is normalized before registration, so case and
    /// parameters do not matter. Registering a type twice with the same
    /// handler is a no-op; registering it with a different handler fails
    /// with [`crate::SelectError::HandlerConflict`]. New registrations
    /// take effect for all subsequent traversals.
    pub fn register_type(&mut self, content_type: &str, handler: PartHandler) -> Result<()> {
        let key = NormalizedType::parse(content_type)?;
        self.registry.bind(key, handler)
    }

    /// Register `content_type` and rank it as an html rendition.
    ///
    /// Already-ranked types are not appended twice.
    pub fn register_html_type(&mut self, content_type: &str, handler: PartHandler) -> Result<()> {
        let key = NormalizedType::parse(content_type)?;
        self.registry.bind(key.clone(), handler)?;
        push_unique(&mut self.html_types, key);
        Ok(())
    }

    /// Register `content_type` and rank it as a text rendition
    pub fn register_text_type(&mut self, content_type: &str, handler: PartHandler) -> Result<()> {
        let key = NormalizedType::parse(content_type)?;
        self.registry.bind(key.clone(), handler)?;
        push_unique(&mut self.text_types, key);
        Ok(())
    }

    /// Types ranked as html renditions, in registration order
    #[must_use]
    pub fn html_types(&self) -> &[NormalizedType] {
        &self.html_types
    }

    /// Types ranked as text renditions, in registration order
    #[must_use]
    pub fn text_types(&self) -> &[NormalizedType] {
        &self.text_types
    }

    /// The handler registry, for lookups
    #[must_use]
    pub const fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }

    /// Both preference lists merged, html first, duplicates removed
    fn default_union(&self) -> Vec<NormalizedType> {
        let mut union = self.html_types.clone();
        for key in &self.text_types {
            if !union.contains(key) {
                union.push(key.clone());
            }
        }
        union
    }
}

/// Resolver for `multipart/mixed` and `multipart/related`: every child
/// is an independent piece of content (body next to inline images,
/// attachments next to the body), so all viewable children surface.
pub fn flatten_children<'a>(
    selector: &Selector,
    node: &'a ParsedMail<'a>,
    prefs: Preference<'_>,
) -> Result<Vec<&'a ParsedMail<'a>>> {
    selector.select(&node.subparts, prefs)
}

/// Resolver for `multipart/alternative`: children are equivalent
/// renditions of one body, so at most one tier of them surfaces.
///
/// Children are resolved first, which reduces nested containers to
/// their own viable parts before ranking happens. Candidates matching
/// the preferred tier win outright and the acceptable tier is never
/// consulted; otherwise acceptable matches are kept. When neither tier
/// matches, the whole block yields nothing, even if it had viewable
/// candidates: the caller expressed no interest in any offered
/// rendition.
pub fn resolve_alternative<'a>(
    selector: &Selector,
    node: &'a ParsedMail<'a>,
    prefs: Preference<'_>,
) -> Result<Vec<&'a ParsedMail<'a>>> {
    let candidates = selector.select(&node.subparts, prefs)?;

    let union;
    let (preferred, acceptable) = match prefs {
        Preference::Ranked {
            preferred,
            acceptable,
        } => (preferred, acceptable),
        Preference::Default => {
            union = selector.default_union();
            (union.as_slice(), union.as_slice())
        }
    };

    let picked = filter_by_type(&candidates, preferred)?;
    if !picked.is_empty() {
        return Ok(picked);
    }

    let picked = filter_by_type(&candidates, acceptable)?;
    if picked.is_empty() {
        trace!("Alternative block dropped, no rendition matched either tier");
    }
    Ok(picked)
}

/// Keep the parts whose normalized type appears in `allowed`,
/// preserving order
fn filter_by_type<'a>(
    parts: &[&'a ParsedMail<'a>],
    allowed: &[NormalizedType],
) -> Result<Vec<&'a ParsedMail<'a>>> {
    let mut kept = Vec::new();
    for part in parts {
        if allowed.contains(&NormalizedType::parse(&part.ctype.mimetype)?) {
            kept.push(*part);
        }
    }
    Ok(kept)
}

fn push_unique(list: &mut Vec<NormalizedType>, key: NormalizedType) {
    if !list.contains(&key) {
        list.push(key);
    }
}
