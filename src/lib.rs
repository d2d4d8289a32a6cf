// Enforce at crate level
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! Viewable MIME Part Selection
//!
//! A small, strongly-typed layer that decides which parts of a parsed
//! MIME tree a mail client should display, and which rendition wins
//! when a message offers several equivalent ones
//! (`multipart/alternative`).
//!
//! # Features
//!
//! - Depth-first selection over [`mailparse`] trees, without touching
//!   bodies or encodings
//! - Two-tier preferred/acceptable ranking for alternative blocks
//! - Html-first and text-first accessors for the common client views
//! - Open handler registry: new leaf and container types can be taught
//!   at runtime
//! - Unrecognized content types are invisible, never an error
//!
//! # Example
//!
//! ```rust
//! use mime_select::Selector;
//!
//! let raw = b"Content-Type: multipart/alternative; boundary=\"sep\"\r\n\r\n\
//!     --sep\r\nContent-Type: text/plain\r\n\r\nplain body\r\n\
//!     --sep\r\nContent-Type: text/html\r\n\r\n<p>html body</p>\r\n\
//!     --sep--\r\n";
//! let message = mailparse::parse_mail(raw).unwrap();
//!
//! let selector = Selector::new();
//!
//! let all = selector.viewable_parts(&message).unwrap();
//! assert_eq!(all.len(), 2);
//!
//! let html = selector.html_parts(&message).unwrap();
//! assert_eq!(html.len(), 1);
//! assert_eq!(html[0].ctype.mimetype, "text/html");
//! ```

mod error;
mod registry;
mod selector;
mod types;

pub use error::{Result, SelectError};
pub use registry::HandlerRegistry;
pub use selector::{Selector, flatten_children, resolve_alternative};
pub use types::*;
