//! The library code for `blogfeed`, which builds a static blog's syndication
//! feed. The build runs in three steps:
//!
//! 1. Parsing articles from the content directory ([`crate::article`])
//! 2. Turning articles into feed entries ([`crate::feed`])
//! 3. Writing the entries to disk as an Atom document ([`crate::write`])
//!
//! The second step is the interesting one. Each entry carries a preview of
//! the article rather than the whole thing: the rendered HTML is cut right
//! before its fifth paragraph (see [`crate::nth`] for how the cut point is
//! found) and a link back to the article on the site is appended. Articles
//! with fewer paragraphs are syndicated in full.
//!
//! [`crate::build`] ties the steps together, driven by a [`config::Config`]
//! loaded from the project's `blogfeed.yaml`.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]

pub mod article;
pub mod build;
pub mod config;
pub mod feed;
pub mod markdown;
pub mod nth;
mod util;
pub mod write;
