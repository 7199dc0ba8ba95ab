//! Domain types and pure logic for the taskdesk client.
//!
//! No I/O lives here: wire models, form inputs and their validation,
//! server-side filters, facet extraction and client-side text matching.

pub mod error;
pub mod facets;
pub mod filter;
pub mod input;
pub mod models;
pub mod text_match;
pub mod types;
pub mod validation;
