//! Product advisor backend.
//!
//! The heart of the crate is the facet, filter and sort engine in
//! [`services`]: it derives filter axes from a product snapshot, narrows the
//! snapshot with the user's selections and orders what remains. Around it sit
//! the static [`catalog`], an LLM-backed recommendation provider and the HTTP
//! [`api`].

pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;
