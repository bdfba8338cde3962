//! Backend interaction for Jotter.
//!
//! Currently a single transport: [`HttpNotesApi`], the REST client for the
//! notes backend.

pub mod http_api;

pub use http_api::HttpNotesApi;
