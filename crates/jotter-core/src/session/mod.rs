//! Session domain module.
//!
//! # Module Structure
//!
//! - `model`: `Session`, `BearerToken`, `SessionState`, `Credentials`
//! - `token_store`: `TokenStore` trait for session persistence

mod model;
mod token_store;

pub use model::{BearerToken, Credentials, Session, SessionState};
pub use token_store::TokenStore;
