//! Token store implementations.

mod file_token_store;
mod memory_token_store;

pub use file_token_store::FileTokenStore;
pub use memory_token_store::InMemoryTokenStore;
