pub mod models;
pub mod repo;

mod memory;
pub use memory::MemoryStore;

pub use models::{ExternalId, User};
pub use repo::{StoreError, UserStore};
