pub mod auth;
pub mod firebase;
pub mod memory;
pub mod models;
pub mod store;

pub use firebase::FirebaseStore;
pub use memory::MemoryStore;
pub use store::Store;
