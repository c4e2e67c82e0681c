pub mod app_config;
pub mod memory_repo;
pub mod seed;

pub use app_config::{BusinessRules, Config};
pub use memory_repo::InMemoryRepository;
pub use seed::MemoryStore;
