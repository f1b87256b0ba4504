//! Store implementations: Postgres through sea-orm, and an in-memory one.

pub mod memory;
pub mod seaorm;

pub use memory::MemoryStore;
pub use seaorm::SeaOrmStore;
