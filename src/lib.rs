// Library surface for headless/integration tests and reuse.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod board;
pub mod config;
pub mod player;
pub mod runtime;
pub mod session;
pub mod timer;
