//! In-memory backend for the Waypoint user store.
//!
//! Quest state lives for the lifetime of the process only. Each user record
//! sits behind its own async mutex, so updates to one user are serialised
//! while different users never wait on each other.

mod store;

pub use store::MemoryStore;

#[cfg(test)]
mod tests;
