//! State of the active workspace connection.
//!
//! Currently just the status cache; the session in `crate::session` owns one
//! per workspace.

mod cache;
#[cfg(test)]
mod tests;

pub use cache::StatusCache;
