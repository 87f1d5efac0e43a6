//! Blockfall (workspace facade crate).
//!
//! Re-exports the workspace crates under short paths
//! (`blockfall::{core,input,store,term,types}`) and hosts the runner's
//! environment configuration. The implementation lives in dedicated crates
//! under `crates/`.

pub mod config;

pub use blockfall_core as core;
pub use blockfall_input as input;
pub use blockfall_store as store;
pub use blockfall_term as term;
pub use blockfall_types as types;

pub use config::AppConfig;
