//! Core traits, layered settings, and the module registry.

pub mod module;
pub mod registry;
pub mod settings;

pub use libris_db::{Database, Migration};
pub use module::{InitCtx, Module};
pub use registry::ModuleRegistry;
