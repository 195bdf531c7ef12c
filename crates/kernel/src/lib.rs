//! Core traits, layered settings, and the module registry for Pantry.

pub mod module;
pub mod registry;
pub mod settings;

pub use module::{InitCtx, Module, Schema};
pub use registry::ModuleRegistry;
