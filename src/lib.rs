//! Pantry application library
//!
//! Wires the product catalog module onto the Pantry kernel and HTTP facade.

pub mod bootstrap;
pub mod modules;

pub use bootstrap::App;
pub use modules::products;
