pub mod products;

use pantry_kernel::ModuleRegistry;

/// Register all project-specific modules with the registry
pub fn register_all(registry: &mut ModuleRegistry, products: products::SharedRepository) {
    registry.register(products::create_module(products));
}
