pub mod books;

use catalog_db::Store;
use catalog_kernel::{settings::Settings, ModuleRegistry};

/// Register all project-specific modules with the registry
pub fn register_all(registry: &mut ModuleRegistry, store: &Store, settings: &Settings) {
    registry.register(books::create_module(
        store.clone(),
        settings.database.collection.clone(),
    ));
}
