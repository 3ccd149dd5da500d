pub mod books;

use libris_db::Database;
use libris_kernel::ModuleRegistry;

/// Register all project-specific modules with the registry
pub fn register_all(registry: &mut ModuleRegistry, db: &Database) {
    registry.register(books::create_module(db.clone()));
}
