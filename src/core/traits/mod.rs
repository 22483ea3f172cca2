pub mod audit;
pub mod change_guard;
pub mod config_store;
pub mod importer;
pub mod key_store;
