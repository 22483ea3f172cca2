pub mod audit;
pub mod config_stores;
pub mod guards;
pub mod importers;
pub mod key_set_stores;
