pub mod file_config_store;
