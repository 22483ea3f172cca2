pub mod config_key_set_store;
