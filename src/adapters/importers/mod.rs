pub mod file_key_provider;
pub mod http_key_provider;
