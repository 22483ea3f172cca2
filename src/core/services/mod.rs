pub mod identity_resolver;
pub mod key_parser;
pub mod presenter;
pub mod reconcile_engine;
