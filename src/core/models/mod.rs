pub mod audit_entry;
pub mod key_set;
pub mod outcome;
pub mod ssh_public_key;
