pub mod add;
pub mod audit_helpers;
pub mod block;
pub mod delete;
pub mod import;
pub mod init;
pub mod list;
pub mod log;
pub mod report_helpers;
