pub mod file_change_guard;
