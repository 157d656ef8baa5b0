pub mod csv;
pub mod json_launcher;
pub mod keys;
