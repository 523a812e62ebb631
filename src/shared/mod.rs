pub mod constants;
pub mod file_type;
pub mod test_helpers;
pub mod types;
pub mod validation;
