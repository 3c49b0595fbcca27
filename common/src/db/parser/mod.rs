pub mod case_file;
pub mod solution;
pub mod summary;
