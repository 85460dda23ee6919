pub mod error;
pub mod preprocess;
pub mod status;
