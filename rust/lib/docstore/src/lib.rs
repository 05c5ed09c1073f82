pub mod error;
pub mod file;

pub use error::DocError;
pub use file::JsonFile;
