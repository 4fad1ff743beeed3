pub mod config_io;
pub mod storage;

pub use config_io::ConfigError;
pub use storage::{Storage, StorageError};
