pub mod config_service;
pub mod local_fs;
pub mod logging;
pub mod paths;
pub mod storage;
pub mod trash_dir;

pub use crate::config_service::load_config;
pub use crate::local_fs::LocalFileSystem;
pub use crate::paths::MinishPaths;
pub use crate::storage::{FileCounterStore, FileHistoryLog};
pub use crate::trash_dir::DirTrashStore;
