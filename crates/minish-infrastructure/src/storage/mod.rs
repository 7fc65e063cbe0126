pub mod atomic_file;
pub mod counter_file;
pub mod history_file;

pub use atomic_file::AtomicFile;
pub use counter_file::FileCounterStore;
pub use history_file::FileHistoryLog;
