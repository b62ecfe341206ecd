/// Filesystem adapters for file I/O operations
mod file_writer;
mod recently_viewed_file;

pub use file_writer::{FileSystemWriter, StdoutPresenter};
pub use recently_viewed_file::JsonFileRecentlyViewedStore;
