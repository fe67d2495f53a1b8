mod file_system;
#[cfg(feature = "os")]
mod os;

pub use crate::file_system::{DirEntryKind, FileSystem};
#[cfg(feature = "os")]
pub use os::OsFileSystem;
