//! Filesystem layer for the GML project tools
//!
//! Provides POSIX-normalized paths, atomic writes, timestamped backups and
//! format-agnostic configuration loading.

pub mod backup;
pub mod config;
pub mod error;
pub mod io;
pub mod path;

pub use backup::{backup_stamp, create_backup, next_backup_path};
pub use config::{ConfigFormat, ConfigStore};
pub use error::{Error, Result};
pub use io::RobustnessConfig;
pub use path::{NormalizedPath, is_bare_identifier};
