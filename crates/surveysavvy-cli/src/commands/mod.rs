//! Command implementations.

pub mod import;
pub mod init_db;
pub mod inspect;
pub mod list;

pub use self::import::{collect_pdfs, execute_import};
pub use self::init_db::execute_init_db;
pub use self::inspect::{execute_inspect, json_target};
pub use self::list::execute_list;

use crate::error::Result;
use std::fs;
use std::path::Path;

/// Create the directory holding the database file, if needed.
pub(crate) fn ensure_parent_dir(database: &Path) -> Result<()> {
    match database.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => Ok(fs::create_dir_all(parent)?),
        _ => Ok(()),
    }
}
