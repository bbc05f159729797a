use globwalk::GlobWalkerBuilder;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Delete failure that was reported instead of propagated, so a batch
/// can keep going and still account for what it could not remove.
#[derive(Debug)]
pub struct DeleteFailure {
    pub path: PathBuf,
    pub reason: String,
}

/// Total size in bytes of all regular files under `dir`. Symbolic links are
/// not followed, so a cyclic link cannot recurse forever. Any unreadable
/// entry fails the whole sum; a partial total is worse than no total for
/// the mirror's equality check.
pub fn dir_size(dir: &Path) -> Result<u64> {
    let mut total = 0;
    let walker = GlobWalkerBuilder::new(dir, "**/*")
        .follow_links(false)
        .build()?;
    for entry in walker {
        let entry = entry?;
        if entry.file_type().is_file() {
            total += entry.metadata()?.len();
        }
    }
    return Ok(total);
}

/// Remove the file, symlink, or directory tree at `path`. Never fails the
/// caller: the outcome comes back as an optional failure record instead.
/// `silent` suppresses both the announcement and the failure report.
pub fn delete(path: &Path, silent: bool) -> Option<DeleteFailure> {
    if !silent {
        println!("deleting {}", path.display());
    }

    // symlink check first: is_file/is_dir follow the link
    let result = if path.is_symlink() || path.is_file() {
        fs::remove_file(path)
    } else if path.is_dir() {
        fs::remove_dir_all(path)
    } else {
        // already gone
        Ok(())
    };

    match result {
        Ok(()) => None,
        Err(err) => {
            let failure = DeleteFailure {
                path: path.to_path_buf(),
                reason: err.to_string(),
            };
            if !silent {
                eprintln!("failed to delete {}: {}", path.display(), failure.reason);
            }
            Some(failure)
        }
    }
}

/// Immediate child directories of `dir`, sorted for a stable visit order.
/// Symlinked directories are skipped, consistent with `dir_size`.
pub fn subdirectories(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut dirs = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            dirs.push(entry.path());
        }
    }
    dirs.sort();
    return Ok(dirs);
}
