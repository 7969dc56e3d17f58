//! Writing generated files and preparing their directories.

use crate::error::{CodegenError, Result};
use std::fs::{DirBuilder, OpenOptions};
use std::io::Write;
use std::path::Path;

/// Extension of every generated source file
pub const GO_EXT: &str = "go";

/// Create `dir` and any missing parents. Existing directories are fine.
///
/// # Errors
///
/// Returns [`CodegenError::OutputPrep`] if the filesystem refuses.
pub fn prepare_output_dir(dir: &Path) -> Result<()> {
    let mut builder = DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o777);
    }
    builder.create(dir).map_err(|source| CodegenError::OutputPrep {
        path: dir.to_path_buf(),
        source,
    })
}

/// Create or truncate `path` and write `content` to it.
///
/// New files get mode `0666` (before umask). There is no atomic replace;
/// a failed write can leave a truncated file behind, which the next run
/// overwrites.
///
/// # Errors
///
/// Returns [`CodegenError::Write`] on any I/O failure.
pub fn write_generated_file(path: &Path, content: &[u8]) -> Result<()> {
    let write_err = |source| CodegenError::Write {
        path: path.to_path_buf(),
        source,
    };
    let mut opts = OpenOptions::new();
    opts.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        opts.mode(0o666);
    }
    let mut file = opts.open(path).map_err(write_err)?;
    file.write_all(content).map_err(write_err)?;
    Ok(())
}
