//! LMDB environment setup.

use std::path::{Path, PathBuf};

use heed::{Env, EnvFlags, EnvOpenOptions};

use crate::LmdbError;

/// Wraps the open LMDB environment backing a single store file.
pub struct LmdbEnvironment {
    env: Env,
    path: PathBuf,
}

impl LmdbEnvironment {
    /// Open or create a single-file LMDB environment at `path`.
    ///
    /// The data file is created with mode 0600; LMDB keeps its lock file at
    /// `<path>-lock`. Missing parent directories are created.
    pub fn open(
        path: &Path,
        max_dbs: u32,
        max_readers: u32,
        map_size: usize,
    ) -> Result<Self, LmdbError> {
        let path = if path.is_relative() {
            std::env::current_dir()?.join(path)
        } else {
            path.to_path_buf()
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        if !path.exists() {
            create_store_file(&path)?;
        }

        let mut options = EnvOpenOptions::new();
        options
            .map_size(map_size)
            .max_dbs(max_dbs)
            .max_readers(max_readers);
        // SAFETY: the file is only opened once per process through this type
        // and nothing else maps it.
        let env = unsafe {
            options.flags(EnvFlags::NO_SUB_DIR);
            options.open(&path)?
        };

        tracing::debug!(path = %path.display(), map_size, max_readers, "opened LMDB environment");
        Ok(Self { env, path })
    }

    pub fn env(&self) -> &Env {
        &self.env
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Close the environment and block until LMDB has released the file.
    pub fn close(self) {
        let path = self.path;
        self.env.prepare_for_closing().wait();
        tracing::debug!(path = %path.display(), "closed LMDB environment");
    }
}

/// Create an empty, owner-only data file; LMDB initializes it on open.
fn create_store_file(path: &Path) -> std::io::Result<()> {
    let mut options = std::fs::OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    options.open(path).map(drop)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_single_file_with_owner_only_permissions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("accounts.db");
        let env = LmdbEnvironment::open(&path, 1, 126, 1 << 20).unwrap();

        assert!(path.is_file());
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = std::fs::metadata(&path).unwrap().permissions().mode();
            assert_eq!(mode & 0o077, 0, "group/other bits must be clear");
        }
        env.close();
    }

    #[test]
    fn creates_missing_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("data").join("accounts.db");
        let env = LmdbEnvironment::open(&path, 1, 126, 1 << 20).unwrap();
        assert_eq!(env.path(), path.as_path());
        env.close();
    }

    #[test]
    fn open_fails_when_parent_is_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"x").unwrap();
        let result = LmdbEnvironment::open(&blocker.join("accounts.db"), 1, 126, 1 << 20);
        assert!(result.is_err());
    }
}
