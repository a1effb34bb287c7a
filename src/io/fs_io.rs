/// 基于 `std::fs` 的默认文件系统实现
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use log::debug;

use super::traits::FileSystem;
use crate::source::{ExistenceCheck, HandleSource};
use crate::utils::{BinError, Result};

/// 默认的文件系统实现
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultFileSystem;

impl DefaultFileSystem {
    fn ensure_parent(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        Ok(())
    }
}

impl FileSystem for DefaultFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn open_for_read(&self, path: &Path) -> Result<HandleSource> {
        if !self.exists(path) {
            return Err(BinError::NotFound(path.to_path_buf()));
        }

        let file = File::open(path)?;
        let length = file.metadata()?.len();
        debug!("opened {:?} for reading ({} bytes)", path, length);

        let exists = ExistenceCheck::new(|p: &Path| p.is_file());
        Ok(HandleSource::new(path.to_path_buf(), file, length, exists))
    }

    fn size_of(&self, path: &Path) -> Result<u64> {
        match fs::metadata(path) {
            Ok(meta) => Ok(meta.len()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(BinError::NotFound(path.to_path_buf()))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn delete_if_exists(&self, path: &Path) -> Result<()> {
        match fs::remove_file(path) {
            Ok(()) => {
                debug!("deleted existing file {:?}", path);
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn create_writable_stream(&self, path: &Path) -> Result<Box<dyn Write + Send>> {
        Self::ensure_parent(path)?;
        let file = File::create(path)?;
        Ok(Box::new(file))
    }

    fn write_whole_file(&self, path: &Path, data: &[u8], replace: bool) -> Result<()> {
        if path.exists() {
            if !replace {
                return Err(BinError::AlreadyExists(path.to_path_buf()));
            }
            self.delete_if_exists(path)?;
        }

        Self::ensure_parent(path)?;
        fs::write(path, data)?;
        debug!("wrote {} bytes to {:?}", data.len(), path);
        Ok(())
    }
}
