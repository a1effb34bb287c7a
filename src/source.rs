use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::utils::{BinError, Result};

/// 文件是否仍然存在的检查，由打开文件的 `FileSystem` 提供
#[derive(Clone)]
pub struct ExistenceCheck(Arc<dyn Fn(&Path) -> bool + Send + Sync>);

impl ExistenceCheck {
    pub fn new<F>(check: F) -> Self
    where
        F: Fn(&Path) -> bool + Send + Sync + 'static,
    {
        Self(Arc::new(check))
    }

    pub fn exists(&self, path: &Path) -> bool {
        (self.0)(path)
    }
}

impl std::fmt::Debug for ExistenceCheck {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ExistenceCheck")
    }
}

/// 已打开的文件句柄及其打开时的长度
#[derive(Debug)]
pub struct HandleSource {
    path: PathBuf,
    file: File,
    /// 打开时的文件大小，之后不会刷新
    length: u64,
    exists: ExistenceCheck,
}

impl HandleSource {
    pub fn new(path: PathBuf, file: File, length: u64, exists: ExistenceCheck) -> Self {
        Self { path, file, length, exists }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> u64 {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    pub fn existence_check(&self) -> &ExistenceCheck {
        &self.exists
    }

    fn read_exact_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<()> {
        self.file.seek(SeekFrom::Start(offset))?;
        self.file.read_exact(buf)?;
        Ok(())
    }
}

/// 字节来源：内存缓冲区或文件句柄
#[derive(Debug)]
pub enum ByteSource {
    Buffer(Vec<u8>),
    Handle(HandleSource),
}

impl ByteSource {
    pub fn len(&self) -> u64 {
        match self {
            ByteSource::Buffer(data) => data.len() as u64,
            ByteSource::Handle(handle) => handle.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 文件来源对应的路径；缓冲区来源返回 `None`
    pub fn backing_path(&self) -> Option<&Path> {
        match self {
            ByteSource::Buffer(_) => None,
            ByteSource::Handle(handle) => Some(handle.path()),
        }
    }

    /// 文件来源时检查文件是否仍然存在
    pub fn ensure_available(&self) -> Result<()> {
        match self {
            ByteSource::Buffer(_) => Ok(()),
            ByteSource::Handle(handle) => {
                if handle.exists.exists(handle.path()) {
                    Ok(())
                } else {
                    Err(BinError::NotFound(handle.path().to_path_buf()))
                }
            }
        }
    }

    /// 检查 `[offset, offset + count)` 是否在长度范围内
    pub fn check_bounds(&self, offset: u64, count: u64) -> Result<()> {
        let length = self.len();
        match offset.checked_add(count) {
            Some(end) if end <= length => Ok(()),
            _ => Err(BinError::OutOfBounds {
                offset,
                requested: count,
                length,
            }),
        }
    }

    /// 从绝对偏移量读取，填满 `buf`
    pub fn read_exact_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<()> {
        self.check_bounds(offset, buf.len() as u64)?;

        match self {
            ByteSource::Buffer(data) => {
                let start = offset as usize;
                buf.copy_from_slice(&data[start..start + buf.len()]);
                Ok(())
            }
            ByteSource::Handle(handle) => handle.read_exact_at(offset, buf),
        }
    }

    /// 从绝对偏移量读取 `count` 个字节
    pub fn read_at(&mut self, offset: u64, count: u64) -> Result<Vec<u8>> {
        self.check_bounds(offset, count)?;

        match self {
            ByteSource::Buffer(data) => {
                let start = offset as usize;
                Ok(data[start..start + count as usize].to_vec())
            }
            ByteSource::Handle(handle) => {
                let mut buf = vec![0u8; count as usize];
                handle.read_exact_at(offset, &mut buf)?;
                Ok(buf)
            }
        }
    }
}
