use std::io::Write;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::encoder::TypedWrite;
use crate::io::{DefaultFileSystem, FileSystem};
use crate::utils::{BinError, Result};

/// 流式写入器
///
/// 与 `BinaryWriter` 提供相同的写入方法，但每次写入都立即写到文件流，
/// 不在内存中保留内容。关闭后写入返回 `BinError::StreamClosed`；
/// 离开作用域时会自动关闭。
///
/// 底层写入失败时写入器随即关闭：已写入的字节数无法确定，`len()`
/// 只统计成功写入的块，之后的写入返回 `BinError::StreamClosed`。
pub struct StreamWriter {
    path: PathBuf,
    /// `None` 表示已关闭
    output: Option<Box<dyn Write + Send>>,
    /// 累计写入字节数
    length: u64,
}

impl StreamWriter {
    /// 创建输出文件，已存在时先删除
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::create_with(&DefaultFileSystem, path, true)
    }

    /// 使用指定的文件系统实现创建输出文件
    ///
    /// 目标已存在且 `replace` 为 false 时返回 `BinError::AlreadyExists`。
    pub fn create_with<P: AsRef<Path>>(fs: &dyn FileSystem, path: P, replace: bool) -> Result<Self> {
        let path = path.as_ref();

        if fs.exists(path) {
            if !replace {
                return Err(BinError::AlreadyExists(path.to_path_buf()));
            }
            fs.delete_if_exists(path)?;
        }

        let output = fs.create_writable_stream(path)?;
        debug!("opened stream writer for {:?}", path);

        Ok(Self {
            path: path.to_path_buf(),
            output: Some(output),
            length: 0,
        })
    }

    /// 目标文件路径
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_closed(&self) -> bool {
        self.output.is_none()
    }

    /// 刷新并关闭输出流，重复调用无副作用
    pub fn close(&mut self) -> Result<()> {
        if let Some(mut output) = self.output.take() {
            output.flush()?;
            debug!("closed stream writer for {:?} ({} bytes)", self.path, self.length);
        }
        Ok(())
    }
}

impl TypedWrite for StreamWriter {
    fn put_chunk(&mut self, chunk: Vec<u8>) -> Result<()> {
        let output = self.output.as_mut().ok_or(BinError::StreamClosed)?;
        if let Err(e) = output.write_all(&chunk) {
            warn!("write to {:?} failed, closing stream writer: {}", self.path, e);
            self.output = None;
            return Err(e.into());
        }
        self.length += chunk.len() as u64;
        Ok(())
    }

    fn len(&self) -> u64 {
        self.length
    }
}

impl Drop for StreamWriter {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            warn!("failed to flush stream writer for {:?}: {}", self.path, e);
        }
    }
}

impl std::fmt::Debug for StreamWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamWriter")
            .field("path", &self.path)
            .field("length", &self.length)
            .field("closed", &self.is_closed())
            .finish()
    }
}
