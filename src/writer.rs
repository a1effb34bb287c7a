use std::path::Path;

use log::debug;

use crate::encoder::TypedWrite;
use crate::io::{DefaultFileSystem, FileSystem};
use crate::utils::Result;

/// 内存累积写入器
///
/// 每次写入追加一个已编码的块，`to_bytes()` 按写入顺序拼接全部块。
/// 拼接不会消耗内部数据，可以反复调用并得到相同的结果。
#[derive(Debug, Clone, Default)]
pub struct BinaryWriter {
    chunks: Vec<Vec<u8>>,
    /// 所有块长度之和
    total_length: u64,
}

impl BinaryWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// 已追加的块数
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// 拼接为一个连续缓冲区
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut output = Vec::with_capacity(self.total_length as usize);
        for chunk in &self.chunks {
            output.extend_from_slice(chunk);
        }
        output
    }

    /// 清空已写入的内容
    pub fn clear(&mut self) {
        self.chunks.clear();
        self.total_length = 0;
    }

    /// 写入到文件
    ///
    /// 目标已存在且 `replace` 为 false 时返回 `BinError::AlreadyExists`。
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P, replace: bool) -> Result<()> {
        self.write_to_file_with(&DefaultFileSystem, path, replace)
    }

    /// 使用指定的文件系统实现写入文件
    pub fn write_to_file_with<P: AsRef<Path>>(
        &self,
        fs: &dyn FileSystem,
        path: P,
        replace: bool,
    ) -> Result<()> {
        let data = self.to_bytes();
        fs.write_whole_file(path.as_ref(), &data, replace)?;
        debug!(
            "persisted {} chunks ({} bytes) to {:?}",
            self.chunks.len(),
            data.len(),
            path.as_ref()
        );
        Ok(())
    }
}

impl TypedWrite for BinaryWriter {
    fn put_chunk(&mut self, chunk: Vec<u8>) -> Result<()> {
        if chunk.is_empty() {
            return Ok(());
        }
        self.total_length += chunk.len() as u64;
        self.chunks.push(chunk);
        Ok(())
    }

    fn len(&self) -> u64 {
        self.total_length
    }
}
