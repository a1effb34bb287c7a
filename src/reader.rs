mod numbers;
mod text;


use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::io::{DefaultFileSystem, FileSystem};
use crate::source::{ByteSource, ExistenceCheck};
use crate::utils::{BinError, Result};

/// 定位基准
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeekOrigin {
    /// 相对文件开头
    Start,
    /// 相对当前游标
    Current,
    /// 相对末尾
    End,
}

/// 基于游标的二进制读取器
///
/// 数据来源可以是内存缓冲区，也可以是已打开的文件。每次读取都会把游标
/// 向后推进所读取的字节数；越界读取会在移动游标之前失败。
///
/// # 示例
/// ```rust,ignore
/// let mut reader = BinaryReader::from_bytes(vec![0x78, 0x56, 0x34, 0x12]);
/// assert_eq!(reader.read_u32_le()?, 0x12345678);
/// ```
#[derive(Debug)]
pub struct BinaryReader {
    /// `None` 表示已关闭
    source: Option<ByteSource>,
    /// 文件来源的路径及其存在性检查
    backing: Option<(PathBuf, ExistenceCheck)>,
    /// 打开时确定的长度
    length: u64,
    cursor: u64,
}

impl BinaryReader {
    /// 打开文件读取
    ///
    /// 文件不存在时返回 `BinError::NotFound`。长度取自打开时的文件大小，
    /// 文件之后被修改不会反映到 `len()`。
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with(&DefaultFileSystem, path)
    }

    /// 使用指定的文件系统实现打开文件
    pub fn open_with<P: AsRef<Path>>(fs: &dyn FileSystem, path: P) -> Result<Self> {
        let handle = fs.open_for_read(path.as_ref())?;
        let length = handle.len();
        let backing = (handle.path().to_path_buf(), handle.existence_check().clone());

        Ok(Self {
            source: Some(ByteSource::Handle(handle)),
            backing: Some(backing),
            length,
            cursor: 0,
        })
    }

    /// 包装内存缓冲区
    pub fn from_bytes(data: impl Into<Vec<u8>>) -> Self {
        let data = data.into();
        let length = data.len() as u64;

        Self {
            source: Some(ByteSource::Buffer(data)),
            backing: None,
            length,
            cursor: 0,
        }
    }

    /// 数据总长度
    pub fn len(&self) -> u64 {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// 当前游标位置
    pub fn tell(&self) -> u64 {
        self.cursor
    }

    /// 游标之后剩余的字节数
    pub fn remaining(&self) -> u64 {
        self.length - self.cursor
    }

    pub fn is_closed(&self) -> bool {
        self.source.is_none()
    }

    /// 文件来源的路径
    pub fn path(&self) -> Option<&Path> {
        self.backing.as_ref().map(|(path, _)| path.as_path())
    }

    /// 数据来源是否仍然存在（缓冲区来源总是存在）
    pub fn exists(&self) -> bool {
        match &self.backing {
            Some((path, check)) => check.exists(path),
            None => true,
        }
    }

    /// 定位游标，返回新位置
    ///
    /// 目标超过长度时只回绕一次（减去一次长度），不是取模。
    /// 回绕后仍越界或目标为负时返回 `BinError::InvalidSeek`，游标不变。
    pub fn seek(&mut self, offset: i64, origin: SeekOrigin) -> Result<u64> {
        Self::live_source(&mut self.source)?;

        let length = self.length as i128;
        let base = match origin {
            SeekOrigin::Start => 0,
            SeekOrigin::Current => self.cursor as i128,
            SeekOrigin::End => length,
        };
        let requested = base + offset as i128;

        let target = if requested > length {
            requested - length
        } else {
            requested
        };

        if target < 0 || target > length {
            return Err(BinError::InvalidSeek {
                target: requested,
                length: self.length,
            });
        }

        self.cursor = target as u64;
        Ok(self.cursor)
    }

    /// 跳过 `count` 个字节
    pub fn skip(&mut self, count: u64) -> Result<()> {
        let source = Self::live_source(&mut self.source)?;
        source.check_bounds(self.cursor, count)?;
        self.cursor += count;
        Ok(())
    }

    /// 读取 `count` 个字节
    pub fn read_bytes(&mut self, count: usize) -> Result<Vec<u8>> {
        let source = Self::live_source(&mut self.source)?;
        let data = source.read_at(self.cursor, count as u64)?;
        self.cursor += count as u64;
        Ok(data)
    }

    /// 读取游标之后的全部字节，游标移到末尾
    ///
    /// 再次调用会返回空数组。
    pub fn read_remaining(&mut self) -> Result<Vec<u8>> {
        let source = Self::live_source(&mut self.source)?;
        let count = self.length - self.cursor;
        let data = source.read_at(self.cursor, count)?;
        self.cursor = self.length;
        Ok(data)
    }

    /// 关闭读取器，重复调用无副作用
    pub fn close(&mut self) {
        if let Some(source) = self.source.take() {
            if let Some(path) = source.backing_path() {
                debug!("closed reader for {:?}", path);
            }
        }
    }

    /// 读取 `len` 个字节；`None` 表示读取剩余全部
    pub(crate) fn read_span(&mut self, len: Option<usize>) -> Result<Vec<u8>> {
        match len {
            Some(count) => self.read_bytes(count),
            None => self.read_remaining(),
        }
    }

    /// 读取定长数组
    pub(crate) fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let source = Self::live_source(&mut self.source)?;
        let mut buf = [0u8; N];
        source.read_exact_at(self.cursor, &mut buf)?;
        self.cursor += N as u64;
        Ok(buf)
    }

    /// 未关闭且（文件来源时）文件仍存在
    pub(crate) fn live_source(source: &mut Option<ByteSource>) -> Result<&mut ByteSource> {
        let source = source.as_mut().ok_or(BinError::ReaderClosed)?;
        source.ensure_available()?;
        Ok(source)
    }
}
