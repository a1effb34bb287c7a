/// 文件系统访问 trait 定义
///
/// 读写器依赖此接口而不是直接调用 `std::fs`，便于替换实现。

use std::io::Write;
use std::path::Path;

use crate::source::HandleSource;
use crate::utils::Result;

/// 读写器所需的最小文件系统能力
pub trait FileSystem {
    /// 路径是否指向一个已存在的普通文件
    fn exists(&self, path: &Path) -> bool;

    /// 以只读方式打开文件
    ///
    /// 路径不存在或不是普通文件时返回 `BinError::NotFound`。
    /// 文件长度在打开时确定，之后不再刷新。返回的句柄需携带本实现的
    /// `ExistenceCheck`，读取器每次读取前用它确认文件仍然存在。
    fn open_for_read(&self, path: &Path) -> Result<HandleSource>;

    /// 当前文件大小（字节）
    fn size_of(&self, path: &Path) -> Result<u64>;

    /// 删除文件（不存在时什么也不做）
    fn delete_if_exists(&self, path: &Path) -> Result<()>;

    /// 创建（截断）文件并返回可写流，必要时创建父目录
    fn create_writable_stream(&self, path: &Path) -> Result<Box<dyn Write + Send>>;

    /// 整体写入文件
    ///
    /// 目标已存在且 `replace` 为 false 时返回 `BinError::AlreadyExists`，
    /// 此时不做任何修改。
    fn write_whole_file(&self, path: &Path, data: &[u8], replace: bool) -> Result<()>;
}
