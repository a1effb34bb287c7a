/// 文件系统访问层
///
/// 读写器只通过 `FileSystem` trait 访问文件系统：打开只读句柄、查询大小、
/// 删除已有文件、创建输出流、整体写入文件。
///
/// # 架构设计
///
/// - **traits**: 定义 `FileSystem` trait 接口
/// - **fs_io**: 基于 `std::fs` 的默认实现
///
/// # 使用示例
///
/// ```rust,ignore
/// use binio::io::{DefaultFileSystem, FileSystem};
///
/// let fs = DefaultFileSystem;
/// let size = fs.size_of(Path::new("data.bin"))?;
/// ```
pub mod traits;
pub mod fs_io;

pub use traits::FileSystem;
pub use fs_io::DefaultFileSystem;
