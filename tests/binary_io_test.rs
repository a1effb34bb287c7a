//! 读写器集成测试
//!
//! 测试场景：
//! - BinaryWriter 写入文件后由 BinaryReader 从文件读回
//! - StreamWriter 逐条写入大文件，读取端校验每一条记录
//! - 通过自定义 FileSystem 实现注入文件系统访问

use std::cell::RefCell;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use binio::{
    BinError, BinaryReader, BinaryWriter, DefaultFileSystem, ExistenceCheck, FileSystem,
    HandleSource, SeekOrigin, StreamWriter, TextEncoding, TypedWrite,
};
use tempfile::TempDir;

/// 记录调用情况的文件系统实现
#[derive(Default)]
struct RecordingFileSystem {
    inner: DefaultFileSystem,
    calls: RefCell<Vec<String>>,
}

impl RecordingFileSystem {
    fn record(&self, call: &str, path: &Path) {
        let name = path.file_name().and_then(|s| s.to_str()).unwrap_or_default();
        self.calls.borrow_mut().push(format!("{}:{}", call, name));
    }

    fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl FileSystem for RecordingFileSystem {
    fn exists(&self, path: &Path) -> bool {
        self.record("exists", path);
        self.inner.exists(path)
    }

    fn open_for_read(&self, path: &Path) -> binio::Result<HandleSource> {
        self.record("open", path);
        self.inner.open_for_read(path)
    }

    fn size_of(&self, path: &Path) -> binio::Result<u64> {
        self.record("size", path);
        self.inner.size_of(path)
    }

    fn delete_if_exists(&self, path: &Path) -> binio::Result<()> {
        self.record("delete", path);
        self.inner.delete_if_exists(path)
    }

    fn create_writable_stream(&self, path: &Path) -> binio::Result<Box<dyn Write + Send>> {
        self.record("create", path);
        self.inner.create_writable_stream(path)
    }

    fn write_whole_file(&self, path: &Path, data: &[u8], replace: bool) -> binio::Result<()> {
        self.record("write", path);
        self.inner.write_whole_file(path, data, replace)
    }
}

/// 由开关决定文件是否"存在"的文件系统实现
struct SwitchableFileSystem {
    inner: DefaultFileSystem,
    present: Arc<AtomicBool>,
}

impl SwitchableFileSystem {
    fn new() -> Self {
        Self {
            inner: DefaultFileSystem,
            present: Arc::new(AtomicBool::new(true)),
        }
    }
}

impl FileSystem for SwitchableFileSystem {
    fn exists(&self, _path: &Path) -> bool {
        self.present.load(Ordering::SeqCst)
    }

    fn open_for_read(&self, path: &Path) -> binio::Result<HandleSource> {
        if !self.exists(path) {
            return Err(BinError::NotFound(path.to_path_buf()));
        }
        let file = File::open(path)?;
        let length = file.metadata()?.len();
        let present = Arc::clone(&self.present);
        let check = ExistenceCheck::new(move |_: &Path| present.load(Ordering::SeqCst));
        Ok(HandleSource::new(path.to_path_buf(), file, length, check))
    }

    fn size_of(&self, path: &Path) -> binio::Result<u64> {
        self.inner.size_of(path)
    }

    fn delete_if_exists(&self, path: &Path) -> binio::Result<()> {
        self.inner.delete_if_exists(path)
    }

    fn create_writable_stream(&self, path: &Path) -> binio::Result<Box<dyn Write + Send>> {
        self.inner.create_writable_stream(path)
    }

    fn write_whole_file(&self, path: &Path, data: &[u8], replace: bool) -> binio::Result<()> {
        self.inner.write_whole_file(path, data, replace)
    }
}

fn temp_file(dir: &TempDir, name: &str) -> PathBuf {
    dir.path().join(name)
}

#[test]
fn test_header_roundtrip_through_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_file(&temp_dir, "header.bin");

    let mut writer = BinaryWriter::new();
    writer.write_ascii("BINF", None).unwrap();
    writer.write_u16_be(2).unwrap();
    writer.write_u8(0b1010_0001).unwrap();
    writer.write_utf8("名称", Some(8)).unwrap();
    writer.write_cstring("comment", TextEncoding::Latin1).unwrap();
    writer.write_i64_le(-42).unwrap();
    writer.write_to_file(&path, false).unwrap();

    let mut reader = BinaryReader::open(&path).unwrap();
    assert_eq!(reader.read_ascii(4).unwrap(), "BINF");
    assert_eq!(reader.read_u16_be().unwrap(), 2);
    assert_eq!(reader.read_bit_string().unwrap(), "10100001");
    assert_eq!(reader.read_utf8(8).unwrap(), "名称");
    assert_eq!(reader.read_cstring(TextEncoding::Latin1).unwrap(), "comment");
    assert_eq!(reader.read_i64_le().unwrap(), -42);
    assert_eq!(reader.remaining(), 0);
}

#[test]
fn test_stream_writer_records_read_back() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_file(&temp_dir, "records.bin");

    let mut writer = StreamWriter::create(&path).unwrap();
    for i in 0..1000u32 {
        writer.write_u32_le(i).unwrap();
        writer.write_f32_be(i as f64 * 0.5).unwrap();
    }
    writer.close().unwrap();
    assert_eq!(writer.len(), 8000);

    let mut reader = BinaryReader::open(&path).unwrap();
    assert_eq!(reader.len(), 8000);

    for i in 0..1000u32 {
        assert_eq!(reader.read_u32_le().unwrap(), i);
        assert_eq!(reader.read_f32_be().unwrap(), i as f32 * 0.5);
    }

    // 随机访问第 500 条记录
    reader.seek(500 * 8, SeekOrigin::Start).unwrap();
    assert_eq!(reader.read_u32_le().unwrap(), 500);
}

#[test]
fn test_injected_filesystem_is_used() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_file(&temp_dir, "injected.bin");
    let fs = RecordingFileSystem::default();

    let mut writer = StreamWriter::create_with(&fs, &path, true).unwrap();
    writer.write_u8(7).unwrap();
    writer.close().unwrap();

    let mut reader = BinaryReader::open_with(&fs, &path).unwrap();
    assert_eq!(reader.read_u8().unwrap(), 7);
    reader.close();

    let mut buffered = BinaryWriter::new();
    buffered.write_u8(8).unwrap();
    buffered.write_to_file_with(&fs, &path, true).unwrap();

    assert_eq!(
        fs.calls(),
        vec![
            "exists:injected.bin",
            "create:injected.bin",
            "open:injected.bin",
            "write:injected.bin",
        ]
    );
    assert_eq!(fs.size_of(&path).unwrap(), 1);
}

#[test]
fn test_stream_writer_replaces_existing_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_file(&temp_dir, "replace.bin");
    let fs = RecordingFileSystem::default();
    std::fs::write(&path, vec![0xAA; 16]).unwrap();

    let mut writer = StreamWriter::create_with(&fs, &path, true).unwrap();
    writer.write_u16_le(1).unwrap();
    drop(writer);

    assert_eq!(
        fs.calls(),
        vec!["exists:replace.bin", "delete:replace.bin", "create:replace.bin"]
    );
    assert_eq!(std::fs::read(&path).unwrap(), vec![1, 0]);
}

#[test]
fn test_existence_conflicts() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_file(&temp_dir, "conflict.bin");
    std::fs::write(&path, b"keep").unwrap();

    let writer = BinaryWriter::new();
    assert!(matches!(writer.write_to_file(&path, false), Err(BinError::AlreadyExists(_))));
    assert!(matches!(
        StreamWriter::create_with(&DefaultFileSystem, &path, false),
        Err(BinError::AlreadyExists(_))
    ));
    assert_eq!(std::fs::read(&path).unwrap(), b"keep");
}

#[test]
fn test_reader_scoped_release() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_file(&temp_dir, "scoped.bin");
    std::fs::write(&path, [5u8, 6]).unwrap();

    let first = {
        let mut reader = BinaryReader::open(&path).unwrap();
        reader.read_u8().unwrap()
    };
    assert_eq!(first, 5);

    // 读取器释放后文件可以被删除和重建
    std::fs::remove_file(&path).unwrap();
    let mut writer = StreamWriter::create_with(&DefaultFileSystem, &path, false).unwrap();
    writer.write_u8(9).unwrap();
    writer.close().unwrap();

    let mut reader = BinaryReader::open(&path).unwrap();
    assert_eq!(reader.read_u8().unwrap(), 9);
}

#[test]
fn test_reader_asks_injected_filesystem_for_existence() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_file(&temp_dir, "switch.bin");
    std::fs::write(&path, [1u8, 2, 3]).unwrap();
    let fs = SwitchableFileSystem::new();

    let mut reader = BinaryReader::open_with(&fs, &path).unwrap();
    assert_eq!(reader.read_u8().unwrap(), 1);

    // 磁盘上的文件仍在，但注入的文件系统报告它已消失
    fs.present.store(false, Ordering::SeqCst);
    assert!(path.is_file());
    assert!(!reader.exists());
    assert!(matches!(reader.read_u8(), Err(BinError::NotFound(_))));
    assert_eq!(reader.tell(), 1);

    fs.present.store(true, Ordering::SeqCst);
    assert!(reader.exists());
    assert_eq!(reader.read_u8().unwrap(), 2);
}
