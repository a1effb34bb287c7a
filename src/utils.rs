use thiserror::Error;
use std::path::PathBuf;

/// 自定义错误类型
#[derive(Error, Debug)]
pub enum BinError {
    #[error("{kind} value must be between {min} and {max}, provided {value}")]
    OutOfRange {
        kind: &'static str,
        min: i128,
        max: i128,
        value: i128,
    },

    #[error("Invalid hex string {0:?}: expected an even number of hex digits with optional 0x prefix")]
    InvalidHex(String),

    #[error("Cannot encode {value:?} as {encoding}: character {invalid:?} is not representable")]
    InvalidText {
        encoding: &'static str,
        value: String,
        invalid: char,
    },

    #[error("Invalid bit string {0:?}: expected exactly 8 characters of '0' or '1'")]
    InvalidBits(String),

    #[error("Encoded value needs {needed} bytes but only {allocated} were allocated")]
    AllocationOverflow { needed: usize, allocated: usize },

    #[error("Read of {requested} bytes at offset {offset} exceeds length {length}")]
    OutOfBounds { offset: u64, requested: u64, length: u64 },

    #[error("Seek target {target} is outside 0..={length}")]
    InvalidSeek { target: i128, length: u64 },

    #[error("Reader is closed")]
    ReaderClosed,

    #[error("Stream is closed")]
    StreamClosed,

    #[error("File not found: {0:?}")]
    NotFound(PathBuf),

    #[error("File already exists: {0:?}")]
    AlreadyExists(PathBuf),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BinError>;

const SIZE_UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB", "PB"];

/// 字节数格式化（1024 进制），如 `1536 -> "1.50 KB"`
pub fn format_byte_size(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{} B", bytes);
    }

    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }

    format!("{:.2} {}", size, SIZE_UNITS[unit])
}

/// 十六进制格式化
pub fn to_hex_string(data: &[u8], prefix: bool, uppercase: bool) -> String {
    let digits = if uppercase {
        hex::encode_upper(data)
    } else {
        hex::encode(data)
    };

    if prefix {
        format!("0x{}", digits)
    } else {
        digits
    }
}

/// 十六进制行转储（每行 16 字节，带偏移量和 ASCII 栏）
pub fn hex_dump(data: &[u8], base_offset: u64) -> String {
    let mut out = String::new();
    for (row, line) in data.chunks(16).enumerate() {
        let offset = base_offset + (row * 16) as u64;
        let hex_part: Vec<String> = line.iter().map(|b| format!("{:02X}", b)).collect();
        let ascii_part: String = line
            .iter()
            .map(|&b| if b.is_ascii_graphic() || b == b' ' { b as char } else { '.' })
            .collect();
        out.push_str(&format!("{:08X}  {:<47}  |{}|\n", offset, hex_part.join(" "), ascii_part));
    }
    out
}
