pub mod datatypes;
pub mod encoder;
pub mod io;
pub mod reader;
pub mod source;
pub mod stream_writer;
pub mod utils;
pub mod writer;

// 重新导出主要结构
pub use datatypes::{Endian, HexFormat, IntKind, TextEncoding};
pub use encoder::TypedWrite;
pub use io::{DefaultFileSystem, FileSystem};
pub use reader::{BinaryReader, SeekOrigin};
pub use source::{ByteSource, ExistenceCheck, HandleSource};
pub use stream_writer::StreamWriter;
pub use utils::{format_byte_size, hex_dump, to_hex_string, BinError, Result};
pub use writer::BinaryWriter;
