use crate::datatypes::{
    bits_to_byte, decode_hex, encode_f32, encode_f64, encode_int, fit_allocation, parse_bit_string,
    Endian, IntKind, TextEncoding,
};
use crate::utils::Result;

/// 带类型的写入接口
///
/// `BinaryWriter`（内存累积）和 `StreamWriter`（直接写入文件流）共用这组方法，
/// 只需实现 `put_chunk` 和 `len`。整数写入方法接受任意可转为 `i128` 的整数，
/// 并在编码前校验目标宽度的可表示范围，校验失败时不会写入任何内容。
pub trait TypedWrite {
    /// 追加一段已编码的字节
    fn put_chunk(&mut self, chunk: Vec<u8>) -> Result<()>;

    /// 已写入的总字节数
    fn len(&self) -> u64;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn write_bytes(&mut self, data: &[u8]) -> Result<()> {
        self.put_chunk(data.to_vec())
    }

    fn write_int(&mut self, kind: IntKind, endian: Endian, value: i128) -> Result<()> {
        let chunk = encode_int(kind, endian, value)?;
        self.put_chunk(chunk)
    }

    fn write_u8(&mut self, value: impl Into<i128>) -> Result<()> {
        self.write_int(IntKind::U8, Endian::Little, value.into())
    }

    fn write_i8(&mut self, value: impl Into<i128>) -> Result<()> {
        self.write_int(IntKind::I8, Endian::Little, value.into())
    }

    fn write_u16_le(&mut self, value: impl Into<i128>) -> Result<()> {
        self.write_int(IntKind::U16, Endian::Little, value.into())
    }

    fn write_u16_be(&mut self, value: impl Into<i128>) -> Result<()> {
        self.write_int(IntKind::U16, Endian::Big, value.into())
    }

    fn write_i16_le(&mut self, value: impl Into<i128>) -> Result<()> {
        self.write_int(IntKind::I16, Endian::Little, value.into())
    }

    fn write_i16_be(&mut self, value: impl Into<i128>) -> Result<()> {
        self.write_int(IntKind::I16, Endian::Big, value.into())
    }

    fn write_u24_le(&mut self, value: impl Into<i128>) -> Result<()> {
        self.write_int(IntKind::U24, Endian::Little, value.into())
    }

    fn write_u24_be(&mut self, value: impl Into<i128>) -> Result<()> {
        self.write_int(IntKind::U24, Endian::Big, value.into())
    }

    fn write_i24_le(&mut self, value: impl Into<i128>) -> Result<()> {
        self.write_int(IntKind::I24, Endian::Little, value.into())
    }

    fn write_i24_be(&mut self, value: impl Into<i128>) -> Result<()> {
        self.write_int(IntKind::I24, Endian::Big, value.into())
    }

    fn write_u32_le(&mut self, value: impl Into<i128>) -> Result<()> {
        self.write_int(IntKind::U32, Endian::Little, value.into())
    }

    fn write_u32_be(&mut self, value: impl Into<i128>) -> Result<()> {
        self.write_int(IntKind::U32, Endian::Big, value.into())
    }

    fn write_i32_le(&mut self, value: impl Into<i128>) -> Result<()> {
        self.write_int(IntKind::I32, Endian::Little, value.into())
    }

    fn write_i32_be(&mut self, value: impl Into<i128>) -> Result<()> {
        self.write_int(IntKind::I32, Endian::Big, value.into())
    }

    fn write_u64_le(&mut self, value: impl Into<i128>) -> Result<()> {
        self.write_int(IntKind::U64, Endian::Little, value.into())
    }

    fn write_u64_be(&mut self, value: impl Into<i128>) -> Result<()> {
        self.write_int(IntKind::U64, Endian::Big, value.into())
    }

    fn write_i64_le(&mut self, value: impl Into<i128>) -> Result<()> {
        self.write_int(IntKind::I64, Endian::Little, value.into())
    }

    fn write_i64_be(&mut self, value: impl Into<i128>) -> Result<()> {
        self.write_int(IntKind::I64, Endian::Big, value.into())
    }

    /// 单精度浮点，`f64` 收窄为 `f32` 时可能损失精度
    fn write_f32_le(&mut self, value: f64) -> Result<()> {
        self.put_chunk(encode_f32(value, Endian::Little))
    }

    fn write_f32_be(&mut self, value: f64) -> Result<()> {
        self.put_chunk(encode_f32(value, Endian::Big))
    }

    fn write_f64_le(&mut self, value: f64) -> Result<()> {
        self.put_chunk(encode_f64(value, Endian::Little))
    }

    fn write_f64_be(&mut self, value: f64) -> Result<()> {
        self.put_chunk(encode_f64(value, Endian::Big))
    }

    /// 按编码写入字符串
    ///
    /// 指定 `alloc` 时，不足部分补零；编码结果超过 `alloc` 时返回
    /// `BinError::AllocationOverflow`。
    fn write_string(&mut self, value: &str, encoding: TextEncoding, alloc: Option<usize>) -> Result<()> {
        let chunk = fit_allocation(encoding.encode(value)?, alloc)?;
        self.put_chunk(chunk)
    }

    fn write_ascii(&mut self, value: &str, alloc: Option<usize>) -> Result<()> {
        self.write_string(value, TextEncoding::Ascii, alloc)
    }

    fn write_latin1(&mut self, value: &str, alloc: Option<usize>) -> Result<()> {
        self.write_string(value, TextEncoding::Latin1, alloc)
    }

    fn write_utf8(&mut self, value: &str, alloc: Option<usize>) -> Result<()> {
        self.write_string(value, TextEncoding::Utf8, alloc)
    }

    /// 写入十六进制字符串表示的字节（允许 `0x` 前缀）
    fn write_hex(&mut self, value: &str, alloc: Option<usize>) -> Result<()> {
        let chunk = fit_allocation(decode_hex(value)?, alloc)?;
        self.put_chunk(chunk)
    }

    /// 写入字符串并追加一个 0 字节
    fn write_cstring(&mut self, value: &str, encoding: TextEncoding) -> Result<()> {
        let mut chunk = encoding.encode(value)?;
        chunk.push(0);
        self.put_chunk(chunk)
    }

    /// 写入 `count` 个 `fill` 字节
    fn write_padding(&mut self, count: usize, fill: u8) -> Result<()> {
        self.put_chunk(vec![fill; count])
    }

    fn write_bool(&mut self, value: bool) -> Result<()> {
        self.put_chunk(vec![value as u8])
    }

    /// 8 个位（高位在前）合成一个字节写入
    fn write_bits(&mut self, bits: [u8; 8]) -> Result<()> {
        let byte = bits_to_byte(bits)?;
        self.put_chunk(vec![byte])
    }

    /// 写入形如 `"01000001"` 的位串
    fn write_bit_string(&mut self, value: &str) -> Result<()> {
        let byte = parse_bit_string(value)?;
        self.put_chunk(vec![byte])
    }
}
