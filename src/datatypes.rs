use byteorder::{BigEndian, ByteOrder, LittleEndian, WriteBytesExt};
use serde::{Deserialize, Serialize};

use crate::utils::{BinError, Result};

/// 字节序
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Endian {
    Little,
    Big,
}

/// 定长整数类型（宽度 + 有无符号）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntKind {
    U8,
    I8,
    U16,
    I16,
    U24,
    I24,
    U32,
    I32,
    U64,
    I64,
}

impl IntKind {
    /// 字节宽度
    pub fn width(&self) -> usize {
        match self {
            IntKind::U8 | IntKind::I8 => 1,
            IntKind::U16 | IntKind::I16 => 2,
            IntKind::U24 | IntKind::I24 => 3,
            IntKind::U32 | IntKind::I32 => 4,
            IntKind::U64 | IntKind::I64 => 8,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            IntKind::U8 => "u8",
            IntKind::I8 => "i8",
            IntKind::U16 => "u16",
            IntKind::I16 => "i16",
            IntKind::U24 => "u24",
            IntKind::I24 => "i24",
            IntKind::U32 => "u32",
            IntKind::I32 => "i32",
            IntKind::U64 => "u64",
            IntKind::I64 => "i64",
        }
    }

    /// 可表示范围（闭区间）
    pub fn bounds(&self) -> (i128, i128) {
        match self {
            IntKind::U8 => (0, u8::MAX as i128),
            IntKind::I8 => (i8::MIN as i128, i8::MAX as i128),
            IntKind::U16 => (0, u16::MAX as i128),
            IntKind::I16 => (i16::MIN as i128, i16::MAX as i128),
            IntKind::U24 => (0, 0xFF_FFFF),
            IntKind::I24 => (-0x80_0000, 0x7F_FFFF),
            IntKind::U32 => (0, u32::MAX as i128),
            IntKind::I32 => (i32::MIN as i128, i32::MAX as i128),
            IntKind::U64 => (0, u64::MAX as i128),
            IntKind::I64 => (i64::MIN as i128, i64::MAX as i128),
        }
    }

    /// 检查数值是否在可表示范围内
    pub fn check(&self, value: i128) -> Result<()> {
        let (min, max) = self.bounds();
        if value < min || value > max {
            return Err(BinError::OutOfRange {
                kind: self.name(),
                min,
                max,
                value,
            });
        }
        Ok(())
    }
}

/// 校验并编码定长整数
pub fn encode_int(kind: IntKind, endian: Endian, value: i128) -> Result<Vec<u8>> {
    kind.check(value)?;

    let mut out = Vec::with_capacity(kind.width());
    match endian {
        Endian::Little => write_int::<LittleEndian>(&mut out, kind, value)?,
        Endian::Big => write_int::<BigEndian>(&mut out, kind, value)?,
    }
    Ok(out)
}

// 调用方已完成范围校验，这里的 `as` 转换不会截断
fn write_int<B: ByteOrder>(out: &mut Vec<u8>, kind: IntKind, value: i128) -> std::io::Result<()> {
    match kind {
        IntKind::U8 => out.write_u8(value as u8),
        IntKind::I8 => out.write_i8(value as i8),
        IntKind::U16 => out.write_u16::<B>(value as u16),
        IntKind::I16 => out.write_i16::<B>(value as i16),
        IntKind::U24 => out.write_u24::<B>(value as u32),
        IntKind::I24 => out.write_i24::<B>(value as i32),
        IntKind::U32 => out.write_u32::<B>(value as u32),
        IntKind::I32 => out.write_i32::<B>(value as i32),
        IntKind::U64 => out.write_u64::<B>(value as u64),
        IntKind::I64 => out.write_i64::<B>(value as i64),
    }
}

/// 解码定长整数（`data` 长度必须等于类型宽度）
pub fn decode_int(kind: IntKind, endian: Endian, data: &[u8]) -> i128 {
    match endian {
        Endian::Little => read_int::<LittleEndian>(kind, data),
        Endian::Big => read_int::<BigEndian>(kind, data),
    }
}

fn read_int<B: ByteOrder>(kind: IntKind, data: &[u8]) -> i128 {
    match kind {
        IntKind::U8 => data[0] as i128,
        IntKind::I8 => data[0] as i8 as i128,
        IntKind::U16 => B::read_u16(data) as i128,
        IntKind::I16 => B::read_i16(data) as i128,
        IntKind::U24 => B::read_u24(data) as i128,
        IntKind::I24 => B::read_i24(data) as i128,
        IntKind::U32 => B::read_u32(data) as i128,
        IntKind::I32 => B::read_i32(data) as i128,
        IntKind::U64 => B::read_u64(data) as i128,
        IntKind::I64 => B::read_i64(data) as i128,
    }
}

pub fn encode_f32(value: f64, endian: Endian) -> Vec<u8> {
    let mut out = [0u8; 4];
    match endian {
        Endian::Little => LittleEndian::write_f32(&mut out, value as f32),
        Endian::Big => BigEndian::write_f32(&mut out, value as f32),
    }
    out.to_vec()
}

pub fn encode_f64(value: f64, endian: Endian) -> Vec<u8> {
    let mut out = [0u8; 8];
    match endian {
        Endian::Little => LittleEndian::write_f64(&mut out, value),
        Endian::Big => BigEndian::write_f64(&mut out, value),
    }
    out.to_vec()
}

pub fn decode_f32(data: &[u8], endian: Endian) -> f32 {
    match endian {
        Endian::Little => LittleEndian::read_f32(data),
        Endian::Big => BigEndian::read_f32(data),
    }
}

pub fn decode_f64(data: &[u8], endian: Endian) -> f64 {
    match endian {
        Endian::Little => LittleEndian::read_f64(data),
        Endian::Big => BigEndian::read_f64(data),
    }
}

/// 支持的文本编码
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextEncoding {
    Ascii,
    Latin1,
    #[default]
    Utf8,
}

impl TextEncoding {
    pub fn name(&self) -> &'static str {
        match self {
            TextEncoding::Ascii => "ascii",
            TextEncoding::Latin1 => "latin1",
            TextEncoding::Utf8 => "utf-8",
        }
    }

    /// 解码字节并移除所有内嵌的 NUL 字符
    ///
    /// ASCII 解码时忽略每个字节的最高位；UTF-8 的非法序列替换为 U+FFFD。
    pub fn decode(&self, data: &[u8]) -> String {
        let decoded: String = match self {
            TextEncoding::Ascii => data.iter().map(|&b| (b & 0x7F) as char).collect(),
            TextEncoding::Latin1 => encoding_rs::mem::decode_latin1(data).into_owned(),
            TextEncoding::Utf8 => {
                let (text, _had_errors) = encoding_rs::UTF_8.decode_without_bom_handling(data);
                text.into_owned()
            }
        };

        if decoded.contains('\0') {
            decoded.replace('\0', "")
        } else {
            decoded
        }
    }

    /// 编码字符串，遇到无法表示的字符时报错
    pub fn encode(&self, value: &str) -> Result<Vec<u8>> {
        match self {
            TextEncoding::Ascii => {
                if let Some(invalid) = value.chars().find(|c| !c.is_ascii()) {
                    return Err(self.invalid_text(value, invalid));
                }
                Ok(value.as_bytes().to_vec())
            }
            TextEncoding::Latin1 => {
                if !encoding_rs::mem::is_str_latin1(value) {
                    let invalid = value.chars().find(|&c| c as u32 > 0xFF).unwrap_or('\u{FFFD}');
                    return Err(self.invalid_text(value, invalid));
                }
                Ok(encoding_rs::mem::encode_latin1_lossy(value).into_owned())
            }
            TextEncoding::Utf8 => Ok(value.as_bytes().to_vec()),
        }
    }

    fn invalid_text(&self, value: &str, invalid: char) -> BinError {
        BinError::InvalidText {
            encoding: self.name(),
            value: value.to_string(),
            invalid,
        }
    }
}

/// 十六进制输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HexFormat {
    /// 是否带 `0x` 前缀
    pub prefix: bool,
    /// 是否使用大写字母
    pub uppercase: bool,
}

/// 解析十六进制字符串（允许 `0x` / `0X` 前缀）
pub fn decode_hex(value: &str) -> Result<Vec<u8>> {
    let digits = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .unwrap_or(value);

    hex::decode(digits).map_err(|_| BinError::InvalidHex(value.to_string()))
}

/// 按分配大小补零；超出分配大小时报错
pub fn fit_allocation(mut data: Vec<u8>, alloc: Option<usize>) -> Result<Vec<u8>> {
    if let Some(allocated) = alloc {
        if data.len() > allocated {
            return Err(BinError::AllocationOverflow {
                needed: data.len(),
                allocated,
            });
        }
        data.resize(allocated, 0);
    }
    Ok(data)
}

/// 拆分为 8 个位（高位在前）
pub fn byte_to_bits(byte: u8) -> [u8; 8] {
    let mut bits = [0u8; 8];
    for (i, bit) in bits.iter_mut().enumerate() {
        *bit = (byte >> (7 - i)) & 1;
    }
    bits
}

/// 位数组合并为字节（高位在前），每一位只能是 0 或 1
pub fn bits_to_byte(bits: [u8; 8]) -> Result<u8> {
    bits.iter().try_fold(0u8, |acc, &bit| match bit {
        0 | 1 => Ok((acc << 1) | bit),
        _ => Err(BinError::InvalidBits(
            bits.iter().map(|b| b.to_string()).collect::<Vec<_>>().join(","),
        )),
    })
}

pub fn bit_string(byte: u8) -> String {
    format!("{:08b}", byte)
}

/// 解析形如 `"01000001"` 的位串
pub fn parse_bit_string(value: &str) -> Result<u8> {
    if value.len() != 8 || !value.chars().all(|c| c == '0' || c == '1') {
        return Err(BinError::InvalidBits(value.to_string()));
    }
    u8::from_str_radix(value, 2).map_err(|_| BinError::InvalidBits(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_bounds() {
        assert!(IntKind::U8.check(255).is_ok());
        assert!(IntKind::U8.check(256).is_err());
        assert!(IntKind::I8.check(-128).is_ok());
        assert!(IntKind::I8.check(-129).is_err());
        assert!(IntKind::U24.check(0xFF_FFFF).is_ok());
        assert!(IntKind::U24.check(0x100_0000).is_err());
        assert!(IntKind::I24.check(-0x80_0000).is_ok());
        assert!(IntKind::I24.check(-0x80_0001).is_err());
        assert!(IntKind::U64.check(u64::MAX as i128).is_ok());
        assert!(IntKind::U64.check(-1).is_err());
    }

    #[test]
    fn test_encode_decode_24bit() {
        let le = encode_int(IntKind::U24, Endian::Little, 0x123456).unwrap();
        assert_eq!(le, vec![0x56, 0x34, 0x12]);
        let be = encode_int(IntKind::I24, Endian::Big, -2).unwrap();
        assert_eq!(be, vec![0xFF, 0xFF, 0xFE]);
        assert_eq!(decode_int(IntKind::I24, Endian::Big, &be), -2);
        assert_eq!(decode_int(IntKind::U24, Endian::Big, &be), 0xFF_FFFE);
    }

    #[test]
    fn test_text_decode_strips_nul() {
        assert_eq!(TextEncoding::Utf8.decode(b"A\0B\0"), "AB");
        assert_eq!(TextEncoding::Ascii.decode(&[0xC1, 0x42]), "AB");
        assert_eq!(TextEncoding::Latin1.decode(&[0xE9]), "é");
    }

    #[test]
    fn test_text_encode_rejects_unrepresentable() {
        assert!(TextEncoding::Ascii.encode("é").is_err());
        assert_eq!(TextEncoding::Latin1.encode("é").unwrap(), vec![0xE9]);
        assert!(matches!(
            TextEncoding::Latin1.encode("铁剑"),
            Err(BinError::InvalidText { invalid: '铁', .. })
        ));
        assert_eq!(TextEncoding::Utf8.encode("铁").unwrap(), "铁".as_bytes());
    }

    #[test]
    fn test_decode_hex() {
        assert_eq!(decode_hex("0xDEADbeef").unwrap(), vec![0xDE, 0xAD, 0xBE, 0xEF]);
        assert_eq!(decode_hex("0X00").unwrap(), vec![0]);
        assert!(decode_hex("abc").is_err());
        assert!(decode_hex("zz").is_err());
    }

    #[test]
    fn test_fit_allocation() {
        assert_eq!(fit_allocation(vec![1, 2], Some(4)).unwrap(), vec![1, 2, 0, 0]);
        assert_eq!(fit_allocation(vec![1, 2], None).unwrap(), vec![1, 2]);
        assert!(matches!(
            fit_allocation(vec![1, 2, 3], Some(2)),
            Err(BinError::AllocationOverflow { needed: 3, allocated: 2 })
        ));
    }

    #[test]
    fn test_bits() {
        assert_eq!(byte_to_bits(0x41), [0, 1, 0, 0, 0, 0, 0, 1]);
        assert_eq!(bits_to_byte([0, 1, 0, 0, 0, 0, 0, 1]).unwrap(), 0x41);
        assert!(bits_to_byte([0, 2, 0, 0, 0, 0, 0, 1]).is_err());
        assert_eq!(bit_string(0x41), "01000001");
        assert_eq!(parse_bit_string("10000000").unwrap(), 0x80);
        assert!(parse_bit_string("1000000").is_err());
        assert!(parse_bit_string("1000000x").is_err());
    }
}
