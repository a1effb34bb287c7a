use super::BinaryReader;
use crate::datatypes::{bit_string, byte_to_bits, HexFormat, TextEncoding};
use crate::utils::{to_hex_string, Result};

/// 读取 C 字符串时每次预读的块大小
const CSTRING_BLOCK: u64 = 64;

impl BinaryReader {
    /// 按编码读取字符串；`len` 为 `None` 时读取剩余全部字节
    ///
    /// 解码结果中的 NUL 字符会被移除。
    pub fn read_string(&mut self, encoding: TextEncoding, len: Option<usize>) -> Result<String> {
        let data = self.read_span(len)?;
        Ok(encoding.decode(&data))
    }

    pub fn read_ascii(&mut self, len: usize) -> Result<String> {
        self.read_string(TextEncoding::Ascii, Some(len))
    }

    pub fn read_latin1(&mut self, len: usize) -> Result<String> {
        self.read_string(TextEncoding::Latin1, Some(len))
    }

    pub fn read_utf8(&mut self, len: usize) -> Result<String> {
        self.read_string(TextEncoding::Utf8, Some(len))
    }

    /// 读取字节并格式化为十六进制字符串
    pub fn read_hex(&mut self, len: Option<usize>, format: HexFormat) -> Result<String> {
        let data = self.read_span(len)?;
        Ok(to_hex_string(&data, format.prefix, format.uppercase))
    }

    /// 读取以 0 结尾的字符串
    ///
    /// 在第一个 0 字节处停止，游标停在该 0 字节之后。到达末尾仍未遇到 0 时，
    /// 返回已读取的内容，游标停在末尾。读取失败时游标不变。
    pub fn read_cstring(&mut self, encoding: TextEncoding) -> Result<String> {
        let source = Self::live_source(&mut self.source)?;
        let mut collected = Vec::new();
        let mut position = self.cursor;

        while position < self.length {
            let block = CSTRING_BLOCK.min(self.length - position);
            let chunk = source.read_at(position, block)?;

            if let Some(pos) = chunk.iter().position(|&b| b == 0) {
                collected.extend_from_slice(&chunk[..pos]);
                self.cursor = position + pos as u64 + 1;
                return Ok(encoding.decode(&collected));
            }

            collected.extend_from_slice(&chunk);
            position += block;
        }

        self.cursor = position;
        Ok(encoding.decode(&collected))
    }

    /// 读取一个字节并拆成 8 个位（高位在前）
    pub fn read_bits(&mut self) -> Result<[u8; 8]> {
        Ok(byte_to_bits(self.read_u8()?))
    }

    pub fn read_bits_bool(&mut self) -> Result<[bool; 8]> {
        Ok(self.read_bits()?.map(|bit| bit == 1))
    }

    /// 读取一个字节，返回形如 `"01000001"` 的位串
    pub fn read_bit_string(&mut self) -> Result<String> {
        Ok(bit_string(self.read_u8()?))
    }

    /// 非零即为 true
    pub fn read_bool(&mut self) -> Result<bool> {
        Ok(self.read_u8()? != 0)
    }

    /// 查看下一个字节，不移动游标
    pub fn peek_u8(&mut self) -> Result<u8> {
        let source = Self::live_source(&mut self.source)?;
        let mut buf = [0u8; 1];
        source.read_exact_at(self.cursor, &mut buf)?;
        Ok(buf[0])
    }
}
