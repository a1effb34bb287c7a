use super::BinaryReader;
use crate::datatypes::{decode_f32, decode_f64, decode_int, Endian, IntKind};
use crate::utils::Result;

// 每个 (宽度, 符号, 字节序) 组合一个方法，不提供泛型宽度参数
impl BinaryReader {
    fn read_int<const N: usize>(&mut self, kind: IntKind, endian: Endian) -> Result<i128> {
        let data = self.read_array::<N>()?;
        Ok(decode_int(kind, endian, &data))
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_array::<1>()?[0])
    }

    pub fn read_i8(&mut self) -> Result<i8> {
        Ok(self.read_array::<1>()?[0] as i8)
    }

    pub fn read_u16_le(&mut self) -> Result<u16> {
        Ok(self.read_int::<2>(IntKind::U16, Endian::Little)? as u16)
    }

    pub fn read_u16_be(&mut self) -> Result<u16> {
        Ok(self.read_int::<2>(IntKind::U16, Endian::Big)? as u16)
    }

    pub fn read_i16_le(&mut self) -> Result<i16> {
        Ok(self.read_int::<2>(IntKind::I16, Endian::Little)? as i16)
    }

    pub fn read_i16_be(&mut self) -> Result<i16> {
        Ok(self.read_int::<2>(IntKind::I16, Endian::Big)? as i16)
    }

    /// 24 位无符号整数，以 `u32` 返回
    pub fn read_u24_le(&mut self) -> Result<u32> {
        Ok(self.read_int::<3>(IntKind::U24, Endian::Little)? as u32)
    }

    pub fn read_u24_be(&mut self) -> Result<u32> {
        Ok(self.read_int::<3>(IntKind::U24, Endian::Big)? as u32)
    }

    /// 24 位有符号整数，符号扩展为 `i32`
    pub fn read_i24_le(&mut self) -> Result<i32> {
        Ok(self.read_int::<3>(IntKind::I24, Endian::Little)? as i32)
    }

    pub fn read_i24_be(&mut self) -> Result<i32> {
        Ok(self.read_int::<3>(IntKind::I24, Endian::Big)? as i32)
    }

    pub fn read_u32_le(&mut self) -> Result<u32> {
        Ok(self.read_int::<4>(IntKind::U32, Endian::Little)? as u32)
    }

    pub fn read_u32_be(&mut self) -> Result<u32> {
        Ok(self.read_int::<4>(IntKind::U32, Endian::Big)? as u32)
    }

    pub fn read_i32_le(&mut self) -> Result<i32> {
        Ok(self.read_int::<4>(IntKind::I32, Endian::Little)? as i32)
    }

    pub fn read_i32_be(&mut self) -> Result<i32> {
        Ok(self.read_int::<4>(IntKind::I32, Endian::Big)? as i32)
    }

    pub fn read_u64_le(&mut self) -> Result<u64> {
        Ok(self.read_int::<8>(IntKind::U64, Endian::Little)? as u64)
    }

    pub fn read_u64_be(&mut self) -> Result<u64> {
        Ok(self.read_int::<8>(IntKind::U64, Endian::Big)? as u64)
    }

    pub fn read_i64_le(&mut self) -> Result<i64> {
        Ok(self.read_int::<8>(IntKind::I64, Endian::Little)? as i64)
    }

    pub fn read_i64_be(&mut self) -> Result<i64> {
        Ok(self.read_int::<8>(IntKind::I64, Endian::Big)? as i64)
    }

    pub fn read_f32_le(&mut self) -> Result<f32> {
        Ok(decode_f32(&self.read_array::<4>()?, Endian::Little))
    }

    pub fn read_f32_be(&mut self) -> Result<f32> {
        Ok(decode_f32(&self.read_array::<4>()?, Endian::Big))
    }

    pub fn read_f64_le(&mut self) -> Result<f64> {
        Ok(decode_f64(&self.read_array::<8>()?, Endian::Little))
    }

    pub fn read_f64_be(&mut self) -> Result<f64> {
        Ok(decode_f64(&self.read_array::<8>()?, Endian::Big))
    }
}
