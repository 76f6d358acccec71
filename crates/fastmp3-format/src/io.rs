//! 输入抽象.
//!
//! [`StreamBuffer`] 持有从文件一次性读入的编码字节; 内存缓冲区入口直接使用 `&[u8]`.
//! [`ByteCursor`] 提供大端/小端整数读取, 供标签与 VBR 头解析使用.

use std::path::Path;

use fastmp3_core::{Mp3Error, Mp3Result};

/// 从文件读入的编码字节, 只读
#[derive(Debug, Clone)]
pub struct StreamBuffer {
    data: Vec<u8>,
}

impl StreamBuffer {
    /// 整个读入文件. 路径不存在时返回 [`Mp3Error::Io`] (NotFound).
    pub fn read_file(path: impl AsRef<Path>) -> Mp3Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path)?;
        log::debug!("读入文件 {}: {} 字节", path.display(), data.len());
        Ok(Self { data })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// 字节游标, 越界读取返回 [`Mp3Error::Underrun`]
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    /// 读取 `n` 个字节
    pub fn read_bytes(&mut self, n: usize) -> Mp3Result<&'a [u8]> {
        if n > self.remaining() {
            return Err(Mp3Error::Underrun {
                requested: (n * 8).min(u32::MAX as usize) as u32,
                remaining: self.remaining() * 8,
            });
        }
        let out = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(out)
    }

    pub fn skip(&mut self, n: usize) -> Mp3Result<()> {
        self.read_bytes(n).map(|_| ())
    }

    pub fn read_u8(&mut self) -> Mp3Result<u8> {
        Ok(self.read_bytes(1)?[0])
    }

    pub fn read_u16_be(&mut self) -> Mp3Result<u16> {
        let b = self.read_bytes(2)?;
        Ok(u16::from_be_bytes([b[0], b[1]]))
    }

    pub fn read_u32_be(&mut self) -> Mp3Result<u32> {
        let b = self.read_bytes(4)?;
        Ok(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
    }

    pub fn read_u32_le(&mut self) -> Mp3Result<u32> {
        let b = self.read_bytes(4)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    /// 读取 4 字节标识 (如 `b"Xing"`)
    pub fn read_tag(&mut self) -> Mp3Result<[u8; 4]> {
        let b = self.read_bytes(4)?;
        Ok([b[0], b[1], b[2], b[3]])
    }
}
