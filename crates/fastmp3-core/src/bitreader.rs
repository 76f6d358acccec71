//! 比特流读取器.
//!
//! 按大端位序 (MSB first) 从字节缓冲区中取位, 服务于帧头/侧边信息/比例因子的解析,
//! 同时支撑独立的位展开工具 [`unpack_bits`].
//!
//! 与 "越界返回 0" 的做法不同, 这里读取越界时返回 [`Mp3Error::Underrun`],
//! 由上层决定把它当作帧损坏处理.

use crate::{Mp3Error, Mp3Result};

/// 比特流读取器
///
/// # 示例
/// ```
/// use fastmp3_core::bitreader::BitReader;
///
/// let data = [0b10110001, 0b01010101];
/// let mut br = BitReader::new(&data);
/// assert_eq!(br.read_bits(4).unwrap(), 0b1011);
/// assert_eq!(br.peek_bits(4).unwrap(), 0b0001);
/// assert_eq!(br.read_bits(12).unwrap(), 0b0001_0101_0101);
/// assert_eq!(br.bits_left(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    /// 源数据
    data: &'a [u8],
    /// 当前位位置 (从缓冲区起点计)
    pos: usize,
}

impl<'a> BitReader<'a> {
    /// 创建新的比特流读取器, 从第 0 位开始
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// 从指定位位置开始读取
    ///
    /// `bit_pos` 允许等于总位数 (此时读取器为空).
    pub fn at_bit(data: &'a [u8], bit_pos: usize) -> Mp3Result<Self> {
        let total = data.len() * 8;
        if bit_pos > total {
            return Err(Mp3Error::Underrun {
                requested: 0,
                remaining: 0,
            });
        }
        Ok(Self { data, pos: bit_pos })
    }

    /// 已读取的位数 (即当前位位置)
    pub fn bits_read(&self) -> usize {
        self.pos
    }

    /// 剩余可读位数
    pub fn bits_left(&self) -> usize {
        (self.data.len() * 8).saturating_sub(self.pos)
    }

    /// 是否已读完
    pub fn is_eof(&self) -> bool {
        self.bits_left() == 0
    }

    /// 读取 1 个位
    pub fn read_bit(&mut self) -> Mp3Result<bool> {
        Ok(self.read_bits(1)? != 0)
    }

    /// 读取 N 个位 (0 <= N <= 32), 返回值的低 N 位有效
    pub fn read_bits(&mut self, n: u32) -> Mp3Result<u32> {
        let value = self.peek_bits(n)?;
        self.pos += n as usize;
        Ok(value)
    }

    /// 窥视 N 个位, 不移动位置
    pub fn peek_bits(&self, n: u32) -> Mp3Result<u32> {
        if n == 0 {
            return Ok(0);
        }
        if n > 32 {
            return Err(Mp3Error::InvalidArgument(format!(
                "peek_bits: n={} 超过 32 位",
                n,
            )));
        }
        let remaining = self.bits_left();
        if n as usize > remaining {
            return Err(Mp3Error::Underrun {
                requested: n,
                remaining,
            });
        }

        // 以 64 位累加器拼接跨字节的位, 最多涉及 5 个字节
        let first = self.pos / 8;
        let skip = (self.pos % 8) as u32;
        let span = (skip + n).div_ceil(8) as usize;
        let mut acc: u64 = 0;
        for &byte in &self.data[first..first + span] {
            acc = (acc << 8) | u64::from(byte);
        }
        let shift = span as u32 * 8 - skip - n;
        let mask = (1u64 << n) - 1;
        Ok(((acc >> shift) & mask) as u32)
    }

    /// 跳过 N 个位
    pub fn skip_bits(&mut self, n: usize) -> Mp3Result<()> {
        let remaining = self.bits_left();
        if n > remaining {
            return Err(Mp3Error::Underrun {
                requested: n.min(u32::MAX as usize) as u32,
                remaining,
            });
        }
        self.pos += n;
        Ok(())
    }

    /// 定位到绝对位位置
    pub fn seek_to(&mut self, bit_pos: usize) -> Mp3Result<()> {
        if bit_pos > self.data.len() * 8 {
            return Err(Mp3Error::Underrun {
                requested: 0,
                remaining: self.bits_left(),
            });
        }
        self.pos = bit_pos;
        Ok(())
    }

    /// 对齐到下一个字节边界 (已对齐时不动)
    pub fn align_to_byte(&mut self) {
        self.pos = self.pos.div_ceil(8) * 8;
    }

    /// 当前所在字节位置 (向下取整)
    pub fn byte_position(&self) -> usize {
        self.pos / 8
    }

    /// 底层数据
    pub fn data(&self) -> &'a [u8] {
        self.data
    }
}

/// 把每个输入字节展开为 8 个取值为 0/1 的输出字节, 每字节最高位在前.
///
/// 输出长度恒为输入长度的 8 倍.
///
/// ```
/// use fastmp3_core::unpack_bits;
///
/// assert_eq!(unpack_bits(&[0b1000_0001]), vec![1, 0, 0, 0, 0, 0, 0, 1]);
/// assert!(unpack_bits(&[]).is_empty());
/// ```
pub fn unpack_bits(data: &[u8]) -> Vec<u8> {
    let mut reader = BitReader::new(data);
    let mut out = Vec::with_capacity(data.len() * 8);
    while let Ok(bit) = reader.read_bit() {
        out.push(u8::from(bit));
    }
    out
}
