//! 比特流写入器.
//!
//! [`BitReader`](crate::BitReader) 的逆过程: 按大端位序向缓冲区写位.
//! 解码引擎本身不编码, 它用于 [`pack_bits`] 以及在测试中拼装合成的 MP3 帧.

/// 比特流写入器
///
/// # 示例
/// ```
/// use fastmp3_core::bitwriter::BitWriter;
///
/// let mut bw = BitWriter::new();
/// bw.write_bits(0b1011, 4);
/// bw.write_bits(0b0001_0101_0101, 12);
/// assert_eq!(bw.finish(), vec![0b10110001, 0b01010101]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct BitWriter {
    /// 已完成的字节
    data: Vec<u8>,
    /// 正在填充的字节 (低 `pending` 位有效)
    current: u8,
    /// 当前字节中已填充的位数 (0-7)
    pending: u8,
}

impl BitWriter {
    /// 创建空写入器
    pub fn new() -> Self {
        Self::default()
    }

    /// 以指定字节容量创建
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
            current: 0,
            pending: 0,
        }
    }

    /// 已写入的总位数
    pub fn bits_written(&self) -> usize {
        self.data.len() * 8 + self.pending as usize
    }

    /// 写入单个位
    pub fn write_bit(&mut self, bit: bool) {
        self.current = (self.current << 1) | u8::from(bit);
        self.pending += 1;
        if self.pending == 8 {
            self.data.push(self.current);
            self.current = 0;
            self.pending = 0;
        }
    }

    /// 写入 `value` 的低 `n` 位 (n <= 32), 高位在前
    pub fn write_bits(&mut self, value: u32, n: u32) {
        debug_assert!(n <= 32, "write_bits: n={} 超过 32 位", n);
        for i in (0..n.min(32)).rev() {
            self.write_bit((value >> i) & 1 != 0);
        }
    }

    /// 写入整段字节
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        if self.pending == 0 {
            self.data.extend_from_slice(bytes);
        } else {
            for &b in bytes {
                self.write_bits(u32::from(b), 8);
            }
        }
    }

    /// 用 0 填充到字节边界
    pub fn align_to_byte(&mut self) {
        if self.pending > 0 {
            let pad = 8 - self.pending;
            self.data.push(self.current << pad);
            self.current = 0;
            self.pending = 0;
        }
    }

    /// 结束写入, 返回字节数据 (不足一字节时补 0)
    pub fn finish(mut self) -> Vec<u8> {
        self.align_to_byte();
        self.data
    }
}

/// 把 0/1 位序列重新打包为字节, 每字节最高位在前; 非零值视为 1.
///
/// 这是 [`unpack_bits`](crate::unpack_bits) 的逆运算, 末尾不足 8 位时补 0.
pub fn pack_bits(bits: &[u8]) -> Vec<u8> {
    let mut bw = BitWriter::with_capacity(bits.len().div_ceil(8));
    for &b in bits {
        bw.write_bit(b != 0);
    }
    bw.finish()
}
