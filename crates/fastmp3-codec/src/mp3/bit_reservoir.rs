//! MP3 比特储备库 (Bit Reservoir)
//!
//! 帧的 main data 可以从前面帧未用完的字节开始 (`main_data_begin` 回溯).
//! 储备库保存上一帧末尾未消费的字节, 最多 511 字节 (9 位回溯指针的上限).

/// 储备库最大字节数
pub const MAX_RESERVOIR_BYTES: usize = 511;

/// 比特储备库
#[derive(Debug, Clone)]
pub struct BitReservoir {
    /// 上一帧留下的字节
    saved: Vec<u8>,
    /// 本帧拼接好的 main data: 回溯字节 + 帧内 main data
    main_data: Vec<u8>,
}

impl Default for BitReservoir {
    fn default() -> Self {
        Self::new()
    }
}

impl BitReservoir {
    pub fn new() -> Self {
        Self {
            saved: Vec::with_capacity(MAX_RESERVOIR_BYTES),
            main_data: Vec::with_capacity(MAX_RESERVOIR_BYTES + 2048),
        }
    }

    /// 拼接本帧 main data.
    ///
    /// 返回 `false` 表示储备库字节不足 `main_data_begin` (例如定位后的第一帧),
    /// 此时拼出的数据不可解码, 但仍需 [`save`](Self::save) 以便后续帧使用.
    pub fn restore(&mut self, frame_main_data: &[u8], main_data_begin: usize) -> bool {
        let have = self.saved.len().min(main_data_begin);
        self.main_data.clear();
        self.main_data
            .extend_from_slice(&self.saved[self.saved.len() - have..]);
        self.main_data.extend_from_slice(frame_main_data);
        self.saved.len() >= main_data_begin
    }

    /// 当前拼接好的 main data
    pub fn main_data(&self) -> &[u8] {
        &self.main_data
    }

    /// 保存 main data 中从 `consumed_bits` (向上取整到字节) 起未消费的部分,
    /// 超过上限时只保留末尾 511 字节.
    pub fn save(&mut self, consumed_bits: usize) {
        let len = self.main_data.len();
        let pos = consumed_bits.div_ceil(8).min(len);
        let start = pos.max(len.saturating_sub(MAX_RESERVOIR_BYTES));
        self.saved.clear();
        self.saved.extend_from_slice(&self.main_data[start..]);
    }

    /// 当前保留的字节数
    pub fn len(&self) -> usize {
        self.saved.len()
    }

    pub fn is_empty(&self) -> bool {
        self.saved.is_empty()
    }

    pub fn clear(&mut self) {
        self.saved.clear();
        self.main_data.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_回溯拼接() {
        let mut res = BitReservoir::new();
        assert!(res.restore(&[1, 2, 3, 4], 0));
        res.save(16);
        assert_eq!(res.len(), 2);

        // 回溯 1 字节: 只取储备库的最后 1 字节
        assert!(res.restore(&[5, 6], 1));
        assert_eq!(res.main_data(), &[4, 5, 6]);
    }

    #[test]
    fn test_储备不足() {
        let mut res = BitReservoir::new();
        assert!(!res.restore(&[9, 9, 9], 10));
        assert_eq!(res.main_data(), &[9, 9, 9]);
        // 未解码时全部保留
        res.save(0);
        assert_eq!(res.len(), 3);
        assert!(!res.restore(&[], 4));
        assert!(res.restore(&[], 3));
    }

    #[test]
    fn test_保存上限_511() {
        let mut res = BitReservoir::new();
        let data: Vec<u8> = (0..1000u32).map(|i| i as u8).collect();
        res.restore(&data, 0);
        res.save(3);
        assert_eq!(res.len(), MAX_RESERVOIR_BYTES);
        assert!(res.restore(&[], MAX_RESERVOIR_BYTES));
        assert_eq!(res.main_data()[0], (1000 - 511) as u8);
        res.clear();
        assert!(res.is_empty());
    }
}
