//! 元数据探测: 只走帧头, 不做 Huffman 解码与重建.

use fastmp3_core::{Mp3Error, Mp3Result};
use log::debug;
use serde::Serialize;

use crate::index::FrameIndex;
use crate::options::ScanOptions;

/// 探测结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProbeResult {
    /// 每声道可播放采样数 (已按选项去掉编码器延迟与填充)
    pub total_samples: u64,
    pub channels: u32,
    pub sample_rate: u32,
    /// 恒定码率流为帧头码率, 否则为按字节数加权的平均码率 (kbps, 四舍五入)
    pub bitrate_kbps: u32,
}

impl ProbeResult {
    /// 由已构建的帧索引计算. 索引中没有音频帧时返回 [`Mp3Error::NoSyncFound`].
    pub fn from_index(index: &FrameIndex, gapless: bool) -> Mp3Result<Self> {
        let first = index.first_header().ok_or(Mp3Error::NoSyncFound)?;
        let sample_rate = first.sample_rate();

        let constant = index
            .entries()
            .iter()
            .all(|e| e.header.bitrate_index == first.bitrate_index);
        let bitrate_kbps = if constant && !first.is_free_format() {
            first.bitrate_kbps()
        } else {
            average_kbps(index.audio_bytes(), index.decoded_samples(), sample_rate)
        };

        Ok(Self {
            total_samples: index.playable(gapless).len,
            channels: first.channels() as u32,
            sample_rate,
            bitrate_kbps,
        })
    }

    /// 时长 (秒)
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.total_samples as f64 / f64::from(self.sample_rate)
    }
}

/// `bytes * 8 / 时长`, 单位 kbps
fn average_kbps(bytes: u64, samples: u64, sample_rate: u32) -> u32 {
    if samples == 0 {
        return 0;
    }
    let bits = bytes as f64 * 8.0;
    let secs = samples as f64 / f64::from(sample_rate);
    (bits / secs / 1000.0).round() as u32
}

/// 探测 `data` 的元数据
pub fn probe(data: &[u8], options: &ScanOptions) -> Mp3Result<ProbeResult> {
    let index = FrameIndex::build(data, options)?;
    let result = ProbeResult::from_index(&index, options.gapless)?;
    debug!("探测结果: {:?}", result);
    Ok(result)
}
