//! 解码编排: 按采样偏移/长度解码一段 PCM.
//!
//! 流程: 构建帧索引 -> 二分定位目标帧 -> 回退若干帧预热储备库与重叠状态 ->
//! 逐帧解码, 丢弃目标偏移之前的采样 -> 满足长度后停止.
//!
//! 定位的代价与目标帧之前需要回放的帧数成正比 (通常 2~4 帧), 与流长度无关.

use fastmp3_codec::{Layer3Decoder, MAX_FRAME_SAMPLES};
use fastmp3_core::{Mp3Error, Mp3Result};
use fastmp3_format::{FrameIndex, FrameIndexEntry, ScanOptions};
use serde::Deserialize;
use tracing::{debug, debug_span, warn};

/// 解码请求, 单位均为每声道采样
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DecodeRequest {
    /// 起始采样偏移
    pub offset: u64,
    /// 最多输出的采样数, `None` 表示解码到流末尾
    pub length: Option<u64>,
}

impl DecodeRequest {
    /// 从头解码整条流
    pub fn full() -> Self {
        Self::default()
    }

    pub fn with_offset(mut self, offset: u64) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_length(mut self, length: u64) -> Self {
        self.length = Some(length);
        self
    }
}

/// 解码得到的交错 PCM, 取值范围 [-1.0, 1.0]
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedAudio {
    samples: Vec<f32>,
    channels: usize,
    sample_rate: u32,
}

impl DecodedAudio {
    /// 交错样本
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// 行数 (每声道采样数)
    pub fn rows(&self) -> usize {
        self.samples.len() / self.channels.max(1)
    }

    /// 第 `row` 行的各声道样本
    pub fn frame(&self, row: usize) -> Option<&[f32]> {
        let start = row.checked_mul(self.channels)?;
        self.samples.get(start..start + self.channels)
    }

    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.rows() as f64 / f64::from(self.sample_rate)
    }
}

/// 解码 `data` 中 `request` 指定的采样区间.
///
/// `offset` 不小于可播放总采样数时返回 [`Mp3Error::Seek`]. 损坏的帧以静音代替,
/// 流提前结束时不足部分补零, 因此输出行数总是 `min(length, total - offset)`.
pub fn decode(
    data: &[u8],
    request: &DecodeRequest,
    options: &ScanOptions,
) -> Mp3Result<DecodedAudio> {
    let span = debug_span!("decode", offset = request.offset, length = ?request.length);
    let _enter = span.enter();

    let index = FrameIndex::build(data, options)?;
    let first = *index.first_header().ok_or(Mp3Error::NoSyncFound)?;
    let channels = first.channels();
    let sample_rate = first.sample_rate();

    let range = index.playable(options.gapless);
    let total = range.len;
    if request.offset >= total {
        return Err(Mp3Error::Seek {
            offset: request.offset,
            total,
        });
    }
    let rows = request
        .length
        .map_or(total - request.offset, |len| len.min(total - request.offset));
    let rows = usize::try_from(rows)
        .map_err(|_| Mp3Error::InvalidArgument(format!("输出长度过大: {rows}")))?;

    let start_sample = range.start + request.offset;
    let entries = index.entries();
    let target = index.locate(start_sample).ok_or(Mp3Error::Seek {
        offset: request.offset,
        total,
    })?;
    let prime_from = priming_start(entries, target);
    debug!(
        "目标帧 {}, 从第 {} 帧开始预热, 共 {} 行",
        target, prime_from, rows
    );

    let wanted = rows * channels;
    let mut out = Vec::with_capacity(wanted);
    let mut skip = (start_sample - entries[prime_from].sample_offset) as usize * channels;
    let mut decoder = Layer3Decoder::new();
    let mut pcm = vec![0.0f32; MAX_FRAME_SAMPLES * 2];

    for entry in &entries[prime_from..] {
        if out.len() >= wanted {
            break;
        }
        let produced = decode_entry(&mut decoder, data, entry, &mut pcm, channels);
        let frame_pcm = &pcm[..produced];
        if skip >= frame_pcm.len() {
            skip -= frame_pcm.len();
            continue;
        }
        let frame_pcm = &frame_pcm[skip..];
        skip = 0;
        let take = frame_pcm.len().min(wanted - out.len());
        out.extend_from_slice(&frame_pcm[..take]);
    }

    if out.len() < wanted {
        debug!("流提前结束, 补零 {} 个样本", wanted - out.len());
        out.resize(wanted, 0.0);
    }

    Ok(DecodedAudio {
        samples: out,
        channels,
        sample_rate,
    })
}

/// 解码一个索引帧, 返回写入 `pcm` 的交错样本数. 任何帧级错误都以静音代替.
fn decode_entry(
    decoder: &mut Layer3Decoder,
    data: &[u8],
    entry: &FrameIndexEntry,
    pcm: &mut [f32],
    channels: usize,
) -> usize {
    let expected = entry.header.samples_per_frame() * channels;
    match decoder.decode_frame(entry.bytes(data), pcm) {
        Ok(info) if info.samples * info.channels == expected => expected,
        Ok(info) => {
            warn!(
                "偏移 {} 处帧输出 {}x{} 个样本, 与索引不符, 以静音代替",
                entry.offset, info.samples, info.channels
            );
            pcm[..expected].fill(0.0);
            expected
        }
        Err(e) => {
            warn!("偏移 {} 处帧解码失败, 以静音代替: {}", entry.offset, e);
            pcm[..expected].fill(0.0);
            expected
        }
    }
}

/// 为解码第 `target` 帧需要先回放的第一帧.
///
/// 目标帧的输出依赖前一帧的 IMDCT 重叠与合成滤波器历史; LSF 帧只有一个 granule,
/// 前一帧自身的输出又带有再前一帧的重叠, 因此要正确解码的帧是目标帧及其前 1 帧
/// (LSF 为前 2 帧). 回退到这些帧的储备库回溯都被前面各帧的 main data 覆盖, 再多退一帧.
fn priming_start(entries: &[FrameIndexEntry], target: usize) -> usize {
    let settle = if entries[target].header.is_lsf() { 2 } else { 1 };
    (target.saturating_sub(settle)..=target)
        .map(|frame| reservoir_start(entries, frame))
        .min()
        .unwrap_or(target)
        .saturating_sub(1)
}

/// 第 `frame` 帧的 `main_data_begin` 回溯到的最早一帧
fn reservoir_start(entries: &[FrameIndexEntry], frame: usize) -> usize {
    let mut need = entries[frame].main_data_begin;
    let mut i = frame;
    while need > 0 && i > 0 {
        i -= 1;
        let e = &entries[i];
        let main_data = e.len.saturating_sub(e.header.main_data_offset());
        need = need.saturating_sub(main_data);
    }
    i
}
