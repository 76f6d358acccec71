//! 帧索引.
//!
//! 一次调用内构建一次: 从第一个可信同步点起逐帧前进, 记录每个音频帧的字节偏移,
//! 累计采样偏移与帧头. 探测与解码共用同一份索引.
//!
//! 帧之间出现无法识别的字节时重新同步并跳过; 遇到参数不同的流 (采样率, 版本, 声道数)
//! 时索引在最后一个一致的帧处结束, 严格模式下报告 [`Mp3Error::Format`].

use fastmp3_codec::{FrameHeader, HEADER_LEN};
use fastmp3_core::{Mp3Error, Mp3Result};
use log::{debug, warn};

use crate::options::ScanOptions;
use crate::scanner::{find_frame, header_at};
use crate::tags::audio_region;
use crate::vbr::{self, VbrHeader};

/// 帧索引条目
#[derive(Debug, Clone, Copy)]
pub struct FrameIndexEntry {
    /// 帧头在整个缓冲区中的字节偏移
    pub offset: usize,
    /// 本帧之前的累计每声道采样数
    pub sample_offset: u64,
    pub header: FrameHeader,
    /// 帧长 (含填充)
    pub len: usize,
    /// 本帧 main data 在储备库中回溯的字节数
    pub main_data_begin: usize,
}

impl FrameIndexEntry {
    /// 本帧的字节
    pub fn bytes<'a>(&self, data: &'a [u8]) -> &'a [u8] {
        &data[self.offset..self.offset + self.len]
    }

    pub fn samples(&self) -> u64 {
        self.header.samples_per_frame() as u64
    }
}

/// 索引结束的原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanStop {
    /// 音频区域正常结束 (可能带有无法同步的尾部字节)
    EndOfStream,
    /// 最后一帧不完整
    Truncated,
    /// 流参数中途改变
    ParameterChange,
}

/// 去掉编码器延迟与填充后的可播放采样范围 (以解码输出的采样位置计)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayableRange {
    /// 解码输出中第一个可播放采样的位置
    pub start: u64,
    /// 可播放采样数
    pub len: u64,
}

/// 整个流的帧索引
#[derive(Debug, Clone)]
pub struct FrameIndex {
    entries: Vec<FrameIndexEntry>,
    vbr: Option<VbrHeader>,
    /// 第一个同步帧之前跳过的字节数 (不含标签)
    leading_garbage: usize,
    stop: ScanStop,
}

impl FrameIndex {
    /// 扫描 `data` 构建帧索引.
    ///
    /// 找不到任何可信的同步点时返回 [`Mp3Error::NoSyncFound`]. 设置了
    /// [`ScanOptions::max_leading_garbage`] 时, 首帧之前的无法识别字节超过上限也视为找不到同步.
    pub fn build(data: &[u8], options: &ScanOptions) -> Mp3Result<Self> {
        let region = audio_region(data);
        let base = region.start;
        let audio = &data[region];

        let mut free_format_bytes = 0usize;
        let first = find_frame(audio, &mut free_format_bytes).ok_or(Mp3Error::NoSyncFound)?;
        if let Some(limit) = options.max_leading_garbage {
            if first.offset > limit {
                warn!(
                    "首帧前有 {} 字节无法识别的数据, 超过上限 {}",
                    first.offset, limit
                );
                return Err(Mp3Error::NoSyncFound);
            }
        }
        debug!(
            "同步于偏移 {}: {:?}, {} Hz, {} 声道",
            base + first.offset,
            first.header.version,
            first.header.sample_rate(),
            first.header.channels()
        );

        let reference = first.header;
        let mut pos = first.offset;
        let first_end = (pos + first.len).min(audio.len());
        let vbr = vbr::parse(&audio[pos..first_end], &first.header);
        if vbr.is_some() {
            pos += first.len;
        }

        let mut entries = Vec::new();
        let mut sample_offset = 0u64;
        let stop = loop {
            if pos >= audio.len() {
                break ScanStop::EndOfStream;
            }

            let consistent = |h: &FrameHeader| {
                reference.compatible_with(h) && reference.channels() == h.channels()
            };
            let Some(header) = header_at(audio, pos).filter(|h| consistent(h)) else {
                match find_frame(&audio[pos..], &mut free_format_bytes) {
                    None => {
                        if audio.len() - pos > HEADER_LEN {
                            debug!(
                                "偏移 {} 之后的 {} 字节无法同步, 视为流结束",
                                base + pos,
                                audio.len() - pos
                            );
                        }
                        break ScanStop::EndOfStream;
                    }
                    Some(sync) if consistent(&sync.header) => {
                        warn!(
                            "偏移 {} 处帧失步, 跳过 {} 字节后重新同步",
                            base + pos,
                            sync.offset
                        );
                        pos += sync.offset;
                        continue;
                    }
                    Some(sync) => {
                        let at = base + pos + sync.offset;
                        if options.strict {
                            return Err(Mp3Error::Format(format!(
                                "偏移 {} 处流参数改变: {} Hz {} 声道 -> {} Hz {} 声道",
                                at,
                                reference.sample_rate(),
                                reference.channels(),
                                sync.header.sample_rate(),
                                sync.header.channels()
                            )));
                        }
                        warn!("偏移 {} 处流参数改变, 索引在此结束", at);
                        break ScanStop::ParameterChange;
                    }
                }
            };

            let len = header.frame_len(free_format_bytes);
            if len <= header.main_data_offset() || pos + len > audio.len() {
                debug!("偏移 {} 处最后一帧不完整, 忽略", base + pos);
                break ScanStop::Truncated;
            }

            entries.push(FrameIndexEntry {
                offset: base + pos,
                sample_offset,
                header,
                len,
                main_data_begin: read_main_data_begin(&audio[pos..pos + len], &header),
            });
            sample_offset += header.samples_per_frame() as u64;
            pos += len;
        };

        debug!("帧索引: {} 个音频帧, {} 个采样, {:?}", entries.len(), sample_offset, stop);
        Ok(Self {
            entries,
            vbr,
            leading_garbage: first.offset,
            stop,
        })
    }

    pub fn entries(&self) -> &[FrameIndexEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn vbr(&self) -> Option<&VbrHeader> {
        self.vbr.as_ref()
    }

    pub fn stop(&self) -> ScanStop {
        self.stop
    }

    pub fn leading_garbage(&self) -> usize {
        self.leading_garbage
    }

    /// 第一个音频帧的帧头
    pub fn first_header(&self) -> Option<&FrameHeader> {
        self.entries.first().map(|e| &e.header)
    }

    /// 全部音频帧解码后的每声道采样数
    pub fn decoded_samples(&self) -> u64 {
        self.entries
            .last()
            .map_or(0, |e| e.sample_offset + e.samples())
    }

    /// 音频帧的总字节数
    pub fn audio_bytes(&self) -> u64 {
        self.entries.iter().map(|e| e.len as u64).sum()
    }

    /// 可播放范围.
    ///
    /// `gapless` 为真且存在 LAME 扩展时, 从开头去掉编码器延迟, 从末尾去掉填充;
    /// 扫描到的帧多于 Xing 头声明的帧数时以声明为准.
    pub fn playable(&self, gapless: bool) -> PlayableRange {
        let decoded = self.decoded_samples();
        let lame = match self.vbr.as_ref() {
            Some(vbr) if gapless => vbr.lame.as_ref().map(|lame| (vbr.frames, lame)),
            _ => None,
        };
        let Some((declared_frames, lame)) = lame else {
            return PlayableRange {
                start: 0,
                len: decoded,
            };
        };

        let mut raw = decoded;
        if let (Some(frames), Some(first)) = (declared_frames, self.entries.first()) {
            raw = raw.min(u64::from(frames) * first.samples());
        }
        let start = u64::from(lame.delay).min(raw);
        let rest = raw - start;
        PlayableRange {
            start,
            len: rest - u64::from(lame.padding).min(rest),
        }
    }

    /// 包含第 `sample` 个解码采样的帧, 超出范围时返回 `None`
    pub fn locate(&self, sample: u64) -> Option<usize> {
        if sample >= self.decoded_samples() {
            return None;
        }
        let idx = self.entries.partition_point(|e| e.sample_offset <= sample);
        Some(idx - 1)
    }
}

/// 侧边信息起始处的 main_data_begin: MPEG-1 为 9 位, MPEG-2/2.5 为 8 位
fn read_main_data_begin(frame: &[u8], header: &FrameHeader) -> usize {
    let at = header.main_data_offset() - header.side_info_len();
    let b0 = usize::from(frame[at]);
    if header.is_mpeg1() {
        (b0 << 1) | usize::from(frame[at + 1] >> 7)
    } else {
        b0
    }
}
