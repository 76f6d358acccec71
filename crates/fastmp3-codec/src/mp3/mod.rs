//! MPEG-1/2/2.5 Layer III 解码器.
//!
//! 处理链路:
//! 帧头 -> 侧边信息 -> 比特储备库拼接 main data -> 比例因子 -> Huffman 频谱
//! -> 立体声处理 -> 短块重排 -> 抗混叠 -> IMDCT -> 频率反转 -> 合成滤波器组.
//!
//! 解码器只接受一个完整帧的字节, 不负责同步搜索; 帧定位由格式层完成.

mod alias;
mod bit_reservoir;
pub mod header;
mod huffman;
mod imdct;
mod reorder;
mod requantize;
pub mod side_info;
mod stereo;
mod synthesis;
mod tables;

use fastmp3_core::{BitReader, Mp3Error, Mp3Result};
use log::debug;

pub use self::bit_reservoir::MAX_RESERVOIR_BYTES;
pub use self::header::{ChannelMode, FrameHeader, HEADER_LEN, MpegVersion};
pub use self::side_info::{GranuleInfo, SideInfo};

use self::bit_reservoir::BitReservoir;
use self::huffman::decode_spectrum;
use self::imdct::{Overlap, frequency_inversion, imdct_granule};
use self::requantize::{MAX_SFB, decode_scalefactors};
use self::stereo::{intensity_stereo, ms_stereo};
use self::synthesis::SynthesisFilter;

/// 一个 granule 每声道的样本数
pub const GRANULE_SAMPLES: usize = 576;

/// 每帧每声道最多的样本数 (MPEG-1)
pub const MAX_FRAME_SAMPLES: usize = 1152;

/// 单帧的解码结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    /// 正常解码
    Decoded,
    /// 储备库中的回溯字节不足 (通常是定位后的前几帧), 输出为静音
    ReservoirShortfall,
    /// main data 损坏, 输出为静音
    Concealed,
}

/// 单帧解码信息
#[derive(Debug, Clone, Copy)]
pub struct DecodedFrame {
    /// 每声道样本数
    pub samples: usize,
    pub channels: usize,
    pub sample_rate: u32,
    pub status: FrameStatus,
}

/// 跨帧保留的解码会话状态: 比特储备库, IMDCT 重叠缓冲, 合成滤波器历史.
///
/// 每个解码调用独占一份, 通过 `&mut` 传递.
#[derive(Debug)]
pub struct Layer3Decoder {
    reservoir: BitReservoir,
    overlap: [Overlap; 2],
    synth: SynthesisFilter,
    /// 上一帧帧头, 参数改变时重置状态
    last_header: Option<FrameHeader>,
    // 以下为单帧内的工作区
    spectrum: [[f32; GRANULE_SAMPLES]; 2],
    /// 各声道原始比例因子 (同时是右声道的强度立体声位置)
    ist_pos: [[u8; MAX_SFB]; 2],
    gains: [f32; MAX_SFB],
}

impl Default for Layer3Decoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Layer3Decoder {
    pub fn new() -> Self {
        Self {
            reservoir: BitReservoir::new(),
            overlap: [[0.0; 288]; 2],
            synth: SynthesisFilter::new(),
            last_header: None,
            spectrum: [[0.0; GRANULE_SAMPLES]; 2],
            ist_pos: [[0; MAX_SFB]; 2],
            gains: [0.0; MAX_SFB],
        }
    }

    /// 清空全部跨帧状态
    pub fn reset(&mut self) {
        self.reservoir.clear();
        self.overlap = [[0.0; 288]; 2];
        self.synth.reset();
        self.last_header = None;
    }

    /// 当前储备库中保留的字节数
    pub fn reservoir_len(&self) -> usize {
        self.reservoir.len()
    }

    /// 解码一个完整帧 (从帧头开始, 至少覆盖到帧尾).
    ///
    /// 交错 PCM 写入 `pcm` 的前 `samples * channels` 个位置.
    ///
    /// 侧边信息损坏时重置会话并返回 [`Mp3Error::Decode`], 调用方应以静音代替本帧;
    /// 储备库不足或 main data 越界时本帧输出静音, 会话继续.
    pub fn decode_frame(&mut self, frame: &[u8], pcm: &mut [f32]) -> Mp3Result<DecodedFrame> {
        let header = FrameHeader::parse(frame)?;
        let changed = self.last_header.is_some_and(|prev| {
            !prev.compatible_with(&header) || prev.channels() != header.channels()
        });
        if changed {
            debug!("流参数改变, 重置解码状态");
            self.reset();
        }

        let nch = header.channels();
        let samples = header.samples_per_frame();
        let out_len = samples * nch;
        if pcm.len() < out_len {
            return Err(Mp3Error::InvalidArgument(format!(
                "PCM 缓冲区不足: 需要 {} 个样本, 实际 {}",
                out_len,
                pcm.len()
            )));
        }
        let pcm = &mut pcm[..out_len];

        let side = match SideInfo::parse(&header, frame) {
            Ok(side) => side,
            Err(e) => {
                debug!("侧边信息损坏, 重置储备库: {}", e);
                self.reset();
                return Err(e);
            }
        };
        self.last_header = Some(header);

        let main_data = &frame[header.main_data_offset()..];
        let status = if self.reservoir.restore(main_data, side.main_data_begin) {
            match self.decode_main_data(&header, &side, pcm) {
                Ok(consumed) => {
                    self.reservoir.save(consumed);
                    FrameStatus::Decoded
                }
                Err(e) => {
                    debug!("main data 解码失败, 本帧静音: {}", e);
                    pcm.fill(0.0);
                    self.reservoir.save(0);
                    FrameStatus::Concealed
                }
            }
        } else {
            debug!(
                "储备库字节不足: 需要回溯 {}, 现有 {}",
                side.main_data_begin,
                self.reservoir.len()
            );
            pcm.fill(0.0);
            self.reservoir.save(0);
            FrameStatus::ReservoirShortfall
        };

        Ok(DecodedFrame {
            samples,
            channels: nch,
            sample_rate: header.sample_rate(),
            status,
        })
    }

    /// 解码全部 granule, 返回 main data 中已消费的位数
    fn decode_main_data(
        &mut self,
        header: &FrameHeader,
        side: &SideInfo,
        pcm: &mut [f32],
    ) -> Mp3Result<usize> {
        let Self {
            reservoir,
            overlap,
            synth,
            spectrum,
            ist_pos,
            gains,
            ..
        } = self;
        let mut br = BitReader::new(reservoir.main_data());
        let nch = header.channels();

        for (gr, out) in pcm
            .chunks_exact_mut(GRANULE_SAMPLES * nch)
            .take(header.granules())
            .enumerate()
        {
            let granules = &side.granules[gr];

            for ch in 0..nch {
                let info = &granules[ch];
                let limit = br.bits_read() + info.part2_3_length as usize;
                decode_scalefactors(header, &mut ist_pos[ch], &mut br, info, gains, ch);
                spectrum[ch].fill(0.0);
                decode_spectrum(
                    &mut spectrum[ch],
                    br.data(),
                    br.bits_read(),
                    limit,
                    info,
                    gains,
                );
                br.seek_to(limit)?;
            }

            if nch == 2 {
                let [left, right] = &mut *spectrum;
                if header.is_intensity_stereo() {
                    intensity_stereo(
                        header,
                        left,
                        right,
                        &mut ist_pos[1],
                        &granules[0],
                        &granules[1],
                    );
                } else if header.is_ms_stereo() {
                    ms_stereo(left, right);
                }
            }

            for ch in 0..nch {
                let info = &granules[ch];
                reconstruct(header, info, &mut spectrum[ch], &mut overlap[ch]);
            }

            let [left, right] = &mut *spectrum;
            let right = if nch == 2 { Some(right) } else { None };
            synth.synth_granule(left, right, out);
        }
        Ok(br.bits_read())
    }
}

/// 单声道频谱到子带时域: 短块重排, 抗混叠, IMDCT, 频率反转
fn reconstruct(
    header: &FrameHeader,
    info: &GranuleInfo,
    spectrum: &mut [f32; GRANULE_SAMPLES],
    overlap: &mut Overlap,
) {
    // MPEG-2.5 8kHz 的混合块长块部分覆盖 4 个子带
    let mut n_long_bands = if info.mixed_block { 2 } else { 0 };
    if header.sample_rate_slot() == 2 {
        n_long_bands <<= 1;
    }

    let aa_bands = if info.is_short() {
        let widths = info.sfb_widths.get(info.n_long_sfb..).unwrap_or(&[]);
        reorder::reorder_short(&mut spectrum[18 * n_long_bands..], widths);
        n_long_bands.saturating_sub(1)
    } else {
        31
    };
    alias::alias_reduction(spectrum, aa_bands);
    imdct_granule(spectrum, overlap, info.block_type, n_long_bands);
    frequency_inversion(spectrum);
}
