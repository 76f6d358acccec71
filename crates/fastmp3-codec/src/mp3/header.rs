//! MPEG 音频帧头解析.
//!
//! 帧头为 4 字节:
//!
//! ```text
//! AAAAAAAA AAABBCCD EEEEFFGH IIJJKLMM
//! A: 同步字 (11 位全 1)   B: 版本     C: Layer   D: 无 CRC 标志
//! E: 比特率索引          F: 采样率索引 G: 填充    H: 私有位
//! I: 声道模式            J: 模式扩展   K: 版权    L: 原始  M: 强调
//! ```
//!
//! 只接受 Layer III; Layer I/II 的帧头按无效同步处理.

use fastmp3_core::{Mp3Error, Mp3Result};

/// 帧头字节数
pub const HEADER_LEN: usize = 4;

/// MPEG 版本
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MpegVersion {
    Mpeg1,
    Mpeg2,
    Mpeg25,
}

/// 声道模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelMode {
    Stereo,
    JointStereo,
    DualChannel,
    SingleChannel,
}

/// MPEG-1 Layer III 比特率 (kbps), 索引 0 为自由格式
const BITRATE_V1_L3: [u32; 15] = [
    0, 32, 40, 48, 56, 64, 80, 96, 112, 128, 160, 192, 224, 256, 320,
];

/// MPEG-2/2.5 Layer III 比特率 (kbps)
const BITRATE_V2_L3: [u32; 15] = [
    0, 8, 16, 24, 32, 40, 48, 56, 64, 80, 96, 112, 128, 144, 160,
];

/// MPEG-1 采样率, MPEG-2 减半, MPEG-2.5 再减半
const SAMPLE_RATE_V1: [u32; 3] = [44100, 48000, 32000];

/// 已校验的 Layer III 帧头
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    pub version: MpegVersion,
    /// 帧头后是否带 16 位 CRC
    pub crc_protected: bool,
    pub bitrate_index: u8,
    pub sample_rate_index: u8,
    pub padding: bool,
    pub private: bool,
    pub mode: ChannelMode,
    pub mode_extension: u8,
    pub copyright: bool,
    pub original: bool,
    pub emphasis: u8,
    /// 原始 4 字节
    raw: [u8; HEADER_LEN],
}

impl FrameHeader {
    /// 从 4 字节解析帧头
    pub fn parse(bytes: &[u8]) -> Mp3Result<Self> {
        let raw: [u8; HEADER_LEN] = bytes
            .get(..HEADER_LEN)
            .and_then(|b| b.try_into().ok())
            .ok_or(Mp3Error::Underrun {
                requested: 32,
                remaining: bytes.len() * 8,
            })?;
        let word = u32::from_be_bytes(raw);

        if word & 0xFFE0_0000 != 0xFFE0_0000 {
            return Err(Mp3Error::Decode("无效的帧同步字".into()));
        }

        let version = match (word >> 19) & 0x3 {
            3 => MpegVersion::Mpeg1,
            2 => MpegVersion::Mpeg2,
            0 => MpegVersion::Mpeg25,
            _ => return Err(Mp3Error::Decode("保留的 MPEG 版本".into())),
        };

        // 01 = Layer III
        if (word >> 17) & 0x3 != 1 {
            return Err(Mp3Error::Decode("仅支持 Layer III".into()));
        }

        let bitrate_index = ((word >> 12) & 0xF) as u8;
        if bitrate_index == 15 {
            return Err(Mp3Error::Decode("无效的比特率索引".into()));
        }

        let sample_rate_index = ((word >> 10) & 0x3) as u8;
        if sample_rate_index == 3 {
            return Err(Mp3Error::Decode("无效的采样率索引".into()));
        }

        let mode = match (word >> 6) & 0x3 {
            0 => ChannelMode::Stereo,
            1 => ChannelMode::JointStereo,
            2 => ChannelMode::DualChannel,
            _ => ChannelMode::SingleChannel,
        };

        Ok(Self {
            version,
            crc_protected: (word >> 16) & 0x1 == 0,
            bitrate_index,
            sample_rate_index,
            padding: (word >> 9) & 0x1 == 1,
            private: (word >> 8) & 0x1 == 1,
            mode,
            mode_extension: ((word >> 4) & 0x3) as u8,
            copyright: (word >> 3) & 0x1 == 1,
            original: (word >> 2) & 0x1 == 1,
            emphasis: (word & 0x3) as u8,
            raw,
        })
    }

    /// 快速判断 `bytes` 起始处是否像一个 Layer III 帧头
    pub fn is_sync(bytes: &[u8]) -> bool {
        match bytes {
            [0xFF, b1, b2, ..] => {
                b1 & 0xE0 == 0xE0
                    && (b1 >> 3) & 0x3 != 1
                    && (b1 >> 1) & 0x3 == 1
                    && b2 >> 4 != 15
                    && (b2 >> 2) & 0x3 != 3
            }
            _ => false,
        }
    }

    /// 两个帧头是否属于同一条流: 版本, Layer, 采样率, 是否自由格式均一致
    pub fn compatible_with(&self, other: &FrameHeader) -> bool {
        self.version == other.version
            && self.sample_rate_index == other.sample_rate_index
            && self.is_free_format() == other.is_free_format()
    }

    /// 原始帧头字节
    pub fn raw(&self) -> [u8; HEADER_LEN] {
        self.raw
    }

    pub fn is_mpeg1(&self) -> bool {
        self.version == MpegVersion::Mpeg1
    }

    /// MPEG-2 / MPEG-2.5 (低采样率扩展)
    pub fn is_lsf(&self) -> bool {
        !self.is_mpeg1()
    }

    pub fn is_free_format(&self) -> bool {
        self.bitrate_index == 0
    }

    pub fn channels(&self) -> usize {
        if self.mode == ChannelMode::SingleChannel {
            1
        } else {
            2
        }
    }

    pub fn sample_rate(&self) -> u32 {
        let base = SAMPLE_RATE_V1[self.sample_rate_index as usize];
        match self.version {
            MpegVersion::Mpeg1 => base,
            MpegVersion::Mpeg2 => base / 2,
            MpegVersion::Mpeg25 => base / 4,
        }
    }

    /// 比特率 (kbps), 自由格式返回 0
    pub fn bitrate_kbps(&self) -> u32 {
        let idx = self.bitrate_index as usize;
        if self.is_mpeg1() {
            BITRATE_V1_L3[idx]
        } else {
            BITRATE_V2_L3[idx]
        }
    }

    /// 每帧每声道采样数
    pub fn samples_per_frame(&self) -> usize {
        if self.is_mpeg1() { 1152 } else { 576 }
    }

    /// 每帧 granule 数
    pub fn granules(&self) -> usize {
        if self.is_mpeg1() { 2 } else { 1 }
    }

    /// 帧字节长度 (含帧头与填充字节).
    ///
    /// 自由格式流的长度无法由帧头推出, 由调用方传入扫描得到的 `free_format_len`
    /// (不含填充); 其余情况忽略该参数.
    pub fn frame_len(&self, free_format_len: usize) -> usize {
        let base = if self.is_free_format() {
            free_format_len
        } else {
            (self.samples_per_frame() as u32 * self.bitrate_kbps() * 125 / self.sample_rate())
                as usize
        };
        base + usize::from(self.padding)
    }

    /// 侧边信息字节数
    pub fn side_info_len(&self) -> usize {
        match (self.is_mpeg1(), self.channels()) {
            (true, 1) => 17,
            (true, _) => 32,
            (false, 1) => 9,
            (false, _) => 17,
        }
    }

    /// main data 在帧内的起始字节偏移
    pub fn main_data_offset(&self) -> usize {
        HEADER_LEN + if self.crc_protected { 2 } else { 0 } + self.side_info_len()
    }

    /// 联合立体声下的 M/S 立体声
    pub fn is_ms_stereo(&self) -> bool {
        self.mode == ChannelMode::JointStereo && self.mode_extension & 0x2 != 0
    }

    /// 联合立体声下的强度立体声
    pub fn is_intensity_stereo(&self) -> bool {
        self.mode == ChannelMode::JointStereo && self.mode_extension & 0x1 != 0
    }

    /// 采样率在 9 档中的序号: MPEG-2.5 为 0-2, MPEG-2 为 3-5, MPEG-1 为 6-8
    pub fn sample_rate_slot(&self) -> usize {
        let group = match self.version {
            MpegVersion::Mpeg25 => 0,
            MpegVersion::Mpeg2 => 1,
            MpegVersion::Mpeg1 => 2,
        };
        group * 3 + self.sample_rate_index as usize
    }

    /// 比例因子频带表的行号 (0-7); MPEG-2.5 的 11.025k 与 12k 共用第 0 行
    pub fn sfb_table_index(&self) -> usize {
        let slot = self.sample_rate_slot();
        slot - usize::from(slot != 0)
    }
}
