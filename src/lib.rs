//! # fastmp3
//!
//! 纯 Rust 实现的 MP3 (MPEG-1/2/2.5 Layer III) 解码引擎.
//!
//! - **解码**: 按采样偏移/长度输出交错 `f32` PCM, CBR 与 VBR 流都可精确定位
//! - **探测**: 只扫描帧头, 得到总采样数, 声道数, 采样率与平均码率
//! - **比特工具**: 大端按位展开/打包
//!
//! 内存缓冲区与文件路径各有独立入口; 路径不存在时返回 [`Mp3Error::Io`],
//! 与缓冲区内容损坏 ([`Mp3Error::NoSyncFound`]) 区分开.
//!
//! # 快速开始
//!
//! ```rust,no_run
//! use fastmp3::{DecodeRequest, decode_file, probe_file};
//!
//! let info = probe_file("song.mp3")?;
//! println!("{} Hz, {} 声道, {:.2} 秒", info.sample_rate, info.channels, info.duration_secs());
//!
//! // 从第 1 秒开始解码 0.5 秒
//! let request = DecodeRequest::full()
//!     .with_offset(u64::from(info.sample_rate))
//!     .with_length(u64::from(info.sample_rate / 2));
//! let audio = decode_file("song.mp3", request)?;
//! assert_eq!(audio.rows() as u32, info.sample_rate / 2);
//! # Ok::<(), fastmp3::Mp3Error>(())
//! ```
//!
//! # Crate 结构
//!
//! | Crate | 功能 |
//! |-------|------|
//! | `fastmp3-core` | 错误类型, 按位读写 |
//! | `fastmp3-codec` | Layer III 帧解码 |
//! | `fastmp3-format` | 标签跳过, 帧同步, 帧索引, 探测 |

use std::path::Path;

pub mod decode;
pub mod logging;

/// 错误类型与按位读写
pub use fastmp3_core as core;

/// Layer III 帧解码
pub use fastmp3_codec as codec;

/// 帧同步, 帧索引与探测
pub use fastmp3_format as format;

pub use decode::{DecodeRequest, DecodedAudio};
pub use fastmp3_core::{Mp3Error, Mp3Result, pack_bits, unpack_bits};
pub use fastmp3_format::{ProbeResult, ScanOptions, StreamBuffer};

/// 获取 fastmp3 版本号
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// 解码内存中的 MP3 数据 (默认扫描选项, 启用无缝裁剪)
pub fn decode_buffer(data: &[u8], request: DecodeRequest) -> Mp3Result<DecodedAudio> {
    decode_buffer_with(data, request, &ScanOptions::default())
}

pub fn decode_buffer_with(
    data: &[u8],
    request: DecodeRequest,
    options: &ScanOptions,
) -> Mp3Result<DecodedAudio> {
    decode::decode(data, &request, options)
}

/// 读入文件并解码
pub fn decode_file(path: impl AsRef<Path>, request: DecodeRequest) -> Mp3Result<DecodedAudio> {
    decode_file_with(path, request, &ScanOptions::default())
}

pub fn decode_file_with(
    path: impl AsRef<Path>,
    request: DecodeRequest,
    options: &ScanOptions,
) -> Mp3Result<DecodedAudio> {
    let stream = StreamBuffer::read_file(path)?;
    decode::decode(stream.as_bytes(), &request, options)
}

/// 探测内存中 MP3 数据的元数据
pub fn probe_buffer(data: &[u8]) -> Mp3Result<ProbeResult> {
    probe_buffer_with(data, &ScanOptions::default())
}

pub fn probe_buffer_with(data: &[u8], options: &ScanOptions) -> Mp3Result<ProbeResult> {
    fastmp3_format::probe(data, options)
}

/// 读入文件并探测元数据
pub fn probe_file(path: impl AsRef<Path>) -> Mp3Result<ProbeResult> {
    probe_file_with(path, &ScanOptions::default())
}

pub fn probe_file_with(path: impl AsRef<Path>, options: &ScanOptions) -> Mp3Result<ProbeResult> {
    let stream = StreamBuffer::read_file(path)?;
    fastmp3_format::probe(stream.as_bytes(), options)
}
