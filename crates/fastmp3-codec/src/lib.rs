//! # fastmp3-codec
//!
//! MPEG-1/2/2.5 Layer III 解码核心.
//!
//! 本 crate 只处理单个完整帧: 给定帧字节, 输出交错 PCM. 跨帧状态
//! (比特储备库, IMDCT 重叠, 合成滤波器历史) 保存在 [`Layer3Decoder`] 会话中.
//! 同步搜索与帧索引见 `fastmp3-format`.
//!
//! ## 使用示例
//!
//! ```rust
//! use fastmp3_codec::{Layer3Decoder, MAX_FRAME_SAMPLES};
//!
//! // MPEG-1 128kbps 44.1kHz 单声道静音帧
//! let mut frame = vec![0u8; 417];
//! frame[..4].copy_from_slice(&[0xFF, 0xFB, 0x90, 0xC0]);
//!
//! let mut dec = Layer3Decoder::new();
//! let mut pcm = vec![0.0f32; MAX_FRAME_SAMPLES * 2];
//! let info = dec.decode_frame(&frame, &mut pcm).unwrap();
//! assert_eq!(info.samples, 1152);
//! ```

pub mod mp3;

// 重导出常用类型
pub use mp3::{
    ChannelMode, DecodedFrame, FrameHeader, FrameStatus, GRANULE_SAMPLES, HEADER_LEN,
    Layer3Decoder, MAX_FRAME_SAMPLES, MAX_RESERVOIR_BYTES, MpegVersion, SideInfo,
};
