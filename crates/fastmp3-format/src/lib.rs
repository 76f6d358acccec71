//! # fastmp3-format
//!
//! fastmp3 码流层, 负责把一段 MP3 字节整理成可解码的帧序列.
//!
//! - [`tags`]: 跳过 ID3v2 / ID3v1 / APEv2 等非音频区域
//! - [`scanner`]: 帧同步搜索 (含自由格式帧长推断)
//! - [`vbr`]: Xing / Info / LAME / VBRI 头
//! - [`index`]: 帧索引, 支持按采样偏移定位
//! - [`probe`]: 仅解析帧头的元数据探测

pub mod index;
pub mod io;
pub mod options;
pub mod probe;
pub mod scanner;
pub mod tags;
pub mod vbr;

// 重导出常用类型
pub use index::{FrameIndex, FrameIndexEntry, PlayableRange, ScanStop};
pub use io::StreamBuffer;
pub use options::ScanOptions;
pub use probe::{ProbeResult, probe};
pub use vbr::{LameTag, VbrHeader, VbrKind};
