//! 统一错误类型定义.
//!
//! 解码引擎只向调用方传播整条流级别的失败 (找不到同步, 定位越界, I/O 失败);
//! 单帧损坏在编排层被吞掉并以静音填充.

use thiserror::Error;

/// fastmp3 统一错误类型
#[derive(Debug, Error)]
pub enum Mp3Error {
    /// 整个缓冲区内找不到任何有效的帧同步
    #[error("未找到有效的 MPEG 音频帧同步")]
    NoSyncFound,

    /// 无法解码 (流级别)
    #[error("无法解码: {0}")]
    Decode(String),

    /// 请求的偏移超出可解码的总采样数
    #[error("无法定位: 偏移 {offset} 超出总采样数 {total}")]
    Seek {
        /// 请求的起始采样偏移
        offset: u64,
        /// 流的总采样数 (每声道)
        total: u64,
    },

    /// 比特流读取越界
    #[error("比特流读取越界: 需要 {requested} 位, 剩余 {remaining} 位")]
    Underrun {
        /// 请求读取的位数
        requested: u32,
        /// 剩余可读位数
        remaining: usize,
    },

    /// I/O 错误
    #[error("I/O 错误: {0}")]
    Io(#[from] std::io::Error),

    /// 流参数前后不一致 (采样率或声道数中途改变等)
    #[error("格式错误: {0}")]
    Format(String),

    /// 无效参数
    #[error("无效参数: {0}")]
    InvalidArgument(String),
}

impl Mp3Error {
    /// 是否属于 "无法解码" 类错误 (绑定层据此区分解码失败与定位失败)
    pub fn is_decode_failure(&self) -> bool {
        matches!(self, Self::NoSyncFound | Self::Decode(_))
    }

    /// 是否为定位越界
    pub fn is_seek_failure(&self) -> bool {
        matches!(self, Self::Seek { .. })
    }
}

/// fastmp3 统一 Result 类型
pub type Mp3Result<T> = Result<T, Mp3Error>;
