//! # fastmp3-core
//!
//! fastmp3 解码引擎的基础设施: 统一错误类型与按位读写工具.
//!
//! 解码链路上的每个 crate 都依赖本 crate, 错误在各模块之间通过 [`Mp3Error`] 传播.

pub mod bitreader;
pub mod bitwriter;
pub mod error;

// 重导出常用类型
pub use bitreader::{BitReader, unpack_bits};
pub use bitwriter::{BitWriter, pack_bits};
pub use error::{Mp3Error, Mp3Result};
