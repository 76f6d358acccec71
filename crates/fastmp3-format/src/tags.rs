//! 非音频区域识别.
//!
//! 帧同步只在音频区域内进行: 开头的 ID3v2 标签 (可连续多个) 与末尾的
//! ID3v1 (`TAG`, 128 字节), APEv2 (`APETAGEX`) 标签都被排除在外.

use std::ops::Range;

use fastmp3_core::Mp3Result;
use log::debug;

use crate::io::ByteCursor;

/// ID3v2 头部长度
const ID3V2_HEADER_LEN: usize = 10;

/// ID3v1 标签固定长度
const ID3V1_LEN: usize = 128;

/// APEv2 头部/尾部长度
const APE_FOOTER_LEN: usize = 32;

/// `data` 起始处 ID3v2 标签的总长度 (含头部与可选尾部), 不是 ID3v2 时返回 `None`
pub fn id3v2_len(data: &[u8]) -> Option<usize> {
    let header = data.get(..ID3V2_HEADER_LEN)?;
    if &header[..3] != b"ID3" || header[3] == 0xFF || header[4] == 0xFF {
        return None;
    }
    // syncsafe 整数: 每字节只用低 7 位
    if header[6..10].iter().any(|&b| b & 0x80 != 0) {
        return None;
    }
    let size = header[6..10]
        .iter()
        .fold(0usize, |acc, &b| (acc << 7) | usize::from(b));
    let footer = if header[5] & 0x10 != 0 {
        ID3V2_HEADER_LEN
    } else {
        0
    };
    Some(ID3V2_HEADER_LEN + size + footer)
}

/// 末尾 ID3v1 标签长度
fn id3v1_len(data: &[u8]) -> usize {
    match data.len().checked_sub(ID3V1_LEN) {
        Some(start) if &data[start..start + 3] == b"TAG" => ID3V1_LEN,
        _ => 0,
    }
}

/// APEv2 尾部 "APETAGEX" 之后的字段: (标签长度, 标志)
fn read_ape_footer(fields: &[u8]) -> Mp3Result<(usize, u32)> {
    let mut cur = ByteCursor::new(fields);
    let _version = cur.read_u32_le()?;
    let size = cur.read_u32_le()? as usize;
    let _items = cur.read_u32_le()?;
    let flags = cur.read_u32_le()?;
    Ok((size, flags))
}

/// 末尾 APEv2 标签长度 (含可选头部)
fn ape_len(data: &[u8]) -> usize {
    let Some(start) = data.len().checked_sub(APE_FOOTER_LEN) else {
        return 0;
    };
    let footer = &data[start..];
    if &footer[..8] != b"APETAGEX" {
        return 0;
    }
    let Ok((size, flags)) = read_ape_footer(&footer[8..]) else {
        return 0;
    };
    // size 含尾部, 不含头部
    let header = if flags & 0x8000_0000 != 0 {
        APE_FOOTER_LEN
    } else {
        0
    };
    (size + header).min(data.len())
}

/// 音频数据所在的字节范围
pub fn audio_region(data: &[u8]) -> Range<usize> {
    let mut start = 0usize;
    while let Some(len) = id3v2_len(&data[start..]) {
        let next = start.saturating_add(len).min(data.len());
        debug!("跳过 ID3v2 标签: 偏移 {}, {} 字节", start, next - start);
        start = next;
    }

    let mut end = data.len();
    loop {
        let tail = &data[start..end];
        let v1 = id3v1_len(tail);
        if v1 != 0 {
            debug!("跳过末尾 ID3v1 标签");
            end -= v1;
            continue;
        }
        let ape = ape_len(tail);
        if ape != 0 {
            debug!("跳过末尾 APEv2 标签: {} 字节", ape);
            end -= ape;
            continue;
        }
        break;
    }
    start..end
}
