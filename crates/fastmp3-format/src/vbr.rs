//! Xing / Info / VBRI 头解析.
//!
//! 编码器常在第一帧的 main data 区写入元数据帧: Xing (VBR) 或 Info (CBR) 标签位于侧边信息之后,
//! 可选地跟随 LAME 扩展 (编码器延迟与末尾填充); VBRI (Fraunhofer) 标签固定在帧头后 32 字节处.
//! 这类帧本身不含音频, 不进入帧索引.

use fastmp3_codec::{FrameHeader, HEADER_LEN};
use fastmp3_core::Mp3Result;
use log::debug;

use crate::io::ByteCursor;

/// VBRI 标签相对帧头结束处的固定偏移
const VBRI_OFFSET: usize = 32;

/// LAME 扩展中延迟/填充字段相对扩展起点的偏移
const LAME_DELAY_OFFSET: usize = 21;

/// 解码器固有延迟 (528) + 1, LAME 记录的延迟不含此部分
const DECODER_DELAY: u32 = 529;

const FLAG_FRAMES: u32 = 0x1;
const FLAG_BYTES: u32 = 0x2;
const FLAG_TOC: u32 = 0x4;
const FLAG_QUALITY: u32 = 0x8;

/// 元数据帧类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VbrKind {
    Xing,
    /// LAME 对 CBR 流写入的同格式标签
    Info,
    Vbri,
}

/// LAME 扩展信息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LameTag {
    /// 编码器版本字符串, 如 `LAME3.100`
    pub encoder: String,
    /// 应从解码输出开头丢弃的采样数 (已含解码器延迟)
    pub delay: u32,
    /// 应从解码输出末尾丢弃的采样数
    pub padding: u32,
}

/// 第一帧中的元数据头
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VbrHeader {
    pub kind: VbrKind,
    /// 音频帧数 (不含本帧)
    pub frames: Option<u32>,
    /// 音频字节数
    pub bytes: Option<u32>,
    pub lame: Option<LameTag>,
}

/// 解析帧 `frame` (从帧头开始) 中的元数据头, 不是元数据帧时返回 `None`
pub fn parse(frame: &[u8], header: &FrameHeader) -> Option<VbrHeader> {
    let frame_len = frame.len();
    let xing_at = HEADER_LEN + header.side_info_len();
    let kind = match frame.get(xing_at..xing_at + 4) {
        Some(b"Xing") => Some(VbrKind::Xing),
        Some(b"Info") => Some(VbrKind::Info),
        _ => None,
    };
    if let Some(kind) = kind {
        return match parse_xing(&frame[xing_at + 4..], kind) {
            Ok(vbr) => {
                debug!("发现 {:?} 头: frames={:?}, lame={:?}", kind, vbr.frames, vbr.lame);
                Some(vbr)
            }
            Err(e) => {
                debug!("{:?} 头被截断 (帧长 {}): {}", kind, frame_len, e);
                None
            }
        };
    }

    let vbri_at = HEADER_LEN + VBRI_OFFSET;
    if frame.get(vbri_at..vbri_at + 4) == Some(b"VBRI".as_slice()) {
        return match parse_vbri(&frame[vbri_at + 4..]) {
            Ok(vbr) => {
                debug!("发现 VBRI 头: frames={:?}", vbr.frames);
                Some(vbr)
            }
            Err(e) => {
                debug!("VBRI 头被截断: {}", e);
                None
            }
        };
    }
    None
}

/// 解析 Xing/Info 标签之后的字段
fn parse_xing(body: &[u8], kind: VbrKind) -> Mp3Result<VbrHeader> {
    let mut cur = ByteCursor::new(body);
    let flags = cur.read_u32_be()?;
    let frames = if flags & FLAG_FRAMES != 0 {
        Some(cur.read_u32_be()?)
    } else {
        None
    };
    let bytes = if flags & FLAG_BYTES != 0 {
        Some(cur.read_u32_be()?)
    } else {
        None
    };
    if flags & FLAG_TOC != 0 {
        cur.skip(100)?;
    }
    if flags & FLAG_QUALITY != 0 {
        cur.skip(4)?;
    }

    let lame = read_lame(&body[cur.position()..]);
    Ok(VbrHeader {
        kind,
        frames,
        bytes,
        lame,
    })
}

/// LAME 扩展: 9 字节版本字符串, 之后第 21 字节起为 12+12 位的延迟/填充.
///
/// 首字节为 0 或扩展越出帧尾时视为不存在.
fn read_lame(ext: &[u8]) -> Option<LameTag> {
    if ext.first().is_none_or(|&b| b == 0) {
        return None;
    }
    let d = ext.get(LAME_DELAY_OFFSET..LAME_DELAY_OFFSET + 3)?;
    // 扩展的其余字段 (mp3 gain, preset, 音乐长度, CRC) 也须在帧内
    ext.get(..LAME_DELAY_OFFSET + 14)?;

    let raw_delay = (u32::from(d[0]) << 4) | (u32::from(d[1]) >> 4);
    let raw_padding = (u32::from(d[1] & 0x0F) << 8) | u32::from(d[2]);
    let encoder = String::from_utf8_lossy(&ext[..9])
        .trim_end_matches(['\0', ' '])
        .to_string();
    Some(LameTag {
        encoder,
        delay: raw_delay + DECODER_DELAY,
        padding: raw_padding.saturating_sub(DECODER_DELAY),
    })
}

/// 解析 VBRI 标签之后的字段
fn parse_vbri(body: &[u8]) -> Mp3Result<VbrHeader> {
    let mut cur = ByteCursor::new(body);
    let _version = cur.read_u16_be()?;
    let _delay = cur.read_u16_be()?;
    let _quality = cur.read_u16_be()?;
    let bytes = cur.read_u32_be()?;
    let frames = cur.read_u32_be()?;
    Ok(VbrHeader {
        kind: VbrKind::Vbri,
        frames: Some(frames),
        bytes: Some(bytes),
        lame: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// MPEG-1 64kbps 44.1kHz 单声道, 208 字节
    fn mono_frame() -> (Vec<u8>, FrameHeader) {
        let mut f = vec![0u8; 208];
        f[..4].copy_from_slice(&[0xFF, 0xFB, 0x50, 0xC0]);
        let header = FrameHeader::parse(&f).unwrap();
        (f, header)
    }

    fn write_info(frame: &mut [u8], flags: u32, frames: u32, lame: Option<(u16, u16)>) {
        let mut pos = 4 + 17;
        frame[pos..pos + 4].copy_from_slice(b"Info");
        pos += 4;
        frame[pos..pos + 4].copy_from_slice(&flags.to_be_bytes());
        pos += 4;
        if flags & FLAG_FRAMES != 0 {
            frame[pos..pos + 4].copy_from_slice(&frames.to_be_bytes());
            pos += 4;
        }
        if flags & FLAG_BYTES != 0 {
            frame[pos..pos + 4].copy_from_slice(&12345u32.to_be_bytes());
            pos += 4;
        }
        if flags & FLAG_TOC != 0 {
            pos += 100;
        }
        if flags & FLAG_QUALITY != 0 {
            pos += 4;
        }
        if let Some((delay, padding)) = lame {
            frame[pos..pos + 9].copy_from_slice(b"LAME3.100");
            let d = pos + LAME_DELAY_OFFSET;
            frame[d] = (delay >> 4) as u8;
            frame[d + 1] = (((delay & 0xF) << 4) | (padding >> 8)) as u8;
            frame[d + 2] = (padding & 0xFF) as u8;
        }
    }

    #[test]
    fn test_info_与_lame_扩展() {
        let (mut f, h) = mono_frame();
        write_info(&mut f, FLAG_FRAMES | FLAG_BYTES, 78, Some((576, 1080)));
        let vbr = parse(&f, &h).unwrap();
        assert_eq!(vbr.kind, VbrKind::Info);
        assert_eq!(vbr.frames, Some(78));
        assert_eq!(vbr.bytes, Some(12345));
        let lame = vbr.lame.unwrap();
        assert_eq!(lame.encoder, "LAME3.100");
        assert_eq!(lame.delay, 576 + 529);
        assert_eq!(lame.padding, 1080 - 529);
    }

    #[test]
    fn test_填充小于解码器延迟时截为零() {
        let (mut f, h) = mono_frame();
        write_info(&mut f, FLAG_FRAMES, 10, Some((0, 100)));
        let lame = parse(&f, &h).unwrap().lame.unwrap();
        assert_eq!(lame.delay, 529);
        assert_eq!(lame.padding, 0);
    }

    #[test]
    fn test_无帧数标志与无扩展() {
        let (mut f, h) = mono_frame();
        write_info(&mut f, FLAG_TOC | FLAG_QUALITY, 0, None);
        let vbr = parse(&f, &h).unwrap();
        assert_eq!(vbr.frames, None);
        assert_eq!(vbr.lame, None);
    }

    #[test]
    fn test_lame_扩展越出帧尾() {
        let (mut f, h) = mono_frame();
        write_info(&mut f, FLAG_FRAMES | FLAG_TOC, 5, Some((576, 1080)));
        // 扩展起点 133, 需要至少 133 + 35 字节
        f.truncate(160);
        let vbr = parse(&f, &h).unwrap();
        assert_eq!(vbr.frames, Some(5));
        assert_eq!(vbr.lame, None);
    }

    #[test]
    fn test_vbri_头() {
        let (mut f, h) = mono_frame();
        let at = 4 + 32;
        f[at..at + 4].copy_from_slice(b"VBRI");
        f[at + 4..at + 6].copy_from_slice(&1u16.to_be_bytes());
        f[at + 10..at + 14].copy_from_slice(&5000u32.to_be_bytes());
        f[at + 14..at + 18].copy_from_slice(&42u32.to_be_bytes());
        let vbr = parse(&f, &h).unwrap();
        assert_eq!(vbr.kind, VbrKind::Vbri);
        assert_eq!(vbr.frames, Some(42));
        assert_eq!(vbr.bytes, Some(5000));
    }

    #[test]
    fn test_普通音频帧() {
        let (f, h) = mono_frame();
        assert_eq!(parse(&f, &h), None);
        assert_eq!(parse(&f[..10], &h), None);
    }
}
