//! 帧同步搜索.
//!
//! 一个候选帧头只有在后续最多 10 帧都能以兼容的帧头首尾相接时才被接受,
//! 或者它恰好填满整个缓冲区. 自由格式流 (比特率索引 0) 的帧长由到下一个兼容帧头的
//! 距离推出, 之后沿用.

use fastmp3_codec::{FrameHeader, HEADER_LEN};

/// 自由格式帧 (不含填充) 的最大字节数
pub const MAX_FREE_FORMAT_FRAME_SIZE: usize = 2304;

/// 确认同步时最多向后核对的帧数
const MAX_MATCH_FRAMES: usize = 10;

/// 同步到的帧
#[derive(Debug, Clone, Copy)]
pub struct FrameSync {
    /// 相对搜索起点的字节偏移
    pub offset: usize,
    /// 帧长 (含填充)
    pub len: usize,
    pub header: FrameHeader,
}

/// `pos` 处的有效 Layer III 帧头
pub fn header_at(data: &[u8], pos: usize) -> Option<FrameHeader> {
    let bytes = data.get(pos..pos.checked_add(HEADER_LEN)?)?;
    if !FrameHeader::is_sync(bytes) {
        return None;
    }
    FrameHeader::parse(bytes).ok()
}

/// 不含填充的帧长; 自由格式使用 `free_format_bytes`
fn unpadded_len(header: &FrameHeader, free_format_bytes: usize) -> usize {
    header.frame_len(free_format_bytes) - usize::from(header.padding)
}

/// 从 `data` 起点的帧开始, 核对后续帧是否首尾相接
fn match_frame(data: &[u8], first: &FrameHeader, free_format_bytes: usize) -> bool {
    let mut pos = 0usize;
    let mut header = *first;
    for nmatch in 0..MAX_MATCH_FRAMES {
        pos += unpadded_len(&header, free_format_bytes) + usize::from(header.padding);
        if pos + HEADER_LEN > data.len() {
            return nmatch > 0;
        }
        match header_at(data, pos) {
            Some(next) if first.compatible_with(&next) => header = next,
            _ => return false,
        }
    }
    true
}

/// 在 `data` 中搜索第一个可信的帧.
///
/// `free_format_bytes` 保存自由格式流已推断出的帧长 (不含填充), 0 表示未知;
/// 搜索过程中会被更新.
pub fn find_frame(data: &[u8], free_format_bytes: &mut usize) -> Option<FrameSync> {
    let n = data.len();
    let mut i = 0usize;
    while i + HEADER_LEN < n {
        if let Some(header) = header_at(data, i) {
            let mut frame_bytes = if header.is_free_format() {
                *free_format_bytes
            } else {
                unpadded_len(&header, 0)
            };
            let mut frame_and_padding = frame_bytes + usize::from(header.padding);

            let mut k = HEADER_LEN;
            while frame_bytes == 0 && k < MAX_FREE_FORMAT_FRAME_SIZE && i + 2 * k < n - HEADER_LEN
            {
                if let Some(second) =
                    header_at(data, i + k).filter(|h| header.compatible_with(h))
                {
                    let fb = k - usize::from(header.padding);
                    let third = i + k + fb + usize::from(second.padding);
                    if header_at(data, third).is_some_and(|h| header.compatible_with(&h)) {
                        frame_and_padding = k;
                        frame_bytes = fb;
                        *free_format_bytes = fb;
                    }
                }
                k += 1;
            }

            let chained = frame_bytes != 0
                && i + frame_and_padding <= n
                && match_frame(&data[i..], &header, frame_bytes);
            if chained || (i == 0 && frame_and_padding == n) {
                return Some(FrameSync {
                    offset: i,
                    len: frame_and_padding,
                    header,
                });
            }
            *free_format_bytes = 0;
        }
        i += 1;
    }
    None
}
