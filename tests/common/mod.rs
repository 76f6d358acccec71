//! 集成测试共用的合成码流构造工具.
//!
//! `tone_*` 与静音帧都是 MPEG-1 Layer III, main_data_begin 为 0 (不使用储备库);
//! 其余编码工具与储备库由 [`synth`] 按配置生成.

#![allow(dead_code)]

mod synth;

pub use synth::*;

use fastmp3::core::BitWriter;

/// 64kbps 44.1kHz 单声道帧头, 帧长 208 字节
pub const MONO_64K: [u8; 4] = [0xFF, 0xFB, 0x50, 0xC0];
pub const MONO_64K_LEN: usize = 208;

/// 128kbps 44.1kHz 单声道 / 立体声帧头, 帧长 417 字节
pub const MONO_128K: [u8; 4] = [0xFF, 0xFB, 0x90, 0xC0];
pub const STEREO_128K: [u8; 4] = [0xFF, 0xFB, 0x90, 0x00];
pub const LEN_128K: usize = 417;

pub const SAMPLES_PER_FRAME: u64 = 1152;

/// 侧边信息全零的静音帧
pub fn silent_frame(header: [u8; 4], len: usize) -> Vec<u8> {
    let mut frame = vec![0u8; len];
    frame[..4].copy_from_slice(&header);
    frame
}

/// `frames` 个 64kbps 单声道静音帧
pub fn silent_stream(frames: usize) -> Vec<u8> {
    (0..frames)
        .flat_map(|_| silent_frame(MONO_64K, MONO_64K_LEN))
        .collect()
}

/// 带 LAME 扩展的 Info 帧 (64kbps 单声道)
pub fn info_frame(frames: u32, delay_field: u16, padding_field: u16) -> Vec<u8> {
    let mut f = silent_frame(MONO_64K, MONO_64K_LEN);
    let mut pos = 4 + 17;
    f[pos..pos + 4].copy_from_slice(b"Info");
    pos += 4;
    // 仅帧数字段
    f[pos..pos + 4].copy_from_slice(&1u32.to_be_bytes());
    pos += 4;
    f[pos..pos + 4].copy_from_slice(&frames.to_be_bytes());
    pos += 4;
    f[pos..pos + 9].copy_from_slice(b"LAME3.100");
    let d = pos + 21;
    f[d] = (delay_field >> 4) as u8;
    f[d + 1] = (((delay_field & 0xF) << 4) | (padding_field >> 8)) as u8;
    f[d + 2] = (padding_field & 0xFF) as u8;
    f
}

/// 2 秒 44.1kHz 单声道 CBR 64kbps, 带 LAME Info 标签: 可播放 88200 个采样
pub fn lame_two_seconds() -> Vec<u8> {
    // 78 帧 = 89856 采样; 去掉 576 + 529 的开头延迟与 1080 - 529 的末尾填充
    let mut data = info_frame(78, 576, 1080);
    data.extend_from_slice(&silent_stream(78));
    data
}

/// ID3v2.4 标签, 内容全零
pub fn id3v2_tag(body: usize) -> Vec<u8> {
    let mut tag = b"ID3\x04\x00\x00".to_vec();
    tag.extend_from_slice(&[
        ((body >> 21) & 0x7F) as u8,
        ((body >> 14) & 0x7F) as u8,
        ((body >> 7) & 0x7F) as u8,
        (body & 0x7F) as u8,
    ]);
    tag.resize(10 + body, 0);
    tag
}

/// ID3v1 标签
pub fn id3v1_tag() -> Vec<u8> {
    let mut tag = b"TAG".to_vec();
    tag.resize(128, b' ');
    tag
}

const BIG_VALUE_PAIRS: u32 = 32;
const GLOBAL_GAIN: u32 = 200;

/// 表 1 的 (x, y) 码字: (码字, 位数)
fn table1_code(x: u32, y: u32) -> (u32, u32) {
    match (x, y) {
        (0, 0) => (0b1, 1),
        (0, 1) => (0b001, 3),
        (1, 0) => (0b01, 2),
        _ => (0b000, 3),
    }
}

/// 一个 granule/声道的频谱数据: 32 对取值 0/±1 的谱线, 由 `seed` 决定图案
fn write_spectrum(bw: &mut BitWriter, seed: usize) {
    for i in 0..BIG_VALUE_PAIRS as usize {
        let pattern = (i * 5 + seed) % 7;
        let (x, y) = match pattern {
            0 | 4 => (1, 0),
            1 => (0, 1),
            2 | 5 => (1, 1),
            _ => (0, 0),
        };
        let (code, len) = table1_code(x, y);
        bw.write_bits(code, len);
        if x != 0 {
            bw.write_bit((i + seed) % 3 == 0);
        }
        if y != 0 {
            bw.write_bit((i * 3 + seed) % 4 == 1);
        }
    }
}

/// 非静音的 128kbps 帧: 长块, 表 1 编码, 无比例因子
pub fn tone_frame(stereo: bool, seed: usize) -> Vec<u8> {
    let nch = if stereo { 2 } else { 1 };

    let mut main = BitWriter::new();
    let mut part_lens = [[0u32; 2]; 2];
    for (gr, lens) in part_lens.iter_mut().enumerate() {
        for (ch, len) in lens.iter_mut().enumerate().take(nch) {
            let before = main.bits_written();
            write_spectrum(&mut main, seed + gr * 11 + ch * 17);
            *len = (main.bits_written() - before) as u32;
        }
    }
    let main = main.finish();

    let mut side = BitWriter::new();
    side.write_bits(0, 9); // main_data_begin
    if stereo {
        side.write_bits(0, 3);
        side.write_bits(0, 8);
    } else {
        side.write_bits(0, 5);
        side.write_bits(0, 4);
    }
    for lens in &part_lens {
        for &len in lens.iter().take(nch) {
            side.write_bits(len, 12);
            side.write_bits(BIG_VALUE_PAIRS, 9);
            side.write_bits(GLOBAL_GAIN, 8);
            side.write_bits(0, 4); // scalefac_compress
            side.write_bit(false); // 窗口切换
            for _ in 0..3 {
                side.write_bits(1, 5);
            }
            side.write_bits(15, 4);
            side.write_bits(7, 3);
            side.write_bit(false); // preflag
            side.write_bit(false); // scalefac_scale
            side.write_bit(false); // count1 表 A
        }
    }
    let side = side.finish();

    let mut frame = Vec::with_capacity(LEN_128K);
    frame.extend_from_slice(if stereo { &STEREO_128K } else { &MONO_128K });
    frame.extend_from_slice(&side);
    frame.extend_from_slice(&main);
    assert!(frame.len() <= LEN_128K, "main data 超出帧长");
    frame.resize(LEN_128K, 0);
    frame
}

/// `frames` 个非静音帧
pub fn tone_stream(stereo: bool, frames: usize) -> Vec<u8> {
    (0..frames).flat_map(|i| tone_frame(stereo, i)).collect()
}
