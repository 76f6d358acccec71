//! 比例因子解码与反量化增益.
//!
//! 每个比例因子频带的增益 `2^((global_gain - 210)/4 - scf * scale)` 预先算好,
//! Huffman 解码时直接乘到 `|x|^(4/3)` 上 (见 [`super::huffman`]).

use fastmp3_core::BitReader;

use super::header::FrameHeader;
use super::side_info::GranuleInfo;
use super::tables::{EXP_FRAC, LSF_SCF_MOD, POW43, PRETAB, SCF_PARTITIONS, SCFC_DECODE};

/// 每个 granule 最多的比例因子频带数 (39 个短块频带 + 终止)
pub const MAX_SFB: usize = 40;

/// 强度立体声位置的非法值
pub const ILLEGAL_IS_POS: u8 = 255;

/// `y * 2^(-exp_q2 / 4)`, 指数以 1/4 为单位.
///
/// 按 30 (即 120/4) 分段累乘, 避免单次移位溢出.
pub fn ldexp_q2(mut y: f32, mut exp_q2: i32) -> f32 {
    loop {
        let e = exp_q2.min(30 * 4);
        y *= EXP_FRAC[(e & 3) as usize] * ((1i32 << 30) >> (e >> 2)) as f32;
        exp_q2 -= e;
        if exp_q2 <= 0 {
            break;
        }
    }
    y
}

/// `x^(4/3)`, x >= 0.
///
/// 小于 129 查表; 更大的值先缩小到表内再做二阶泰勒修正.
pub fn pow43(mut x: i32) -> f32 {
    if x < 129 {
        return POW43[(16 + x) as usize];
    }
    let mut mult = 256.0f32;
    if x < 1024 {
        mult = 16.0;
        x <<= 3;
    }
    let sign = (2 * x) & 64;
    let frac = ((x & 63) - sign) as f32 / ((x & !63) + sign) as f32;
    POW43[(16 + ((x + sign) >> 6)) as usize]
        * (1.0 + frac * (4.0 / 3.0 + frac * (2.0 / 9.0)))
        * mult
}

/// 按 4 个分区读取比例因子.
///
/// `ist_pos` 同时保存本 granule 的原始比例因子: MPEG-1 第 2 个 granule 依据 scfsi
/// 从中复用, 右声道强度立体声从中取位置. `scfsi < 0` 表示 LSF, 此时全 1 的值是
/// 非法的强度立体声位置.
fn read_scalefactors(
    scf: &mut [u8; MAX_SFB],
    ist_pos: &mut [u8; MAX_SFB],
    sizes: &[u8; 4],
    counts: &[u8],
    br: &mut BitReader<'_>,
    mut scfsi: i32,
) {
    let mut offset = 0usize;
    for (&bits, &count) in sizes.iter().zip(counts.iter().take(4)) {
        if count == 0 {
            break;
        }
        let range = offset..(offset + count as usize).min(MAX_SFB);
        if scfsi & 8 != 0 {
            scf[range.clone()].copy_from_slice(&ist_pos[range]);
        } else if bits == 0 {
            scf[range.clone()].fill(0);
            ist_pos[range].fill(0);
        } else {
            let max_scf = if scfsi < 0 { (1u32 << bits) - 1 } else { u32::MAX };
            for k in range {
                // 越界时按 0 处理: 比例因子位于 part2 中, 由 part2_3_length 约束
                let s = br.read_bits(u32::from(bits)).unwrap_or(0);
                ist_pos[k] = if s == max_scf { ILLEGAL_IS_POS } else { s as u8 };
                scf[k] = s as u8;
            }
        }
        offset += count as usize;
        scfsi *= 2;
    }
    for v in scf.iter_mut().skip(offset) {
        *v = 0;
    }
}

/// 解码一个 granule/声道的比例因子, 输出每个频带的反量化增益.
///
/// `ch` 为声道号: LSF 强度立体声的右声道使用另一套 scalefac_compress 分解.
pub fn decode_scalefactors(
    header: &FrameHeader,
    ist_pos: &mut [u8; MAX_SFB],
    br: &mut BitReader<'_>,
    gr: &GranuleInfo,
    gains: &mut [f32; MAX_SFB],
    ch: usize,
) {
    let row = usize::from(gr.n_short_sfb != 0) + usize::from(gr.n_long_sfb == 0);
    let mut partition: &[u8] = &SCF_PARTITIONS[row];
    let mut sizes = [0u8; 4];
    let scfsi: i32;

    if header.is_mpeg1() {
        let part = SCFC_DECODE[gr.scalefac_compress as usize & 15];
        sizes = [part >> 2, part >> 2, part & 3, part & 3];
        scfsi = i32::from(gr.scfsi);
    } else {
        let ist = usize::from(header.is_intensity_stereo() && ch == 1);
        let mut sfc = (gr.scalefac_compress >> ist) as i32;
        let mut k = ist * 12;
        while sfc >= 0 {
            let mut modprod = 1i32;
            for i in (0..4).rev() {
                let m = i32::from(LSF_SCF_MOD[k + i]);
                sizes[i] = (sfc / modprod % m) as u8;
                modprod *= m;
            }
            sfc -= modprod;
            k += 4;
            if k + 4 > LSF_SCF_MOD.len() && sfc >= 0 {
                break;
            }
        }
        partition = &partition[k.min(partition.len())..];
        scfsi = -16;
    }

    let mut iscf = [0u8; MAX_SFB];
    read_scalefactors(&mut iscf, ist_pos, &sizes, partition, br, scfsi);

    let scf_shift = u32::from(gr.scalefac_scale) + 1;
    let mut iscf: [i32; MAX_SFB] = iscf.map(i32::from);
    if gr.n_short_sfb != 0 {
        let sh = 3 - scf_shift;
        for i in (0..gr.n_short_sfb).step_by(3) {
            for w in 0..3 {
                if let Some(v) = iscf.get_mut(gr.n_long_sfb + i + w) {
                    *v += i32::from(gr.subblock_gain[w]) << sh;
                }
            }
        }
    } else if gr.preflag {
        for (v, &p) in iscf[11..].iter_mut().zip(PRETAB.iter()) {
            *v += i32::from(p);
        }
    }

    let ms_adjust = if header.is_ms_stereo() { 2 } else { 0 };
    let gain_exp = gr.global_gain as i32 - 4 - 210 - ms_adjust;
    let gain = ldexp_q2(2048.0, 44 - gain_exp);
    let nbands = (gr.n_long_sfb + gr.n_short_sfb).min(MAX_SFB);
    for (g, &s) in gains.iter_mut().zip(iscf.iter()).take(nbands) {
        *g = ldexp_q2(gain, s << scf_shift);
    }
}
