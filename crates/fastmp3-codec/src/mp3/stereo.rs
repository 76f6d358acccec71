//! 联合立体声处理: M/S 立体声与强度立体声.

use super::header::FrameHeader;
use super::requantize::{MAX_SFB, ldexp_q2};
use super::side_info::GranuleInfo;
use super::tables::IS_PAN;

/// M/S 立体声: L = M + S, R = M - S (1/sqrt(2) 已并入全局增益)
pub fn ms_stereo(left: &mut [f32], right: &mut [f32]) {
    for (l, r) in left.iter_mut().zip(right.iter_mut()) {
        let (a, b) = (*l, *r);
        *l = a + b;
        *r = a - b;
    }
}

fn intensity_band(left: &mut [f32], right: &mut [f32], kl: f32, kr: f32) {
    for (l, r) in left.iter_mut().zip(right.iter_mut()) {
        *r = *l * kr;
        *l *= kl;
    }
}

/// 右声道每个窗口 (长块只有一个) 最后一个非零频带的序号, 全零时为 -1
fn top_bands(right: &[f32; 576], sfb: &[u8], nbands: usize) -> [i32; 3] {
    let mut max_band = [-1i32; 3];
    let mut offset = 0usize;
    for (i, &width) in sfb.iter().take(nbands).enumerate() {
        let end = (offset + width as usize).min(576);
        if right[offset..end].iter().any(|&v| v != 0.0) {
            max_band[i % 3] = i as i32;
        }
        offset = end;
    }
    max_band
}

/// 强度立体声 (以及同帧内未用强度编码频带上的 M/S).
///
/// `ist_pos` 为右声道本 granule 的比例因子 (即强度位置); 最高频带没有比例因子,
/// 沿用前一个同窗口频带的位置.
pub fn intensity_stereo(
    header: &FrameHeader,
    left: &mut [f32; 576],
    right: &mut [f32; 576],
    ist_pos: &mut [u8; MAX_SFB],
    gr_left: &GranuleInfo,
    gr_right: &GranuleInfo,
) {
    let sfb = gr_left.sfb_widths;
    let n_sfb = gr_left.n_long_sfb + gr_left.n_short_sfb;
    let max_blocks = if gr_left.n_short_sfb != 0 { 3 } else { 1 };

    let mut max_band = top_bands(right, sfb, n_sfb);
    if gr_left.n_long_sfb != 0 {
        let m = max_band[0].max(max_band[1]).max(max_band[2]);
        max_band = [m; 3];
    }

    let default_pos = if header.is_mpeg1() { 3 } else { 0 };
    for i in 0..max_blocks {
        let itop = n_sfb - max_blocks + i;
        let prev = itop as i32 - max_blocks as i32;
        ist_pos[itop] = if max_band[i] >= prev || prev < 0 {
            default_pos
        } else {
            ist_pos[prev as usize]
        };
    }

    let max_pos = if header.is_mpeg1() { 7 } else { 64 };
    let ms = header.is_ms_stereo();
    let s = if ms { std::f32::consts::SQRT_2 } else { 1.0 };
    let mpeg2_sh = gr_right.scalefac_compress & 1;

    let mut offset = 0usize;
    for (i, &width) in sfb.iter().enumerate() {
        if width == 0 || i >= MAX_SFB {
            break;
        }
        let end = (offset + width as usize).min(576);
        let ipos = u32::from(ist_pos[i]);
        if i as i32 > max_band[i % 3] && ipos < max_pos {
            let (kl, kr) = if header.is_mpeg1() {
                (IS_PAN[2 * ipos as usize], IS_PAN[2 * ipos as usize + 1])
            } else {
                let k = ldexp_q2(1.0, (((ipos + 1) >> 1) << mpeg2_sh) as i32);
                if ipos & 1 != 0 { (k, 1.0) } else { (1.0, k) }
            };
            intensity_band(&mut left[offset..end], &mut right[offset..end], kl * s, kr * s);
        } else if ms {
            ms_stereo(&mut left[offset..end], &mut right[offset..end]);
        }
        offset = end;
    }
}
