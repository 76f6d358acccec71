//! IMDCT 与重叠相加.
//!
//! 长块 (含起始/结束块) 用 36 点 IMDCT, 拆成两个 9 点 DCT-III;
//! 短块每个子带做 3 次 12 点 IMDCT. 每个子带保留 9 个重叠值跨 granule 传递.

use super::tables::{MDCT_WINDOW, TWID3, TWID9};

/// 每声道重叠缓冲: 32 子带 x 9
pub type Overlap = [f32; 32 * 9];

/// 9 点 DCT-III (原地)
fn dct3_9(y: &mut [f32; 9]) {
    let mut s0 = y[0];
    let mut s2 = y[2];
    let mut s4 = y[4];
    let mut s6 = y[6];
    let mut s8 = y[8];
    let mut t0 = s0 + s6 * 0.5;
    s0 -= s6;
    let mut t4 = (s4 + s2) * 0.93969262;
    let mut t2 = (s8 + s2) * 0.76604444;
    s6 = (s4 - s8) * 0.17364818;
    s4 += s8 - s2;

    s2 = s0 - s4 * 0.5;
    y[4] = s4 + s0;
    s8 = t0 - t2 + s6;
    s0 = t0 - t4 + t2;
    s4 = t0 + t4 - s6;

    let mut s1 = y[1];
    let mut s3 = y[3];
    let mut s5 = y[5];
    let mut s7 = y[7];

    s3 *= 0.86602540;
    t0 = (s5 + s1) * 0.98480775;
    t4 = (s5 - s7) * 0.34202014;
    t2 = (s1 + s7) * 0.64278761;
    s1 = (s1 - s5 - s7) * 0.86602540;

    s5 = t0 - s3 - t2;
    s7 = t4 - s3 - t0;
    s3 = t4 + s3 - t2;

    y[0] = s4 - s7;
    y[1] = s2 + s1;
    y[2] = s0 - s3;
    y[3] = s8 + s5;
    y[5] = s8 - s5;
    y[6] = s0 + s3;
    y[7] = s2 - s1;
    y[8] = s4 + s7;
}

/// 对 `nbands` 个子带做 36 点 IMDCT + 加窗 + 重叠相加
fn imdct36(spectrum: &mut [f32], overlap: &mut [f32], window: &[f32; 18], nbands: usize) {
    for (x, ovl) in spectrum
        .chunks_exact_mut(18)
        .zip(overlap.chunks_exact_mut(9))
        .take(nbands)
    {
        let mut co = [0.0f32; 9];
        let mut si = [0.0f32; 9];
        co[0] = -x[0];
        si[0] = x[17];
        for i in 0..4 {
            si[8 - 2 * i] = x[4 * i + 1] - x[4 * i + 2];
            co[1 + 2 * i] = x[4 * i + 1] + x[4 * i + 2];
            si[7 - 2 * i] = x[4 * i + 4] - x[4 * i + 3];
            co[2 + 2 * i] = -(x[4 * i + 3] + x[4 * i + 4]);
        }
        dct3_9(&mut co);
        dct3_9(&mut si);
        for v in si.iter_mut().skip(1).step_by(2) {
            *v = -*v;
        }

        for i in 0..9 {
            let prev = ovl[i];
            let sum = co[i] * TWID9[9 + i] + si[i] * TWID9[i];
            ovl[i] = co[i] * TWID9[i] - si[i] * TWID9[9 + i];
            x[i] = prev * window[i] - sum * window[9 + i];
            x[17 - i] = prev * window[9 + i] + sum * window[i];
        }
    }
}

/// 3 点 IDCT
fn idct3(x0: f32, x1: f32, x2: f32) -> [f32; 3] {
    let m1 = x1 * 0.86602540;
    let a1 = x0 - x2 * 0.5;
    [a1 + m1, x0 + x2, a1 - m1]
}

/// 12 点 IMDCT. `x` 按步长 3 取值 (同一窗口的 6 个系数), 输出 6 个样本到 `dst`,
/// 并更新 3 个重叠值.
fn imdct12(x: &[f32], dst: &mut [f32], overlap: &mut [f32]) {
    let co = idct3(-x[0], x[6] + x[3], x[12] + x[9]);
    let mut si = idct3(x[15], x[12] - x[9], x[6] - x[3]);
    si[1] = -si[1];

    for i in 0..3 {
        let prev = overlap[i];
        let sum = co[i] * TWID3[3 + i] + si[i] * TWID3[i];
        overlap[i] = co[i] * TWID3[i] - si[i] * TWID3[3 + i];
        dst[i] = prev * TWID3[2 - i] - sum * TWID3[5 - i];
        dst[5 - i] = prev * TWID3[5 - i] + sum * TWID3[2 - i];
    }
}

/// 短块: 每个子带 3 个窗口依次重叠
fn imdct_short(spectrum: &mut [f32], overlap: &mut [f32], nbands: usize) {
    for (x, ovl) in spectrum
        .chunks_exact_mut(18)
        .zip(overlap.chunks_exact_mut(9))
        .take(nbands)
    {
        let tmp: [f32; 18] = {
            let mut t = [0.0f32; 18];
            t.copy_from_slice(x);
            t
        };
        x[..6].copy_from_slice(&ovl[..6]);

        let (ovl_lo, ovl_hi) = ovl.split_at_mut(6);
        imdct12(&tmp, &mut x[6..12], ovl_hi);
        imdct12(&tmp[1..], &mut x[12..18], ovl_hi);
        // 第 3 个窗口的前半段写回重叠缓冲
        let mut third = [0.0f32; 6];
        imdct12(&tmp[2..], &mut third, ovl_hi);
        ovl_lo.copy_from_slice(&third);
    }
}

/// 一个 granule/声道的 IMDCT: 前 `n_long_bands` 个子带按长块处理 (混合块),
/// 其余子带依据 `block_type` 选择短块或对应窗口的长块.
pub fn imdct_granule(
    spectrum: &mut [f32; 576],
    overlap: &mut Overlap,
    block_type: u8,
    n_long_bands: usize,
) {
    let (long_x, rest_x) = spectrum.split_at_mut(18 * n_long_bands);
    let (long_ovl, rest_ovl) = overlap.split_at_mut(9 * n_long_bands);
    if n_long_bands != 0 {
        imdct36(long_x, long_ovl, &MDCT_WINDOW[0], n_long_bands);
    }
    let rest = 32 - n_long_bands;
    if block_type == 2 {
        imdct_short(rest_x, rest_ovl, rest);
    } else {
        let window = &MDCT_WINDOW[usize::from(block_type == 3)];
        imdct36(rest_x, rest_ovl, window, rest);
    }
}

/// 频率反转: 奇数子带的奇数样本取反
pub fn frequency_inversion(spectrum: &mut [f32; 576]) {
    for band in spectrum.chunks_exact_mut(18).skip(1).step_by(2) {
        for v in band.iter_mut().skip(1).step_by(2) {
            *v = -*v;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_零输入保持零() {
        let mut x = [0.0f32; 576];
        let mut ovl = [0.0f32; 288];
        imdct_granule(&mut x, &mut ovl, 0, 0);
        assert!(x.iter().all(|&v| v == 0.0));
        imdct_granule(&mut x, &mut ovl, 2, 2);
        assert!(x.iter().all(|&v| v == 0.0));
        assert!(ovl.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_重叠值传递到下一个_granule() {
        let mut x = [0.0f32; 576];
        for (k, v) in x.iter_mut().take(18).enumerate() {
            *v = ((k * 5 % 7) as f32 - 3.0) * 0.1;
        }
        let mut ovl = [0.0f32; 288];
        imdct_granule(&mut x, &mut ovl, 0, 0);
        assert!(ovl[..9].iter().any(|&v| v != 0.0));
        assert!(ovl[9..].iter().all(|&v| v == 0.0));

        // 下一个 granule 输入为零, 输出只来自上一次的重叠部分
        let mut silent = [0.0f32; 576];
        imdct_granule(&mut silent, &mut ovl, 0, 0);
        assert!(silent[..18].iter().any(|&v| v != 0.0));
        assert!(ovl.iter().all(|&v| v == 0.0));

        let mut again = [0.0f32; 576];
        imdct_granule(&mut again, &mut ovl, 0, 0);
        assert!(again.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_短块写入重叠缓冲() {
        let mut x = [0.0f32; 576];
        x[18 * 3 + 2] = 1.0;
        let mut ovl = [0.0f32; 288];
        imdct_granule(&mut x, &mut ovl, 2, 0);
        // 子带 3 的前 6 个输出来自 (为零的) 旧重叠值
        assert!(x[54..60].iter().all(|&v| v == 0.0));
        assert!(ovl[27..36].iter().any(|&v| v != 0.0));
        assert!(ovl[..27].iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_频率反转() {
        let mut x = [1.0f32; 576];
        frequency_inversion(&mut x);
        assert_eq!(x[0], 1.0);
        assert_eq!(x[1], 1.0);
        assert_eq!(x[18], 1.0);
        assert_eq!(x[19], -1.0);
        assert_eq!(x[20], 1.0);
        assert_eq!(x[36 + 1], 1.0);
        assert_eq!(x[54 + 17], -1.0);
    }
}
