//! 多相合成滤波器组.
//!
//! 每个 granule 的 32 子带 x 18 时隙经 32 点 DCT-II 后, 与 512 抽头窗口卷积
//! 得到 576 个 PCM 样本. 滤波器需要前 15 组 (每组 64 个值) 的历史状态.

use super::tables::{DCT_SEC, SYNTH_WIN};

/// 跨 granule 保留的历史长度
const QMF_STATE_LEN: usize = 15 * 64;

/// 一个 granule 内的工作缓冲: 历史 + 18 个时隙
const LINES_LEN: usize = QMF_STATE_LEN + 18 * 64;

#[inline]
fn scale_pcm(v: f32) -> f32 {
    (v * (1.0 / 32768.0)).clamp(-1.0, 1.0)
}

/// 对每个时隙做 32 点 DCT-II (跨子带), 原地写回.
///
/// 输入输出布局均为 `[子带][18]`.
fn dct_ii(spectrum: &mut [f32; 576]) {
    for k in 0..18 {
        let mut t = [[0.0f32; 8]; 4];
        for i in 0..8 {
            let x0 = spectrum[k + i * 18];
            let x1 = spectrum[k + (15 - i) * 18];
            let x2 = spectrum[k + (16 + i) * 18];
            let x3 = spectrum[k + (31 - i) * 18];
            let t0 = x0 + x3;
            let t1 = x1 + x2;
            let t2 = (x1 - x2) * DCT_SEC[3 * i];
            let t3 = (x0 - x3) * DCT_SEC[3 * i + 1];
            t[0][i] = t0 + t1;
            t[1][i] = (t0 - t1) * DCT_SEC[3 * i + 2];
            t[2][i] = t3 + t2;
            t[3][i] = (t3 - t2) * DCT_SEC[3 * i + 2];
        }

        for x in t.iter_mut() {
            let (mut x0, mut x1, mut x2, mut x3) = (x[0], x[1], x[2], x[3]);
            let (mut x4, mut x5, mut x6, mut x7) = (x[4], x[5], x[6], x[7]);
            let mut xt = x0 - x7;
            x0 += x7;
            x7 = x1 - x6;
            x1 += x6;
            x6 = x2 - x5;
            x2 += x5;
            x5 = x3 - x4;
            x3 += x4;
            x4 = x0 - x3;
            x0 += x3;
            x3 = x1 - x2;
            x1 += x2;
            x[0] = x0 + x1;
            x[4] = (x0 - x1) * 0.70710677;
            x5 += x6;
            x6 = (x6 + x7) * 0.70710677;
            x7 += xt;
            x3 = (x3 + x4) * 0.70710677;
            x5 -= x7 * 0.198912367;
            x7 += x5 * 0.382683432;
            x5 -= x7 * 0.198912367;
            x0 = xt - x6;
            xt += x6;
            x[1] = (xt + x7) * 0.50979561;
            x[2] = (x4 + x3) * 0.54119611;
            x[3] = (x0 - x5) * 0.60134488;
            x[5] = (x0 + x5) * 0.89997619;
            x[6] = (x4 - x3) * 1.30656302;
            x[7] = (xt - x7) * 2.56291556;
        }

        let mut y = k;
        for i in 0..7 {
            spectrum[y] = t[0][i];
            spectrum[y + 18] = t[2][i] + t[3][i] + t[3][i + 1];
            spectrum[y + 36] = t[1][i] + t[1][i + 1];
            spectrum[y + 54] = t[2][i + 1] + t[3][i] + t[3][i + 1];
            y += 72;
        }
        spectrum[y] = t[0][7];
        spectrum[y + 18] = t[2][7] + t[3][7];
        spectrum[y + 36] = t[1][7];
        spectrum[y + 54] = t[3][7];
    }
}

/// 第 0 与第 16 个输出样本 (窗口对称点) 的单独计算
fn synth_pair(pcm: &mut [f32], out: usize, nch: usize, lines: &[f32], z: usize) {
    let at = |m: usize| lines[z + m * 64];
    let mut a = (at(14) - at(0)) * 29.0;
    a += (at(1) + at(13)) * 213.0;
    a += (at(12) - at(2)) * 459.0;
    a += (at(3) + at(11)) * 2037.0;
    a += (at(10) - at(4)) * 5153.0;
    a += (at(5) + at(9)) * 6574.0;
    a += (at(8) - at(6)) * 37489.0;
    a += at(7) * 75038.0;
    pcm[out] = scale_pcm(a);

    let at = |m: usize| lines[z + 2 + m * 64];
    let mut a = at(14) * 104.0;
    a += at(12) * 1567.0;
    a += at(10) * 9727.0;
    a += at(8) * 64019.0;
    a += at(6) * -9975.0;
    a += at(4) * -45.0;
    a += at(2) * 146.0;
    a += at(0) * -5.0;
    pcm[out + 16 * nch] = scale_pcm(a);
}

/// 合成两个相邻时隙 (`slot` 与 `slot + 1`), 共 64 个样本/声道.
///
/// `base` 为本时隙在 `lines` 中的起点; 左右声道数据交错存放, 每组 4 个值为
/// (左 slot, 右 slot, 左 slot+1, 右 slot+1).
#[allow(clippy::too_many_arguments)]
fn synth(
    left: &[f32; 576],
    right: &[f32; 576],
    slot: usize,
    pcm: &mut [f32],
    out: usize,
    nch: usize,
    lines: &mut [f32; LINES_LEN],
    base: usize,
) {
    let xl = |n: usize| left[slot + n];
    let xr = |n: usize| right[slot + n];
    let zlin = base + QMF_STATE_LEN;
    let dstl = out;
    let dstr = out + nch - 1;

    lines[zlin + 60] = xl(18 * 16);
    lines[zlin + 61] = xr(18 * 16);
    lines[zlin + 62] = xl(0);
    lines[zlin + 63] = xr(0);
    lines[zlin + 124] = xl(1 + 18 * 16);
    lines[zlin + 125] = xr(1 + 18 * 16);
    lines[zlin + 126] = xl(1);
    lines[zlin + 127] = xr(1);

    synth_pair(pcm, dstr, nch, lines, base + 60 + 1);
    synth_pair(pcm, dstr + 32 * nch, nch, lines, base + 60 + 64 + 1);
    synth_pair(pcm, dstl, nch, lines, base + 60);
    synth_pair(pcm, dstl + 32 * nch, nch, lines, base + 60 + 64);

    let mut w = 0usize;
    for i in (0..15).rev() {
        lines[zlin + 4 * i] = xl(18 * (31 - i));
        lines[zlin + 4 * i + 1] = xr(18 * (31 - i));
        lines[zlin + 4 * i + 2] = xl(1 + 18 * (31 - i));
        lines[zlin + 4 * i + 3] = xr(1 + 18 * (31 - i));
        lines[zlin + 4 * (i + 16)] = xl(1 + 18 * (1 + i));
        lines[zlin + 4 * (i + 16) + 1] = xr(1 + 18 * (1 + i));
        lines[zlin + 4 * i + 2 - 64] = xl(18 * (1 + i));
        lines[zlin + 4 * i + 3 - 64] = xr(18 * (1 + i));

        let mut a = [0.0f32; 4];
        let mut b = [0.0f32; 4];
        for k in 0..8 {
            let w0 = SYNTH_WIN[w];
            let w1 = SYNTH_WIN[w + 1];
            w += 2;
            let vz = zlin + 4 * i - k * 64;
            let vy = base + 4 * i + k * 64;
            for j in 0..4 {
                let z = lines[vz + j];
                let y = lines[vy + j];
                b[j] += z * w1 + y * w0;
                if k % 2 == 0 {
                    a[j] += z * w0 - y * w1;
                } else {
                    a[j] += y * w1 - z * w0;
                }
            }
        }

        pcm[dstr + (15 - i) * nch] = scale_pcm(a[1]);
        pcm[dstr + (17 + i) * nch] = scale_pcm(b[1]);
        pcm[dstl + (15 - i) * nch] = scale_pcm(a[0]);
        pcm[dstl + (17 + i) * nch] = scale_pcm(b[0]);
        pcm[dstr + (47 - i) * nch] = scale_pcm(a[3]);
        pcm[dstr + (49 + i) * nch] = scale_pcm(b[3]);
        pcm[dstl + (47 - i) * nch] = scale_pcm(a[2]);
        pcm[dstl + (49 + i) * nch] = scale_pcm(b[2]);
    }
}

/// 合成滤波器组状态 (每个解码会话一份, 双声道共用交错存放的历史)
#[derive(Clone)]
pub struct SynthesisFilter {
    qmf_state: [f32; QMF_STATE_LEN],
}

impl Default for SynthesisFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SynthesisFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SynthesisFilter").finish_non_exhaustive()
    }
}

impl SynthesisFilter {
    pub fn new() -> Self {
        Self {
            qmf_state: [0.0; QMF_STATE_LEN],
        }
    }

    pub fn reset(&mut self) {
        self.qmf_state.fill(0.0);
    }

    /// 合成一个 granule.
    ///
    /// `right` 为 `None` 时按单声道处理. `pcm` 至少容纳 `576 * 声道数` 个交错样本.
    pub fn synth_granule(
        &mut self,
        left: &mut [f32; 576],
        right: Option<&mut [f32; 576]>,
        pcm: &mut [f32],
    ) {
        dct_ii(left);
        let nch = if right.is_some() { 2 } else { 1 };
        let right: &[f32; 576] = match right {
            Some(r) => {
                dct_ii(r);
                &*r
            }
            None => &*left,
        };

        let mut lines = [0.0f32; LINES_LEN];
        lines[..QMF_STATE_LEN].copy_from_slice(&self.qmf_state);
        for slot in (0..18).step_by(2) {
            synth(
                left,
                right,
                slot,
                pcm,
                32 * nch * slot,
                nch,
                &mut lines,
                slot * 64,
            );
        }
        self.qmf_state
            .copy_from_slice(&lines[18 * 64..18 * 64 + QMF_STATE_LEN]);
    }
}
