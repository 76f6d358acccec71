//! 短块重排序.
//!
//! 短块的频谱按 [频带][窗口][频率] 排列, IMDCT 需要 [频率][窗口] 交错的顺序,
//! 即每个子带内 3 个窗口的系数依次交替.

/// 重排 `spectrum` 中的短块部分.
///
/// `sfb` 为短块频带宽度表 (每个频带按 3 个窗口重复, 以 0 结尾), 只取每组第一个宽度.
pub fn reorder_short(spectrum: &mut [f32], sfb: &[u8]) {
    let mut scratch = [0.0f32; 576];
    let mut src = 0usize;
    let mut dst = 0usize;
    for &len in sfb.iter().step_by(3) {
        let len = len as usize;
        if len == 0 || src + 3 * len > spectrum.len() {
            break;
        }
        for i in 0..len {
            scratch[dst] = spectrum[src + i];
            scratch[dst + 1] = spectrum[src + len + i];
            scratch[dst + 2] = spectrum[src + 2 * len + i];
            dst += 3;
        }
        src += 3 * len;
    }
    spectrum[..dst].copy_from_slice(&scratch[..dst]);
}
