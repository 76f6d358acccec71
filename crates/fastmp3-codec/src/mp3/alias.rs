//! 抗混叠 (Alias Reduction)
//!
//! 在相邻子带的边界两侧各 8 个系数上做蝶形运算. 长块处理全部 31 个边界,
//! 混合块只处理第 1 个边界, 纯短块不处理.

use super::tables::ALIAS_COEF;

/// 对前 `nbands` 个子带边界做抗混叠
pub fn alias_reduction(spectrum: &mut [f32; 576], nbands: usize) {
    let [cs, ca] = &ALIAS_COEF;
    for band in 0..nbands.min(31) {
        let base = band * 18;
        for i in 0..8 {
            let u = spectrum[base + 18 + i];
            let d = spectrum[base + 17 - i];
            spectrum[base + 18 + i] = u * cs[i] - d * ca[i];
            spectrum[base + 17 - i] = u * ca[i] + d * cs[i];
        }
    }
}
