//! Layer III 频谱 Huffman 解码.
//!
//! 码表以打包查找树存储 (见 [`super::tables::HUFF_TABS`]): 首级用 5 位索引,
//! 负值叶子表示子树, 其低 3 位为下一级索引位数; 正值叶子的高位为码长,
//! 低 8 位是两个 4 位的 (x, y) 值.
//!
//! 解码的同时完成反量化: 输出 `sign * |v|^(4/3) * gain[sfb]`.

use super::requantize::{MAX_SFB, pow43};
use super::side_info::GranuleInfo;
use super::tables::{
    HUFF_COUNT1_A, HUFF_COUNT1_B, HUFF_LINBITS, HUFF_TAB_INDEX, HUFF_TABS, POW43,
};

/// 带 32 位缓存的位读取器, 越过数据末尾时补 0
struct BitCache<'a> {
    data: &'a [u8],
    /// 下一个待装入缓存的字节
    next: usize,
    /// 缓存, 最高位为下一个待读位
    cache: u32,
    /// 下次装入字节时的左移量; 非负表示缓存有空位
    shift: i32,
}

impl<'a> BitCache<'a> {
    fn new(data: &'a [u8], bit_pos: usize) -> Self {
        let first = bit_pos / 8;
        let byte = |i: usize| u32::from(data.get(i).copied().unwrap_or(0));
        let word = (byte(first) << 24)
            | (byte(first + 1) << 16)
            | (byte(first + 2) << 8)
            | byte(first + 3);
        Self {
            data,
            next: first + 4,
            cache: word << (bit_pos & 7),
            shift: (bit_pos & 7) as i32 - 8,
        }
    }

    /// 当前位位置
    fn position(&self) -> usize {
        (self.next as isize * 8 - 24 + self.shift as isize) as usize
    }

    #[inline]
    fn peek(&self, n: u32) -> u32 {
        self.cache.checked_shr(32 - n.min(32)).unwrap_or(0)
    }

    #[inline]
    fn skip(&mut self, n: u32) {
        self.cache = self.cache.checked_shl(n).unwrap_or(0);
        self.shift += n as i32;
    }

    /// 最高位是否为 1 (符号位)
    #[inline]
    fn negative(&self) -> bool {
        self.cache & 0x8000_0000 != 0
    }

    #[inline]
    fn refill(&mut self) {
        while self.shift >= 0 {
            let byte = u32::from(self.data.get(self.next).copied().unwrap_or(0));
            self.cache |= byte << self.shift;
            self.next += 1;
            self.shift -= 8;
        }
    }
}

/// 解码一个 granule/声道的频谱数据到 `out` (576 个值).
///
/// `bit_pos` 为 part3 (Huffman 数据) 的起始位, `limit` 为本声道 part2_3 的结束位.
/// 返回结束位位置 (总是 `limit`).
pub fn decode_spectrum(
    out: &mut [f32; 576],
    data: &[u8],
    bit_pos: usize,
    limit: usize,
    gr: &GranuleInfo,
    gains: &[f32; MAX_SFB],
) -> usize {
    let mut bc = BitCache::new(data, bit_pos);
    let sfb = gr.sfb_widths;
    let mut sfb_idx = 0usize;
    let mut dst = 0usize;
    let mut gain = 0.0f32;
    let mut big_val_cnt = gr.big_values as i32;

    let mut region = 0usize;
    'big_values: while big_val_cnt > 0 && region < 3 {
        let tab_num = gr.table_select[region] as usize;
        let mut sfb_cnt = i32::from(gr.region_count[region]);
        region += 1;
        let codebook = &HUFF_TABS[HUFF_TAB_INDEX[tab_num] as usize..];
        let linbits = u32::from(HUFF_LINBITS[tab_num]);
        loop {
            let width = sfb.get(sfb_idx).copied().unwrap_or(0) as i32;
            let np = width / 2;
            if np == 0 {
                break 'big_values;
            }
            sfb_idx += 1;
            let mut pairs = np.min(big_val_cnt);
            gain = gains.get(sfb_idx - 1).copied().unwrap_or(0.0);
            while pairs > 0 {
                let mut w = 5u32;
                let mut leaf = i32::from(codebook.get(bc.peek(w) as usize).copied().unwrap_or(0));
                while leaf < 0 {
                    bc.skip(w);
                    w = (leaf & 7) as u32;
                    let idx = bc.peek(w) as i32 - (leaf >> 3);
                    leaf = i32::from(codebook.get(idx as usize).copied().unwrap_or(0));
                }
                bc.skip((leaf >> 8) as u32);

                for _ in 0..2 {
                    let mut lsb = leaf & 0xF;
                    let value = if lsb == 15 && linbits != 0 {
                        lsb += bc.peek(linbits) as i32;
                        bc.skip(linbits);
                        bc.refill();
                        let v = gain * pow43(lsb);
                        if bc.negative() { -v } else { v }
                    } else {
                        let idx = 16 + lsb - if bc.negative() { 16 } else { 0 };
                        POW43[idx as usize] * gain
                    };
                    if let Some(slot) = out.get_mut(dst) {
                        *slot = value;
                    }
                    if lsb != 0 {
                        bc.skip(1);
                    }
                    dst += 1;
                    leaf >>= 4;
                }
                bc.refill();
                pairs -= 1;
            }
            big_val_cnt -= np;
            sfb_cnt -= 1;
            if big_val_cnt <= 0 || sfb_cnt < 0 {
                break;
            }
        }
    }

    // count1 区域: 每个码字给出 4 个取值 0/1 的系数
    let codebook: &[u8] = if gr.count1_table {
        &HUFF_COUNT1_B
    } else {
        &HUFF_COUNT1_A
    };
    let mut np = 1 - big_val_cnt;
    'count1: loop {
        let mut leaf = i32::from(codebook[bc.peek(4) as usize]);
        if leaf & 8 == 0 {
            let n = (leaf & 3) as u32;
            let idx = (leaf >> 3) as u32 + (bc.cache << 4).checked_shr(32 - n).unwrap_or(0);
            leaf = i32::from(codebook.get(idx as usize).copied().unwrap_or(0));
        }
        bc.skip((leaf & 7) as u32);
        if bc.position() > limit {
            break;
        }
        for half in 0..2 {
            np -= 1;
            if np == 0 {
                let width = sfb.get(sfb_idx).copied().unwrap_or(0) as i32;
                np = width / 2;
                if np == 0 {
                    break 'count1;
                }
                gain = gains.get(sfb_idx).copied().unwrap_or(0.0);
                sfb_idx += 1;
            }
            for bit in 0..2 {
                let k = half * 2 + bit;
                if leaf & (128 >> k) != 0 {
                    if let Some(slot) = out.get_mut(dst + k) {
                        *slot = if bc.negative() { -gain } else { gain };
                    }
                    bc.skip(1);
                }
            }
        }
        bc.refill();
        dst += 4;
    }
    limit
}
