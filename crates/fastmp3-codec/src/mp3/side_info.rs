//! Layer III 侧边信息 (Side Information) 解析

use fastmp3_core::{BitReader, Mp3Error, Mp3Result};

use super::header::FrameHeader;
use super::tables::{SCF_LONG, SCF_MIXED, SCF_SHORT};

/// big_values 上限 (576 / 2)
const MAX_BIG_VALUES: u32 = 288;

/// 单个 granule / 声道的侧边信息
#[derive(Debug, Clone)]
pub struct GranuleInfo {
    pub part2_3_length: u32,
    pub big_values: u32,
    pub global_gain: u32,
    pub scalefac_compress: u32,
    /// 0 普通, 1 起始, 2 短块, 3 结束
    pub block_type: u8,
    pub mixed_block: bool,
    pub table_select: [u8; 3],
    pub subblock_gain: [u8; 3],
    /// big_values 各区域包含的比例因子频带数 (最后一个区域取到末尾)
    pub region_count: [u8; 3],
    pub preflag: bool,
    pub scalefac_scale: bool,
    pub count1_table: bool,
    /// 比例因子复用标志 (4 组, 最高位对应第 0 组); 仅 MPEG-1 第 2 个 granule 有效
    pub scfsi: u8,
    /// 本 granule 使用的比例因子频带宽度表 (以 0 结尾)
    pub sfb_widths: &'static [u8],
    pub n_long_sfb: usize,
    pub n_short_sfb: usize,
}

impl Default for GranuleInfo {
    fn default() -> Self {
        Self {
            part2_3_length: 0,
            big_values: 0,
            global_gain: 0,
            scalefac_compress: 0,
            block_type: 0,
            mixed_block: false,
            table_select: [0; 3],
            subblock_gain: [0; 3],
            region_count: [0; 3],
            preflag: false,
            scalefac_scale: false,
            count1_table: false,
            scfsi: 0,
            sfb_widths: &SCF_LONG[0],
            n_long_sfb: 22,
            n_short_sfb: 0,
        }
    }
}

impl GranuleInfo {
    pub fn is_short(&self) -> bool {
        self.n_short_sfb != 0
    }
}

/// 一帧的侧边信息
#[derive(Debug, Clone, Default)]
pub struct SideInfo {
    /// 本帧 main data 相对帧内起点向前回溯的字节数
    pub main_data_begin: usize,
    /// [granule][channel]
    pub granules: [[GranuleInfo; 2]; 2],
}

impl SideInfo {
    /// 解析完整帧 `frame` (含帧头) 的侧边信息.
    ///
    /// 以下情况视为帧损坏: big_values 超过 288, 窗口切换却给出 block_type 0,
    /// 侧边信息超出帧长, 以及各 granule 的 part2_3_length 之和超过本帧 main data
    /// 与 `main_data_begin` 回溯字节之和.
    pub fn parse(header: &FrameHeader, frame: &[u8]) -> Mp3Result<Self> {
        let start = header.main_data_offset() - header.side_info_len();
        let main_data_offset = header.main_data_offset();
        if frame.len() < main_data_offset {
            return Err(Mp3Error::Decode(format!(
                "帧长 {} 不足以容纳侧边信息 ({} 字节)",
                frame.len(),
                main_data_offset,
            )));
        }
        let mut br = BitReader::new(&frame[start..main_data_offset]);

        let nch = header.channels();
        let ngr = header.granules();
        let sfb_idx = header.sfb_table_index();

        let mut info = SideInfo::default();
        let mut scfsi = [0u8; 2];
        if header.is_mpeg1() {
            info.main_data_begin = br.read_bits(9)? as usize;
            br.skip_bits(if nch == 1 { 5 } else { 3 })?;
            for s in scfsi.iter_mut().take(nch) {
                *s = br.read_bits(4)? as u8;
            }
        } else {
            info.main_data_begin = br.read_bits(8)? as usize;
            br.skip_bits(nch)?;
        }

        let mut part2_3_total = 0usize;
        for gr in 0..ngr {
            for (ch, ch_scfsi) in scfsi.iter_mut().enumerate().take(nch) {
                let g = &mut info.granules[gr][ch];
                g.part2_3_length = br.read_bits(12)?;
                part2_3_total += g.part2_3_length as usize;
                g.big_values = br.read_bits(9)?;
                if g.big_values > MAX_BIG_VALUES {
                    return Err(Mp3Error::Decode(format!(
                        "big_values={} 超过 {}",
                        g.big_values, MAX_BIG_VALUES,
                    )));
                }
                g.global_gain = br.read_bits(8)?;
                g.scalefac_compress = br.read_bits(if header.is_mpeg1() { 4 } else { 9 })?;
                g.sfb_widths = &SCF_LONG[sfb_idx];
                g.n_long_sfb = 22;
                g.n_short_sfb = 0;

                let tables;
                if br.read_bit()? {
                    g.block_type = br.read_bits(2)? as u8;
                    if g.block_type == 0 {
                        return Err(Mp3Error::Decode("窗口切换时 block_type 不能为 0".into()));
                    }
                    g.mixed_block = br.read_bit()?;
                    g.region_count = [7, 255, 255];
                    if g.block_type == 2 {
                        // 短块的比例因子不能跨 granule 复用
                        *ch_scfsi = 0;
                        if g.mixed_block {
                            g.sfb_widths = &SCF_MIXED[sfb_idx];
                            g.n_long_sfb = if header.is_mpeg1() { 8 } else { 6 };
                            g.n_short_sfb = 30;
                        } else {
                            g.region_count[0] = 8;
                            g.sfb_widths = &SCF_SHORT[sfb_idx];
                            g.n_long_sfb = 0;
                            g.n_short_sfb = 39;
                        }
                    }
                    tables = br.read_bits(10)? << 5;
                    for gain in g.subblock_gain.iter_mut() {
                        *gain = br.read_bits(3)? as u8;
                    }
                } else {
                    g.block_type = 0;
                    g.mixed_block = false;
                    tables = br.read_bits(15)?;
                    g.region_count[0] = br.read_bits(4)? as u8;
                    g.region_count[1] = br.read_bits(3)? as u8;
                    g.region_count[2] = 255;
                }
                g.table_select = [
                    (tables >> 10) as u8,
                    ((tables >> 5) & 31) as u8,
                    (tables & 31) as u8,
                ];
                g.preflag = if header.is_mpeg1() {
                    br.read_bit()?
                } else {
                    g.scalefac_compress >= 500
                };
                g.scalefac_scale = br.read_bit()?;
                g.count1_table = br.read_bit()?;
                g.scfsi = if header.is_mpeg1() && gr == 1 { *ch_scfsi } else { 0 };
            }
        }

        let frame_main_bits = (frame.len() - main_data_offset) * 8;
        if part2_3_total > frame_main_bits + info.main_data_begin * 8 {
            return Err(Mp3Error::Decode(format!(
                "part2_3_length 总和 {} 位超出可用 main data {} 位",
                part2_3_total,
                frame_main_bits + info.main_data_begin * 8,
            )));
        }

        Ok(info)
    }
}
