//! 可配置的合成 Layer III 码流.
//!
//! 覆盖 MPEG-1/2/2.5, 长块/短块/混合块与块切换, M/S 与强度立体声, 比例因子与 scfsi,
//! 带 linbits 的 Huffman 表, count1 区域, 以及 main data 跨帧排列的比特储备库.
//! 每张 Huffman 表只收录取值 0, 1, 2, 15 (转义) 的码字.

use fastmp3::core::BitWriter;

const HEADER_LEN: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Version {
    Mpeg1,
    Mpeg2,
    Mpeg25,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StereoMode {
    Mono,
    Stereo,
    MidSide,
    Intensity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Blocks {
    Long,
    Short,
    Mixed,
    /// 各 granule 依次使用块类型 0, 1, 2, 3
    Switching,
}

#[derive(Debug, Clone, Copy)]
pub struct SynthConfig {
    pub version: Version,
    pub stereo: StereoMode,
    pub blocks: Blocks,
    pub bitrate_index: u8,
    /// big values 三个区域的 Huffman 表. 区域边界按 MPEG-1 44.1kHz 长块计算,
    /// 其它情况三个区域须使用同一张表
    pub tables: [u8; 3],
    pub count1_table_b: bool,
    pub global_gain: u32,
    /// 每个 granule/声道的 big values 对数
    pub pairs: u32,
    /// 每个 granule/声道的 count1 四元组数
    pub quads: u32,
    pub scalefactors: bool,
    /// MPEG-1 第二个 granule 沿用第一个 granule 第 0, 2 组的比例因子
    pub scfsi: bool,
    /// main data 跨帧紧凑排列, 各帧内容量起伏, main_data_begin 可超过一帧的 main data
    pub reservoir: bool,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            version: Version::Mpeg1,
            stereo: StereoMode::Mono,
            blocks: Blocks::Long,
            bitrate_index: 9,
            tables: [1; 3],
            count1_table_b: false,
            global_gain: 200,
            pairs: 32,
            quads: 0,
            scalefactors: false,
            scfsi: false,
            reservoir: false,
        }
    }
}

/// 一个 granule/声道写入侧边信息的字段
struct ChannelSide {
    part2_3: u32,
    big_values: u32,
    scalefac_compress: u32,
    block_type: u8,
    mixed: bool,
    tables: [u8; 3],
    subblock_gain: [u32; 3],
}

/// MPEG-1 scalefac_compress -> (slen1, slen2)
const SLEN: [(u32, u32); 16] = [
    (0, 0), (0, 1), (0, 2), (0, 3), (3, 0), (1, 1), (1, 2), (1, 3),
    (2, 1), (2, 2), (2, 3), (3, 1), (3, 2), (3, 3), (4, 2), (4, 3),
];

/// LSF 比例因子: scalefac_compress = ((2 * 5 + 2) << 4) | (1 << 2) | 1, 即 slen = [2, 2, 1, 1]
const LSF_SCALEFAC_COMPRESS: u32 = 197;
const LSF_SLEN: [u32; 4] = [2, 2, 1, 1];

const LINBITS: [u32; 32] = [
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    1, 2, 3, 4, 6, 8, 10, 13, 4, 5, 6, 7, 8, 9, 11, 13,
];

/// 表 1: [x][y] -> (码字, 位数)
const TABLE1: [[(u32, u32); 2]; 2] = [[(0b1, 1), (0b001, 3)], [(0b01, 2), (0b000, 3)]];

/// 表 16..23 共用的码树, 取值 0, 1, 2, 15
const TREE16: [[(u32, u32); 4]; 4] = [
    [(0b1, 1), (0b0101, 4), (0b001110, 6), (0b000010001, 9)],
    [(0b011, 3), (0b0100, 4), (0b001100, 6), (0b00001001, 8)],
    [(0b001111, 6), (0b001101, 6), (0b0010111, 7), (0b000010000, 9)],
    [(0b000001100, 9), (0b00001010, 8), (0b00000111, 8), (0b00000011, 8)],
];

/// 表 24..31 共用的码树, 取值 0, 1, 2, 15
const TREE24: [[(u32, u32); 4]; 4] = [
    [(0b1111, 4), (0b1101, 4), (0b101110, 6), (0b001011000, 9)],
    [(0b1110, 4), (0b1100, 4), (0b10101, 5), (0b00101010, 8)],
    [(0b101111, 6), (0b10110, 5), (0b101001, 6), (0b0010010, 7)],
    [(0b00101011, 8), (0b0010100, 7), (0b0010011, 7), (0b0011, 4)],
];

/// count1 表 A, 以 vwxy 为下标
const COUNT1_A: [(u32, u32); 16] = [
    (0b1, 1), (0b0101, 4), (0b0100, 4), (0b00101, 5),
    (0b0110, 4), (0b000101, 6), (0b00100, 5), (0b000100, 6),
    (0b0111, 4), (0b00011, 5), (0b00110, 5), (0b000000, 6),
    (0b00111, 5), (0b000010, 6), (0b000011, 6), (0b000001, 6),
];

/// 44.1kHz 长块下 region0/region1 的结束谱线 (region0_count = region1_count = 7)
const REGION_ENDS: [usize; 2] = [36, 162];

impl SynthConfig {
    fn is_mpeg1(&self) -> bool {
        self.version == Version::Mpeg1
    }

    pub fn channels(&self) -> usize {
        if self.stereo == StereoMode::Mono { 1 } else { 2 }
    }

    fn granules(&self) -> usize {
        if self.is_mpeg1() { 2 } else { 1 }
    }

    pub fn samples_per_frame(&self) -> u64 {
        576 * self.granules() as u64
    }

    pub fn sample_rate(&self) -> u32 {
        match self.version {
            Version::Mpeg1 => 44_100,
            Version::Mpeg2 => 24_000,
            Version::Mpeg25 => 12_000,
        }
    }

    fn kbps(&self) -> u32 {
        const MPEG1: [u32; 15] = [0, 32, 40, 48, 56, 64, 80, 96, 112, 128, 160, 192, 224, 256, 320];
        const LSF: [u32; 15] = [0, 8, 16, 24, 32, 40, 48, 56, 64, 80, 96, 112, 128, 144, 160];
        let table = if self.is_mpeg1() { &MPEG1 } else { &LSF };
        table[usize::from(self.bitrate_index)]
    }

    pub fn frame_len(&self) -> usize {
        let coef = if self.is_mpeg1() { 144_000 } else { 72_000 };
        (coef * self.kbps() / self.sample_rate()) as usize
    }

    fn side_info_len(&self) -> usize {
        match (self.is_mpeg1(), self.channels()) {
            (true, 1) => 17,
            (true, _) => 32,
            (false, 1) => 9,
            (false, _) => 17,
        }
    }

    /// 每帧 main data 的字节数
    pub fn main_data_len(&self) -> usize {
        self.frame_len() - HEADER_LEN - self.side_info_len()
    }

    fn header(&self) -> [u8; 4] {
        let version = match self.version {
            Version::Mpeg1 => 0b11,
            Version::Mpeg2 => 0b10,
            Version::Mpeg25 => 0b00,
        };
        // 44.1kHz / 24kHz / 12kHz
        let sample_rate_index = if self.is_mpeg1() { 0 } else { 1 };
        let (mode, mode_ext) = match self.stereo {
            StereoMode::Mono => (3, 0),
            StereoMode::Stereo => (0, 0),
            StereoMode::MidSide => (1, 2),
            StereoMode::Intensity => (1, 1),
        };
        [
            0xFF,
            0xE0 | (version << 3) | 0b011,
            (self.bitrate_index << 4) | (sample_rate_index << 2),
            (mode << 6) | (mode_ext << 4),
        ]
    }

    fn validate(&self) {
        assert!(
            self.is_mpeg1() || (self.blocks != Blocks::Mixed && self.stereo != StereoMode::Intensity),
            "LSF 合成流不支持混合块与强度立体声"
        );
        assert!(
            self.stereo != StereoMode::Intensity || self.blocks == Blocks::Long,
            "强度立体声只用于长块"
        );
        assert!(
            !self.scfsi || (self.is_mpeg1() && self.blocks == Blocks::Long && self.scalefactors),
            "scfsi 只用于 MPEG-1 长块"
        );
        assert!(
            self.is_mpeg1() || self.tables.iter().all(|&t| t == self.tables[0]),
            "区域边界只按 44.1kHz 计算"
        );
        let lines = 2 * self.pairs + 4 * self.quads;
        assert!(lines <= 576, "谱线超过 576");
        // 强度立体声下左声道不进入没有比例因子的最后一个频带 (418 起)
        assert!(self.stereo != StereoMode::Intensity || lines <= 418);
    }

    /// 全局第 `granule` 个 granule 的 (block_type, mixed)
    fn block_type(&self, granule: usize) -> (u8, bool) {
        match self.blocks {
            Blocks::Long => (0, false),
            Blocks::Short => (2, false),
            Blocks::Mixed => (2, true),
            Blocks::Switching => ([0, 1, 2, 3][granule % 4], false),
        }
    }

    fn mpeg1_scalefac_compress(&self, block_type: u8, mixed: bool) -> u32 {
        if !self.scalefactors {
            return 0;
        }
        if self.stereo == StereoMode::Intensity {
            return 13;
        }
        match (block_type, mixed) {
            (0, _) => 11,
            (2, false) => 6,
            (2, true) => 9,
            _ => 10,
        }
    }

    /// 储备库流中各帧的 big values 对数
    fn frame_pairs(&self, frame: usize) -> u32 {
        const HEAVY: [bool; 7] = [false, false, true, true, false, true, false];
        if !self.reservoir || HEAVY[frame % HEAVY.len()] {
            self.pairs
        } else {
            self.pairs / 5
        }
    }
}

fn negative(n: usize) -> bool {
    n % 5 < 2
}

fn scalefactor(band: usize, ch: usize, seed: usize, bits: u32) -> u32 {
    ((band * 3 + ch * 5 + seed) % 7) as u32 & ((1 << bits) - 1)
}

fn put_scalefactor(bw: &mut BitWriter, band: usize, ch: usize, seed: usize, bits: u32) {
    if bits > 0 {
        bw.write_bits(scalefactor(band, ch, seed, bits), bits);
    }
}

fn write_mpeg1_scalefactors(
    bw: &mut BitWriter,
    scalefac_compress: u32,
    (block_type, mixed): (u8, bool),
    reuse: bool,
    ch: usize,
    seed: usize,
) {
    let (slen1, slen2) = SLEN[scalefac_compress as usize];
    if block_type == 2 {
        let long_bands = if mixed { 8 } else { 0 };
        for band in 0..long_bands {
            put_scalefactor(bw, band, ch, seed, slen1);
        }
        let first_short = if mixed { 3 } else { 0 };
        for band in first_short..12 {
            let bits = if band < 6 { slen1 } else { slen2 };
            for window in 0..3 {
                put_scalefactor(bw, band * 3 + window, ch, seed, bits);
            }
        }
    } else {
        const GROUPS: [(usize, usize); 4] = [(0, 6), (6, 11), (11, 16), (16, 21)];
        for (group, &(start, end)) in GROUPS.iter().enumerate() {
            // scfsi 置位的第 0, 2 组由解码器从第一个 granule 复制
            if reuse && group % 2 == 0 {
                continue;
            }
            for band in start..end {
                put_scalefactor(bw, band, ch, seed, if band < 11 { slen1 } else { slen2 });
            }
        }
    }
}

fn write_lsf_scalefactors(bw: &mut BitWriter, slen: [u32; 4], block_type: u8, ch: usize, seed: usize) {
    let counts: [usize; 4] = if block_type == 2 { [9, 9, 9, 9] } else { [6, 5, 5, 5] };
    let mut band = 0;
    for (count, bits) in counts.into_iter().zip(slen) {
        for _ in 0..count {
            put_scalefactor(bw, band, ch, seed, bits);
            band += 1;
        }
    }
}

fn pair_code(table: u8, x: u32, y: u32) -> (u32, u32) {
    let slot = |v: u32| match v {
        0 => 0,
        1 => 1,
        2 => 2,
        15 => 3,
        _ => panic!("码表未收录取值 {v}"),
    };
    match table {
        1 => TABLE1[x as usize][y as usize],
        16..=23 => TREE16[slot(x)][slot(y)],
        24..=31 => TREE24[slot(x)][slot(y)],
        _ => panic!("未收录 Huffman 表 {table}"),
    }
}

/// 第 `i` 对谱线的量化值; 最后一对总是非零
fn pair_values(table: u8, i: usize, seed: usize, last: bool) -> (u32, u32) {
    if last {
        return (1, 1);
    }
    let h = (i * 7 + seed * 3 + i / 5) % 9;
    if table == 1 {
        return match h % 7 {
            0 | 4 => (1, 0),
            1 => (0, 1),
            2 | 5 => (1, 1),
            _ => (0, 0),
        };
    }
    let range = 1usize << LINBITS[usize::from(table)].min(4);
    let escape = 15 + ((i + seed) % range) as u32;
    match h {
        0 => (1, 0),
        1 => (0, 2),
        2 => (2, 1),
        3 => (escape, 0),
        4 => (1, 1),
        5 => (0, 0),
        6 => (2, 2),
        7 => (1, escape),
        _ => (0, 1),
    }
}

fn write_spectrum(bw: &mut BitWriter, side: &ChannelSide, quads: u32, count1_table_b: bool, seed: usize) {
    let pairs = side.big_values as usize;
    for i in 0..pairs {
        let line = 2 * i;
        let table = if line < REGION_ENDS[0] {
            side.tables[0]
        } else if line < REGION_ENDS[1] {
            side.tables[1]
        } else {
            side.tables[2]
        };
        let (x, y) = pair_values(table, i, seed, i + 1 == pairs);
        let (code, len) = pair_code(table, x.min(15), y.min(15));
        bw.write_bits(code, len);
        let linbits = LINBITS[usize::from(table)];
        for (k, v) in [x, y].into_iter().enumerate() {
            if v >= 15 && linbits > 0 {
                bw.write_bits(v - 15, linbits);
            }
            if v != 0 {
                bw.write_bit(negative(i * 3 + k + seed));
            }
        }
    }
    for j in 0..quads as usize {
        let q = (j * 5 + seed) % 16;
        let (code, len) = if count1_table_b { (15 - q as u32, 4) } else { COUNT1_A[q] };
        bw.write_bits(code, len);
        for k in 0..4 {
            if q & (8 >> k) != 0 {
                bw.write_bit(negative(j * 4 + k + seed + 1));
            }
        }
    }
}

/// 一帧的 main data 与侧边信息字段
struct EncodedFrame {
    main: Vec<u8>,
    scfsi: [u32; 2],
    /// [granule][channel]
    sides: Vec<Vec<ChannelSide>>,
}

fn encode_frame(cfg: &SynthConfig, frame: usize, pairs: u32) -> EncodedFrame {
    let nch = cfg.channels();
    let scfsi = if cfg.scfsi { 0b1010 } else { 0 };
    let mut bw = BitWriter::new();
    let mut sides = Vec::with_capacity(cfg.granules());
    for gr in 0..cfg.granules() {
        let granule = frame * cfg.granules() + gr;
        let (block_type, mixed) = cfg.block_type(granule);
        let mut channels = Vec::with_capacity(nch);
        for ch in 0..nch {
            let seed = frame * 13 + gr * 5 + ch * 7;
            let intensity_side = cfg.stereo == StereoMode::Intensity && ch == 1;
            let (ch_pairs, quads) = if intensity_side { (pairs.min(10), 0) } else { (pairs, cfg.quads) };
            let tables = if block_type == 0 { cfg.tables } else { [cfg.tables[0]; 3] };
            let scalefac_compress = if !cfg.is_mpeg1() {
                if cfg.scalefactors { LSF_SCALEFAC_COMPRESS } else { 0 }
            } else {
                cfg.mpeg1_scalefac_compress(block_type, mixed)
            };
            let subblock_gain = if block_type == 2 {
                [(granule % 3) as u32, ((granule + 1) % 3) as u32, ((granule + 2) % 3) as u32]
            } else {
                [0; 3]
            };
            let mut side = ChannelSide {
                part2_3: 0,
                big_values: ch_pairs,
                scalefac_compress,
                block_type,
                mixed,
                tables,
                subblock_gain,
            };

            let before = bw.bits_written();
            if cfg.is_mpeg1() {
                let reuse = gr == 1 && scfsi != 0;
                write_mpeg1_scalefactors(&mut bw, scalefac_compress, (block_type, mixed), reuse, ch, seed);
            } else {
                let slen = if cfg.scalefactors { LSF_SLEN } else { [0; 4] };
                write_lsf_scalefactors(&mut bw, slen, block_type, ch, seed);
            }
            write_spectrum(&mut bw, &side, quads, cfg.count1_table_b, seed);
            side.part2_3 = (bw.bits_written() - before) as u32;
            assert!(side.part2_3 < 4096, "part2_3_length 溢出");
            channels.push(side);
        }
        sides.push(channels);
    }
    EncodedFrame { main: bw.finish(), scfsi: [scfsi; 2], sides }
}

fn write_side_info(cfg: &SynthConfig, main_data_begin: usize, encoded: &EncodedFrame) -> Vec<u8> {
    let nch = cfg.channels();
    let mut bw = BitWriter::new();
    if cfg.is_mpeg1() {
        assert!(main_data_begin < 512);
        bw.write_bits(main_data_begin as u32, 9);
        bw.write_bits(0, if nch == 1 { 5 } else { 3 });
        for &scfsi in encoded.scfsi.iter().take(nch) {
            bw.write_bits(scfsi, 4);
        }
    } else {
        assert!(main_data_begin < 256);
        bw.write_bits(main_data_begin as u32, 8);
        bw.write_bits(0, nch as u32);
    }
    for granule in &encoded.sides {
        for side in granule {
            bw.write_bits(side.part2_3, 12);
            bw.write_bits(side.big_values, 9);
            bw.write_bits(cfg.global_gain, 8);
            bw.write_bits(side.scalefac_compress, if cfg.is_mpeg1() { 4 } else { 9 });
            if side.block_type != 0 {
                bw.write_bit(true);
                bw.write_bits(u32::from(side.block_type), 2);
                bw.write_bit(side.mixed);
                for &table in &side.tables[..2] {
                    bw.write_bits(u32::from(table), 5);
                }
                for gain in side.subblock_gain {
                    bw.write_bits(gain, 3);
                }
            } else {
                bw.write_bit(false);
                for table in side.tables {
                    bw.write_bits(u32::from(table), 5);
                }
                bw.write_bits(7, 4);
                bw.write_bits(7, 3);
            }
            if cfg.is_mpeg1() {
                bw.write_bit(false); // preflag
            }
            bw.write_bit(false); // scalefac_scale
            bw.write_bit(cfg.count1_table_b);
        }
    }
    let side = bw.finish();
    assert_eq!(side.len(), cfg.side_info_len());
    side
}

/// 按配置生成 `frames` 帧.
///
/// 一帧的 main data 装不下时逐步减少该帧的 big values 对数.
pub fn synth_stream(cfg: &SynthConfig, frames: usize) -> Vec<u8> {
    cfg.validate();
    let slot = cfg.main_data_len();
    let max_back = if cfg.is_mpeg1() { 511 } else { 255 };

    let mut pool = vec![0u8; frames * slot];
    let mut used = 0;
    let mut planned = Vec::with_capacity(frames);
    for frame in 0..frames {
        let written = frame * slot;
        let start = if cfg.reservoir { used.max(written.saturating_sub(max_back)) } else { written };
        let mut pairs = cfg.frame_pairs(frame);
        let encoded = loop {
            let encoded = encode_frame(cfg, frame, pairs);
            if start + encoded.main.len() <= written + slot {
                break encoded;
            }
            pairs = pairs * 3 / 4;
            assert!(pairs > 0, "帧 {frame} 放不下任何谱线");
        };
        pool[start..start + encoded.main.len()].copy_from_slice(&encoded.main);
        used = start + encoded.main.len();
        planned.push((written - start, encoded));
    }

    let mut out = Vec::with_capacity(frames * cfg.frame_len());
    for (frame, (main_data_begin, encoded)) in planned.iter().enumerate() {
        out.extend_from_slice(&cfg.header());
        out.extend_from_slice(&write_side_info(cfg, *main_data_begin, encoded));
        out.extend_from_slice(&pool[frame * slot..(frame + 1) * slot]);
    }
    out
}

/// 32kbps 44.1kHz 单声道, main data 借用前几帧的储备库
pub fn reservoir_mpeg1() -> SynthConfig {
    SynthConfig {
        bitrate_index: 1,
        global_gain: 196,
        pairs: 160,
        quads: 4,
        reservoir: true,
        ..Default::default()
    }
}

/// 32kbps 24kHz 单声道, main data 借用前几帧的储备库
pub fn reservoir_mpeg2() -> SynthConfig {
    SynthConfig {
        version: Version::Mpeg2,
        bitrate_index: 4,
        pairs: 250,
        quads: 4,
        reservoir: true,
        ..Default::default()
    }
}
