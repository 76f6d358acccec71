//! fastmp3 - MP3 解码命令行工具
//!
//! - `fastmp3 probe <input> [--json]`: 输出总采样数, 声道数, 采样率, 码率
//! - `fastmp3 decode <input> -o <out.f32>`: 解码为小端交错 `f32` 原始 PCM
//! - `fastmp3 unpack <input> -o <out>`: 按位展开, 每个输入位输出一个 0/1 字节

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process;

use fastmp3::logging::{self, LoggingConfig};
use fastmp3::{DecodeRequest, Mp3Error, ProbeResult, ScanOptions};

#[derive(Parser, Debug)]
#[command(name = "fastmp3", version, about = "纯 Rust MP3 解码工具")]
struct Cli {
    /// 日志详细程度 (-v: info, -vv: debug, -vvv: trace), FASTMP3_LOG 环境变量优先
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// 同时把日志写入该目录
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 探测元数据
    Probe {
        input: PathBuf,

        /// 输出 JSON 格式
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        scan: ScanArgs,
    },

    /// 解码为原始 PCM (小端 f32, 交错)
    Decode {
        input: PathBuf,

        /// 输出文件路径
        #[arg(short, long)]
        output: PathBuf,

        /// 起始采样偏移 (每声道)
        #[arg(long, default_value_t = 0)]
        offset: u64,

        /// 最多解码的采样数 (每声道)
        #[arg(long)]
        length: Option<u64>,

        #[command(flatten)]
        scan: ScanArgs,
    },

    /// 按位展开文件内容
    Unpack {
        input: PathBuf,

        /// 输出文件路径
        #[arg(short, long)]
        output: PathBuf,
    },
}

#[derive(Args, Debug)]
struct ScanArgs {
    /// 不按 LAME 标签去掉编码器延迟与末尾填充
    #[arg(long)]
    no_gapless: bool,

    /// 流参数中途改变时报错
    #[arg(long)]
    strict: bool,
}

impl ScanArgs {
    fn options(&self) -> ScanOptions {
        let options = ScanOptions::default().strict(self.strict);
        if self.no_gapless {
            options.without_gapless()
        } else {
            options
        }
    }
}

/// JSON 探测输出
#[derive(Serialize)]
struct ProbeOutput<'a> {
    file: String,
    #[serde(flatten)]
    result: &'a ProbeResult,
    duration_secs: f64,
}

fn main() {
    let cli = Cli::parse();

    let config = LoggingConfig {
        level: verbosity_level(cli.verbose).to_string(),
        directory: cli
            .log_dir
            .as_ref()
            .map(|dir| dir.to_string_lossy().to_string()),
        ..LoggingConfig::default()
    };
    if let Err(err) = logging::init(&config) {
        eprintln!("日志初始化失败: {err:#}");
    }

    if let Err(err) = run(cli.command) {
        eprintln!("错误: {err:#}");
        process::exit(exit_code(&err));
    }
}

fn verbosity_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// 解码类失败返回 2, 定位越界返回 3, 其余 1
fn exit_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<Mp3Error>() {
        Some(e) if e.is_decode_failure() => 2,
        Some(e) if e.is_seek_failure() => 3,
        _ => 1,
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Probe { input, json, scan } => probe(&input, json, &scan.options()),
        Command::Decode {
            input,
            output,
            offset,
            length,
            scan,
        } => {
            let mut request = DecodeRequest::full().with_offset(offset);
            if let Some(length) = length {
                request = request.with_length(length);
            }
            decode(&input, &output, request, &scan.options())
        }
        Command::Unpack { input, output } => unpack(&input, &output),
    }
}

fn probe(input: &Path, json: bool, options: &ScanOptions) -> Result<()> {
    let result = fastmp3::probe_file_with(input, options)?;
    tracing::info!("探测完成: {}", input.display());

    if json {
        let output = ProbeOutput {
            file: input.display().to_string(),
            result: &result,
            duration_secs: result.duration_secs(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("文件:     {}", input.display());
        println!("采样数:   {}", result.total_samples);
        println!("声道数:   {}", result.channels);
        println!("采样率:   {} Hz", result.sample_rate);
        println!("码率:     {} kbps", result.bitrate_kbps);
        println!("时长:     {:.3} 秒", result.duration_secs());
    }
    Ok(())
}

fn decode(input: &Path, output: &Path, request: DecodeRequest, options: &ScanOptions) -> Result<()> {
    let audio = fastmp3::decode_file_with(input, request, options)?;

    let file = File::create(output)
        .with_context(|| format!("创建输出文件失败, path={}", output.display()))?;
    let mut writer = BufWriter::new(file);
    write_f32_le(&mut writer, audio.samples())?;
    writer.flush()?;

    eprintln!(
        "{} -> {}: {} 行 x {} 声道, {} Hz, {:.3} 秒",
        input.display(),
        output.display(),
        audio.rows(),
        audio.channels(),
        audio.sample_rate(),
        audio.duration_secs()
    );
    Ok(())
}

fn unpack(input: &Path, output: &Path) -> Result<()> {
    let data =
        std::fs::read(input).with_context(|| format!("读取文件失败, path={}", input.display()))?;
    let bits = fastmp3::unpack_bits(&data);
    std::fs::write(output, &bits)
        .with_context(|| format!("写入输出文件失败, path={}", output.display()))?;
    eprintln!("{} 字节 -> {} 位", data.len(), bits.len());
    Ok(())
}

fn write_f32_le(writer: &mut impl Write, samples: &[f32]) -> std::io::Result<()> {
    for sample in samples {
        writer.write_all(&sample.to_le_bytes())?;
    }
    Ok(())
}
