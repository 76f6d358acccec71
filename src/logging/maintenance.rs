//! 历史日志维护: 超过保留期的删除, 非当天的压缩为 `.log.gz`.

use super::LoggingConfig;
use anyhow::{Context, Result};
use chrono::{Duration as ChronoDuration, Local, NaiveDate};
use flate2::Compression;
use flate2::write::GzEncoder;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// 按 `config` 清理日志目录; 未配置目录时什么都不做
pub fn cleanup_logs(config: &LoggingConfig) -> Result<()> {
    let Some(directory) = config.directory.as_deref() else {
        return Ok(());
    };
    cleanup_directory(Path::new(directory), config, Local::now().date_naive())
}

fn cleanup_directory(directory: &Path, config: &LoggingConfig, today: NaiveDate) -> Result<()> {
    if !directory.exists() {
        return Ok(());
    }
    let cutoff = today - ChronoDuration::days(config.retention_days);

    for entry in fs::read_dir(directory)? {
        let entry = entry?;
        let file_name = entry.file_name().to_string_lossy().to_string();
        let file_path = entry.path();

        let Some((date, compressed)) = parse_rotated_log_name(&file_name, &config.file_prefix)
        else {
            continue;
        };

        if date < cutoff {
            let _ = fs::remove_file(&file_path);
            continue;
        }

        if config.compress_history && !compressed && date < today {
            let _ = compress_to_gz(&file_path);
        }
    }

    Ok(())
}

fn compress_to_gz(path: &Path) -> Result<()> {
    let gz_path = PathBuf::from(format!("{}.gz", path.display()));
    if gz_path.exists() {
        return Ok(());
    }

    let mut input =
        File::open(path).with_context(|| format!("打开待压缩日志失败, path={}", path.display()))?;
    let output = File::create(&gz_path)
        .with_context(|| format!("创建压缩日志失败, path={}", gz_path.display()))?;
    let mut encoder = GzEncoder::new(output, Compression::default());
    io::copy(&mut input, &mut encoder)?;
    encoder.finish()?.flush()?;

    fs::remove_file(path)
        .with_context(|| format!("删除已压缩日志失败, path={}", path.display()))?;
    Ok(())
}

fn parse_rotated_log_name(file_name: &str, prefix: &str) -> Option<(NaiveDate, bool)> {
    let with_prefix = file_name.strip_prefix(prefix)?;
    let with_dot = with_prefix.strip_prefix('.')?;

    if let Some(date_part) = with_dot.strip_suffix(".log") {
        let date = parse_date(date_part)?;
        return Some((date, false));
    }

    if let Some(date_part) = with_dot.strip_suffix(".log.gz") {
        let date = parse_date(date_part)?;
        return Some((date, true));
    }

    None
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    if value.len() != 10 {
        return None;
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::GzDecoder;
    use std::io::Read;
    use tempfile::TempDir;

    #[test]
    fn test_解析日志文件名() {
        let prefix = "fastmp3";

        let parsed = parse_rotated_log_name("fastmp3.2026-02-06.log", prefix);
        assert_eq!(
            parsed,
            NaiveDate::from_ymd_opt(2026, 2, 6).map(|d| (d, false))
        );

        let parsed = parse_rotated_log_name("fastmp3.2026-02-06.log.gz", prefix);
        assert_eq!(
            parsed,
            NaiveDate::from_ymd_opt(2026, 2, 6).map(|d| (d, true))
        );

        assert!(parse_rotated_log_name("fastmp3.log", prefix).is_none());
        assert!(parse_rotated_log_name("other.2026-02-06.log", prefix).is_none());
    }

    #[test]
    fn test_清理与压缩() {
        let temp_dir = match TempDir::new() {
            Ok(temp_dir) => temp_dir,
            Err(err) => panic!("创建临时目录失败: {}", err),
        };
        let dir = temp_dir.path();
        let config = LoggingConfig {
            directory: Some(dir.to_string_lossy().to_string()),
            retention_days: 7,
            ..LoggingConfig::default()
        };
        let today = NaiveDate::from_ymd_opt(2026, 3, 20).unwrap();

        let expired = dir.join("fastmp3.2026-03-01.log");
        let yesterday = dir.join("fastmp3.2026-03-19.log");
        let current = dir.join("fastmp3.2026-03-20.log");
        let unrelated = dir.join("notes.txt");
        for path in [&expired, &yesterday, &current, &unrelated] {
            fs::write(path, b"hello log\n").unwrap();
        }

        cleanup_directory(dir, &config, today).unwrap();

        assert!(!expired.exists());
        assert!(!yesterday.exists());
        assert!(current.exists());
        assert!(unrelated.exists());

        let gz = dir.join("fastmp3.2026-03-19.log.gz");
        let mut text = String::new();
        GzDecoder::new(File::open(&gz).unwrap())
            .read_to_string(&mut text)
            .unwrap();
        assert_eq!(text, "hello log\n");
    }

    #[test]
    fn test_未配置目录() {
        assert!(cleanup_logs(&LoggingConfig::default()).is_ok());
    }
}
