//! 扫描选项

use serde::Deserialize;

/// 帧扫描与时长计算选项
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ScanOptions {
    /// 依据 LAME 标签去掉编码器延迟与末尾填充
    pub gapless: bool,
    /// 流参数中途改变时报错, 而不是在最后一个一致的帧处截止
    pub strict: bool,
    /// 首帧之前最多容忍的无法识别字节数 (标签之外), 超出视为找不到同步.
    /// `None` 表示扫描整个缓冲区.
    pub max_leading_garbage: Option<usize>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            gapless: true,
            strict: false,
            max_leading_garbage: None,
        }
    }
}

impl ScanOptions {
    /// 关闭无缝裁剪
    pub fn without_gapless(mut self) -> Self {
        self.gapless = false;
        self
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// 限制首帧之前可跳过的字节数
    pub fn with_max_leading_garbage(mut self, limit: usize) -> Self {
        self.max_leading_garbage = Some(limit);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_默认值() {
        let opts = ScanOptions::default();
        assert!(opts.gapless);
        assert!(!opts.strict);
        assert_eq!(opts.max_leading_garbage, None);
    }

    #[test]
    fn test_反序列化缺省字段() {
        let opts: ScanOptions = serde_json::from_str(r#"{"strict": true}"#).unwrap();
        assert!(opts.strict);
        assert!(opts.gapless);
        let opts: ScanOptions = serde_json::from_str(r#"{"gapless": false}"#).unwrap();
        assert_eq!(opts, ScanOptions::default().without_gapless());
        let opts: ScanOptions =
            serde_json::from_str(r#"{"max_leading_garbage": 4096}"#).unwrap();
        assert_eq!(opts, ScanOptions::default().with_max_leading_garbage(4096));
    }
}
