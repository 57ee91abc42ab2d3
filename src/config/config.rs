use clap::{Parser, ValueEnum};
use std::io;
use std::path::Path;
use crate::models::batch::ExecutionMode;
use crate::utils::utils::create_exclude_set;

pub const DEFAULT_WORKERS: usize = 4;
pub const DEFAULT_TARGET_EXTENSION: &str = "tif";
pub const DEFAULT_CONVERT_DIR: &str = "naip";
pub const DEFAULT_CONVERT_SUFFIX: &str = ".jp2";
pub const DEFAULT_CONVERT_TEMPLATE: &str = "gdal_translate -of GTiff -co COMPRESS=JPEG {input} {output}";
pub const DEFAULT_STATS_DIR: &str = "srtm";
pub const DEFAULT_STATS_SUFFIX: &str = ".hgt";
pub const DEFAULT_STATS_TEMPLATE: &str = "gdalinfo -stats -json {input}";

#[derive(Parser, Clone, Debug)]
#[command(
    name = "gdal_batch",
    about = "對目錄中的影像檔批次執行 GDAL 指令",
    long_about = "列出輸入目錄中符合後綴的影像檔，依指令模板為每個檔案呼叫外部 GDAL 工具，可循序或以固定數量的工作執行緒平行處理，並回報各模式的耗時。\n使用 `--task stats` 以 gdalinfo 收集各波段的最小值與最大值。\n使用 `--help` 查看詳細用法。",
    arg_required_else_help = true
)]
pub struct Cli {
    pub input_dir: String,
    #[arg(long, default_value = "convert")]
    pub task: Task,
    #[arg(long)]
    pub suffix: Option<String>,
    #[arg(long, default_value = DEFAULT_TARGET_EXTENSION)]
    pub target_ext: String,
    #[arg(long)]
    pub template: Option<String>,
    #[arg(long, default_value = "compare")]
    pub mode: Mode,
    #[arg(short, long, default_value_t = DEFAULT_WORKERS)]
    pub workers: usize,
    #[arg(long)]
    pub timeout: Option<u64>,
    #[arg(long, value_delimiter = ',')]
    pub exclude: Option<Vec<String>>,
    #[arg(long, default_value_t = false)]
    pub no_progress: bool,
    #[arg(long, default_value_t = false)]
    pub fail_on_error: bool,
    #[arg(long, default_value = "info", value_parser = ["debug", "info", "warn", "error"])]
    pub log_level: String,
    #[arg(long, default_value_t = false)]
    pub show_config: bool,
}

#[derive(Clone, Copy, ValueEnum, PartialEq, Debug)]
pub enum Mode {
    Sequential,
    Parallel,
    Compare,
}

impl Mode {
    /// 將 CLI 模式展開為實際要依序執行的批次模式
    pub fn execution_modes(&self, workers: usize) -> Vec<ExecutionMode> {
        match self {
            Mode::Sequential => vec![ExecutionMode::Sequential],
            Mode::Parallel => vec![ExecutionMode::Parallel(workers)],
            Mode::Compare => vec![ExecutionMode::Sequential, ExecutionMode::Parallel(workers)],
        }
    }
}

#[derive(Clone, Copy, ValueEnum, PartialEq, Debug)]
pub enum Task {
    Convert,
    Stats,
}

impl Task {
    pub fn default_input_dir(&self) -> &'static str {
        match self {
            Task::Convert => DEFAULT_CONVERT_DIR,
            Task::Stats => DEFAULT_STATS_DIR,
        }
    }

    pub fn default_suffix(&self) -> &'static str {
        match self {
            Task::Convert => DEFAULT_CONVERT_SUFFIX,
            Task::Stats => DEFAULT_STATS_SUFFIX,
        }
    }

    pub fn default_template(&self) -> &'static str {
        match self {
            Task::Convert => DEFAULT_CONVERT_TEMPLATE,
            Task::Stats => DEFAULT_STATS_TEMPLATE,
        }
    }
}

pub fn validate_input_dir(input: &str) -> io::Result<&Path> {
    let path = Path::new(input);
    if !path.exists() {
        log::error!("輸入目錄不存在：{}", input);
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("輸入目錄 '{}' 不存在", input)
        ));
    }
    if !path.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("輸入路徑 '{}' 不是目錄", input)
        ));
    }
    Ok(path)
}

pub fn is_valid_suffix(suffix: &str) -> bool {
    let invalid_chars = ['/', '\\', ':', '?', '"', '<', '>', '|', '*'];
    !suffix.is_empty() && !suffix.contains(&invalid_chars[..])
}

pub fn validate_suffix(suffix: &str, target_extension: &str) -> io::Result<()> {
    if !is_valid_suffix(suffix) {
        return Err(io::Error::new(io::ErrorKind::InvalidInput, format!("無效的後綴: {}", suffix)));
    }
    let target_extension = target_extension.trim_start_matches('.');
    if target_extension.is_empty() || !is_valid_suffix(target_extension) {
        return Err(io::Error::new(io::ErrorKind::InvalidInput, format!("無效的輸出副檔名: {}", target_extension)));
    }
    // 輸出檔名 `<stem>.<ext>` 不可能以後綴結尾，才不會落在其他項目的輸入上
    let dotted_extension = format!(".{}", target_extension);
    if dotted_extension.ends_with(suffix) || suffix.ends_with(&dotted_extension) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("後綴 '{}' 與輸出副檔名 '{}' 重疊，輸出可能覆寫輸入檔", suffix, target_extension)
        ));
    }
    Ok(())
}

pub fn validate_workers(workers: usize) -> io::Result<()> {
    if workers == 0 {
        return Err(io::Error::new(io::ErrorKind::InvalidInput, "工作執行緒數量至少為 1"));
    }
    Ok(())
}

pub fn validate_exclude_patterns(exclude: &Option<Vec<String>>) -> io::Result<()> {
    if let Some(exclude_patterns) = exclude {
        for pattern in exclude_patterns {
            if pattern.is_empty() || pattern.contains(&['/', '\\'][..]) {
                return Err(io::Error::new(io::ErrorKind::InvalidInput, format!("無效的排除模式: {}", pattern)));
            }
        }
        create_exclude_set(exclude_patterns)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_validate_input_dir_missing() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope");
        let err = validate_input_dir(missing.to_str().unwrap()).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_validate_input_dir_rejects_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("a.jp2");
        std::fs::write(&file_path, b"").unwrap();
        let err = validate_input_dir(file_path.to_str().unwrap()).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn test_validate_suffix() {
        assert!(validate_suffix(".jp2", "tif").is_ok());
        assert!(validate_suffix(".jp2", ".tif").is_ok());
        assert!(validate_suffix("", "tif").is_err());
        assert!(validate_suffix("a/b", "tif").is_err());
        assert!(validate_suffix(".jp2", "").is_err());
    }

    #[test]
    fn test_validate_suffix_rejects_self_overwrite() {
        let err = validate_suffix(".tif", "tif").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn test_validate_suffix_rejects_overlapping_extension() {
        // a.jp2 -> a.jp.jp2 會落在另一個輸入檔上
        assert!(validate_suffix("2", "jp2").is_err());
        assert!(validate_suffix("p2", "jp2").is_err());
        assert!(validate_suffix("a.tif", "tif").is_err());
        assert!(validate_suffix("_x.tif", ".tif").is_err());
        assert!(validate_suffix("jp2", "tif").is_ok());
        assert!(validate_suffix(".hgt", "tif").is_ok());
    }

    #[test]
    fn test_validate_workers() {
        assert!(validate_workers(0).is_err());
        assert!(validate_workers(1).is_ok());
    }

    #[test]
    fn test_execution_modes() {
        assert_eq!(Mode::Sequential.execution_modes(4), vec![ExecutionMode::Sequential]);
        assert_eq!(Mode::Parallel.execution_modes(2), vec![ExecutionMode::Parallel(2)]);
        assert_eq!(
            Mode::Compare.execution_modes(8),
            vec![ExecutionMode::Sequential, ExecutionMode::Parallel(8)]
        );
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["gdal_batch", "naip"]);
        assert_eq!(cli.task, Task::Convert);
        assert_eq!(cli.mode, Mode::Compare);
        assert_eq!(cli.workers, DEFAULT_WORKERS);
        assert_eq!(cli.target_ext, "tif");
        assert!(cli.suffix.is_none());
        assert!(!cli.fail_on_error);
    }

    #[test]
    fn test_cli_exclude_delimiter() {
        let cli = Cli::parse_from(["gdal_batch", "srtm", "--task", "stats", "--exclude", "N1*,S0*"]);
        assert_eq!(cli.task, Task::Stats);
        assert_eq!(cli.exclude, Some(vec!["N1*".to_string(), "S0*".to_string()]));
    }
}
