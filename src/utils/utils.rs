use std::io;
use std::time::Instant;
use indicatif::{ProgressBar, ProgressStyle};
use regex::RegexSet;

pub fn setup_logging(log_level: &str) -> io::Result<()> {
    let log_level_filter = match log_level {
        "debug" => log::LevelFilter::Debug,
        "info" => log::LevelFilter::Info,
        "warn" => log::LevelFilter::Warn,
        "error" => log::LevelFilter::Error,
        _ => log::LevelFilter::Info,
    };
    env_logger::Builder::new()
        .filter_level(log_level_filter)
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("日誌初始化失敗: {}", e)))?;
    Ok(())
}

/// 進度條封裝，平行模式下由多個執行緒共用
pub struct ProgressManager {
    pb: ProgressBar,
    no_progress: bool,
    start: Instant,
}

impl ProgressManager {
    pub fn new(total: u64, no_progress: bool) -> Self {
        let pb = if no_progress {
            ProgressBar::hidden()
        } else {
            let pb = ProgressBar::new(total);
            let style = ProgressStyle::default_bar()
                .template("{msg} [{bar:40}] {pos}/{len} ETA: {eta_precise}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("##-");
            pb.set_style(style);
            pb
        };
        ProgressManager {
            pb,
            no_progress,
            start: Instant::now(),
        }
    }

    pub fn inc(&self, action: &str) {
        if self.no_progress {
            return;
        }
        self.pb.inc(1);
        let count = self.pb.position();
        let elapsed = self.start.elapsed().as_secs_f64();
        let speed = if elapsed > 0.0 { count as f64 / elapsed } else { 0.0 };
        self.pb.set_message(format!("{}：{} 檔案，速度：{:.2} 檔案/秒", action, count, speed));
    }

    pub fn finish(&self, message: &str) {
        if self.no_progress {
            return;
        }
        self.pb.finish_with_message(message.to_string());
    }
}

pub fn create_progress_bar(total: u64, no_progress: bool) -> ProgressManager {
    ProgressManager::new(total, no_progress)
}

/// 將 `*` 萬用字元模式轉為比對完整檔名的 RegexSet
pub fn create_exclude_set(exclude: &[String]) -> io::Result<RegexSet> {
    let exclude_patterns: Vec<_> = exclude.iter()
        .map(|p| format!("^{}$", regex::escape(p).replace("\\*", ".*")))
        .collect();

    RegexSet::new(&exclude_patterns)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, format!("無效的排除模式: {}", e)))
}
