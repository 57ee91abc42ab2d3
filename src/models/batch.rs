use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use chrono::{DateTime, Local};
use crate::config::config::Task;
use crate::models::stats::BandStats;
use crate::models::template::CommandTemplate;
use crate::models::work_item::WorkItem;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExecutionMode {
    Sequential,
    Parallel(usize),
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionMode::Sequential => write!(f, "循序"),
            ExecutionMode::Parallel(workers) => write!(f, "平行（{} 執行緒）", workers),
        }
    }
}

#[derive(Clone, Debug)]
pub struct BatchInput {
    pub input_dir: PathBuf,
    pub task: Task,
    pub suffix: String,
    pub target_extension: String,
    pub template: CommandTemplate,
    pub modes: Vec<ExecutionMode>,
    pub timeout: Option<Duration>,
    pub exclude: Vec<String>,
    pub no_progress: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ItemStatus {
    Succeeded,
    Failed { code: Option<i32>, stderr: String },
    TimedOut,
    SpawnFailed(String),
}

impl ItemStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, ItemStatus::Succeeded)
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemStatus::Succeeded => write!(f, "成功"),
            ItemStatus::Failed { code: Some(code), stderr } => write!(f, "結束代碼 {}：{}", code, stderr.trim()),
            ItemStatus::Failed { code: None, stderr } => write!(f, "被訊號終止：{}", stderr.trim()),
            ItemStatus::TimedOut => write!(f, "逾時，已終止"),
            ItemStatus::SpawnFailed(msg) => write!(f, "無法啟動：{}", msg),
        }
    }
}

/// 單一工作項目的執行結果
#[derive(Clone, Debug)]
pub struct ItemOutcome {
    pub item: WorkItem,
    pub status: ItemStatus,
    pub stdout: String,
    pub elapsed: Duration,
}

/// 一種執行模式跑完整批工作後的彙總
#[derive(Clone, Debug)]
pub struct BatchReport {
    pub mode: ExecutionMode,
    pub started_at: DateTime<Local>,
    pub elapsed: Duration,
    pub outcomes: Vec<ItemOutcome>,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.status.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, ItemStatus::Failed { .. } | ItemStatus::SpawnFailed(_)))
            .count()
    }

    pub fn timed_out(&self) -> usize {
        self.outcomes.iter().filter(|o| o.status == ItemStatus::TimedOut).count()
    }

    pub fn failed_paths(&self) -> Vec<&PathBuf> {
        self.outcomes
            .iter()
            .filter(|o| !o.status.is_success())
            .map(|o| &o.item.input_path)
            .collect()
    }

    pub fn summary(&self) -> String {
        format!(
            "{}模式（開始於 {}）：共 {} 個檔案，成功 {}，失敗 {}，逾時 {}，耗時 {:.2} 秒",
            self.mode,
            self.started_at.format("%Y-%m-%d %H:%M:%S"),
            self.total(),
            self.succeeded(),
            self.failed(),
            self.timed_out(),
            self.elapsed.as_secs_f64()
        )
    }
}

#[derive(Debug)]
pub struct BatchOutput {
    pub input_dir: PathBuf,
    pub reports: Vec<BatchReport>,
    pub band_stats: Vec<BandStats>,
}

impl BatchOutput {
    pub fn all_succeeded(&self) -> bool {
        self.reports.iter().all(|r| r.succeeded() == r.total())
    }
}
