use std::io;
use std::path::PathBuf;
use std::time::Duration;
use crate::config::config::{Mode, Task};
use crate::models::batch::BatchInput;
use crate::models::template::CommandTemplate;

// 應用配置結構體，封裝一次批次執行的所有參數
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub input_dir: String,
    pub task: Task,
    pub suffix: String,
    pub target_extension: String,
    pub template: String,
    pub mode: Mode,
    pub workers: usize,
    pub timeout_secs: Option<u64>,
    pub exclude: Option<Vec<String>>,
    pub no_progress: bool,
    pub fail_on_error: bool,
}

impl AppConfig {
    /// 解析指令模板並展開執行模式，產生交給 facade 的批次輸入
    pub fn to_batch_input(&self) -> io::Result<BatchInput> {
        let template = CommandTemplate::new(&self.template, self.task)?;
        Ok(BatchInput {
            input_dir: PathBuf::from(&self.input_dir),
            task: self.task,
            suffix: self.suffix.clone(),
            target_extension: self.target_extension.trim_start_matches('.').to_string(),
            template,
            modes: self.mode.execution_modes(self.workers),
            timeout: self.timeout_secs.filter(|secs| *secs > 0).map(Duration::from_secs),
            exclude: self.exclude.clone().unwrap_or_default(),
            no_progress: self.no_progress,
        })
    }
}

// 配置來源的 Port
pub trait ConfigPort {
    fn get_config(&self) -> io::Result<AppConfig>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::batch::ExecutionMode;

    fn sample_config() -> AppConfig {
        AppConfig {
            input_dir: "naip".to_string(),
            task: Task::Convert,
            suffix: ".jp2".to_string(),
            target_extension: ".tif".to_string(),
            template: "gdal_translate {input} {output}".to_string(),
            mode: Mode::Compare,
            workers: 3,
            timeout_secs: Some(0),
            exclude: None,
            no_progress: true,
            fail_on_error: false,
        }
    }

    #[test]
    fn test_to_batch_input() {
        let input = sample_config().to_batch_input().unwrap();
        assert_eq!(input.target_extension, "tif");
        assert_eq!(input.modes, vec![ExecutionMode::Sequential, ExecutionMode::Parallel(3)]);
        // 0 秒視為不設逾時
        assert!(input.timeout.is_none());
        assert!(input.exclude.is_empty());
    }

    #[test]
    fn test_to_batch_input_rejects_bad_template() {
        let mut config = sample_config();
        config.template = "gdal_translate {input}".to_string();
        let err = config.to_batch_input().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }
}
