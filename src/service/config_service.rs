use std::io;
use crate::config::config::{Mode, Task, DEFAULT_TARGET_EXTENSION, DEFAULT_WORKERS};
use crate::config::ports::{AppConfig, ConfigPort};

// 配置服務，負責從選定的配置適配器取得配置
pub struct ConfigService {
    config_port: Box<dyn ConfigPort>,
}

impl ConfigService {
    pub fn new(config_port: Box<dyn ConfigPort>) -> Self {
        ConfigService { config_port }
    }

    pub fn get_config(&self) -> io::Result<AppConfig> {
        self.config_port.get_config()
    }
}

// 預設配置適配器：固定目錄、後綴、模板與 4 個工作執行緒，並比較兩種模式
pub struct DefaultConfigAdapter {
    task: Task,
    input_dir: Option<String>,
}

impl DefaultConfigAdapter {
    pub fn new(task: Task) -> Self {
        DefaultConfigAdapter { task, input_dir: None }
    }

    pub fn with_input_dir(task: Task, input_dir: String) -> Self {
        DefaultConfigAdapter { task, input_dir: Some(input_dir) }
    }
}

impl ConfigPort for DefaultConfigAdapter {
    fn get_config(&self) -> io::Result<AppConfig> {
        Ok(AppConfig {
            input_dir: self.input_dir.clone().unwrap_or_else(|| self.task.default_input_dir().to_string()),
            task: self.task,
            suffix: self.task.default_suffix().to_string(),
            target_extension: DEFAULT_TARGET_EXTENSION.to_string(),
            template: self.task.default_template().to_string(),
            mode: Mode::Compare,
            workers: DEFAULT_WORKERS,
            timeout_secs: None,
            exclude: None,
            no_progress: false,
            fail_on_error: false,
        })
    }
}
