use dialoguer::{Confirm, Input, Select};
use std::io;
use std::path::Path;

use crate::action::cli::run_batch;
use crate::config::config::{Mode, Task, DEFAULT_TARGET_EXTENSION, DEFAULT_WORKERS, validate_exclude_patterns, validate_suffix};
use crate::config::ports::{AppConfig, ConfigPort};
use crate::service::config_service::{ConfigService, DefaultConfigAdapter};
use crate::utils::utils::setup_logging;

pub fn process_interactive_mode() -> io::Result<String> {
    setup_logging("info")?;
    println!("=== 歡迎使用互動模式 ===");
    let task = get_task()?;
    let use_default_config = get_default_config_option(task)?;

    let config_port: Box<dyn ConfigPort> = if use_default_config {
        println!(
            "使用預設配置：目錄 {}，後綴 {}，{} 個工作執行緒，比較循序與平行模式",
            task.default_input_dir(),
            task.default_suffix(),
            DEFAULT_WORKERS
        );
        Box::new(DefaultConfigAdapter::new(task))
    } else {
        Box::new(InteractiveConfigAdapter::new(task))
    };

    let config = ConfigService::new(config_port).get_config()?;
    println!("實際使用的配置：{:#?}", config);
    run_batch(&config)
}

pub fn get_task() -> io::Result<Task> {
    let selection = Select::new()
        .with_prompt("選擇工作類型（使用方向鍵選擇，按 Enter 確認）")
        .items(&["轉換 - 以 gdal_translate 轉成 GeoTIFF", "統計 - 以 gdalinfo 收集各波段最小/最大值"])
        .default(0)
        .interact()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("工作類型選擇失敗: {}", e)))?;
    Ok(if selection == 1 { Task::Stats } else { Task::Convert })
}

pub fn get_default_config_option(task: Task) -> io::Result<bool> {
    Confirm::new()
        .with_prompt(format!(
            "是否使用預設配置？（目錄 {}、後綴 {}、指令：{}）",
            task.default_input_dir(),
            task.default_suffix(),
            task.default_template()
        ))
        .default(true)
        .interact()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("預設配置選擇失敗: {}", e)))
}

pub fn get_input_dir(task: Task) -> io::Result<String> {
    Input::new()
        .with_prompt("請輸入影像目錄路徑")
        .default(task.default_input_dir().to_string())
        .validate_with(|input: &String| -> Result<(), String> {
            if Path::new(input).is_dir() { Ok(()) } else { Err(format!("目錄 '{}' 不存在", input)) }
        })
        .interact_text()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))
}

pub fn get_target_extension() -> io::Result<String> {
    Input::new()
        .with_prompt("輸入輸出副檔名（不含點）")
        .default(DEFAULT_TARGET_EXTENSION.to_string())
        .interact_text()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))
}

pub fn get_suffix(task: Task, target_extension: &str) -> io::Result<String> {
    Input::new()
        .with_prompt("輸入檔名後綴篩選條件")
        .default(task.default_suffix().to_string())
        .validate_with(|input: &String| -> Result<(), String> {
            validate_suffix(input, target_extension).map_err(|e| e.to_string())
        })
        .interact_text()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))
}

pub fn get_template(task: Task) -> io::Result<String> {
    Input::new()
        .with_prompt("輸入指令模板（以 {input} 與 {output} 代表路徑）")
        .default(task.default_template().to_string())
        .interact_text()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))
}

pub fn get_exclude() -> io::Result<Option<Vec<String>>> {
    let raw: String = Input::new()
        .with_prompt("輸入排除模式，以逗號分隔（支援 *，留空表示不排除）")
        .allow_empty(true)
        .validate_with(|input: &String| -> Result<(), String> {
            validate_exclude_patterns(&parse_exclude_input(input)).map_err(|e| e.to_string())
        })
        .interact_text()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;
    Ok(parse_exclude_input(&raw))
}

/// 將逗號分隔的輸入拆成排除模式，忽略空白項目
pub fn parse_exclude_input(raw: &str) -> Option<Vec<String>> {
    let patterns: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(String::from)
        .collect();
    if patterns.is_empty() { None } else { Some(patterns) }
}

pub fn get_mode() -> io::Result<Mode> {
    let selection = Select::new()
        .with_prompt("選擇執行模式（使用方向鍵選擇，按 Enter 確認）")
        .items(&["比較 - 先循序再平行，並比較耗時（預設）", "循序 - 逐一處理", "平行 - 以固定數量執行緒處理"])
        .default(0)
        .interact()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("執行模式選擇失敗: {}", e)))?;
    Ok(match selection {
        1 => Mode::Sequential,
        2 => Mode::Parallel,
        _ => Mode::Compare,
    })
}

pub fn get_workers() -> io::Result<usize> {
    Input::new()
        .with_prompt("輸入工作執行緒數量")
        .default(DEFAULT_WORKERS)
        .validate_with(|input: &usize| -> Result<(), String> {
            if *input >= 1 { Ok(()) } else { Err("工作執行緒數量至少為 1".to_string()) }
        })
        .interact_text()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))
}

pub fn get_timeout() -> io::Result<Option<u64>> {
    let secs: u64 = Input::new()
        .with_prompt("輸入單一檔案逾時秒數（0 表示不限制）")
        .default(0)
        .interact_text()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;
    Ok(if secs == 0 { None } else { Some(secs) })
}

// 互動式配置適配器
pub struct InteractiveConfigAdapter {
    task: Task,
}

impl InteractiveConfigAdapter {
    pub fn new(task: Task) -> Self {
        InteractiveConfigAdapter { task }
    }
}

impl ConfigPort for InteractiveConfigAdapter {
    fn get_config(&self) -> io::Result<AppConfig> {
        let input_dir = get_input_dir(self.task)?;
        let target_extension = get_target_extension()?;
        let suffix = get_suffix(self.task, &target_extension)?;
        let exclude = get_exclude()?;
        let template = get_template(self.task)?;
        let mode = get_mode()?;
        let workers = if mode == Mode::Sequential { DEFAULT_WORKERS } else { get_workers()? };
        let timeout_secs = get_timeout()?;

        Ok(AppConfig {
            input_dir,
            task: self.task,
            suffix,
            target_extension,
            template,
            mode,
            workers,
            timeout_secs,
            exclude,
            no_progress: false,
            fail_on_error: false,
        })
    }
}
