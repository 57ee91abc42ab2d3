use std::io;
use clap::Parser;
use crate::action::interactive::process_interactive_mode;
use crate::config::config::{Cli, Task, validate_exclude_patterns, validate_input_dir, validate_suffix, validate_workers};
use crate::config::ports::{AppConfig, ConfigPort};
use crate::facade::batch_facade::BatchFacade;
use crate::facade::traits::i_batch::BatchFacadeTrait;
use crate::models::batch::BatchOutput;
use crate::service::config_service::ConfigService;
use crate::utils::utils::setup_logging;

pub fn process_args(args: Vec<String>) -> io::Result<String> {
    if args.len() == 1 {
        process_interactive_mode()
    } else {
        process_cli_mode()
    }
}

pub fn process_cli_mode() -> io::Result<String> {
    let cli = Cli::parse();
    setup_logging(&cli.log_level)?;

    let config_service = ConfigService::new(Box::new(CliConfigAdapter::new(cli.clone())));
    let config = config_service.get_config()?;

    if cli.show_config {
        println!("實際使用的配置：{:#?}", config);
    }

    run_batch(&config)
}

/// 以配置執行批次，輸出各模式摘要；啟用 fail_on_error 時若有任何項目未成功則返回錯誤
pub fn run_batch(config: &AppConfig) -> io::Result<String> {
    let facade: Box<dyn BatchFacadeTrait> = Box::new(BatchFacade::default());
    let output = facade.execute_batch(config.to_batch_input()?)?;
    print_output(config.task, &output);

    if config.fail_on_error && !output.all_succeeded() {
        let failed: usize = output.reports.iter().map(|r| r.total() - r.succeeded()).sum();
        return Err(io::Error::new(
            io::ErrorKind::Other,
            format!("共有 {} 個項目未成功完成", failed)
        ));
    }

    Ok(config.input_dir.clone())
}

fn print_output(task: Task, output: &BatchOutput) {
    for report in &output.reports {
        println!("{}", report.summary());
    }

    if let [sequential, parallel] = output.reports.as_slice() {
        let parallel_secs = parallel.elapsed.as_secs_f64();
        if parallel_secs > 0.0 {
            println!("平行模式相對循序模式加速 {:.2} 倍", sequential.elapsed.as_secs_f64() / parallel_secs);
        }
    }

    if task == Task::Stats {
        for row in &output.band_stats {
            println!("{}", row.to_csv_row());
        }
    }
}

// CLI 配置適配器
pub struct CliConfigAdapter {
    cli: Cli,
}

impl CliConfigAdapter {
    pub fn new(cli: Cli) -> Self {
        CliConfigAdapter { cli }
    }
}

impl ConfigPort for CliConfigAdapter {
    fn get_config(&self) -> io::Result<AppConfig> {
        validate_input_dir(&self.cli.input_dir)?;
        let task = self.cli.task;
        let suffix = self.cli.suffix.clone().unwrap_or_else(|| task.default_suffix().to_string());
        validate_suffix(&suffix, &self.cli.target_ext)?;
        validate_workers(self.cli.workers)?;
        validate_exclude_patterns(&self.cli.exclude)?;

        Ok(AppConfig {
            input_dir: self.cli.input_dir.clone(),
            task,
            suffix,
            target_extension: self.cli.target_ext.clone(),
            template: self.cli.template.clone().unwrap_or_else(|| task.default_template().to_string()),
            mode: self.cli.mode,
            workers: self.cli.workers,
            timeout_secs: self.cli.timeout,
            exclude: self.cli.exclude.clone(),
            no_progress: self.cli.no_progress,
            fail_on_error: self.cli.fail_on_error,
        })
    }
}
