use std::io;
use std::time::Instant;
use chrono::Local;
use log::{error, info, warn};
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use crate::config::config::Task;
use crate::facade::traits::i_batch::BatchFacadeTrait;
use crate::models::batch::{BatchInput, BatchOutput, BatchReport, ExecutionMode, ItemOutcome};
use crate::models::work_item::WorkItem;
use crate::service::command::CommandService;
use crate::service::file::FileService;
use crate::service::stats::collect_band_stats;
use crate::service::traits::i_service::{CommandServiceTrait, FileServiceTrait};
use crate::utils::utils::{create_progress_bar, ProgressManager};

pub struct BatchFacade {
    file_service: Box<dyn FileServiceTrait>,
    command_service: Box<dyn CommandServiceTrait>,
}

impl BatchFacade {
    pub fn new(
        file_service: Box<dyn FileServiceTrait>,
        command_service: Box<dyn CommandServiceTrait>,
    ) -> Self {
        BatchFacade {
            file_service,
            command_service,
        }
    }
}

impl Default for BatchFacade {
    fn default() -> Self {
        BatchFacade::new(Box::new(FileService::new()), Box::new(CommandService::new()))
    }
}

impl BatchFacadeTrait for BatchFacade {
    fn execute_batch(&self, input: BatchInput) -> io::Result<BatchOutput> {
        // 目錄錯誤在此直接返回，不會啟動任何外部指令
        let items = self.file_service.collect_work_items(
            &input.input_dir,
            &input.suffix,
            &input.target_extension,
            &input.exclude,
        )?;
        info!(
            "在 {} 找到 {} 個以 '{}' 結尾的檔案",
            input.input_dir.display(),
            items.len(),
            input.suffix
        );
        if items.is_empty() {
            warn!("無符合條件的檔案可處理");
        }

        let mut reports = Vec::with_capacity(input.modes.len());
        for mode in &input.modes {
            reports.push(self.run_mode(*mode, &items, &input)?);
        }

        let band_stats = match (input.task, reports.last()) {
            (Task::Stats, Some(report)) => collect_band_stats(report),
            _ => Vec::new(),
        };

        Ok(BatchOutput {
            input_dir: input.input_dir.clone(),
            reports,
            band_stats,
        })
    }
}

impl BatchFacade {
    fn run_mode(&self, mode: ExecutionMode, items: &[WorkItem], input: &BatchInput) -> io::Result<BatchReport> {
        info!("開始{}模式，共 {} 個檔案", mode, items.len());
        let started_at = Local::now();
        let pm = create_progress_bar(items.len() as u64, input.no_progress);

        let start = Instant::now();
        let outcomes: Vec<ItemOutcome> = match mode {
            ExecutionMode::Sequential => items
                .iter()
                .map(|item| self.run_item(item, input, &pm))
                .collect(),
            ExecutionMode::Parallel(workers) => {
                let pool = ThreadPoolBuilder::new()
                    .num_threads(workers)
                    .build()
                    .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("建立執行緒池失敗: {}", e)))?;
                pool.install(|| {
                    items
                        .par_iter()
                        .map(|item| self.run_item(item, input, &pm))
                        .collect()
                })
            }
        };
        let elapsed = start.elapsed();
        pm.finish(&format!("{}模式處理完成", mode));

        let report = BatchReport {
            mode,
            started_at,
            elapsed,
            outcomes,
        };
        for outcome in report.outcomes.iter().filter(|o| !o.status.is_success()) {
            error!("處理檔案 {} 失敗: {}", outcome.item.input_path.display(), outcome.status);
        }
        info!("{}", report.summary());
        Ok(report)
    }

    fn run_item(&self, item: &WorkItem, input: &BatchInput, pm: &ProgressManager) -> ItemOutcome {
        let command_line = input.template.render(item);
        let outcome = self.command_service.run(item, &command_line, input.timeout);
        pm.inc("處理");
        outcome
    }
}
