use std::io;
use std::time::Duration;
use crate::models::batch::ItemOutcome;
use crate::models::work_item::WorkItem;

// File 服務接口，負責列舉工作項目
pub trait FileServiceTrait: Send + Sync {
    /// 列舉目錄下（不遞迴）符合後綴的檔案並推導輸出路徑
    /// # 參數
    /// - input_dir: 輸入目錄
    /// - suffix: 檔名後綴篩選條件
    /// - target_extension: 輸出副檔名（不含點）
    /// - exclude: 排除模式（支援 `*`）
    /// # 回傳
    /// - 成功時返回依檔名排序的工作項目，目錄無法讀取時返回 IO 錯誤
    fn collect_work_items(
        &self,
        input_dir: &std::path::Path,
        suffix: &str,
        target_extension: &str,
        exclude: &[String],
    ) -> io::Result<Vec<WorkItem>>;
}

// Command 服務接口，負責對單一工作項目呼叫外部工具
pub trait CommandServiceTrait: Send + Sync {
    /// 執行已替換好的指令列，結果一律包成 ItemOutcome，不會中斷批次
    /// # 參數
    /// - item: 工作項目
    /// - command_line: 已替換路徑的指令
    /// - timeout: 逾時上限，None 表示無限等待
    fn run(&self, item: &WorkItem, command_line: &str, timeout: Option<Duration>) -> ItemOutcome;
}
