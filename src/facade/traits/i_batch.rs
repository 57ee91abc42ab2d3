use std::io;
use crate::models::batch::{BatchInput, BatchOutput};

// Facade 接口，負責協調列舉、派送與彙總流程
pub trait BatchFacadeTrait: Send + Sync {
    /// 依輸入配置列舉工作項目，並以每個執行模式各跑一次
    /// # 參數
    /// - input: 批次執行所需的輸入參數
    /// # 回傳
    /// - 成功時返回各模式的報告；目錄無法讀取或執行緒池建立失敗時返回 IO 錯誤
    fn execute_batch(&self, input: BatchInput) -> io::Result<BatchOutput>;
}
