use std::io;
use std::path::Path;
use crate::config::config::Task;
use crate::models::work_item::WorkItem;

pub const INPUT_SLOT: &str = "{input}";
pub const OUTPUT_SLOT: &str = "{output}";

/// 外部指令模板，含 `{input}` 與 `{output}` 兩個替換點
#[derive(Debug, Clone, PartialEq)]
pub struct CommandTemplate {
    raw: String,
}

impl CommandTemplate {
    /// 建立模板並檢查替換點
    /// # 參數
    /// - raw: 模板字串
    /// - task: convert 需要兩個替換點各一次；stats 需要 `{input}` 一次，`{output}` 至多一次
    pub fn new(raw: &str, task: Task) -> io::Result<Self> {
        let input_count = raw.matches(INPUT_SLOT).count();
        let output_count = raw.matches(OUTPUT_SLOT).count();
        if input_count != 1 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("指令模板必須恰好包含一個 {}，目前為 {} 個：{}", INPUT_SLOT, input_count, raw)
            ));
        }
        let output_ok = match task {
            Task::Convert => output_count == 1,
            Task::Stats => output_count <= 1,
        };
        if !output_ok {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("指令模板中 {} 的數量不正確（{} 個）：{}", OUTPUT_SLOT, output_count, raw)
            ));
        }
        Ok(CommandTemplate { raw: raw.to_string() })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// 以工作項目的路徑替換模板，路徑會依平台的 shell 規則加上引號
    pub fn render(&self, item: &WorkItem) -> String {
        self.raw
            .replace(INPUT_SLOT, &shell_quote(&item.input_path))
            .replace(OUTPUT_SLOT, &shell_quote(&item.output_path))
    }
}

#[cfg(not(windows))]
pub fn shell_quote(path: &Path) -> String {
    let text = path.to_string_lossy();
    let is_plain = !text.is_empty()
        && text.chars().all(|c| c.is_ascii_alphanumeric() || "_-./+,=@%".contains(c));
    if is_plain {
        text.to_string()
    } else {
        format!("'{}'", text.replace('\'', "'\\''"))
    }
}

#[cfg(windows)]
pub fn shell_quote(path: &Path) -> String {
    let text = path.to_string_lossy();
    if text.contains(' ') || text.contains('&') || text.contains('^') {
        format!("\"{}\"", text)
    } else {
        text.to_string()
    }
}
