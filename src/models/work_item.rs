use std::path::{Path, PathBuf};

/// 單一轉換工作：輸入檔與其推導出的輸出檔（同目錄、同主檔名、固定副檔名）
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WorkItem {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub stem: String,
}

impl WorkItem {
    /// 檔名不以後綴結尾或非 UTF-8 時回傳 None
    pub fn from_path(input_path: &Path, suffix: &str, target_extension: &str) -> Option<Self> {
        let file_name = input_path.file_name()?.to_str()?;
        let stem = file_name.strip_suffix(suffix)?;
        let output_name = format!("{}.{}", stem, target_extension);
        Some(WorkItem {
            input_path: input_path.to_path_buf(),
            output_path: input_path.with_file_name(output_name),
            stem: stem.to_string(),
        })
    }

    pub fn file_name(&self) -> String {
        self.input_path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path_strips_suffix() {
        let item = WorkItem::from_path(Path::new("naip/m_3807537_ne.jp2"), ".jp2", "tif").unwrap();
        assert_eq!(item.output_path, Path::new("naip/m_3807537_ne.tif"));
        assert_eq!(item.stem, "m_3807537_ne");
        assert_eq!(item.file_name(), "m_3807537_ne.jp2");
    }

    #[test]
    fn test_from_path_only_strips_trailing_suffix() {
        let item = WorkItem::from_path(Path::new("tiles/a.jp2.jp2"), ".jp2", "tif").unwrap();
        assert_eq!(item.output_path, Path::new("tiles/a.jp2.tif"));
    }

    #[test]
    fn test_from_path_rejects_non_matching() {
        assert!(WorkItem::from_path(Path::new("naip/c.txt"), ".jp2", "tif").is_none());
        // 後綴比對區分大小寫
        assert!(WorkItem::from_path(Path::new("naip/d.JP2"), ".jp2", "tif").is_none());
    }
}
