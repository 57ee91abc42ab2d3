use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::Path;
use log::{debug, warn};
use crate::models::work_item::WorkItem;
use crate::service::traits::i_service::FileServiceTrait;
use crate::utils::utils::create_exclude_set;

/// File 服務，實現 FileServiceTrait
pub struct FileService;

impl FileService {
    pub fn new() -> Self {
        FileService
    }
}

impl Default for FileService {
    fn default() -> Self {
        Self::new()
    }
}

impl FileServiceTrait for FileService {
    fn collect_work_items(
        &self,
        input_dir: &Path,
        suffix: &str,
        target_extension: &str,
        exclude: &[String],
    ) -> io::Result<Vec<WorkItem>> {
        let exclude_set = create_exclude_set(exclude)?;
        let mut items = Vec::new();

        for entry in fs::read_dir(input_dir)? {
            let entry = entry?;
            let path = entry.path();
            let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
                warn!("檔名非 UTF-8，跳過：{}", path.display());
                continue;
            };
            if !file_name.ends_with(suffix) {
                continue;
            }
            if !path.is_file() {
                debug!("{} 不是一般檔案，跳過", path.display());
                continue;
            }
            if exclude_set.is_match(file_name) {
                debug!("{} 符合排除模式，跳過", path.display());
                continue;
            }
            if let Some(item) = WorkItem::from_path(&path, suffix, target_extension) {
                items.push(item);
            }
        }

        items.sort_by(|a, b| a.input_path.cmp(&b.input_path));
        ensure_no_collisions(&items)?;
        Ok(items)
    }
}

/// 輸出路徑不可與任何輸入路徑或其他輸出路徑相同
fn ensure_no_collisions(items: &[WorkItem]) -> io::Result<()> {
    let inputs: HashSet<_> = items.iter().map(|i| &i.input_path).collect();
    let mut outputs = HashSet::with_capacity(items.len());
    for item in items {
        if inputs.contains(&item.output_path) || !outputs.insert(&item.output_path) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "{} 的輸出 {} 與其他工作項目衝突",
                    item.input_path.display(),
                    item.output_path.display()
                )
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::tempdir;

    fn touch(dir: &Path, name: &str) {
        File::create(dir.join(name)).unwrap();
    }

    #[test]
    fn test_collect_scenario() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "a.jp2");
        touch(dir.path(), "b.jp2");
        touch(dir.path(), "c.txt");

        let items = FileService::new()
            .collect_work_items(dir.path(), ".jp2", "tif", &[])
            .unwrap();

        let pairs: Vec<(String, String)> = items
            .iter()
            .map(|i| {
                (
                    i.input_path.file_name().unwrap().to_string_lossy().to_string(),
                    i.output_path.file_name().unwrap().to_string_lossy().to_string(),
                )
            })
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("a.jp2".to_string(), "a.tif".to_string()),
                ("b.jp2".to_string(), "b.tif".to_string()),
            ]
        );
        for item in &items {
            assert_eq!(item.output_path.parent(), Some(dir.path()));
        }
    }

    #[test]
    fn test_collect_is_not_recursive() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "top.jp2");
        fs::create_dir(dir.path().join("nested")).unwrap();
        touch(&dir.path().join("nested"), "deep.jp2");
        // 名稱符合後綴的目錄不算工作項目
        fs::create_dir(dir.path().join("folder.jp2")).unwrap();

        let items = FileService::new()
            .collect_work_items(dir.path(), ".jp2", "tif", &[])
            .unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].stem, "top");
    }

    #[test]
    fn test_collect_outputs_are_unique() {
        let dir = tempdir().unwrap();
        let names = ["x.jp2", "x.jp2.jp2", "y.jp2", "z_1.jp2", ".jp2", "x.tif"];
        for name in names {
            touch(dir.path(), name);
        }

        let items = FileService::new()
            .collect_work_items(dir.path(), ".jp2", "tif", &[])
            .unwrap();
        assert_eq!(items.len(), 5);

        let outputs: HashSet<_> = items.iter().map(|i| i.output_path.clone()).collect();
        let inputs: HashSet<_> = items.iter().map(|i| i.input_path.clone()).collect();
        assert_eq!(outputs.len(), items.len());
        assert_eq!(inputs.len(), items.len());
        assert!(outputs.is_disjoint(&inputs));
    }

    #[test]
    fn test_collect_rejects_output_landing_on_input() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "a.jp2");
        touch(dir.path(), "a.jp.jp2");

        // 後綴 "2" 加上副檔名 "jp2"：a.jp2 -> a.jp.jp2，正好是另一個輸入檔
        let err = FileService::new()
            .collect_work_items(dir.path(), "2", "jp2", &[])
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 2);
    }

    #[test]
    fn test_collect_applies_exclude() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "m_3807537_ne.jp2");
        touch(dir.path(), "m_3807537_nw.jp2");
        touch(dir.path(), "preview.jp2");

        let items = FileService::new()
            .collect_work_items(dir.path(), ".jp2", "tif", &["preview*".to_string()])
            .unwrap();
        let stems: Vec<_> = items.iter().map(|i| i.stem.as_str()).collect();
        assert_eq!(stems, vec!["m_3807537_ne", "m_3807537_nw"]);
    }

    #[test]
    fn test_collect_missing_dir_errors() {
        let dir = tempdir().unwrap();
        let err = FileService::new()
            .collect_work_items(&dir.path().join("missing"), ".jp2", "tif", &[])
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_collect_empty_dir() {
        let dir = tempdir().unwrap();
        let items = FileService::new()
            .collect_work_items(dir.path(), ".jp2", "tif", &[])
            .unwrap();
        assert!(items.is_empty());
    }
}
