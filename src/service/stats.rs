use std::io;
use log::{error, info};
use crate::models::batch::BatchReport;
use crate::models::stats::{BandStats, GdalInfo};

/// 解析 gdalinfo -stats -json 的輸出
pub fn parse_band_stats(name: &str, json: &str) -> io::Result<Vec<BandStats>> {
    let info: GdalInfo = serde_json::from_str(json)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, format!("gdalinfo JSON 解析失敗: {}", e)))?;
    Ok(info
        .bands
        .into_iter()
        .map(|band| BandStats {
            name: name.to_string(),
            band: band.band,
            minimum: band.minimum,
            maximum: band.maximum,
        })
        .collect())
}

/// 從成功的項目收集波段統計，解析失敗的檔案記錄錯誤後略過
pub fn collect_band_stats(report: &BatchReport) -> Vec<BandStats> {
    let mut rows = Vec::new();
    for outcome in report.outcomes.iter().filter(|o| o.status.is_success()) {
        match parse_band_stats(&outcome.item.stem, &outcome.stdout) {
            Ok(stats) => rows.extend(stats),
            Err(e) => error!("檔案 {} 的統計資料無法解析: {}", outcome.item.input_path.display(), e),
        }
    }
    info!("共收集 {} 筆波段統計", rows.len());
    rows
}
