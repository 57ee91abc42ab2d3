use serde::Deserialize;

/// gdalinfo -json 輸出中用得到的部分
#[derive(Debug, Deserialize)]
pub struct GdalInfo {
    #[serde(default)]
    pub bands: Vec<GdalBand>,
}

#[derive(Debug, Deserialize)]
pub struct GdalBand {
    pub band: u32,
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
}

/// 單一檔案單一波段的統計列
#[derive(Debug, Clone, PartialEq)]
pub struct BandStats {
    pub name: String,
    pub band: u32,
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
}

impl BandStats {
    /// 輸出為 `name,band,min,max`，缺值留空
    pub fn to_csv_row(&self) -> String {
        let fmt_opt = |v: Option<f64>| v.map(|v| v.to_string()).unwrap_or_default();
        format!("{},{},{},{}", self.name, self.band, fmt_opt(self.minimum), fmt_opt(self.maximum))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_row() {
        let row = BandStats { name: "N28E086".to_string(), band: 1, minimum: Some(-12.0), maximum: Some(8848.5) };
        assert_eq!(row.to_csv_row(), "N28E086,1,-12,8848.5");
        let missing = BandStats { name: "N28E087".to_string(), band: 2, minimum: None, maximum: None };
        assert_eq!(missing.to_csv_row(), "N28E087,2,,");
    }
}
