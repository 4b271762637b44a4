use crate::domain::model::{default_report_filename, Roster};
use crate::utils::error::Result;

/// 名單來源（JSON 檔案或其他格式）
pub trait RosterSource {
    fn load_roster(&self) -> Result<Roster>;
}

pub trait Storage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;
    fn write_file(&self, path: &str, data: &[u8]) -> Result<String>;
}

pub trait ConfigProvider {
    fn roster_path(&self) -> &str;
    fn output_path(&self) -> &str;
    fn output_formats(&self) -> &[String];
    fn seed(&self) -> Option<u64>;
    fn monitoring_enabled(&self) -> bool;

    fn filename_for(&self, format: &str) -> String {
        default_report_filename(format).to_string()
    }
}

/// 可注入的亂數來源；測試可提供固定序列
pub trait RandomSource {
    /// 在 [low, high] 區間均勻抽取整數
    fn next_score(&mut self, low: u32, high: u32) -> u32;

    /// 公平硬幣
    fn next_bool(&mut self) -> bool;
}
