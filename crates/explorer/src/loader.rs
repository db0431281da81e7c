//! 清单加载：启动时一次性读取固定路径的 JSON 文档。
//! 失败只记日志，不中断，会话停留在 Loading（不自动重试）。

use std::path::Path;

use qbox_assets_common::AssetError;
pub use qbox_assets_common::MANIFEST_FILE;
use qbox_assets_domain::Manifest;

pub fn parse_manifest(body: &str) -> Result<Manifest, AssetError> {
    serde_json::from_str(body).map_err(|e| AssetError::Manifest(e.to_string()))
}

pub fn load_manifest(path: &Path) -> Result<Manifest, AssetError> {
    let body = std::fs::read_to_string(path)?;
    parse_manifest(&body)
}
