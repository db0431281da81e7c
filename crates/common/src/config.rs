/// 清单文档的固定文件名
pub const MANIFEST_FILE: &str = "manifest.json";

/// 扫描配置
#[derive(Debug, Clone, Default)]
pub struct ScanConfig {
    pub max_depth: Option<usize>,
    /// 扫描完成后把 manifest.json 写回项目根目录
    pub write_manifest: bool,
}
