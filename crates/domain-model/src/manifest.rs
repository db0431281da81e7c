use serde::{Deserialize, Serialize};

use crate::AssetNode;

/// 静态目录树文档，由生成器一次性产出，UI 只读
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub root: Vec<AssetNode>,
    /// 生成时间，根目录 mtime 的秒数（浮点）
    #[serde(default)]
    pub generated_at: f64,
}
