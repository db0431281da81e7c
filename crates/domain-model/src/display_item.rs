use serde::{Deserialize, Serialize};

use crate::{AssetNode, NodeKind};

/// 可直接预览的图片扩展名
const IMAGE_EXTENSIONS: [&str; 6] = ["jpg", "jpeg", "png", "gif", "webp", "svg"];

/// 网格渲染用的展示项：目录在前、文件去重后的最终序列中的一项
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DisplayItem {
    Directory {
        name: String,
        path: String,
        child_count: usize,
    },
    File {
        name: String,
        path: String,
        is_image: bool,
    },
}

impl DisplayItem {
    pub fn from_node(node: &AssetNode) -> Self {
        match node.kind {
            NodeKind::Directory => DisplayItem::Directory {
                name: node.name.clone(),
                path: node.path.clone(),
                child_count: node.child_count(),
            },
            NodeKind::File => DisplayItem::File {
                name: node.name.clone(),
                path: node.path.clone(),
                is_image: is_image_name(&node.name),
            },
        }
    }

    pub fn name(&self) -> &str {
        match self {
            DisplayItem::Directory { name, .. } => name,
            DisplayItem::File { name, .. } => name,
        }
    }

    pub fn path(&self) -> &str {
        match self {
            DisplayItem::Directory { path, .. } => path,
            DisplayItem::File { path, .. } => path,
        }
    }

    pub fn is_directory(&self) -> bool {
        matches!(self, DisplayItem::Directory { .. })
    }

    /// 下载/预览用的根相对 URL
    pub fn download_url(&self) -> String {
        format!("/{}", self.path())
    }
}

/// 文件名是否按图片处理（大小写不敏感）
pub fn is_image_name(name: &str) -> bool {
    match name.rsplit_once('.') {
        Some((_, ext)) => IMAGE_EXTENSIONS
            .iter()
            .any(|candidate| ext.eq_ignore_ascii_case(candidate)),
        None => false,
    }
}
