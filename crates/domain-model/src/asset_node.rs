use serde::{Deserialize, Serialize};

/// 资源树节点，对应 manifest.json 中的一项
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetNode {
    pub name: String,
    /// 相对仓库根的路径，分隔符固定为 `/`，全树唯一
    pub path: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    /// 仅目录节点存在；目录缺少 children 时按空目录处理
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<AssetNode>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    File,
    Directory,
}

impl AssetNode {
    pub fn is_dir(&self) -> bool {
        self.kind == NodeKind::Directory
    }

    /// 目录的子节点；文件或缺失 children 的目录返回空切片
    pub fn child_nodes(&self) -> &[AssetNode] {
        match &self.children {
            Some(children) => children,
            None => &[],
        }
    }

    pub fn child_count(&self) -> usize {
        self.child_nodes().len()
    }
}
