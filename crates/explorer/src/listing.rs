//! 列表变换：过滤 → 目录/文件分组 → 文件按基础名去重 → 排序 → 目录在前合并。
//! 只作用于当前文件夹的节点列表，每次按键/导航都重新计算。

use std::cmp::Ordering;
use std::collections::HashMap;

use qbox_assets_domain::{AssetNode, DisplayItem};

/// 去重优先级：webp > png > jpg > jpeg > 其他
fn dedup_priority(name: &str) -> u8 {
    let ext = name.rsplit_once('.').map(|(_, ext)| ext.to_ascii_lowercase());
    match ext.as_deref() {
        Some("webp") => 0,
        Some("png") => 1,
        Some("jpg") => 2,
        Some("jpeg") => 3,
        _ => 4,
    }
}

/// 文件名去掉最后一个扩展名后的部分；没有 `.` 时为整个名字
fn base_name(name: &str) -> &str {
    match name.rfind('.') {
        Some(idx) => &name[..idx],
        None => name,
    }
}

/// 近似 localeCompare：忽略大小写比较，原始名字兜底保证确定性
fn locale_cmp(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// `(节点列表, 查询串)` 的纯函数；相同输入必得相同输出
pub fn process_nodes(nodes: &[AssetNode], query: &str) -> Vec<DisplayItem> {
    // 1. 大小写不敏感的子串过滤，空查询放行所有节点
    let needle = query.to_lowercase();
    let filtered: Vec<&AssetNode> = nodes
        .iter()
        .filter(|n| needle.is_empty() || n.name.to_lowercase().contains(&needle))
        .collect();

    // 2. 目录与文件分离
    let directories: Vec<&AssetNode> = filtered.iter().copied().filter(|n| n.is_dir()).collect();
    let files: Vec<&AssetNode> = filtered.iter().copied().filter(|n| !n.is_dir()).collect();

    // 3. 同一逻辑资源的多种编码折叠为一个代表；分组按首次出现顺序
    let mut groups: Vec<Vec<&AssetNode>> = Vec::new();
    let mut group_index: HashMap<&str, usize> = HashMap::new();
    for file in files {
        let base = base_name(&file.name);
        match group_index.get(base) {
            Some(&idx) => groups[idx].push(file),
            None => {
                group_index.insert(base, groups.len());
                groups.push(vec![file]);
            }
        }
    }

    let mut unique_files: Vec<&AssetNode> = Vec::with_capacity(groups.len());
    for group in &groups {
        let mut best = group[0];
        let mut best_priority = dedup_priority(&best.name);
        for &candidate in &group[1..] {
            let priority = dedup_priority(&candidate.name);
            // 严格小于：同优先级保持原始相对顺序
            if priority < best_priority {
                best = candidate;
                best_priority = priority;
            }
        }
        unique_files.push(best);
    }

    // 4. 去重后的文件重新按名字排序，目录保持清单顺序
    unique_files.sort_by(|a, b| locale_cmp(&a.name, &b.name));

    // 5. 目录在前
    directories
        .into_iter()
        .chain(unique_files)
        .map(DisplayItem::from_node)
        .collect()
}
