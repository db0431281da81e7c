//! 导航状态机：面包屑路径 + 当前节点列表。
//! 当前列表总是从清单根部按路径重新推导，而不是缓存祖先引用。

use qbox_assets_domain::{AssetNode, Manifest};

pub struct Navigator {
    manifest: Manifest,
    path: Vec<String>,
}

/// 沿 path 自根向下走，每层按名字取第一个匹配；
/// 某段无法解析（不存在或目录缺 children）就停在最深可解析处。
/// 返回该处的节点列表与实际走到的深度。
fn resolve<'a>(root: &'a [AssetNode], path: &[String]) -> (&'a [AssetNode], usize) {
    let mut nodes = root;
    let mut depth = 0;
    for part in path {
        let next = nodes
            .iter()
            .find(|n| &n.name == part)
            .and_then(|n| n.children.as_deref());
        match next {
            Some(children) => {
                nodes = children;
                depth += 1;
            }
            None => break,
        }
    }
    (nodes, depth)
}

impl Navigator {
    pub fn new(manifest: Manifest) -> Self {
        Self {
            manifest,
            path: Vec::new(),
        }
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// 根到当前文件夹的名字序列，根部为空
    pub fn path(&self) -> &[String] {
        &self.path
    }

    /// 当前文件夹的节点列表（按路径重新推导）
    pub fn current_nodes(&self) -> &[AssetNode] {
        resolve(&self.manifest.root, &self.path).0
    }

    pub fn navigate_root(&mut self) {
        self.path.clear();
    }

    /// 进入当前列表中的同名目录；找不到时静默不动（过期渲染触发，不算错误）
    pub fn navigate_into(&mut self, folder_name: &str) -> bool {
        let found = self
            .current_nodes()
            .iter()
            .any(|n| n.name == folder_name && n.is_dir() && n.children.is_some());
        if found {
            self.path.push(folder_name.to_string());
        }
        found
    }

    /// 面包屑跳转：截断到 index+1 后重新走清单，
    /// 路径同步截断到实际可解析的深度
    pub fn navigate_to_breadcrumb(&mut self, index: usize) {
        self.path.truncate(index + 1);
        let depth = resolve(&self.manifest.root, &self.path).1;
        self.path.truncate(depth);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qbox_assets_domain::NodeKind;

    fn file(name: &str, path: &str) -> AssetNode {
        AssetNode {
            name: name.into(),
            path: path.into(),
            kind: NodeKind::File,
            size: None,
            children: None,
        }
    }

    fn dir(name: &str, children: Vec<AssetNode>) -> AssetNode {
        AssetNode {
            name: name.into(),
            path: name.into(),
            kind: NodeKind::Directory,
            size: None,
            children: Some(children),
        }
    }

    fn sample_manifest() -> Manifest {
        Manifest {
            root: vec![
                dir(
                    "pics",
                    vec![
                        dir("icons", vec![file("x.svg", "pics/icons/x.svg")]),
                        file("a.png", "pics/a.png"),
                    ],
                ),
                file("readme.txt", "readme.txt"),
            ],
            generated_at: 1.0,
        }
    }

    #[test]
    fn test_starts_at_root() {
        let nav = Navigator::new(sample_manifest());
        assert!(nav.path().is_empty());
        assert_eq!(nav.current_nodes().len(), 2);
    }

    #[test]
    fn test_navigate_into_directory() {
        let mut nav = Navigator::new(sample_manifest());
        assert!(nav.navigate_into("pics"));
        assert_eq!(nav.path(), ["pics"]);
        assert_eq!(nav.current_nodes().len(), 2);
        assert!(nav.navigate_into("icons"));
        assert_eq!(nav.current_nodes()[0].name, "x.svg");
    }

    #[test]
    fn test_navigate_into_unknown_is_noop() {
        let mut nav = Navigator::new(sample_manifest());
        assert!(!nav.navigate_into("missing"));
        assert!(nav.path().is_empty());
    }

    #[test]
    fn test_navigate_into_file_is_noop() {
        let mut nav = Navigator::new(sample_manifest());
        assert!(!nav.navigate_into("readme.txt"));
        assert!(nav.path().is_empty());
    }

    #[test]
    fn test_navigate_into_directory_without_children_is_noop() {
        let manifest = Manifest {
            root: vec![AssetNode {
                name: "empty".into(),
                path: "empty".into(),
                kind: NodeKind::Directory,
                size: None,
                children: None,
            }],
            generated_at: 0.0,
        };
        let mut nav = Navigator::new(manifest);
        assert!(!nav.navigate_into("empty"));
        assert!(nav.path().is_empty());
    }

    #[test]
    fn test_breadcrumb_round_trip_matches_root() {
        let mut nav = Navigator::new(sample_manifest());
        nav.navigate_into("pics");
        nav.navigate_into("icons");
        nav.navigate_to_breadcrumb(0);
        assert_eq!(nav.path(), ["pics"]);
        let from_breadcrumb: Vec<String> =
            nav.current_nodes().iter().map(|n| n.name.clone()).collect();

        let mut fresh = Navigator::new(sample_manifest());
        fresh.navigate_into("pics");
        let direct: Vec<String> =
            fresh.current_nodes().iter().map(|n| n.name.clone()).collect();
        assert_eq!(from_breadcrumb, direct);

        nav.navigate_root();
        assert!(nav.path().is_empty());
        assert_eq!(nav.current_nodes().len(), 2);
    }

    #[test]
    fn test_breadcrumb_stops_at_deepest_resolvable() {
        let mut nav = Navigator::new(sample_manifest());
        nav.navigate_into("pics");
        // 模拟清单重载后路径段失效
        nav.path = vec!["pics".into(), "gone".into(), "deeper".into()];
        nav.navigate_to_breadcrumb(2);
        assert_eq!(nav.path(), ["pics"]);
        assert_eq!(nav.current_nodes().len(), 2);
    }
}
