use std::collections::HashSet;

/// 扫描时跳过的名字，与生成器配置保持一致
#[derive(Debug, Clone)]
pub struct OmitRules {
    pub files: HashSet<String>,
    pub dirs: HashSet<String>,
}

impl Default for OmitRules {
    fn default() -> Self {
        let files = [
            "generate_index.py",
            "README.md",
            ".github",
            ".git",
            "index.html",
            "CNAME",
            "manifest.json",
            "site-src",
            "node_modules",
            "dist",
        ];
        let dirs = [".git", ".github", "site-src", "node_modules", "dist", "__pycache__"];
        Self {
            files: files.iter().map(|s| s.to_string()).collect(),
            dirs: dirs.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl OmitRules {
    /// 目录项（文件或目录）是否整体跳过
    pub fn skips(&self, name: &str) -> bool {
        self.files.contains(name) || self.dirs.contains(name)
    }
}
