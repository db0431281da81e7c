use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::UNIX_EPOCH;

use qbox_assets_common::{AssetError, ScanConfig};
use qbox_assets_domain::{AssetNode, Manifest, NodeKind};
use rayon::prelude::*;

use crate::OmitRules;

type ProgressCb = Box<dyn Fn(u64, &str) + Send + Sync>;

/// 相对根目录的路径，分隔符统一为 `/`
fn relative_slash_path(path: &Path, root: &Path) -> Result<String, AssetError> {
    let relative = path
        .strip_prefix(root)
        .map_err(|_| AssetError::InvalidPath(format!("not under root: {}", path.display())))?;
    let parts: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().to_string())
        .collect();
    Ok(parts.join("/"))
}

fn scan_dir(
    dir: &Path,
    root: &Path,
    rules: &OmitRules,
    depth: usize,
    max_depth: Option<usize>,
    counter: &AtomicU64,
    progress: Option<&ProgressCb>,
) -> Result<Vec<AssetNode>, AssetError> {
    if let Some(max) = max_depth {
        if depth >= max {
            return Ok(Vec::new());
        }
    }

    let mut entries: Vec<_> = std::fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .filter(|e| !rules.skips(&e.file_name().to_string_lossy()))
        .collect();

    // 目录在前，其余按名字（忽略大小写）排序，与生成器输出一致
    entries.sort_by_key(|e| {
        let is_dir = e.path().is_dir();
        (!is_dir, e.file_name().to_string_lossy().to_lowercase())
    });

    // 并行处理子项
    let results: Vec<Result<Option<AssetNode>, AssetError>> = entries
        .par_iter()
        .map(|entry| {
            let child_path = entry.path();
            let name = entry.file_name().to_string_lossy().to_string();
            let relative = relative_slash_path(&child_path, root)?;

            if child_path.is_dir() {
                match scan_dir(&child_path, root, rules, depth + 1, max_depth, counter, progress) {
                    Ok(children) => Ok(Some(AssetNode {
                        name,
                        path: relative,
                        kind: NodeKind::Directory,
                        size: None,
                        children: Some(children),
                    })),
                    Err(e) => {
                        // 不可读的子目录只告警并跳过，扫描继续
                        log::warn!("skipping unreadable directory {}: {}", child_path.display(), e);
                        Ok(None)
                    }
                }
            } else {
                // 元数据读不到（典型：悬空符号链接）同样告警并跳过
                let metadata = match std::fs::metadata(&child_path) {
                    Ok(m) => m,
                    Err(e) => {
                        log::warn!("skipping unreadable file {}: {}", child_path.display(), e);
                        return Ok(None);
                    }
                };
                let total = counter.fetch_add(1, Ordering::Relaxed) + 1;
                if let Some(cb) = progress {
                    cb(total, &relative);
                }
                Ok(Some(AssetNode {
                    name,
                    path: relative,
                    kind: NodeKind::File,
                    size: Some(metadata.len()),
                    children: None,
                }))
            }
        })
        .collect();

    let mut nodes = Vec::with_capacity(results.len());
    for r in results {
        if let Some(node) = r? {
            nodes.push(node);
        }
    }
    Ok(nodes)
}

/// 扫描项目根目录，生成 manifest（支持进度回调）
pub fn scan_root_with_progress(
    root: &Path,
    rules: &OmitRules,
    config: &ScanConfig,
    progress: Option<ProgressCb>,
) -> Result<Manifest, AssetError> {
    if !root.is_dir() {
        return Err(AssetError::InvalidPath(format!(
            "root is not a directory: {}",
            root.display()
        )));
    }
    let root = std::fs::canonicalize(root)?;

    let counter = AtomicU64::new(0);
    let tree = scan_dir(
        &root,
        &root,
        rules,
        0,
        config.max_depth,
        &counter,
        progress.as_ref(),
    )?;

    let generated_at = std::fs::metadata(&root)
        .ok()
        .and_then(|m| m.modified().ok())
        .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0);

    Ok(Manifest {
        root: tree,
        generated_at,
    })
}

/// 扫描项目根目录（默认规则、无进度）
pub fn scan_root(root: &Path) -> Result<Manifest, AssetError> {
    scan_root_with_progress(root, &OmitRules::default(), &ScanConfig::default(), None)
}

/// 把 manifest 以带缩进的 JSON 落盘
pub fn write_manifest(manifest: &Manifest, output: &Path) -> Result<(), AssetError> {
    let body = serde_json::to_string_pretty(manifest)
        .map_err(|e| AssetError::Manifest(e.to_string()))?;
    std::fs::write(output, body)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use std::io::Write;

    fn create_test_root() -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().expect("create temp dir");
        let root = dir.path().to_path_buf();
        let branding = root.join("branding");
        fs::create_dir_all(&branding).unwrap();
        File::create(branding.join("logo.png")).unwrap().write_all(b"png").unwrap();
        File::create(branding.join("logo.webp")).unwrap().write_all(b"webp!").unwrap();
        File::create(root.join("readme.txt")).unwrap().write_all(b"hello").unwrap();
        fs::create_dir_all(root.join("node_modules")).unwrap();
        File::create(root.join("node_modules").join("junk.js")).unwrap();
        File::create(root.join("manifest.json")).unwrap();
        (dir, root)
    }

    #[test]
    fn test_scan_invalid_root() {
        let err = scan_root(Path::new("/nonexistent/path/12345")).unwrap_err();
        assert!(matches!(err, AssetError::InvalidPath(_)));
    }

    #[test]
    fn test_scan_omits_and_orders() {
        let (_guard, root) = create_test_root();
        let manifest = scan_root(&root).unwrap();

        let names: Vec<&str> = manifest.root.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["branding", "readme.txt"]);
        assert!(manifest.root[0].is_dir());
        assert!(manifest.generated_at > 0.0);

        let branding = &manifest.root[0];
        let child_names: Vec<&str> =
            branding.child_nodes().iter().map(|n| n.name.as_str()).collect();
        assert_eq!(child_names, vec!["logo.png", "logo.webp"]);
        assert_eq!(branding.child_nodes()[0].path, "branding/logo.png");
        assert_eq!(branding.child_nodes()[0].size, Some(3));
    }

    #[test]
    fn test_scan_reports_progress() {
        let (_guard, root) = create_test_root();
        let seen = std::sync::Arc::new(AtomicU64::new(0));
        let seen_cb = seen.clone();
        let progress: ProgressCb = Box::new(move |count, _path| {
            seen_cb.fetch_max(count, Ordering::Relaxed);
        });
        let manifest = scan_root_with_progress(
            &root,
            &OmitRules::default(),
            &ScanConfig::default(),
            Some(progress),
        )
        .unwrap();
        assert_eq!(manifest.root.len(), 2);
        // readme.txt + 两个 logo
        assert_eq!(seen.load(Ordering::Relaxed), 3);
    }

    #[test]
    fn test_scan_max_depth_truncates_children() {
        let (_guard, root) = create_test_root();
        let config = ScanConfig {
            max_depth: Some(1),
            ..Default::default()
        };
        let manifest =
            scan_root_with_progress(&root, &OmitRules::default(), &config, None).unwrap();
        let branding = manifest
            .root
            .iter()
            .find(|n| n.name == "branding")
            .expect("branding present");
        assert_eq!(branding.child_count(), 0);
    }

    #[cfg(unix)]
    #[test]
    fn test_scan_skips_dangling_symlink() {
        let (_guard, root) = create_test_root();
        std::os::unix::fs::symlink(root.join("gone.txt"), root.join("broken.txt")).unwrap();

        let manifest = scan_root(&root).unwrap();
        let names: Vec<&str> = manifest.root.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["branding", "readme.txt"]);
    }

    #[test]
    fn test_write_manifest_round_trip() {
        let (_guard, root) = create_test_root();
        let manifest = scan_root(&root).unwrap();
        let out = root.join("out.json");
        write_manifest(&manifest, &out).unwrap();
        let body = fs::read_to_string(&out).unwrap();
        let parsed: Manifest = serde_json::from_str(&body).unwrap();
        assert_eq!(parsed.root.len(), manifest.root.len());
    }
}
