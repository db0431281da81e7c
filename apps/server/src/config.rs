use std::{env, path::PathBuf};

use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// 被服务的项目根目录，可在 web 根之外
    pub project_root: PathBuf,
    pub log_dir: PathBuf,
    /// 启动扫描后把 manifest.json 写回项目根
    pub write_manifest: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let host = env::var("QBOX_ASSETS_HOST").unwrap_or_else(|_| "127.0.0.1".into());
        let port: u16 = env::var("QBOX_ASSETS_PORT")
            .unwrap_or_else(|_| "8080".into())
            .parse()
            .map_err(|err| AppError::Config(format!("invalid QBOX_ASSETS_PORT: {err}")))?;

        let project_root =
            PathBuf::from(env::var("QBOX_ASSETS_ROOT").unwrap_or_else(|_| ".".into()));

        let log_dir =
            PathBuf::from(env::var("QBOX_ASSETS_LOG_DIR").unwrap_or_else(|_| "./log".into()));

        let write_manifest = env::var("QBOX_ASSETS_WRITE_MANIFEST")
            .unwrap_or_else(|_| "false".into())
            .parse::<bool>()
            .map_err(|err| {
                AppError::Config(format!("invalid QBOX_ASSETS_WRITE_MANIFEST: {err}"))
            })?;

        Ok(Self {
            host,
            port,
            project_root,
            log_dir,
            write_manifest,
        })
    }
}
