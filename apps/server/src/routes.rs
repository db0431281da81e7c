use std::path::{Path, PathBuf};

use actix_web::{get, web, HttpRequest, HttpResponse};
use serde_json::json;

use crate::{error::AppError, AppState};

pub fn register(cfg: &mut web::ServiceConfig) {
    cfg.service(health).service(manifest);
}

#[get("/healthz")]
async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "service": "qbox-assets-server",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// 启动时扫出的清单，只读
#[get("/manifest.json")]
async fn manifest(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(&state.manifest)
}

/// 扩展名到 content-type；未识别的一律按二进制
pub fn content_type_for(name: &str) -> &'static str {
    let ext = name.rsplit_once('.').map(|(_, ext)| ext.to_ascii_lowercase());
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("json") => "application/json",
        Some("webp") => "image/webp",
        Some("mp4") => "video/mp4",
        Some("webm") => "video/webm",
        _ => "application/octet-stream",
    }
}

/// 把请求路径解析到项目根之下；逃出根目录或不存在都按 404 处理，
/// 不向外暴露根目录位置
fn resolve_under_root(root: &Path, relative: &str) -> Result<PathBuf, AppError> {
    let resolved = std::fs::canonicalize(root.join(relative))
        .map_err(|_| AppError::NotFound(relative.to_string()))?;
    if !resolved.starts_with(root) || !resolved.is_file() {
        return Err(AppError::NotFound(relative.to_string()));
    }
    Ok(resolved)
}

/// default_service：清单里的每个 path 都可按 `/<path>` 原样取到。
/// 浏览器会把空格、非 ASCII 字符百分号编码，先解码再解析
pub async fn serve_asset(
    req: HttpRequest,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let raw = req.path().trim_start_matches('/');
    if raw.is_empty() {
        return Err(AppError::NotFound("/".into()));
    }
    let relative = urlencoding::decode(raw)
        .map_err(|_| AppError::NotFound(raw.to_string()))?
        .into_owned();
    let resolved = resolve_under_root(&state.project_root, &relative)?;
    let body = web::block(move || std::fs::read(&resolved))
        .await
        .map_err(|e| AppError::Io(std::io::Error::new(std::io::ErrorKind::Other, e)))??;
    Ok(HttpResponse::Ok()
        .content_type(content_type_for(&relative))
        .body(body))
}
