mod config;
mod error;
mod routes;

use std::{fs, path::PathBuf, time::Instant};

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use config::AppConfig;
use qbox_assets_common::{ScanConfig, MANIFEST_FILE};
use qbox_assets_domain::Manifest;
use qbox_assets_scanner::{scan_root_with_progress, write_manifest, OmitRules};
use routes::register;
use tracing::info;
use tracing_appender::rolling;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub struct AppState {
    pub manifest: Manifest,
    /// 规范化后的项目根，资源路径都在它下面解析
    pub project_root: PathBuf,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env().expect("failed to load config");

    fs::create_dir_all(&config.log_dir).expect("failed to create log directory");
    let file_appender = rolling::never(&config.log_dir, "assets-server.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);
    let _guard = guard;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .expect("failed to init logging filter");

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer())
        .with(fmt::layer().with_ansi(false).with_writer(file_writer))
        .init();

    let project_root =
        fs::canonicalize(&config.project_root).expect("failed to resolve project root");

    let scan_config = ScanConfig {
        max_depth: None,
        write_manifest: config.write_manifest,
    };
    let started = Instant::now();
    let manifest =
        scan_root_with_progress(&project_root, &OmitRules::default(), &scan_config, None)
            .expect("failed to scan project root");
    info!(
        root = %project_root.display(),
        top_level_entries = manifest.root.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "manifest scan done"
    );

    if scan_config.write_manifest {
        let output = project_root.join(MANIFEST_FILE);
        write_manifest(&manifest, &output).expect("failed to write manifest");
        info!(output = %output.display(), "manifest written");
    }

    info!(
        host = %config.host,
        port = config.port,
        "starting qbox assets server"
    );

    let bind_addr = format!("{}:{}", config.host, config.port);
    let shared_state = web::Data::new(AppState {
        manifest,
        project_root,
    });

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(Cors::permissive())
            .app_data(shared_state.clone())
            .configure(register)
            .default_service(web::get().to(routes::serve_asset))
    })
    .bind(bind_addr)?
    .run()
    .await
}
