use std::sync::Arc;
use vigil_store_mock::{AppState, MockConfig, build_app, init_logger, print_banner};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. 设置环境 (dotenv, 日志)
    dotenv::dotenv().ok();
    let config = MockConfig::from_env();
    config.validate()?;
    init_logger(&config.log_level, config.log_dir.as_deref());

    print_banner();
    tracing::info!("📋 Vigil duty store mock starting...");

    // 2. 初始化状态并填充演示名册
    let state = Arc::new(AppState::initialize(&config).await);
    let app = build_app(state);

    // 3. 启动 HTTP 服务
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        tracing::info!("Ctrl-C received, shutting down");
    }
}
