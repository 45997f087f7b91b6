//! Vigil Store Mock - in-memory duty store service
//!
//! Serves the duty attendance HTTP contract from a seeded in-memory
//! store, so the check-in client can run end to end without a real
//! backend.
//!
//! # 模块结构
//!
//! ```text
//! vigil-store-mock/src/
//! ├── config.rs   # 环境配置
//! ├── state.rs    # 内存存储与演示名册
//! ├── api.rs      # HTTP 路由和处理器
//! └── logger.rs   # 日志设置
//! ```

pub mod api;
pub mod config;
pub mod logger;
pub mod state;

pub use config::MockConfig;
pub use logger::init_logger;
pub use state::AppState;

use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Build a fully configured application with middleware and state
pub fn build_app(state: Arc<AppState>) -> Router {
    api::router(state)
        // CORS - the check-in client may run from a browser origin
        .layer(CorsLayer::permissive())
        // Trace - request logging
        .layer(TraceLayer::new_for_http())
}

pub fn print_banner() {
    println!(
        r#"
__     ___       _ _
\ \   / (_) __ _(_) |
 \ \ / /| |/ _` | | |
  \ V / | | (_| | | |
   \_/  |_|\__, |_|_|
           |___/
    "#
    );
}
