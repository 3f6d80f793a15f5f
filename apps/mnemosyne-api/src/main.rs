//! Mnemosyne 远程调用服务：身份、资源层级（Workspace/Grid/Node/Device）与设备位置。
//!
//! 启动流程：
//! 1. 加载 .env 与环境变量配置
//! 2. 初始化结构化日志
//! 3. 有数据库地址时使用 Postgres 存储（可选执行建表脚本），否则使用内存存储
//! 4. 组装路由（请求追踪 → 传输层密钥校验 → handlers）并监听

mod handlers;
mod middleware;
mod routes;
mod utils;

#[cfg(test)]
mod tests;

use axum::{
    Router,
    middleware::{from_fn, from_fn_with_state},
    routing::get,
};
use mnemosyne_auth::{ApiKeyGate, AuthorizationGuard, Authorizer, IdentityService};
use mnemosyne_config::AppConfig;
use mnemosyne_registry::{DeviceService, HierarchyService, NodeService};
use mnemosyne_storage::{
    DeviceStore, GridStore, InMemoryDeviceStore, InMemoryGridStore, InMemoryNodeStore,
    InMemoryUserStore, InMemoryWorkspaceStore, NodeStore, PgDeviceStore, PgGridStore, PgNodeStore,
    PgUserStore, PgWorkspaceStore, UserStore, WorkspaceStore, apply_schema, connect_pool,
};
use mnemosyne_telemetry::init_tracing;
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// 共享应用状态。
#[derive(Clone)]
pub struct AppState {
    pub identity: Arc<IdentityService>,
    pub hierarchy: Arc<HierarchyService>,
    pub nodes: Arc<NodeService>,
    pub devices: Arc<DeviceService>,
    pub gate: Arc<ApiKeyGate>,
    /// 仅 Postgres 模式下存在，用于就绪检查
    pub pool: Option<PgPool>,
}

/// 各实体存储的集合。
pub struct Stores {
    pub users: Arc<dyn UserStore>,
    pub workspaces: Arc<dyn WorkspaceStore>,
    pub grids: Arc<dyn GridStore>,
    pub nodes: Arc<dyn NodeStore>,
    pub devices: Arc<dyn DeviceStore>,
}

impl Stores {
    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(InMemoryUserStore::new()),
            workspaces: Arc::new(InMemoryWorkspaceStore::new()),
            grids: Arc::new(InMemoryGridStore::new()),
            nodes: Arc::new(InMemoryNodeStore::new()),
            devices: Arc::new(InMemoryDeviceStore::new()),
        }
    }

    pub fn postgres(pool: &PgPool) -> Self {
        Self {
            users: Arc::new(PgUserStore::new(pool.clone())),
            workspaces: Arc::new(PgWorkspaceStore::new(pool.clone())),
            grids: Arc::new(PgGridStore::new(pool.clone())),
            nodes: Arc::new(PgNodeStore::new(pool.clone())),
            devices: Arc::new(PgDeviceStore::new(pool.clone())),
        }
    }
}

impl AppState {
    pub fn new(stores: Stores, gate: ApiKeyGate, pool: Option<PgPool>) -> Self {
        let guard: Arc<dyn Authorizer> = Arc::new(AuthorizationGuard::new(stores.users.clone()));
        Self {
            identity: Arc::new(IdentityService::new(stores.users, guard.clone())),
            hierarchy: Arc::new(HierarchyService::new(stores.workspaces, stores.grids)),
            nodes: Arc::new(NodeService::new(stores.nodes, guard.clone())),
            devices: Arc::new(DeviceService::new(stores.devices, guard)),
            gate: Arc::new(gate),
            pool,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 加载本地 .env（如存在），便于直接 cargo run 启动
    dotenvy::dotenv().ok();
    // 从环境变量加载运行配置
    let config = AppConfig::from_env()?;
    // 初始化结构化日志
    init_tracing();

    let gate = ApiKeyGate::new(config.api_keys.clone());
    let state = match config.database_url.as_deref() {
        Some(database_url) => {
            let pool = connect_pool(database_url, config.database_max_connections).await?;
            if config.apply_schema {
                apply_schema(&pool).await?;
                info!("database schema applied");
            }
            AppState::new(Stores::postgres(&pool), gate, Some(pool))
        }
        None => {
            warn!("MNEMOSYNE_DATABASE_URL not set, using in-memory stores");
            AppState::new(Stores::in_memory(), gate, None)
        }
    };

    let app = build_app(state);
    let listener = tokio::net::TcpListener::bind(&config.http_addr).await?;
    info!(addr = %config.http_addr, "mnemosyne api listening");
    axum::serve(listener, app).await?;
    Ok(())
}

/// 组装完整路由。
///
/// 健康/就绪检查不经过传输层密钥校验；业务路由同时挂在 / 与 /api 下。
pub fn build_app(state: AppState) -> Router {
    let gated = routes::create_api_router()
        .route_layer(from_fn_with_state(state.clone(), middleware::transport_gate));

    Router::new()
        .route("/health", get(handlers::health))
        .route("/readyz", get(handlers::readyz))
        .merge(gated.clone())
        .nest("/api", gated)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        // 注入 request_id/trace_id
        .layer(from_fn(middleware::request_context))
}
