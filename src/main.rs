use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use creator_backend::{
    AppState,
    config::Config,
    llm::{ChatCompletion, GroqClient},
    middleware::RateLimiter,
    router::create_router,
    youtube::YoutubeClient,
};
use tokio::signal::ctrl_c;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // 初始化日志
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 加载配置
    let config = Config::from_env().expect("Failed to load configuration");

    // LLM 客户端
    let groq = GroqClient::new(&config).expect("Failed to build LLM client");
    if !groq.has_api_key() {
        tracing::warn!("GROQ_API_KEY is not set; generation endpoints will return 500");
    }
    let llm: Arc<dyn ChatCompletion> = Arc::new(groq);

    // YouTube 客户端（可选）
    let youtube = YoutubeClient::from_config(&config)
        .expect("Failed to build YouTube client")
        .map(Arc::new);
    if youtube.is_none() {
        tracing::info!("YOUTUBE_API_KEY is not set; competitor analysis runs without channel stats");
    }

    // 设置限流器
    let rate_limiter = Arc::new(RateLimiter::from_config(&config));

    let state = AppState {
        config: config.clone(),
        llm,
        youtube,
    };
    let app = create_router(state, rate_limiter);

    // 启动服务器
    let addr = SocketAddr::new(
        config.server_host.parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid server_host, falling back to dual-stack default");
            IpAddr::V6(std::net::Ipv6Addr::UNSPECIFIED)
        }),
        config.server_port,
    );
    tracing::info!("Server listening on {}{}", addr, config.api_base_uri);
    axum::serve(
        tokio::net::TcpListener::bind(&addr)
            .await
            .expect("Failed to bind"),
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .expect("Failed to start server");

    tracing::info!("Server shut down");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        ctrl_c().await.expect("Failed to install Ctrl+C handler");
        tracing::info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        signal(SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
        tracing::info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
