mod db;
mod routes;
mod services;
mod state;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()
        .expect("invalid PORT");

    let pool = db::init_pool(&database_url)
        .await
        .expect("database init failed");

    // Optional shared secret gating destructive routes. Unset means the
    // instance runs open (local/dev).
    let admin_token = std::env::var("TRACEDECK_ADMIN_TOKEN").ok();
    if admin_token.is_none() {
        tracing::warn!("TRACEDECK_ADMIN_TOKEN not set — delete endpoints are open");
    }

    let state = state::AppState::new(pool, admin_token);

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "tracedeck listening");
    axum::serve(listener, app).await.expect("server failed");
}
