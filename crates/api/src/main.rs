use mandir_auth::{Role, User};
use mandir_core::UserId;

#[tokio::main]
async fn main() {
    mandir_observability::init();

    let jwt_secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| {
        tracing::warn!("JWT_SECRET not set; using insecure dev default");
        "dev-secret".to_string()
    });

    let root_id = std::env::var("ROOT_USER_ID")
        .ok()
        .and_then(|raw| raw.parse::<UserId>().ok())
        .unwrap_or_else(|| UserId::from_raw(1).expect("1 is a valid id"));
    let root = User::new(root_id, Role::SuperAdmin, None);
    tracing::info!(user_id = %root.id, "seeded root super admin");

    let app = mandir_api::app::build_app(jwt_secret, vec![root]);

    let listener = tokio::net::TcpListener::bind("0.0.0.0:8080")
        .await
        .expect("failed to bind 0.0.0.0:8080");

    tracing::info!("listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}
