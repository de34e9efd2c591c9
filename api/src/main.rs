//! RealOne Invest API server entry point.
//!
//! Loads configuration once from the environment, builds the service graph,
//! and serves the auth routes. When notification provider credentials are
//! absent the mock gateways are wired in so the server stays usable in
//! development.

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpResponse, HttpServer};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use ro_api::routes;
use ro_api::state::AppState;
use ro_core::services::auth::AuthService;
use ro_core::services::gateway::{MailGateway, SmsGateway};
use ro_core::services::recovery::{RecoveryConfig, RecoveryService};
use ro_core::services::token::{TokenConfig, TokenService};
use ro_infra::database::{DatabasePool, MySqlAccountRepository};
use ro_infra::mail::{MailgunMailClient, MockMailClient};
use ro_infra::sms::{MockSmsClient, TwilioSmsClient};
use ro_shared::config::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.environment.default_log_filter())),
        )
        .init();

    tracing::info!(
        environment = %config.environment,
        "Starting RealOne Invest API server"
    );

    let pool = DatabasePool::new(&config.database).await?;
    pool.run_migrations().await?;

    let providers_configured = std::env::var("TWILIO_ACCOUNT_SID").is_ok()
        && std::env::var("MAILGUN_API_KEY").is_ok();

    if providers_configured {
        let sms = TwilioSmsClient::from_env()?;
        let mail = MailgunMailClient::from_env()?;
        run_server(config, pool, sms, mail).await
    } else {
        tracing::warn!("Notification provider credentials missing; using mock gateways");
        run_server(config, pool, MockSmsClient::new(), MockMailClient::new()).await
    }
}

async fn run_server<S, M>(
    config: AppConfig,
    pool: DatabasePool,
    sms: S,
    mail: M,
) -> anyhow::Result<()>
where
    S: SmsGateway + 'static,
    M: MailGateway + 'static,
{
    let accounts = Arc::new(MySqlAccountRepository::new(pool.get_pool().clone()));
    let sms = Arc::new(sms);
    let mail = Arc::new(mail);

    let recovery_service = Arc::new(RecoveryService::new(
        accounts.clone(),
        sms,
        mail,
        RecoveryConfig::from_env(),
    ));
    let token_service = Arc::new(TokenService::new(TokenConfig::from_env()));
    let auth_service = Arc::new(AuthService::new(
        accounts,
        recovery_service.clone(),
        token_service,
    ));

    let state = web::Data::new(AppState::new(auth_service, recovery_service));

    let bind_address = config.server.bind_address();
    tracing::info!(%bind_address, "Server listening");

    let mut server = HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET", "POST"])
            .allow_any_header()
            .max_age(3600);

        App::new()
            .wrap(Logger::default())
            .wrap(cors)
            .app_data(state.clone())
            .route("/health", web::get().to(health_check))
            .configure(routes::auth::configure::<MySqlAccountRepository, S, M>)
            .default_service(web::route().to(not_found))
    })
    .bind(&bind_address)?;

    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server.run().await?;
    Ok(())
}

async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "realone-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({
        "error": "not_found",
        "message": "The requested resource was not found"
    }))
}
