use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use axum::Router;
use hopebridge_payments::config::AppConfig;
use hopebridge_payments::gateways::notchpay::NotchPayGateway;
use hopebridge_payments::gateways::stripe::StripeGateway;
use hopebridge_payments::mailer::Mailer;
use hopebridge_payments::repo::email_log_repo::EmailLogRepo;
use hopebridge_payments::repo::payments_repo::PaymentsRepo;
use hopebridge_payments::repo::sponsorships_repo::SponsorshipsRepo;
use hopebridge_payments::repo::transactions_repo::TransactionsRepo;
use hopebridge_payments::repo::wishes_repo::WishesRepo;
use hopebridge_payments::service::donor_service::DonorService;
use hopebridge_payments::service::email_relay::EmailRelay;
use hopebridge_payments::AppState;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cfg = AppConfig::from_env();

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&cfg.database_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    let redis_client = redis::Client::open(cfg.redis_url.clone())?;

    let transactions_repo = TransactionsRepo { pool: pool.clone() };
    let payments_repo = PaymentsRepo { pool: pool.clone() };
    let wishes_repo = WishesRepo { pool: pool.clone() };
    let sponsorships_repo = SponsorshipsRepo { pool: pool.clone() };
    let email_log_repo = EmailLogRepo { pool: pool.clone() };

    let mailer = Mailer {
        base_url: cfg.resend_base_url.clone(),
        api_key: cfg.resend_api_key.clone(),
        from: cfg.mail_from.clone(),
        timeout_ms: cfg.outbound_timeout_ms,
        client: reqwest::Client::new(),
    };

    let gateway = Arc::new(NotchPayGateway {
        transactions_repo,
        email_log_repo: email_log_repo.clone(),
        mailer: mailer.clone(),
    });

    let stripe = Arc::new(StripeGateway {
        base_url: cfg.stripe_base_url.clone(),
        secret_key: cfg.stripe_secret_key.clone(),
        webhook_secret: cfg.stripe_webhook_secret.clone(),
        timeout_ms: cfg.outbound_timeout_ms,
        client: reqwest::Client::new(),
    });

    let donor_service = DonorService {
        payments_repo: payments_repo.clone(),
        wishes_repo: wishes_repo.clone(),
        gateway,
    };

    let relay = EmailRelay {
        email_log_repo: email_log_repo.clone(),
        mailer,
        poll_interval_ms: cfg.email_relay_poll_ms,
    };
    tokio::spawn(relay.run());

    let state = AppState {
        donor_service,
        payments_repo,
        wishes_repo,
        sponsorships_repo,
        email_log_repo,
        stripe,
        redis_client: redis_client.clone(),
    };

    let admin_key = cfg.internal_api_key.clone();
    let admin_routes = Router::new()
        .route(
            "/admin/email-logs",
            get(hopebridge_payments::http::handlers::email_logs::list_email_logs),
        )
        .route(
            "/admin/email-logs/:id/retry",
            post(hopebridge_payments::http::handlers::email_logs::retry_email_log),
        )
        .route(
            "/admin/wishes",
            post(hopebridge_payments::http::handlers::wishes::create_wish),
        )
        .layer(from_fn_with_state(
            admin_key,
            hopebridge_payments::http::middleware::admin_auth::require_internal_api_key,
        ));

    let app = Router::new()
        .route("/health", get(hopebridge_payments::http::handlers::donations::health))
        .route(
            "/donations",
            post(hopebridge_payments::http::handlers::donations::create_donation),
        )
        .route(
            "/donations/:payment_id",
            get(hopebridge_payments::http::handlers::donations::get_donation),
        )
        .route(
            "/donations/:payment_id/confirm",
            post(hopebridge_payments::http::handlers::donations::confirm_donation),
        )
        .route(
            "/children/:child_id/wishes",
            get(hopebridge_payments::http::handlers::wishes::list_child_wishes),
        )
        .route(
            "/sponsorships",
            post(hopebridge_payments::http::handlers::sponsorships::create_sponsorship)
                .get(hopebridge_payments::http::handlers::sponsorships::list_sponsorships),
        )
        .route(
            "/stripe/payment-intents",
            post(hopebridge_payments::http::handlers::stripe::create_payment_intent),
        )
        .route(
            "/stripe/webhook",
            post(hopebridge_payments::http::handlers::stripe::webhook),
        )
        .route("/ops/readiness", get(hopebridge_payments::http::handlers::ops::readiness))
        .route("/ops/liveness", get(hopebridge_payments::http::handlers::ops::liveness))
        .merge(admin_routes)
        .layer(from_fn_with_state(
            hopebridge_payments::http::middleware::rate_limit::DonationRateLimit {
                redis_client,
                max_per_minute: 300,
            },
            hopebridge_payments::http::middleware::rate_limit::enforce,
        ))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&cfg.bind_addr).await?;
    tracing::info!("listening on {}", cfg.bind_addr);
    axum::serve(listener, app).await?;
    Ok(())
}
