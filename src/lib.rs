pub mod config;
pub mod domain {
    pub mod payment;
    pub mod sponsorship;
    pub mod transaction;
    pub mod wish;
}
pub mod gateways;
pub mod http {
    pub mod handlers {
        pub mod donations;
        pub mod email_logs;
        pub mod ops;
        pub mod sponsorships;
        pub mod stripe;
        pub mod wishes;
    }
    pub mod middleware {
        pub mod admin_auth;
        pub mod rate_limit;
    }
}
pub mod mailer;
pub mod repo {
    pub mod email_log_repo;
    pub mod payments_repo;
    pub mod sponsorships_repo;
    pub mod transactions_repo;
    pub mod wishes_repo;
}
pub mod service {
    pub mod donor_service;
    pub mod email_relay;
}

use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub donor_service: service::donor_service::DonorService,
    pub payments_repo: repo::payments_repo::PaymentsRepo,
    pub wishes_repo: repo::wishes_repo::WishesRepo,
    pub sponsorships_repo: repo::sponsorships_repo::SponsorshipsRepo,
    pub email_log_repo: repo::email_log_repo::EmailLogRepo,
    pub stripe: Arc<gateways::stripe::StripeGateway>,
    pub redis_client: redis::Client,
}
