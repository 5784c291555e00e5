use std::sync::Arc;

mod domain;
mod interfaces;
mod infrastructure;
pub mod errors;
pub mod settings;
pub mod constants;
pub mod graceful_shutdown;
pub mod background_task;

pub use domain::{entities, use_cases};
pub use interfaces::{handlers, mailer, middlewares, routes};
pub use infrastructure::{content, limiter, mail, utils};

use entities::{email::MailEnvelope, portfolio::Portfolio};
use errors::MailError;
use limiter::rate_limiter::RateLimiterStore;
use mail::{log_mailer::LogMailer, sendgrid::SendGridMailer};
use mailer::Mailer;
use use_cases::{contact::ContactHandler, portfolio::PortfolioHandler};

pub struct AppState {
    pub contact_handler: AppContactHandler,
    pub portfolio_handler: PortfolioHandler,
    pub rate_limiter: RateLimiterStore,
    pub trust_x_forwarded_for: bool,
}

pub type AppContactHandler = ContactHandler<Arc<dyn Mailer>>;

impl AppState {
    pub fn new(config: &settings::AppConfig, portfolio: Portfolio) -> Result<Self, MailError> {
        let mailer: Arc<dyn Mailer> = match SendGridMailer::new(&config.mail) {
            Ok(mailer) => Arc::new(mailer),
            Err(MailError::NotConfigured) if !config.is_production() => {
                tracing::warn!("No mail API key configured; contact messages will only be logged");
                Arc::new(LogMailer)
            }
            Err(e) => return Err(e),
        };

        Ok(Self::with_mailer(config, portfolio, mailer))
    }

    /// Builds state around an explicit mail provider.
    pub fn with_mailer(
        config: &settings::AppConfig,
        portfolio: Portfolio,
        mailer: Arc<dyn Mailer>,
    ) -> Self {
        let envelope = MailEnvelope {
            from: config.mail.from.clone(),
            to: config.mail.to.clone(),
            site_name: config.site_name.clone(),
        };

        AppState {
            contact_handler: ContactHandler::new(mailer, envelope),
            portfolio_handler: PortfolioHandler::new(portfolio, &config.map),
            rate_limiter: RateLimiterStore::new(
                config.rate_limit.max_requests,
                config.rate_limit.window(),
            ),
            trust_x_forwarded_for: config.trust_x_forwarded_for,
        }
    }
}
