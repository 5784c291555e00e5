use std::{
    net::SocketAddr,
    sync::{Arc, Mutex},
};

use actix_web::web;
use async_trait::async_trait;
use portfolio_site::{
    content::loader::load_portfolio,
    entities::email::OutgoingEmail,
    errors::MailError,
    mailer::Mailer,
    settings::{AppConfig, AppEnvironment, MailConfig, MapConfig, RateLimitConfig},
    AppState,
};
use serde_json::{json, Value};

/// Mailer double that records every message it is asked to send.
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<OutgoingEmail>>,
    fail: bool,
}

impl RecordingMailer {
    pub fn failing() -> Self {
        RecordingMailer {
            sent: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn sent(&self) -> Vec<OutgoingEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError> {
        self.sent.lock().unwrap().push(email.clone());
        if self.fail {
            return Err(MailError::Rejected { status: 401, body: "invalid api key".into() });
        }
        Ok(())
    }

    fn kind(&self) -> &'static str {
        "recording"
    }
}

pub fn test_config() -> AppConfig {
    AppConfig {
        env: AppEnvironment::Testing,
        name: "Portfolio Site Test".to_string(),
        port: 0,
        host: "127.0.0.1".to_string(),
        worker_count: 1,
        cors_allowed_origins: vec!["*".to_string()],
        trust_x_forwarded_for: false,
        site_name: "Portfolio".to_string(),
        content_path: None,
        mail: MailConfig {
            from: "no-reply@example.com".into(),
            to: "owner@example.com".into(),
            ..MailConfig::default()
        },
        rate_limit: RateLimitConfig::default(),
        map: MapConfig::default(),
    }
}

pub async fn test_state(config: &AppConfig, mailer: Arc<RecordingMailer>) -> web::Data<AppState> {
    let portfolio = load_portfolio(None).await.expect("built-in content loads");
    web::Data::new(AppState::with_mailer(config, portfolio, mailer))
}

pub fn client(last_octet: u8) -> SocketAddr {
    SocketAddr::from(([203, 0, 113, last_octet], 40000))
}

pub fn valid_form() -> Value {
    json!({
        "name": "Ada Lovelace",
        "email": "ada@example.com",
        "message": "I'd love to talk about a project."
    })
}
