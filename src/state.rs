use crate::config::AppConfig;
use crate::gateways::Gateways;
use crate::report::ReportComposer;
use crate::session::SessionContext;
use reqwest::Client;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub session: Arc<Mutex<SessionContext>>,
    pub gateways: Gateways,
    pub composer: ReportComposer,
}

impl AppState {
    pub fn new(config: &AppConfig, session: SessionContext) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(config.gateway_timeout).build()?;
        let model_client = Client::builder().timeout(config.model_timeout).build()?;

        Ok(Self {
            session: Arc::new(Mutex::new(session)),
            gateways: Gateways::new(client, config),
            composer: ReportComposer::new(model_client, config),
        })
    }
}
