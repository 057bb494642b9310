use std::sync::Arc;

use crate::{
    config::Config,
    errors::Result,
    invite::{Invitations, verification::StoreEmailVerifier},
    notify::{email::LogMailer, slack::SlackNotifier},
    store::{Store, surreal::SurrealStore},
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub invitations: Arc<Invitations>,
}

impl AppState {
    pub async fn init(config: Config) -> Result<Self> {
        let store: Arc<dyn Store> = Arc::new(SurrealStore::connect(&config.surreal).await?);
        let invitations = Invitations::new(
            &config,
            store.clone(),
            Arc::new(StoreEmailVerifier::new(store)),
            Arc::new(LogMailer),
            Arc::new(SlackNotifier::new(reqwest::Client::new())),
        );

        Ok(Self::new(config, invitations))
    }

    pub fn new(config: Config, invitations: Invitations) -> Self {
        Self {
            config: Arc::new(config),
            invitations: Arc::new(invitations),
        }
    }
}
