use std::sync::Arc;

use axum::extract::FromRef;

use crate::{
    application::services::{IngestionPipeline, StorageService},
    domain::config::{DeploymentMode, PublicUrlPolicy, ServerConfig},
};

#[derive(Clone, FromRef)]
pub struct AppState {
    pub mode: DeploymentMode,
    pub public_url: PublicUrlPolicy,
    pub storage: Arc<dyn StorageService>,
    pub pipeline: IngestionPipeline,
}

impl AppState {
    pub fn new(config: &ServerConfig, storage: Arc<dyn StorageService>) -> Self {
        Self {
            mode: config.mode,
            public_url: config.public_url.clone(),
            pipeline: IngestionPipeline::new(storage.clone(), config.limits),
            storage,
        }
    }
}
