//! Application state management

use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::data::DatasetCache;
use crate::session::Session;
use crate::training::{ClassifierTrainer, TrainerConfig};

use super::error::{Result, ServerError};
use super::ServerConfig;

/// Application state shared across handlers
pub struct AppState {
    pub config: ServerConfig,
    pub dataset: DatasetCache,
    pub trainer: ClassifierTrainer,
    pub sessions: RwLock<HashMap<String, Session>>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        Self::with_trainer(config, ClassifierTrainer::new(TrainerConfig::default()))
    }

    pub fn with_trainer(config: ServerConfig, trainer: ClassifierTrainer) -> Self {
        let dataset = DatasetCache::new(&config.dataset_path);
        Self {
            config,
            dataset,
            trainer,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    pub fn generate_id() -> String {
        Uuid::new_v4().simple().to_string()
    }

    pub async fn create_session(&self) -> String {
        let id = Self::generate_id();
        self.sessions
            .write()
            .await
            .insert(id.clone(), Session::new(id.clone()));
        id
    }

    pub async fn remove_session(&self, id: &str) -> Result<()> {
        self.sessions
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| ServerError::NotFound(format!("Unknown session: {}", id)))
    }

    /// Run `f` against a session under the write lock
    pub async fn with_session<T>(
        &self,
        id: &str,
        f: impl FnOnce(&mut Session) -> Result<T>,
    ) -> Result<T> {
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .get_mut(id)
            .ok_or_else(|| ServerError::NotFound(format!("Unknown session: {}", id)))?;
        f(session)
    }

    pub async fn session_exists(&self, id: &str) -> bool {
        self.sessions.read().await.contains_key(id)
    }
}
