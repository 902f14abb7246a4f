use crate::config::Config;
use crate::core::{GameManager, GridGame, MetaGame};
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Clone)]
pub struct AppState {
    pub grid_games: Arc<RwLock<GameManager<GridGame>>>,
    pub meta_games: Arc<RwLock<GameManager<MetaGame>>>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            grid_games: Arc::new(RwLock::new(GameManager::new())),
            meta_games: Arc::new(RwLock::new(GameManager::new())),
            config: Arc::new(config),
        }
    }
}
