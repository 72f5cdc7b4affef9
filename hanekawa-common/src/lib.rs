pub mod repository;
pub mod types;

use std::sync::Arc;

#[derive(serde::Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub log_level: String,
    pub max_numwant: u32,
    pub default_numwant: u32,
    pub max_scrape_infohashes: u32,
    pub peer_lifetime: u64,
    pub gc_interval: u64,
    pub shard_count: usize,
    pub enable_admin_api: bool,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} must be greater than zero")]
    Zero { key: &'static str },
    #[error("default_numwant ({default}) must not exceed max_numwant ({max})")]
    DefaultNumWantTooLarge { default: u32, max: u32 },
}

impl Config {
    pub fn default_config() -> impl serde::Serialize {
        #[derive(serde::Serialize)]
        struct DefaultConfig {
            pub log_level: &'static str,
            pub max_numwant: u32,
            pub default_numwant: u32,
            pub max_scrape_infohashes: u32,
            pub peer_lifetime: u64,
            pub gc_interval: u64,
            pub shard_count: usize,
            pub enable_admin_api: bool,
        }

        DefaultConfig {
            log_level: "info",
            max_numwant: 50,
            default_numwant: 30,
            max_scrape_infohashes: 50,
            peer_lifetime: 1800,
            gc_interval: 180,
            shard_count: 1024,
            enable_admin_api: false,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let non_zero = [
            ("default_numwant", self.default_numwant as u64),
            ("max_scrape_infohashes", self.max_scrape_infohashes as u64),
            ("gc_interval", self.gc_interval),
            ("shard_count", self.shard_count as u64),
        ];

        if let Some((key, _)) = non_zero.iter().find(|(_, v)| *v == 0) {
            return Err(ConfigError::Zero { key: *key });
        }

        if self.default_numwant > self.max_numwant {
            return Err(ConfigError::DefaultNumWantTooLarge {
                default: self.default_numwant,
                max: self.max_numwant,
            });
        }

        Ok(())
    }
}

#[derive(Clone)]
pub struct Services {
    pub peer_repository: Arc<dyn crate::repository::peer::PeerRepository>,
}
