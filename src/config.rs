use std::path::PathBuf;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// Get the data directory for the application.
pub fn get_data_dir() -> PathBuf {
    if let Ok(s) = std::env::var("SIA_WALLET_DATA") {
        PathBuf::from(s)
    } else if let Some(proj_dirs) = ProjectDirs::from("com", "sia", "sia-wallet") {
        proj_dirs.data_local_dir().to_path_buf()
    } else {
        PathBuf::from(".").join(".data")
    }
}

/// Get the config directory for the application.
pub fn get_config_dir() -> PathBuf {
    if let Ok(s) = std::env::var("SIA_WALLET_CONFIG") {
        PathBuf::from(s)
    } else if let Some(proj_dirs) = ProjectDirs::from("com", "sia", "sia-wallet") {
        proj_dirs.config_local_dir().to_path_buf()
    } else {
        PathBuf::from(".").join(".config")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub name: String,
    /// Base URL of the wallet daemon's HTTP API.
    pub api_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub network: NetworkConfig,
    /// User agent the daemon requires on API requests.
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self::mainnet()
    }
}

impl Config {
    /// Create config from a network name with an optional API URL override.
    pub fn new(network: &str, api_url: Option<&str>) -> Self {
        let mut config = Self::from_network(network);
        if let Some(url) = api_url {
            config.network.api_url = url.to_string();
        }
        config
    }

    pub fn mainnet() -> Self {
        Self {
            network: NetworkConfig {
                name: "mainnet".to_string(),
                api_url: "http://localhost:9980".to_string(),
            },
            user_agent: "Sia-Agent".to_string(),
        }
    }

    pub fn testnet() -> Self {
        Self {
            network: NetworkConfig {
                name: "testnet".to_string(),
                api_url: "http://localhost:9880".to_string(),
            },
            user_agent: "Sia-Agent".to_string(),
        }
    }

    pub fn from_network(network: &str) -> Self {
        match network {
            "testnet" => Self::testnet(),
            _ => Self::mainnet(),
        }
    }
}
