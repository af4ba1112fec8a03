//! ビルド時に埋め込む設定

use portfolio_common::PortfolioConfig;
use tracing::{error, info};

const EMBEDDED_CONFIG: &str = include_str!("../portfolio.json");

/// 埋め込み設定を読み込む。壊れていればデフォルトで起動する
pub fn load_config() -> PortfolioConfig {
    match PortfolioConfig::from_json_str(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!(variant = ?config.variant, "config loaded");
            config
        }
        Err(e) => {
            error!(error = %e, "invalid portfolio.json, using defaults");
            PortfolioConfig::default()
        }
    }
}
