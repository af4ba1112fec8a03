//! アプリ設定
//!
//! WASM版はビルド時に `web-wasm/portfolio.json` を埋め込んで読む。
//! パスワード変更を恒久化するときはこのファイルの passwordHash を書き換える。

use crate::auth::{PasswordDigest, AUTH_KEY, DEFAULT_PASSWORD_HASH};
use crate::error::{Error, Result};
use crate::render::DEFAULT_GALLERY_LIMIT;
use crate::store::PROJECTS_KEY;
use serde::{Deserialize, Serialize};

/// 表示バリアント
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// 認証ゲートつきの編集版
    #[default]
    Editor,
    /// 閲覧専用の公開版
    Public,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PortfolioConfig {
    pub variant: Variant,
    pub projects_key: String,
    pub auth_key: String,
    /// SHA-256 の16進文字列
    pub password_hash: String,
    pub gallery_limit: usize,
    pub notice_timeout_ms: u32,
}

impl Default for PortfolioConfig {
    fn default() -> Self {
        Self::default_config()
    }
}

impl PortfolioConfig {
    /// JSONから読み込んで検証
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: PortfolioConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.projects_key.is_empty() || self.auth_key.is_empty() {
            return Err(Error::Config("storage keys must not be empty".into()));
        }
        if self.gallery_limit == 0 {
            return Err(Error::Config("galleryLimit must be at least 1".into()));
        }
        self.reference_digest()?;
        Ok(())
    }

    pub fn reference_digest(&self) -> Result<PasswordDigest> {
        self.password_hash.parse()
    }

    fn default_config() -> Self {
        Self {
            variant: Variant::Editor,
            projects_key: PROJECTS_KEY.into(),
            auth_key: AUTH_KEY.into(),
            password_hash: DEFAULT_PASSWORD_HASH.into(),
            gallery_limit: DEFAULT_GALLERY_LIMIT,
            notice_timeout_ms: 5000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PortfolioConfig::default();
        assert_eq!(config.variant, Variant::Editor);
        assert_eq!(config.projects_key, "portfolio_projects");
        assert_eq!(config.auth_key, "portfolio_auth");
        assert_eq!(config.gallery_limit, 4);
        assert_eq!(config.notice_timeout_ms, 5000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = PortfolioConfig::from_json_str(r#"{"variant": "public"}"#).expect("読込失敗");
        assert_eq!(config.variant, Variant::Public);
        assert_eq!(config.password_hash, DEFAULT_PASSWORD_HASH);
    }

    #[test]
    fn test_invalid_hash_rejected() {
        let result = PortfolioConfig::from_json_str(r#"{"passwordHash": "xyz"}"#);
        assert!(matches!(result, Err(Error::InvalidDigest(_))));
    }

    #[test]
    fn test_zero_gallery_limit_rejected() {
        let result = PortfolioConfig::from_json_str(r#"{"galleryLimit": 0}"#);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_malformed_json_rejected() {
        let result = PortfolioConfig::from_json_str("{ variant: ");
        assert!(matches!(result, Err(Error::Json(_))));
    }

    #[test]
    fn test_serialize_camel_case() {
        let json = serde_json::to_string_pretty(&PortfolioConfig::default()).expect("シリアライズ失敗");
        assert!(json.contains("\"passwordHash\""));
        assert!(json.contains("\"noticeTimeoutMs\": 5000"));
        assert!(json.contains("\"variant\": \"editor\""));
    }
}
