//! エラー型定義

use thiserror::Error;

/// ストレージ操作のエラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// 保存領域の上限超過（ブラウザの QuotaExceededError）
    #[error("storage quota exceeded")]
    QuotaExceeded,

    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("storage backend error: {0}")]
    Backend(String),
}

/// 認証ゲートのエラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Incorrect password. Please try again.")]
    IncorrectPassword,

    #[error("New passwords do not match. Please try again.")]
    PasswordMismatch,

    #[error("New password cannot be empty.")]
    EmptyPassword,

    #[error("Current password is incorrect.")]
    IncorrectCurrentPassword,

    #[error("You must be logged in to do that.")]
    NotAuthenticated,

    #[error("Session storage error: {0}")]
    Storage(#[from] StorageError),
}

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("File read error ({name}): {reason}")]
    FileRead { name: String, reason: String },

    #[error("Config error: {0}")]
    Config(String),

    #[error("Invalid digest: {0}")]
    InvalidDigest(String),

    #[error(transparent)]
    Auth(#[from] AuthError),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
