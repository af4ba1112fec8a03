//! 簡易パスワードゲート
//!
//! 入力されたパスワードのSHA-256ダイジェストを基準ダイジェストと比較し、
//! 一致すればセッションストレージにフラグを書く。
//! 基準ダイジェストはクライアントに埋め込まれているため、
//! 気軽な編集を防ぐ程度の仕組みであり、認証基盤ではない。

use crate::error::{AuthError, Error, Result};
use crate::storage::KeyValueStore;
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;
use tracing::{info, warn};

/// セッションストレージのキー
pub const AUTH_KEY: &str = "portfolio_auth";

/// ログイン中を表すフラグ値
pub const AUTH_FLAG: &str = "true";

/// 既定パスワード "portfolio2024" のダイジェスト
pub const DEFAULT_PASSWORD_HASH: &str =
    "e191cdbf5bb9d55705f93723ddb61646823e72c051db47ead5dbf7446b1d0297";

/// パスワードのSHA-256ダイジェスト
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PasswordDigest([u8; 32]);

impl PasswordDigest {
    /// UTF-8バイト列のダイジェストを計算
    pub fn compute(password: &str) -> Self {
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&Sha256::digest(password.as_bytes()));
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl FromStr for PasswordDigest {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let bytes = hex::decode(s.trim()).map_err(|e| Error::InvalidDigest(e.to_string()))?;
        let bytes: [u8; 32] = bytes.try_into().map_err(|b: Vec<u8>| {
            Error::InvalidDigest(format!("expected 32 bytes, got {}", b.len()))
        })?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PasswordDigest({})", self.to_hex())
    }
}

/// ログイン状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    LoggedOut,
    LoggedIn,
}

/// パスワード変更フォームの入力
#[derive(Debug, Clone, Default)]
pub struct PasswordChange {
    pub current: String,
    pub new: String,
    pub confirm: String,
}

/// 認証ゲート
#[derive(Debug)]
pub struct AuthGate<S> {
    session: S,
    key: String,
    reference: PasswordDigest,
}

impl<S: KeyValueStore> AuthGate<S> {
    pub fn new(session: S, key: impl Into<String>, reference: PasswordDigest) -> Self {
        Self {
            session,
            key: key.into(),
            reference,
        }
    }

    /// セッションフラグから現在の状態を判定
    ///
    /// 値が "true" 以外、または読めない場合はログアウト扱い。
    pub fn state(&self) -> AuthState {
        match self.session.get_item(&self.key) {
            Ok(Some(flag)) if flag == AUTH_FLAG => AuthState::LoggedIn,
            _ => AuthState::LoggedOut,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.state() == AuthState::LoggedIn
    }

    /// 基準ダイジェストと一致するか
    pub fn verify(&self, password: &str) -> bool {
        PasswordDigest::compute(password).as_bytes() == self.reference.as_bytes()
    }

    pub fn login(&mut self, password: &str) -> std::result::Result<(), AuthError> {
        if !self.verify(password) {
            warn!("login rejected: digest mismatch");
            return Err(AuthError::IncorrectPassword);
        }
        self.session.set_item(&self.key, AUTH_FLAG)?;
        info!("logged in");
        Ok(())
    }

    pub fn logout(&mut self) -> std::result::Result<(), AuthError> {
        self.session.remove_item(&self.key)?;
        info!("logged out");
        Ok(())
    }

    /// 基準ダイジェストをメモリ上だけで差し替える
    ///
    /// 確認入力の不一致 → 空のパスワード → 現パスワード誤り の順に検証する。
    pub fn change_password(
        &mut self,
        change: &PasswordChange,
    ) -> std::result::Result<PasswordDigest, AuthError> {
        if !self.is_authenticated() {
            return Err(AuthError::NotAuthenticated);
        }
        if change.new != change.confirm {
            return Err(AuthError::PasswordMismatch);
        }
        if change.new.is_empty() {
            return Err(AuthError::EmptyPassword);
        }
        if !self.verify(&change.current) {
            warn!("password change rejected: current password mismatch");
            return Err(AuthError::IncorrectCurrentPassword);
        }

        self.reference = PasswordDigest::compute(&change.new);
        info!("reference digest replaced in memory");
        Ok(self.reference)
    }
}

/// パスワード変更後にコンソールへ出す手順
///
/// 変更はメモリ上だけなので、恒久化は設定ファイルの手動編集による。
pub fn rotation_instructions(digest: &PasswordDigest) -> String {
    let rule = "=".repeat(80);
    format!(
        "{rule}
PASSWORD CHANGE SUCCESSFUL
{rule}
Your new password hash is:
{digest}

To make this change permanent:
1. Open web-wasm/portfolio.json in your editor
2. Find the line: \"passwordHash\": \"...\"
3. Replace the hash value with: \"{digest}\"
4. Rebuild and redeploy the site

SECURITY NOTE: Clear your browser console after copying the hash.
{rule}"
    )
}
