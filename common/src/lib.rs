//! Portfolio Common Library
//!
//! 編集版と公開版(WASM)で共有される状態・保存・描画ロジック

pub mod app;
pub mod auth;
pub mod clock;
pub mod config;
pub mod error;
pub mod ingest;
pub mod modal;
pub mod render;
pub mod storage;
pub mod store;
pub mod types;

pub use app::{
    AppState, Notice, NoticeKind, PasswordChangeOutcome, PasswordFieldReset, PortfolioApp,
    ProjectDraft, ProjectSubmission, SubmitOutcome,
};
pub use auth::{AuthGate, AuthState, PasswordChange, PasswordDigest};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{PortfolioConfig, Variant};
pub use error::{AuthError, Error, Result, StorageError};
pub use ingest::{ingest_files, InMemoryFile, MediaFile};
pub use modal::{MediaModal, ModalMedia};
pub use render::{escape_html, render_projects, RenderOptions};
pub use storage::{KeyValueStore, MemoryStorage};
pub use store::ProjectStore;
pub use types::{Category, MediaAsset, MediaKind, Project, ProjectId};
