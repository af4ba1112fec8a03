//! アプリケーション状態とコントローラ
//!
//! プロジェクト一覧・認証ゲート・モーダルを AppState にまとめ、
//! PortfolioApp が唯一の所有者としてフォーム操作を処理する。
//! 各操作は画面に出す Notice を返す。

use crate::auth::{rotation_instructions, AuthGate, PasswordChange, PasswordDigest};
use crate::clock::{Clock, SystemClock};
use crate::config::{PortfolioConfig, Variant};
use crate::error::{AuthError, Result, StorageError};
use crate::ingest::{ingest_files, MediaFile};
use crate::modal::MediaModal;
use crate::render::{render_projects, RenderOptions};
use crate::storage::KeyValueStore;
use crate::store::ProjectStore;
use crate::types::{Category, MediaAsset, MediaKind, Project, ProjectId};
use chrono::DateTime;
use tracing::info;

pub const MSG_PROJECT_ADDED: &str = "Project added successfully!";
pub const MSG_PROJECT_DELETED: &str = "Project deleted successfully!";
pub const MSG_STORAGE_FULL: &str =
    "Storage limit exceeded. Please use smaller files or delete old projects.";
pub const MSG_LOGGED_IN: &str = "Successfully logged in!";
pub const MSG_LOGGED_OUT: &str = "Logged out successfully.";
pub const MSG_PASSWORD_CHANGED: &str = "Password changed successfully! Check the browser console for your new password hash and instructions to make it permanent.";
pub const MSG_CONFIRM_DELETE: &str = "Are you sure you want to delete this project?";

/// 通知の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// フォーム上部に出すメッセージ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: text.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }

    pub fn css_class(&self) -> &'static str {
        match self.kind {
            NoticeKind::Success => "message success",
            NoticeKind::Error => "message error",
        }
    }
}

/// プロジェクトフォームのテキスト項目
#[derive(Debug, Clone, Default)]
pub struct ProjectDraft {
    pub title: String,
    pub description: String,
    pub category: String,
    pub links: String,
}

/// 添付ファイルを取り込み済みのフォーム送信内容
#[derive(Debug, Clone, Default)]
pub struct ProjectSubmission {
    pub draft: ProjectDraft,
    pub images: Vec<MediaAsset>,
    pub videos: Vec<MediaAsset>,
    pub reports: Vec<MediaAsset>,
}

impl ProjectSubmission {
    /// 3種類のファイル入力をそれぞれ取り込む
    pub async fn ingest<F: MediaFile>(
        draft: ProjectDraft,
        images: &[F],
        videos: &[F],
        reports: &[F],
    ) -> Self {
        Self {
            draft,
            images: ingest_files(images).await,
            videos: ingest_files(videos).await,
            reports: ingest_files(reports).await,
        }
    }
}

/// フォーム送信の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOutcome {
    pub notice: Notice,
    /// 追加されたプロジェクトのID（拒否された場合は None）
    pub added: Option<ProjectId>,
}

impl SubmitOutcome {
    /// フォームを空にしてよいか
    pub fn is_added(&self) -> bool {
        self.added.is_some()
    }
}

/// パスワード変更後にフォームのどこを消すか
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordFieldReset {
    Keep,
    Current,
    All,
}

/// パスワード変更の結果
#[derive(Debug, Clone)]
pub struct PasswordChangeOutcome {
    pub notice: Notice,
    pub reset: PasswordFieldReset,
    /// 成功時のみ、コンソールに出す恒久化手順
    pub console_instructions: Option<String>,
}

/// アプリケーション全体の状態
#[derive(Debug)]
pub struct AppState<L, S> {
    pub projects: ProjectStore<L>,
    pub auth: AuthGate<S>,
    pub modal: MediaModal,
}

/// 唯一のコントローラ
#[derive(Debug)]
pub struct PortfolioApp<L, S, C = SystemClock> {
    config: PortfolioConfig,
    state: AppState<L, S>,
    clock: C,
}

impl<L: KeyValueStore, S: KeyValueStore> PortfolioApp<L, S, SystemClock> {
    pub fn new(config: PortfolioConfig, local: L, session: S) -> Result<Self> {
        Self::with_clock(config, local, session, SystemClock)
    }
}

impl<L: KeyValueStore, S: KeyValueStore, C: Clock> PortfolioApp<L, S, C> {
    /// 保存済みプロジェクトを読み込んで起動
    pub fn with_clock(config: PortfolioConfig, local: L, session: S, clock: C) -> Result<Self> {
        let reference: PasswordDigest = config.reference_digest()?;
        let projects = ProjectStore::open(local, config.projects_key.clone());
        let auth = AuthGate::new(session, config.auth_key.clone(), reference);
        info!(
            variant = ?config.variant,
            projects = projects.len(),
            authenticated = auth.is_authenticated(),
            "portfolio initialized"
        );

        Ok(Self {
            config,
            state: AppState {
                projects,
                auth,
                modal: MediaModal::new(),
            },
            clock,
        })
    }

    pub fn projects(&self) -> &[Project] {
        self.state.projects.projects()
    }

    /// 編集版でログイン中か（公開版は常に false）
    pub fn is_authenticated(&self) -> bool {
        self.config.variant == Variant::Editor && self.state.auth.is_authenticated()
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            variant: self.config.variant,
            authenticated: self.is_authenticated(),
            gallery_limit: self.config.gallery_limit,
        }
    }

    /// プロジェクト一覧のマークアップ
    pub fn render(&self) -> String {
        render_projects(self.projects(), &self.render_options())
    }

    /// フォーム送信: 先頭に追加して保存
    ///
    /// 容量超過で保存できなくても、メモリ上には追加済みとして扱う。
    pub fn submit_project(&mut self, submission: ProjectSubmission) -> SubmitOutcome {
        if !self.is_authenticated() {
            return SubmitOutcome {
                notice: Notice::error(AuthError::NotAuthenticated.to_string()),
                added: None,
            };
        }

        let now = self.clock.now();
        let id = self
            .state
            .projects
            .next_id(u64::try_from(now.timestamp_millis()).unwrap_or_default());
        let created_at = i64::try_from(id)
            .ok()
            .and_then(DateTime::from_timestamp_millis)
            .unwrap_or(now);

        let ProjectSubmission {
            draft,
            images,
            videos,
            reports,
        } = submission;
        let links = Some(draft.links).filter(|l| !l.trim().is_empty());

        let project = Project {
            id,
            title: draft.title,
            description: draft.description,
            category: Category::parse(&draft.category),
            links,
            images,
            videos,
            reports,
            created_at,
        };
        info!(id, title = %project.title, "project added");
        self.state.projects.add(project);

        let notice = match self.persist() {
            Some(warning) => warning,
            None => Notice::success(MSG_PROJECT_ADDED),
        };
        SubmitOutcome {
            notice,
            added: Some(id),
        }
    }

    /// 削除（確認済みの場合のみ）。何もしなかったときは None
    pub fn delete_project(&mut self, id: ProjectId, confirmed: bool) -> Option<Notice> {
        if !confirmed || !self.is_authenticated() {
            return None;
        }
        self.state.projects.remove(id)?;
        info!(id, "project deleted");

        Some(match self.persist() {
            Some(warning) => warning,
            None => Notice::success(MSG_PROJECT_DELETED),
        })
    }

    pub fn login(&mut self, password: &str) -> Notice {
        match self.state.auth.login(password) {
            Ok(()) => Notice::success(MSG_LOGGED_IN),
            Err(e) => Notice::error(e.to_string()),
        }
    }

    pub fn logout(&mut self) -> Notice {
        match self.state.auth.logout() {
            Ok(()) => Notice::success(MSG_LOGGED_OUT),
            Err(e) => Notice::error(e.to_string()),
        }
    }

    /// 基準ダイジェストの差し替え（メモリ上のみ）
    pub fn change_password(&mut self, change: &PasswordChange) -> PasswordChangeOutcome {
        match self.state.auth.change_password(change) {
            Ok(digest) => PasswordChangeOutcome {
                notice: Notice::success(MSG_PASSWORD_CHANGED),
                reset: PasswordFieldReset::All,
                console_instructions: Some(rotation_instructions(&digest)),
            },
            Err(e) => PasswordChangeOutcome {
                reset: match e {
                    AuthError::IncorrectCurrentPassword => PasswordFieldReset::Current,
                    _ => PasswordFieldReset::Keep,
                },
                notice: Notice::error(e.to_string()),
                console_instructions: None,
            },
        }
    }

    pub fn open_media(&mut self, src: impl Into<String>, kind: MediaKind) -> bool {
        self.state.modal.open(src, kind)
    }

    pub fn close_media(&mut self) {
        self.state.modal.close();
    }

    pub fn modal(&self) -> &MediaModal {
        &self.state.modal
    }

    /// 保存に失敗したら表示用の警告を返す
    fn persist(&self) -> Option<Notice> {
        match self.state.projects.save() {
            Ok(()) => None,
            Err(StorageError::QuotaExceeded) => Some(Notice::error(MSG_STORAGE_FULL)),
            // その他の失敗はストア側でログ済み。一覧はメモリに残る
            Err(_) => None,
        }
    }
}
