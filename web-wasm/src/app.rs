//! メインアプリケーションコンポーネント
//!
//! PortfolioApp（コントローラ）を StoredValue に1つだけ持ち、
//! 操作のたびにグリッドのマークアップと認証状態をシグナルへ反映する。

use crate::browser::BrowserStorage;
use crate::components::{
    auth_panel::AuthPanel, header::Header, media_overlay::MediaOverlay,
    notice_banner::NoticeBanner, password_panel::PasswordPanel, project_form::ProjectForm,
    project_grid::ProjectGrid,
};
use crate::config::load_config;
use crate::notice_timer::NoticeTimer;
use leptos::prelude::*;
use portfolio_common::app::MSG_CONFIRM_DELETE;
use portfolio_common::{
    MediaKind, MediaModal, Notice, PasswordChange, PasswordFieldReset, PortfolioApp,
    ProjectId, ProjectSubmission, Variant,
};
use tracing::error;

type WebPortfolio = PortfolioApp<BrowserStorage, BrowserStorage>;

/// 追加直後に一覧へスクロール
fn scroll_to_projects() {
    if let Some(section) = document().get_element_by_id("projects") {
        section.scroll_into_view();
    }
}

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    let config = load_config();
    let variant = config.variant;
    let notice_timeout_ms = config.notice_timeout_ms;

    let portfolio = match WebPortfolio::new(config, BrowserStorage::local(), BrowserStorage::session()) {
        Ok(portfolio) => portfolio,
        Err(e) => {
            error!(error = %e, "failed to start portfolio");
            return view! { <div class="message error">{e.to_string()}</div> }.into_any();
        }
    };
    let portfolio = StoredValue::new_local(portfolio);

    let (grid_markup, set_grid_markup) = signal(portfolio.with_value(|app| app.render()));
    let (authenticated, set_authenticated) = signal(portfolio.with_value(|app| app.is_authenticated()));
    let (notice, set_notice) = signal(None::<Notice>);
    let (modal, set_modal) = signal(MediaModal::new());
    let notice_timer = StoredValue::new_local(NoticeTimer::default());

    let refresh = move || {
        set_grid_markup.set(portfolio.with_value(|app| app.render()));
        set_authenticated.set(portfolio.with_value(|app| app.is_authenticated()));
    };

    // 一定時間後に消す。新しい通知は前の予約を取り消す
    let show_notice = move |next: Notice| {
        set_notice.set(Some(next));
        notice_timer.update_value(|timer| {
            timer.schedule(notice_timeout_ms, move || set_notice.set(None));
        });
    };

    let on_login = move |password: String| {
        if let Some(result) = portfolio.try_update_value(|app| app.login(&password)) {
            show_notice(result);
        }
        refresh();
    };

    let on_logout = move |_: ()| {
        if let Some(result) = portfolio.try_update_value(|app| app.logout()) {
            show_notice(result);
        }
        refresh();
    };

    // 追加できたときだけ true（フォームを空にしてよい）
    let on_submitted = move |submission: ProjectSubmission| -> bool {
        let Some(outcome) = portfolio.try_update_value(|app| app.submit_project(submission)) else {
            return false;
        };
        let added = outcome.is_added();
        show_notice(outcome.notice);
        refresh();
        if added {
            scroll_to_projects();
        }
        added
    };

    let on_delete = move |id: ProjectId| {
        let confirmed = gloo::dialogs::confirm(MSG_CONFIRM_DELETE);
        if let Some(Some(result)) = portfolio.try_update_value(|app| app.delete_project(id, confirmed)) {
            show_notice(result);
            refresh();
        }
    };

    let on_change_password = move |change: PasswordChange| -> PasswordFieldReset {
        let Some(outcome) = portfolio.try_update_value(|app| app.change_password(&change)) else {
            return PasswordFieldReset::Keep;
        };
        if let Some(instructions) = outcome.console_instructions {
            gloo::console::log!(instructions);
        }
        show_notice(outcome.notice);
        outcome.reset
    };

    let on_open_media = move |src: String, kind: MediaKind| {
        portfolio.update_value(|app| {
            app.open_media(src, kind);
        });
        set_modal.set(portfolio.with_value(|app| app.modal().clone()));
    };

    let on_close_media = move |_: ()| {
        portfolio.update_value(|app| app.close_media());
        set_modal.set(portfolio.with_value(|app| app.modal().clone()));
    };

    let editor_panels = (variant == Variant::Editor).then(|| {
        view! {
            <NoticeBanner notice=notice />
            <Show
                when=move || authenticated.get()
                fallback=move || view! { <AuthPanel on_login=on_login /> }
            >
                <ProjectForm on_submitted=on_submitted on_logout=on_logout />
            </Show>
            <PasswordPanel authenticated=authenticated on_change=on_change_password />
        }
    });

    view! {
        <div class="container">
            <Header variant=variant />
            <ProjectGrid markup=grid_markup on_delete=on_delete on_open_media=on_open_media />
            {editor_panels}
            <MediaOverlay modal=modal on_close=on_close_media />
        </div>
    }
    .into_any()
}
