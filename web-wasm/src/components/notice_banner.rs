//! 成功/エラーメッセージ表示

use leptos::prelude::*;
use portfolio_common::Notice;

#[component]
pub fn NoticeBanner(notice: ReadSignal<Option<Notice>>) -> impl IntoView {
    move || {
        notice.get().map(|n| {
            let class = n.css_class();
            view! { <div class=class>{n.text}</div> }
        })
    }
}
