//! プロジェクト一覧
//!
//! カードのマークアップは portfolio-common の描画結果をそのまま流し込み、
//! 削除ボタンとサムネイルのクリックはグリッド上で委譲して拾う。

use leptos::prelude::*;
use portfolio_common::{MediaKind, ProjectId};
use wasm_bindgen::JsCast;
use web_sys::{Element, MouseEvent};

/// グリッド内でクリックされたもの
#[derive(Debug, Clone, PartialEq, Eq)]
enum GridAction {
    Delete(ProjectId),
    OpenMedia { src: String, kind: MediaKind },
}

fn classify_click(target: &Element) -> Option<GridAction> {
    let classes = target.class_list();
    if classes.contains("btn-delete") {
        let id = target.get_attribute("data-project-id")?.parse().ok()?;
        return Some(GridAction::Delete(id));
    }
    if classes.contains("media-thumbnail") {
        let src = target.get_attribute("src")?;
        let kind = MediaKind::from_attr(&target.get_attribute("data-media-type").unwrap_or_default());
        return Some(GridAction::OpenMedia { src, kind });
    }
    None
}

#[component]
pub fn ProjectGrid<FD, FM>(markup: ReadSignal<String>, on_delete: FD, on_open_media: FM) -> impl IntoView
where
    FD: Fn(ProjectId) + 'static + Clone,
    FM: Fn(String, MediaKind) + 'static + Clone,
{
    let on_click = move |ev: MouseEvent| {
        let Some(target) = ev.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
            return;
        };
        match classify_click(&target) {
            Some(GridAction::Delete(id)) => on_delete(id),
            Some(GridAction::OpenMedia { src, kind }) => on_open_media(src, kind),
            None => {}
        }
    };

    view! {
        <section id="projects" class="projects-section">
            <h2>"Projects"</h2>
            <div id="projects-grid" class="projects-grid" inner_html=move || markup.get() on:click=on_click></div>
        </section>
    }
}
