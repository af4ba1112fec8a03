//! 全画面メディアモーダル
//!
//! 最初に開かれるまでDOMを作らない。背景または×で閉じる。

use leptos::prelude::*;
use portfolio_common::MediaModal;
use web_sys::MouseEvent;

/// 閉じた後もDOMは残すので、表示はスタイルで切り替える
fn overlay_display(modal: &MediaModal) -> &'static str {
    if modal.is_active() {
        "flex"
    } else {
        "none"
    }
}

/// 閉じている間は中身を外し、動画の再生を止める
fn overlay_content(modal: &MediaModal) -> String {
    if modal.is_active() {
        modal.content_markup()
    } else {
        String::new()
    }
}

#[component]
pub fn MediaOverlay<F>(modal: ReadSignal<MediaModal>, on_close: F) -> impl IntoView
where
    F: Fn(()) + 'static + Clone + Send + Sync,
{
    view! {
        <Show when=move || modal.with(|m| m.is_created())>
            {
                let on_backdrop = {
                    let on_close = on_close.clone();
                    move |ev: MouseEvent| {
                        // 中身のクリックでは閉じない
                        if ev.target() == ev.current_target() {
                            on_close(());
                        }
                    }
                };
                let on_close_button = {
                    let on_close = on_close.clone();
                    move |_: MouseEvent| on_close(())
                };
                view! {
                    <div
                        id="media-modal"
                        class=move || if modal.with(|m| m.is_active()) { "modal active" } else { "modal" }
                        style:display=move || modal.with(overlay_display)
                        on:click=on_backdrop
                    >
                        <span class="modal-close" on:click=on_close_button>"×"</span>
                        <div class="modal-content" inner_html=move || modal.with(overlay_content)></div>
                    </div>
                }
            }
        </Show>
    }
}
