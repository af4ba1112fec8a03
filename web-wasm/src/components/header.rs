//! ヘッダーコンポーネント

use leptos::prelude::*;
use portfolio_common::Variant;

#[component]
pub fn Header(variant: Variant) -> impl IntoView {
    let subtitle = match variant {
        Variant::Editor => "Manage your projects",
        Variant::Public => "Selected work",
    };

    view! {
        <header class="header">
            <h1>"Portfolio"</h1>
            <p class="text-muted">{subtitle}</p>
            <nav>
                <a href="#projects">"Projects"</a>
            </nav>
        </header>
    }
}
