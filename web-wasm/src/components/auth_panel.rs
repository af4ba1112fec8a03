//! ログインフォーム

use leptos::html::Input;
use leptos::prelude::*;

#[component]
pub fn AuthPanel<F>(on_login: F) -> impl IntoView
where
    F: Fn(String) + 'static + Clone + Send + Sync,
{
    let password_ref: NodeRef<Input> = NodeRef::new();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let Some(input) = password_ref.get() else {
            return;
        };
        on_login(input.value());
        // 成否にかかわらず入力欄は空にする
        input.set_value("");
    };

    view! {
        <div class="auth-container">
            <h2>"Login"</h2>
            <form id="auth-form" on:submit=on_submit>
                <div class="form-group">
                    <label for="password">"Password"</label>
                    <input type="password" id="password" node_ref=password_ref required />
                </div>
                <button type="submit" class="btn btn-primary">"Login"</button>
            </form>
        </div>
    }
}
