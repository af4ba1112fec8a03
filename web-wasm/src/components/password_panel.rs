//! パスワード変更パネル
//!
//! ログイン前は案内だけを表示する。

use leptos::html::Input;
use leptos::prelude::*;
use portfolio_common::{PasswordChange, PasswordFieldReset};

#[component]
pub fn PasswordPanel<F>(authenticated: ReadSignal<bool>, on_change: F) -> impl IntoView
where
    F: Fn(PasswordChange) -> PasswordFieldReset + 'static + Clone + Send + Sync,
{
    let current_ref: NodeRef<Input> = NodeRef::new();
    let new_ref: NodeRef<Input> = NodeRef::new();
    let confirm_ref: NodeRef<Input> = NodeRef::new();

    let value_of = |node: NodeRef<Input>| node.get().map(|input| input.value()).unwrap_or_default();
    let clear = |node: NodeRef<Input>| {
        if let Some(input) = node.get() {
            input.set_value("");
        }
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let change = PasswordChange {
            current: value_of(current_ref),
            new: value_of(new_ref),
            confirm: value_of(confirm_ref),
        };
        match on_change(change) {
            PasswordFieldReset::Keep => {}
            PasswordFieldReset::Current => clear(current_ref),
            PasswordFieldReset::All => {
                clear(current_ref);
                clear(new_ref);
                clear(confirm_ref);
            }
        }
    };

    view! {
        <div class="password-container">
            <h2>"Change Password"</h2>
            <Show
                when=move || authenticated.get()
                fallback=|| view! { <p class="text-muted">"Log in to change the editor password."</p> }
            >
                <form id="password-form" on:submit=on_submit.clone()>
                    <div class="form-group">
                        <label for="current-password">"Current Password"</label>
                        <input type="password" id="current-password" node_ref=current_ref required />
                    </div>
                    <div class="form-group">
                        <label for="new-password">"New Password"</label>
                        <input type="password" id="new-password" node_ref=new_ref />
                    </div>
                    <div class="form-group">
                        <label for="confirm-password">"Confirm New Password"</label>
                        <input type="password" id="confirm-password" node_ref=confirm_ref />
                    </div>
                    <button type="submit" class="btn btn-primary">"Change Password"</button>
                </form>
            </Show>
        </div>
    }
}
