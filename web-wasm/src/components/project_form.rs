//! プロジェクト追加フォーム
//!
//! 送信時に全ファイルを Data URL に読み込んでからコールバックへ渡す。

use crate::browser::BrowserFile;
use leptos::prelude::*;
use portfolio_common::{Category, ProjectDraft, ProjectSubmission};
use tracing::error;
use wasm_bindgen::JsCast;
use web_sys::{File, FormData, HtmlFormElement, MouseEvent};

#[component]
pub fn ProjectForm<FS, FL>(on_submitted: FS, on_logout: FL) -> impl IntoView
where
    FS: Fn(ProjectSubmission) -> bool + 'static + Clone + Send + Sync,
    FL: Fn(()) + 'static + Clone + Send + Sync,
{
    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let Some(form) = ev
            .target()
            .and_then(|target| target.dyn_into::<HtmlFormElement>().ok())
        else {
            return;
        };

        let on_submitted = on_submitted.clone();
        wasm_bindgen_futures::spawn_local(async move {
            match read_form(&form).await {
                Ok(submission) => {
                    // 拒否された場合は入力を残す
                    if on_submitted(submission) {
                        form.reset();
                    }
                }
                Err(reason) => error!(%reason, "could not read project form"),
            }
        });
    };

    let on_logout_click = move |_: MouseEvent| on_logout(());

    view! {
        <div class="upload-container">
            <div class="upload-header">
                <h2>"Add New Project"</h2>
                <button type="button" class="btn btn-secondary btn-small" on:click=on_logout_click>
                    "Logout"
                </button>
            </div>
            <form id="project-form" on:submit=on_submit>
                <div class="form-group">
                    <label for="title">"Project Title"</label>
                    <input type="text" id="title" name="title" required />
                </div>
                <div class="form-group">
                    <label for="description">"Description"</label>
                    <textarea id="description" name="description" rows="4" required></textarea>
                </div>
                <div class="form-group">
                    <label for="category">"Category"</label>
                    <select id="category" name="category">
                        {Category::KNOWN
                            .iter()
                            .map(|category| {
                                let value = category.as_str().to_string();
                                let label = category.label().to_string();
                                view! { <option value=value>{label}</option> }
                            })
                            .collect_view()}
                    </select>
                </div>
                <div class="form-group">
                    <label for="images">"Images"</label>
                    <input type="file" id="images" name="images" accept="image/*" multiple />
                </div>
                <div class="form-group">
                    <label for="videos">"Videos"</label>
                    <input type="file" id="videos" name="videos" accept="video/*" multiple />
                </div>
                <div class="form-group">
                    <label for="reports">"Reports"</label>
                    <input type="file" id="reports" name="reports" accept=".pdf,.doc,.docx,.txt" multiple />
                </div>
                <div class="form-group">
                    <label for="links">"Project Link"</label>
                    <input type="url" id="links" name="links" placeholder="https://" />
                </div>
                <button type="submit" class="btn btn-primary">"Add Project"</button>
            </form>
        </div>
    }
}

/// フォームの内容を読み取り、添付を取り込む
async fn read_form(form: &HtmlFormElement) -> Result<ProjectSubmission, String> {
    let data = FormData::new_with_form(form).map_err(|e| format!("{:?}", e))?;

    let text = |field: &str| data.get(field).as_string().unwrap_or_default();
    let draft = ProjectDraft {
        title: text("title"),
        description: text("description"),
        category: text("category"),
        links: text("links"),
    };

    let files = |field: &str| -> Vec<BrowserFile> {
        data.get_all(field)
            .iter()
            .filter_map(|value| value.dyn_into::<File>().ok())
            .map(BrowserFile::new)
            .collect()
    };
    let images = files("images");
    let videos = files("videos");
    let reports = files("reports");

    Ok(ProjectSubmission::ingest(draft, &images, &videos, &reports).await)
}
