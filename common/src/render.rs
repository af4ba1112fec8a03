//! カード一覧のマークアップ生成
//!
//! (プロジェクト一覧, 認証状態, 表示バリアント) → HTML文字列 の純粋関数。
//! ユーザー入力はすべて escape_html を通してから埋め込む。

use crate::config::Variant;
use crate::types::{MediaKind, Project};
use std::fmt::Write as _;

/// 画像がないカードのサムネイル
pub const PLACEHOLDER_IMAGE: &str = "data:image/svg+xml,%3Csvg xmlns=\"http://www.w3.org/2000/svg\" width=\"400\" height=\"300\"%3E%3Crect fill=\"%23e5e7eb\" width=\"400\" height=\"300\"/%3E%3Ctext fill=\"%236b7280\" font-family=\"Arial\" font-size=\"20\" x=\"50%25\" y=\"50%25\" text-anchor=\"middle\" dominant-baseline=\"middle\"%3ENo Image%3C/text%3E%3C/svg%3E";

/// ギャラリーに並べるサムネイル数の既定値
pub const DEFAULT_GALLERY_LIMIT: usize = 4;

/// 描画オプション
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub variant: Variant,
    pub authenticated: bool,
    pub gallery_limit: usize,
}

impl RenderOptions {
    pub fn new(variant: Variant, authenticated: bool) -> Self {
        Self {
            variant,
            authenticated,
            gallery_limit: DEFAULT_GALLERY_LIMIT,
        }
    }

    /// 削除ボタンを出すか（公開版では常に出さない）
    pub fn can_delete(&self) -> bool {
        self.variant == Variant::Editor && self.authenticated
    }
}

/// HTMLの特殊文字5種をエスケープ
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// 一覧が空のときの案内文
pub fn empty_message(variant: Variant) -> &'static str {
    match variant {
        Variant::Editor => "No projects yet. Add your first project using the form below!",
        Variant::Public => "No projects available yet. Check back soon!",
    }
}

/// プロジェクト一覧全体
pub fn render_projects(projects: &[Project], options: &RenderOptions) -> String {
    if projects.is_empty() {
        return format!(
            "<div class=\"no-projects\"><p>{}</p></div>",
            empty_message(options.variant)
        );
    }

    projects
        .iter()
        .map(|project| render_project_card(project, options))
        .collect()
}

/// カード1枚
pub fn render_project_card(project: &Project, options: &RenderOptions) -> String {
    let thumbnail = project
        .thumbnail()
        .map(|image| image.data_url.as_str())
        .unwrap_or(PLACEHOLDER_IMAGE);

    let mut html = String::new();
    html.push_str("<div class=\"project-card\">");
    let _ = write!(
        html,
        "<img src=\"{}\" alt=\"{}\" class=\"project-image\">",
        escape_html(thumbnail),
        escape_html(&project.title)
    );
    html.push_str("<div class=\"project-content\">");
    let _ = write!(
        html,
        "<span class=\"project-category\">{}</span>",
        escape_html(project.category.label())
    );
    let _ = write!(
        html,
        "<h3 class=\"project-title\">{}</h3>",
        escape_html(&project.title)
    );
    let _ = write!(
        html,
        "<p class=\"project-description\">{}</p>",
        escape_html(&project.description)
    );

    html.push_str("<div class=\"project-media\">");
    for (count, icon, noun) in [
        (project.images.len(), "📸", "image"),
        (project.videos.len(), "🎥", "video"),
        (project.reports.len(), "📄", "document"),
    ] {
        if count > 0 {
            let _ = write!(html, "<span class=\"media-badge\">{} {} {}(s)</span>", icon, count, noun);
        }
    }
    html.push_str("</div>");

    html.push_str(&render_media_gallery(project, options.gallery_limit));

    if let Some(link) = project.links.as_deref().filter(|l| !l.is_empty()) {
        let _ = write!(
            html,
            "<div class=\"project-links\"><a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">🔗 View Project</a></div>",
            escape_html(link)
        );
    }

    if options.can_delete() {
        let _ = write!(
            html,
            "<button class=\"btn-delete\" data-project-id=\"{}\">Delete Project</button>",
            project.id
        );
    }

    html.push_str("</div></div>");
    html
}

/// 画像→動画の順で先頭 limit 件のサムネイル
pub fn render_media_gallery(project: &Project, limit: usize) -> String {
    let thumbnails: String = project
        .gallery_items()
        .take(limit)
        .map(|(kind, media)| match kind {
            MediaKind::Image => format!(
                "<img src=\"{}\" alt=\"{}\" class=\"media-thumbnail\" data-media-type=\"{}\">",
                escape_html(&media.data_url),
                escape_html(&media.name),
                kind.as_str()
            ),
            MediaKind::Video => format!(
                "<video src=\"{}\" class=\"media-thumbnail\" data-media-type=\"{}\"></video>",
                escape_html(&media.data_url),
                kind.as_str()
            ),
        })
        .collect();

    if thumbnails.is_empty() {
        return String::new();
    }
    format!("<div class=\"media-gallery\">{}</div>", thumbnails)
}
