//! 拡大表示モーダルの状態

use crate::render::escape_html;
use crate::types::MediaKind;

/// モーダルに表示中のメディア
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalMedia {
    pub src: String,
    pub kind: MediaKind,
}

/// ページ内で共有される1つのモーダル
///
/// 初回 open で作られ、以後は閉じても破棄せず使い回す。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaModal {
    created: bool,
    active: bool,
    media: Option<ModalMedia>,
}

impl MediaModal {
    pub fn new() -> Self {
        Self::default()
    }

    /// 表示する。今回初めて作られた場合は true
    pub fn open(&mut self, src: impl Into<String>, kind: MediaKind) -> bool {
        let newly_created = !self.created;
        self.created = true;
        self.active = true;
        self.media = Some(ModalMedia {
            src: src.into(),
            kind,
        });
        newly_created
    }

    pub fn close(&mut self) {
        self.active = false;
    }

    pub fn is_created(&self) -> bool {
        self.created
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// `.modal-content` の中身
    pub fn content_markup(&self) -> String {
        match &self.media {
            Some(ModalMedia { src, kind: MediaKind::Image }) => {
                format!("<img src=\"{}\" alt=\"Full size\">", escape_html(src))
            }
            Some(ModalMedia { src, kind: MediaKind::Video }) => {
                format!("<video src=\"{}\" controls autoplay></video>", escape_html(src))
            }
            None => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modal_created_lazily_once() {
        let mut modal = MediaModal::new();
        assert!(!modal.is_created());

        assert!(modal.open("data:image/png;base64,AA==", MediaKind::Image));
        modal.close();
        assert!(!modal.open("data:video/mp4;base64,AA==", MediaKind::Video));
        assert!(modal.is_created());
    }

    #[test]
    fn test_modal_close_keeps_overlay() {
        let mut modal = MediaModal::new();
        modal.open("data:image/png;base64,AA==", MediaKind::Image);
        assert!(modal.is_active());

        modal.close();
        assert!(!modal.is_active());
        assert!(modal.is_created());
    }

    #[test]
    fn test_modal_content_markup() {
        let mut modal = MediaModal::new();
        assert_eq!(modal.content_markup(), "");

        modal.open("data:image/png;base64,AA==", MediaKind::Image);
        assert_eq!(
            modal.content_markup(),
            "<img src=\"data:image/png;base64,AA==\" alt=\"Full size\">"
        );

        modal.open("data:video/mp4;base64,AA==", MediaKind::Video);
        assert_eq!(
            modal.content_markup(),
            "<video src=\"data:video/mp4;base64,AA==\" controls autoplay></video>"
        );
    }
}
