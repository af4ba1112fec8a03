pub mod auth_panel;
pub mod header;
pub mod media_overlay;
pub mod notice_banner;
pub mod password_panel;
pub mod project_form;
pub mod project_grid;
