//! 通知の自動消去タイマー
//!
//! 予約は常に1つだけ。新しく予約すると前の Timeout を drop して取り消す。

use gloo::timers::callback::Timeout;

#[derive(Default)]
pub struct NoticeTimer {
    pending: Option<Timeout>,
}

impl NoticeTimer {
    pub fn schedule<F>(&mut self, millis: u32, on_expire: F)
    where
        F: FnOnce() + 'static,
    {
        self.pending = Some(Timeout::new(millis, on_expire));
    }
}
