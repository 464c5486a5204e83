//! Modal notices
//!
//! Form confirmations and other one-line messages are queued here and shown
//! one at a time in a modal popup until dismissed.

use std::collections::VecDeque;

use imgui::{Ui, WindowFlags};

const NOTICE_POPUP: &str = "Notice##site_notice";

#[derive(Debug, Default)]
pub struct NoticeQueue {
    pending: VecDeque<String>,
}

impl NoticeQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: impl Into<String>) {
        let message = message.into();
        log::debug!("Notice: {}", message);
        self.pending.push_back(message);
    }

    /// The notice currently on screen
    pub fn current(&self) -> Option<&str> {
        self.pending.front().map(String::as_str)
    }

    /// Removes the current notice, revealing the next one
    pub fn dismiss(&mut self) -> Option<String> {
        self.pending.pop_front()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Draws the current notice as a modal popup
    pub fn render(&mut self, ui: &Ui) {
        let Some(message) = self.current().map(str::to_owned) else {
            return;
        };

        ui.open_popup(NOTICE_POPUP);
        let mut dismissed = false;
        ui.modal_popup_config(NOTICE_POPUP)
            .flags(WindowFlags::ALWAYS_AUTO_RESIZE | WindowFlags::NO_MOVE)
            .build(|| {
                ui.text(&message);
                ui.spacing();
                if ui.button_with_size("OK", [120.0, 0.0]) {
                    dismissed = true;
                    ui.close_current_popup();
                }
            });

        if dismissed {
            self.dismiss();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notices_are_shown_in_order() {
        let mut notices = NoticeQueue::new();
        assert_eq!(notices.current(), None);

        notices.push("first");
        notices.push(String::from("second"));
        assert_eq!(notices.len(), 2);
        assert_eq!(notices.current(), Some("first"));

        assert_eq!(notices.dismiss().as_deref(), Some("first"));
        assert_eq!(notices.current(), Some("second"));
        notices.dismiss();
        assert!(notices.is_empty());
        assert_eq!(notices.dismiss(), None);
    }
}
