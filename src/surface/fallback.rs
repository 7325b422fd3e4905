use crate::dispatcher::{DisplaySurface, PopupId};
use crate::error::Result;

/// Sends everything to `primary` when it came up, otherwise popups go to
/// `fallback` and native notifications are reported unsupported.
pub struct FallbackSurface<P, F> {
    primary: Option<P>,
    fallback: F,
}

impl<P: DisplaySurface, F: DisplaySurface> FallbackSurface<P, F> {
    pub fn new(primary: Option<P>, fallback: F) -> Self {
        Self { primary, fallback }
    }

    fn active(&mut self) -> &mut dyn DisplaySurface {
        match self.primary.as_mut() {
            Some(primary) => primary,
            None => &mut self.fallback,
        }
    }
}

impl<P: DisplaySurface, F: DisplaySurface> DisplaySurface for FallbackSurface<P, F> {
    fn notifications_supported(&self) -> bool {
        self.primary
            .as_ref()
            .is_some_and(|p| p.notifications_supported())
    }

    fn show_native_notification(&mut self, title: &str, body: &str) -> Result<()> {
        self.active().show_native_notification(title, body)
    }

    fn show_popup(&mut self, message: &str, time: &str) -> Result<PopupId> {
        self.active().show_popup(message, time)
    }

    fn close_popup(&mut self, popup: PopupId) -> Result<()> {
        self.active().close_popup(popup)
    }
}
