use crate::dispatcher::{DisplaySurface, PopupId};
use crate::error::{RemError, Result};
use libnotify::{Notification, Urgency};

const EXPIRES_NEVER: i32 = 0;
const NOTIFICATION_TIMEOUT_MS: i32 = 10_000;

/// Display surface backed by the desktop notification daemon.
///
/// Custom popups become persistent critical notifications, which the
/// daemon keeps on top in its corner until they are closed.
pub struct DesktopSurface {
    popup: Option<(PopupId, Notification)>,
    next_id: u64,
}

impl DesktopSurface {
    /// Fails when no notification daemon can be reached.
    pub fn new(app_name: &str) -> Result<Self> {
        libnotify::init(app_name)
            .map_err(|e| RemError::Display(format!("error while initializing libnotify: {}", e)))?;

        Ok(Self {
            popup: None,
            next_id: 0,
        })
    }
}

impl DisplaySurface for DesktopSurface {
    fn notifications_supported(&self) -> bool {
        true
    }

    fn show_native_notification(&mut self, title: &str, body: &str) -> Result<()> {
        let notification = Notification::new(title, Some(body), None);
        notification.set_timeout(NOTIFICATION_TIMEOUT_MS);
        notification.set_urgency(Urgency::Normal);
        notification
            .show()
            .map_err(|e| RemError::Display(e.to_string()))
    }

    fn show_popup(&mut self, message: &str, time: &str) -> Result<PopupId> {
        let notification = Notification::new(time, Some(message), None);
        notification.set_timeout(EXPIRES_NEVER);
        notification.set_urgency(Urgency::Critical);
        notification
            .show()
            .map_err(|e| RemError::Display(e.to_string()))?;

        self.next_id += 1;
        let id = PopupId(self.next_id);
        self.popup = Some((id, notification));
        Ok(id)
    }

    fn close_popup(&mut self, popup: PopupId) -> Result<()> {
        match self.popup.take() {
            Some((id, notification)) if id == popup => notification
                .close()
                .map_err(|e| RemError::Display(e.to_string())),
            other => {
                self.popup = other;
                Ok(())
            }
        }
    }
}

impl Drop for DesktopSurface {
    fn drop(&mut self) {
        libnotify::uninit();
    }
}
