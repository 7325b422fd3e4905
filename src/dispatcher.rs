use crate::error::{RemError, Result};
use crate::history::TIME_FORMAT;
use crate::mode::NotificationMode;
use chrono::{DateTime, Local};
use log::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PopupId(pub u64);

/// Whatever actually puts pixels (or text) in front of the user.
pub trait DisplaySurface {
    fn notifications_supported(&self) -> bool;

    fn show_native_notification(&mut self, title: &str, body: &str) -> Result<()>;

    /// Show an always-on-top, non-focusable popup near a screen corner.
    fn show_popup(&mut self, message: &str, time: &str) -> Result<PopupId>;

    fn close_popup(&mut self, popup: PopupId) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Notified,
    PopupShown,
    /// Native notifications are unsupported or disabled; nothing was shown.
    Unsupported,
}

impl Delivery {
    pub fn delivered(self) -> bool {
        !matches!(self, Delivery::Unsupported)
    }
}

pub struct Dispatcher {
    surface: Option<Box<dyn DisplaySurface>>,
    popup: Option<PopupId>,
    title: String,
    native_enabled: bool,
}

impl Dispatcher {
    pub fn new(title: impl Into<String>, native_enabled: bool) -> Self {
        Self {
            surface: None,
            popup: None,
            title: title.into(),
            native_enabled,
        }
    }

    pub fn attach(&mut self, surface: Box<dyn DisplaySurface>) {
        self.close_all();
        self.surface = Some(surface);
    }

    pub fn detach(&mut self) -> Option<Box<dyn DisplaySurface>> {
        self.close_all();
        self.surface.take()
    }

    pub fn has_surface(&self) -> bool {
        self.surface.is_some()
    }

    #[cfg(test)]
    pub fn has_popup(&self) -> bool {
        self.popup.is_some()
    }

    pub fn dispatch(
        &mut self,
        message: &str,
        mode: NotificationMode,
        now: DateTime<Local>,
    ) -> Result<Delivery> {
        if self.surface.is_none() {
            return Err(RemError::SurfaceUnavailable);
        }

        match mode {
            NotificationMode::System => self.notify(message),
            NotificationMode::Custom => self.popup(message, now),
        }
    }

    fn notify(&mut self, message: &str) -> Result<Delivery> {
        let surface = self.surface.as_mut().ok_or(RemError::SurfaceUnavailable)?;

        if !self.native_enabled {
            warn!("native notifications are disabled in the config, skipping");
            return Ok(Delivery::Unsupported);
        }
        if !surface.notifications_supported() {
            warn!("native notifications are not supported on this system");
            return Ok(Delivery::Unsupported);
        }

        surface.show_native_notification(&self.title, message)?;
        Ok(Delivery::Notified)
    }

    fn popup(&mut self, message: &str, now: DateTime<Local>) -> Result<Delivery> {
        if self.popup.is_some() {
            debug!("replacing current popup");
            self.close_all();
        }

        let surface = self.surface.as_mut().ok_or(RemError::SurfaceUnavailable)?;
        let time = now.format(TIME_FORMAT).to_string();
        let id = surface.show_popup(message, &time)?;
        self.popup = Some(id);

        Ok(Delivery::PopupShown)
    }

    /// Discard the current popup, if any.
    pub fn close_all(&mut self) {
        let Some(id) = self.popup.take() else {
            return;
        };

        if let Some(surface) = self.surface.as_mut() {
            match surface.close_popup(id) {
                Ok(()) => debug!("popup {:?} closed", id),
                Err(e) => warn!("error while closing popup: {}", e),
            }
        }
    }
}
