#[cfg(feature = "desktop")]
pub mod desktop;
#[cfg(any(feature = "desktop", test))]
pub mod fallback;
pub mod terminal;

use crate::dispatcher::DisplaySurface;
use log::info;

/// Pick the display surface for this build: the desktop notification
/// daemon when compiled in and not refused, the terminal otherwise.
#[cfg_attr(not(feature = "desktop"), allow(unused_variables))]
pub fn default_surface(app_name: &str, force_terminal: bool) -> Box<dyn DisplaySurface> {
    #[cfg(feature = "desktop")]
    {
        if !force_terminal {
            let desktop = desktop::DesktopSurface::new(app_name)
                .inspect(|_| info!("using desktop notifications"))
                .inspect_err(|e| log::warn!("{}, popups go to the terminal", e))
                .ok();
            return Box::new(fallback::FallbackSurface::new(
                desktop,
                terminal::TerminalSurface::stdout(),
            ));
        }
    }

    info!("using terminal display");
    Box::new(terminal::TerminalSurface::stdout())
}
