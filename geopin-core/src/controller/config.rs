use std::time::Duration;

use crate::entities::{MapPoint, Zoom};

/// Sarijadi, Bandung
pub const DEFAULT_CENTER: MapPoint = MapPoint::new(-6.874_368_914_155_09, 107.576_343_524_773_24);
pub const DEFAULT_ZOOM: Zoom = 16.0;
pub const LOCATE_ZOOM: Zoom = 20.0;
pub const SEARCH_ZOOM: Zoom = 15.0;

const DEFAULT_SEARCH_NOTICE_DURATION: Duration = Duration::from_secs(3);
const DEFAULT_LAYER_NOTICE_DURATION: Duration = Duration::from_millis(1500);

/// Capabilities that differ between the deployments of the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Features {
    /// Offer controls for removing and restoring the map layers.
    /// Map clicks are ignored while the layers are removed.
    pub layer_visibility: bool,
    /// Allow searching while the map is shown in fullscreen mode.
    pub search_in_fullscreen: bool,
    /// Fetch the address again when returning to the user's location
    /// instead of reusing the address found after locating the user.
    pub relocate_refetches: bool,
}

impl Features {
    /// A single map layer and a button that hides the controls panel.
    pub const fn controls_toggle() -> Self {
        Self {
            layer_visibility: false,
            search_in_fullscreen: false,
            relocate_refetches: true,
        }
    }

    /// Explicit buttons for removing and restoring the map layers.
    pub const fn layer_toggle() -> Self {
        Self {
            layer_visibility: true,
            search_in_fullscreen: true,
            relocate_refetches: false,
        }
    }
}

impl Default for Features {
    fn default() -> Self {
        Self::controls_toggle()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub default_center: MapPoint,
    pub default_zoom: Zoom,
    pub locate_zoom: Zoom,
    pub search_zoom: Zoom,
    pub search_notice_duration: Duration,
    pub layer_notice_duration: Duration,
    pub features: Features,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_center: DEFAULT_CENTER,
            default_zoom: DEFAULT_ZOOM,
            locate_zoom: LOCATE_ZOOM,
            search_zoom: SEARCH_ZOOM,
            search_notice_duration: DEFAULT_SEARCH_NOTICE_DURATION,
            layer_notice_duration: DEFAULT_LAYER_NOTICE_DURATION,
            features: Features::default(),
        }
    }
}
