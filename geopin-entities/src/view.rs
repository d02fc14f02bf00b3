use crate::geo::*;

pub type Zoom = f64;

/// What the map viewport currently shows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewState {
    pub center: ProjectedPoint,
    pub zoom: Zoom,
}

impl ViewState {
    pub fn new(center: MapPoint, zoom: Zoom) -> Self {
        Self {
            center: center.to_projected(),
            zoom,
        }
    }

    pub fn center_pos(&self) -> MapPoint {
        self.center.to_map_point()
    }

    pub fn recenter(&mut self, center: ProjectedPoint, zoom: Zoom) {
        self.center = center;
        self.zoom = zoom;
    }
}
