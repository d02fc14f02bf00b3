use strum::{Display, EnumString};

use crate::geo::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkerId(u64);

impl MarkerId {
    pub const fn to_raw(self) -> u64 {
        self.0
    }
}

/// The interaction that dropped a marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum MarkerKind {
    Locate,
    Click,
    Search,
    Relocate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub id: MarkerId,
    pub pos: ProjectedPoint,
    pub kind: MarkerKind,
}

/// The markers of the marker layer.
#[derive(Debug, Clone, Default)]
pub struct MarkerSet {
    markers: Vec<Marker>,
    next_id: u64,
}

impl MarkerSet {
    pub fn add(&mut self, pos: ProjectedPoint, kind: MarkerKind) -> MarkerId {
        self.next_id += 1;
        let id = MarkerId(self.next_id);
        self.markers.push(Marker { id, pos, kind });
        id
    }

    pub fn clear(&mut self) {
        self.markers.clear();
    }

    /// Removes all markers and adds a single new one.
    pub fn replace(&mut self, pos: ProjectedPoint, kind: MarkerKind) -> MarkerId {
        self.clear();
        self.add(pos, kind)
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Marker> {
        self.markers.iter()
    }

    pub fn last(&self) -> Option<&Marker> {
        self.markers.last()
    }
}
