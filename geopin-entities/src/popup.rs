use crate::geo::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupTitle {
    /// The popup describes the position of the user or a clicked position.
    Location,
    /// The popup describes a search result.
    SearchResult,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PopupBody {
    Address(String),
    /// The service answered but did not know an address.
    NoAddress,
    /// The lookup itself failed.
    LookupFailed,
}

impl PopupBody {
    pub fn from_lookup<E>(res: Result<Option<String>, E>) -> Self {
        match res {
            Ok(Some(address)) if !address.trim().is_empty() => Self::Address(address),
            Ok(_) => Self::NoAddress,
            Err(_) => Self::LookupFailed,
        }
    }

    pub fn address(&self) -> Option<&str> {
        match self {
            Self::Address(address) => Some(address),
            _ => None,
        }
    }
}

#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq)]
pub struct PopupContent {
    pub title : PopupTitle,
    pub body  : PopupBody,
    pub pos   : MapPoint,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum PopupState {
    #[default]
    Hidden,
    Visible {
        anchor: ProjectedPoint,
        content: PopupContent,
    },
}

impl PopupState {
    pub fn show(content: PopupContent) -> Self {
        Self::Visible {
            anchor: content.pos.to_projected(),
            content,
        }
    }

    pub const fn is_visible(&self) -> bool {
        matches!(self, Self::Visible { .. })
    }

    pub const fn content(&self) -> Option<&PopupContent> {
        match self {
            Self::Visible { content, .. } => Some(content),
            Self::Hidden => None,
        }
    }

    pub const fn anchor(&self) -> Option<ProjectedPoint> {
        match self {
            Self::Visible { anchor, .. } => Some(*anchor),
            Self::Hidden => None,
        }
    }
}
