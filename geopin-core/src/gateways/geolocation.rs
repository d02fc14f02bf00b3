use thiserror::Error;

/// Why the position of the user could not be determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GeolocationError {
    #[error("Permission to access the location was denied")]
    PermissionDenied,
    #[error("The location is not available")]
    PositionUnavailable,
    #[error("Timed out while acquiring the location")]
    Timeout,
}

impl GeolocationError {
    /// Maps the error codes of the W3C Geolocation API.
    pub const fn from_code(code: u16) -> Self {
        match code {
            1 => Self::PermissionDenied,
            3 => Self::Timeout,
            _ => Self::PositionUnavailable,
        }
    }
}
