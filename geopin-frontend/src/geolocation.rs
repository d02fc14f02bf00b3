use leptos::*;
use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{GeolocationPosition, GeolocationPositionError};

use geopin_core::{entities::MapPoint, gateways::geolocation::GeolocationError};

/// Asks the browser for the current position of the device.
///
/// Exactly one of the callbacks is invoked.
pub fn current_position(on_success: Callback<MapPoint>, on_error: Callback<GeolocationError>) {
    let geolocation = match window().navigator().geolocation() {
        Ok(geolocation) => geolocation,
        Err(err) => {
            log::warn!("Geolocation is not supported: {err:?}");
            on_error.call(GeolocationError::PositionUnavailable);
            return;
        }
    };
    let success = Closure::once_into_js(move |pos: GeolocationPosition| {
        let coords = pos.coords();
        match MapPoint::try_from_lat_lng_deg(coords.latitude(), coords.longitude()) {
            Some(pos) => on_success.call(pos),
            None => {
                log::warn!(
                    "Invalid position: lat = {}, lng = {}",
                    coords.latitude(),
                    coords.longitude()
                );
                on_error.call(GeolocationError::PositionUnavailable);
            }
        }
    });
    let error = Closure::once_into_js(move |err: GeolocationPositionError| {
        log::debug!("Geolocation failed: {}", err.message());
        on_error.call(GeolocationError::from_code(err.code()));
    });
    if let Err(err) = geolocation.get_current_position_with_error_callback(
        success.unchecked_ref(),
        Some(error.unchecked_ref()),
    ) {
        log::warn!("Unable to request the current position: {err:?}");
        on_error.call(GeolocationError::PositionUnavailable);
    }
}
