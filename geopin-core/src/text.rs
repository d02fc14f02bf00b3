//! User facing texts (Indonesian).

use crate::{
    controller::{Alert, NoticeKind},
    entities::{PopupBody, PopupContent, PopupTitle},
};

pub const LABEL_ADDRESS: &str = "Alamat:";
pub const LABEL_COORDINATES: &str = "Koordinat:";
pub const NO_ADDRESS: &str = "Tidak ada data lokasi";
pub const LOOKUP_FAILED: &str = "Data lokasi tidak ditemukan.";
pub const ALERT_TITLE: &str = "Error";

pub const fn popup_title(title: PopupTitle) -> &'static str {
    match title {
        PopupTitle::Location => "Lokasi Anda",
        PopupTitle::SearchResult => "Hasil Pencarian",
    }
}

pub fn alert_message(alert: &Alert) -> &'static str {
    match alert {
        Alert::LocationUnavailable(_) => {
            "Gagal mengambil lokasi. Pastikan Anda memberikan izin akses lokasi."
        }
        Alert::LocationNotYetAvailable => {
            "Lokasi Anda belum tersedia. Pastikan Anda memberikan izin akses lokasi."
        }
    }
}

pub const fn notice_message(kind: NoticeKind) -> &'static str {
    match kind {
        NoticeKind::EmptyQuery => "Masukkan nama lokasi terlebih dahulu.",
        NoticeKind::NotFound => "Lokasi tidak ditemukan.",
        NoticeKind::SearchFailed => "Gagal mencari lokasi. Silakan coba lagi.",
        NoticeKind::LayerHidden => "Layer peta disembunyikan.",
        NoticeKind::LayerShown => "Layer peta ditampilkan.",
    }
}

pub const fn controls_toggle_label(controls_hidden: bool) -> &'static str {
    if controls_hidden {
        "Show UI"
    } else {
        "Hide UI"
    }
}

pub const fn fullscreen_toggle_label(fullscreen: bool) -> &'static str {
    if fullscreen {
        "Switch to Webpage"
    } else {
        "Switch to Fullscreen"
    }
}

/// CSS class of the map container.
pub const fn fullscreen_css_class(fullscreen: bool) -> &'static str {
    if fullscreen {
        "fullscreen"
    } else {
        "webpage"
    }
}

/// The address line of a popup, e.g. `Alamat: Jalan Sarijadi`.
///
/// A failed lookup is reported without the label.
pub fn address_line(body: &PopupBody) -> String {
    match body {
        PopupBody::Address(address) => format!("{LABEL_ADDRESS} {address}"),
        PopupBody::NoAddress => format!("{LABEL_ADDRESS} {NO_ADDRESS}"),
        PopupBody::LookupFailed => LOOKUP_FAILED.to_string(),
    }
}

pub fn coordinates_line(content: &PopupContent) -> String {
    format!("{LABEL_COORDINATES} {}", content.pos.to_lng_lat_string())
}

/// Plain text rendering of the popup, one line per element.
pub fn popup_text(content: &PopupContent) -> String {
    [
        popup_title(content.title).to_string(),
        address_line(&content.body),
        coordinates_line(content),
    ]
    .join("\n")
}
