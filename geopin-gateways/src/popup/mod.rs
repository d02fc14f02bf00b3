use askama::Template;
use geopin_core::{
    entities::{PopupBody, PopupContent},
    text,
};

#[derive(Template)]
#[template(path = "popup.html")]
struct PopupTemplate<'a> {
    title: &'a str,
    address_label: &'a str,
    address: Option<&'a str>,
    note: &'a str,
    coordinates_label: &'a str,
    coordinates: String,
}

/// Renders the inner HTML of the popup element.
///
/// The element starts with a button of class `close-btn`
/// the host binds to the close action.
pub fn popup_html(content: &PopupContent) -> Result<String, askama::Error> {
    let address = match &content.body {
        PopupBody::Address(address) => Some(address.as_str()),
        PopupBody::NoAddress => Some(text::NO_ADDRESS),
        PopupBody::LookupFailed => None,
    };
    PopupTemplate {
        title: text::popup_title(content.title),
        address_label: text::LABEL_ADDRESS,
        address,
        note: text::LOOKUP_FAILED,
        coordinates_label: text::LABEL_COORDINATES,
        coordinates: content.pos.to_lng_lat_string(),
    }
    .render()
}
