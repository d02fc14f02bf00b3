use std::fmt::Write as _;

use anyhow::Result;

use geopin_core::{
    controller::{Effect, MapViewController},
    entities::{MarkerSet, PopupState},
    text,
};
use geopin_gateways::popup::popup_html;

/// How popups are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PopupFormat {
    #[default]
    Text,
    Html,
}

pub fn popup(popup: &PopupState, format: PopupFormat) -> Result<Option<String>> {
    let Some(content) = popup.content() else {
        return Ok(None);
    };
    let rendered = match format {
        PopupFormat::Text => text::popup_text(content),
        PopupFormat::Html => popup_html(content)?,
    };
    Ok(Some(rendered))
}

/// Alerts and notices, `None` for requests.
pub fn effect(effect: &Effect) -> Option<String> {
    match effect {
        Effect::Alert(alert) => Some(format!(
            "{}: {}",
            text::ALERT_TITLE,
            text::alert_message(alert)
        )),
        Effect::Notice(notice) => Some(text::notice_message(notice.kind).to_string()),
        Effect::ReverseGeocode { .. } | Effect::Search { .. } => None,
    }
}

fn markers(markers: &MarkerSet) -> String {
    if markers.is_empty() {
        return "none".to_string();
    }
    markers
        .iter()
        .map(|m| format!("{} at {}", m.kind, m.pos.to_map_point()))
        .collect::<Vec<_>>()
        .join("; ")
}

pub fn state(ctrl: &MapViewController, format: PopupFormat) -> Result<String> {
    let view = ctrl.view();
    let mut out = String::new();
    writeln!(out, "center: {}", view.center_pos())?;
    writeln!(out, "zoom: {}", view.zoom)?;
    match ctrl.user_location() {
        Some(pos) => writeln!(out, "location: {pos}")?,
        None => writeln!(out, "location: unknown")?,
    }
    writeln!(out, "markers: {}", markers(ctrl.markers()))?;
    if ctrl.config().features.layer_visibility {
        let layer = if ctrl.layer_visible() { "shown" } else { "hidden" };
        writeln!(out, "layer: {layer}")?;
    }
    writeln!(
        out,
        "view: {}",
        text::fullscreen_css_class(ctrl.is_fullscreen())
    )?;
    let controls = if ctrl.controls_hidden() { "hidden" } else { "shown" };
    writeln!(out, "controls: {controls}")?;
    match popup(ctrl.popup(), format)? {
        Some(popup) => {
            writeln!(out, "popup:")?;
            for line in popup.lines() {
                writeln!(out, "  {line}")?;
            }
        }
        None => writeln!(out, "popup: none")?,
    }
    Ok(out)
}
