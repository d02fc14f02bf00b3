use std::collections::VecDeque;

use crate::{
    controller::{Effect, MapViewController},
    gateways::geocode::GeocodingGateway,
};

/// Performs the requests among `effects` synchronously and feeds the
/// outcome back into the controller.
///
/// Returns the remaining effects (alerts and notices) in the order they
/// were emitted.
pub fn dispatch<G>(ctrl: &mut MapViewController, gw: &G, effects: Vec<Effect>) -> Vec<Effect>
where
    G: GeocodingGateway + ?Sized,
{
    let mut queue = VecDeque::from(effects);
    let mut remaining = vec![];
    while let Some(effect) = queue.pop_front() {
        match effect {
            Effect::ReverseGeocode { ticket, pos } => {
                let res = gw.reverse(pos);
                queue.extend(ctrl.on_reverse_geocoded(ticket, res));
            }
            Effect::Search { ticket, query } => {
                let res = gw.search(&query);
                queue.extend(ctrl.on_search_results(ticket, res));
            }
            Effect::Alert(_) | Effect::Notice(_) => {
                remaining.push(effect);
            }
        }
    }
    remaining
}
