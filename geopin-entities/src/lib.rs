//#![deny(missing_docs)] // TODO: Complete missing documentation and enable this option
#![deny(missing_debug_implementations)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # geopin-entities
//!
//! Reusable, agnostic domain entities for the geopin map widget.
//!
//! The entities only contain generic functionality that does not reveal any application-specific business logic.

pub mod geo;
pub mod marker;
pub mod place;
pub mod popup;
pub mod view;

#[cfg(any(test, feature = "builders"))]
pub mod builders;
