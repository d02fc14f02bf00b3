mod controls;
mod map;
mod notice;
mod search;

pub use self::{controls::*, map::*, notice::*, search::*};
