pub trait Builder {
    type Build;
    fn build() -> Self::Build;
}

pub use self::{place_builder::*, popup_builder::*};

pub mod place_builder {

    use super::*;
    use crate::{geo::*, place::*};

    #[derive(Debug)]
    pub struct PlaceBuild {
        place: Place,
    }

    impl PlaceBuild {
        pub fn display_name(mut self, name: &str) -> Self {
            self.place.display_name = name.into();
            self
        }
        pub fn pos(mut self, pos: MapPoint) -> Self {
            self.place.pos = pos;
            self
        }
        pub fn finish(self) -> Place {
            self.place
        }
    }

    impl Builder for Place {
        type Build = PlaceBuild;
        fn build() -> PlaceBuild {
            PlaceBuild {
                place: Place {
                    display_name: String::new(),
                    pos: MapPoint::default(),
                },
            }
        }
    }
}

pub mod popup_builder {

    use super::*;
    use crate::{geo::*, popup::*};

    #[derive(Debug)]
    pub struct PopupContentBuild {
        content: PopupContent,
    }

    impl PopupContentBuild {
        pub fn title(mut self, title: PopupTitle) -> Self {
            self.content.title = title;
            self
        }
        pub fn address(mut self, address: &str) -> Self {
            self.content.body = PopupBody::Address(address.into());
            self
        }
        pub fn body(mut self, body: PopupBody) -> Self {
            self.content.body = body;
            self
        }
        pub fn pos(mut self, pos: MapPoint) -> Self {
            self.content.pos = pos;
            self
        }
        pub fn finish(self) -> PopupContent {
            self.content
        }
    }

    impl Builder for PopupContent {
        type Build = PopupContentBuild;
        fn build() -> PopupContentBuild {
            PopupContentBuild {
                content: PopupContent {
                    title: PopupTitle::Location,
                    body: PopupBody::NoAddress,
                    pos: MapPoint::default(),
                },
            }
        }
    }
}
