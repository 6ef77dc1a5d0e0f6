use dioxus::prelude::*;

use crate::components::navbar::Navbar;
use crate::pages::search_page::SearchPage;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Navbar)]

    #[route("/")]
    SearchPage {},
}
