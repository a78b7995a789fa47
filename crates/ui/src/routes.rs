use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use crate::views::{BrowseView, QuizView, StatsView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", QuizView)] Quiz {},
        #[route("/browse", BrowseView)] Browse {},
        #[route("/stats", StatsView)] Stats {},
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            Tabs {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn Tabs() -> Element {
    rsx! {
        nav { class: "tabs",
            h1 { "EchoQuiz" }
            ul {
                li { Link { to: Route::Quiz {}, "Quiz" } }
                li { Link { to: Route::Browse {}, "Browse" } }
                li { Link { to: Route::Stats {}, "Stats" } }
            }
        }
    }
}
