use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use crate::views::{AssignmentsView, ResultsView, SessionView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", AssignmentsView)] Assignments {},
        #[route("/assignments/:assignment_id", SessionView)] Session { assignment_id: u64 },
        #[route("/assignments/:assignment_id/results", ResultsView)] Results { assignment_id: u64 },
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            Sidebar {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn Sidebar() -> Element {
    rsx! {
        nav { class: "sidebar",
            h1 { "Quiz" }
            ul {
                li { Link { to: Route::Assignments {}, "Assignments" } }
            }
        }
    }
}
