// templates/pages/dashboard.rs

use crate::config::DashboardConfig;
use crate::templates::{
    components::{card, select},
    desktop_layout,
};
use maud::{html, Markup};

const DEFAULT_CITY: &str = "berlin";
const DEFAULT_PERIOD: &str = "weekday";

const SCRIPTS: [&str; 6] = [
    "/static/js/dataLoader.js",
    "/static/js/geoViz.js",
    "/static/js/priceViz.js",
    "/static/js/distanceViz.js",
    "/static/js/satisfactionViz.js",
    "/static/js/main.js",
];

pub fn dashboard_page(config: &DashboardConfig) -> Markup {
    desktop_layout(
        "Airbnb Listings Dashboard",
        html! {
            section class="controls" {
                (select("citySelect", "City", config.cities(), DEFAULT_CITY))
                (select("periodSelect", "Period", config.periods(), DEFAULT_PERIOD))
            }

            main class="grid" {
                (card("Listings map", html! { div id="geoViz" {} }))
                (card("Price distribution", html! { div id="priceViz" {} }))
                (card("Distance to centre", html! { div id="distanceViz" {} }))
                (card("Guest satisfaction", html! { div id="satisfactionViz" {} }))
            }

            @for src in SCRIPTS {
                script src=(src) {}
            }
        },
    )
}
