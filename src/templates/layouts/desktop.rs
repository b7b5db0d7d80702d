use maud::{html, Markup, DOCTYPE};

pub fn desktop_layout(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                link rel="stylesheet" href="/static/css/style.css";
                link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";
                script src="https://d3js.org/d3.v7.min.js" {}
                script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js" {}
            }
            body {
                header class="flex items-center justify-between px-6 py-3 shadow" {
                    h3 { "Airbnb Europe" }
                    nav {
                        ul {
                            li { a href="/" { "Dashboard" } }
                        }
                    }
                }
                (content)
            }
        }
    }
}
