use maud::{html, Markup};

pub mod error;

pub use error::html_error_response;

/// `<select>` whose options are both value and label.
pub fn select(id: &str, label: &str, options: &[String], selected: &str) -> Markup {
    html! {
        label for=(id) { (label) }
        select id=(id) onchange="updateAllVisualizations()" {
            @for option in options {
                option value=(option) selected[option == selected] { (capitalize(option)) }
            }
        }
    }
}

pub fn card(title: &str, body: Markup) -> Markup {
    html! {
        div class="card" {
            h2 { (title) }
            div class="card-body" {
                (body)
            }
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
