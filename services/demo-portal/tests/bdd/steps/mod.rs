//! BDD step definitions for the demo portal

pub mod lifecycle_steps;
pub mod submit_steps;

use demo_portal::render::{render, Content};
use demo_portal::state::DisplayState;

/// Text the page shows for the element with the given id
pub fn displayed_text(state: &DisplayState, id: &str) -> String {
    let update = render(state)
        .into_iter()
        .find(|u| u.id == id)
        .unwrap_or_else(|| panic!("no element '{}' rendered", id));
    match update.content {
        Content::Text(text) => text,
        Content::Html(html) => panic!("element '{}' holds html: {}", id, html),
    }
}
