// Print projection: finalized layout -> positioned elements -> printable HTML.

pub mod html;
pub mod image;
pub mod projection;

pub use html::{render_html, PageSize, LETTER};
pub use projection::{project, RenderElement};

use crate::layout::Layout;

/// Projects and renders a finalized layout as one letter-size page.
pub fn render_page(title: &str, layout: &Layout) -> String {
    render_html(title, &project(layout), LETTER)
}
