use std::fmt::Write;

use crate::render::image::ImageSource;
use crate::render::projection::{ImageElement, RenderElement, TextElement};

/// Physical page size in inches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width_in: f64,
    pub height_in: f64,
}

pub const LETTER: PageSize = PageSize {
    width_in: 8.5,
    height_in: 11.0,
};

/// Renders a standalone printable page. Coordinates are CSS pixels from the
/// page's top-left corner.
pub fn render_html(title: &str, elements: &[RenderElement], page: PageSize) -> String {
    let mut body = String::new();
    for element in elements {
        match element {
            RenderElement::Text(t) => push_text(&mut body, t),
            RenderElement::Image(i) => push_image(&mut body, i),
        }
    }

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>
@page {{ size: {w}in {h}in; margin: 0; }}
html, body {{ margin: 0; padding: 0; }}
.page {{ position: relative; width: {w}in; height: {h}in; overflow: hidden; background: #fff; color: #000; font-family: serif; }}
.field {{ position: absolute; }}
.logo-placeholder {{ border: 1px dashed #9ca3af; color: #9ca3af; font: 10px sans-serif; display: flex; align-items: center; justify-content: center; }}
</style>
</head>
<body>
<div class="page">
{body}</div>
</body>
</html>
"#,
        title = escape(title),
        w = page.width_in,
        h = page.height_in,
    )
}

fn push_text(out: &mut String, t: &TextElement) {
    let mut style = format!(
        "left:{}px;top:{}px;font-size:{}px;font-weight:{};",
        t.x,
        t.y,
        t.font_size,
        if t.bold { "bold" } else { "normal" }
    );
    match t.width {
        Some(w) => {
            let _ = write!(style, "width:{w}px;white-space:normal;");
        }
        None => style.push_str("white-space:nowrap;"),
    }
    if let Some(lh) = t.line_height {
        let _ = write!(style, "line-height:{lh};");
    }
    if let Some(ls) = t.letter_spacing {
        let _ = write!(style, "letter-spacing:{ls}px;");
    }
    if let Some(family) = t.font_family.as_deref().and_then(font_family_list) {
        let _ = write!(style, "font-family:{family};");
    }

    let text = t
        .lines
        .iter()
        .map(|l| escape(l))
        .collect::<Vec<_>>()
        .join("<br>");

    let _ = writeln!(
        out,
        r#"<div class="field" data-key="{}" style="{}">{}</div>"#,
        escape(&t.key),
        escape(&style),
        text
    );
}

/// Keeps only characters that can appear in a plain family list such as
/// `Times New Roman, serif`, so the value cannot end the declaration.
fn font_family_list(raw: &str) -> Option<String> {
    let kept: String = raw
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '_' | ','))
        .collect();
    let kept = kept.trim();
    (!kept.is_empty()).then(|| kept.to_string())
}

fn push_image(out: &mut String, i: &ImageElement) {
    let height = i
        .height
        .map(|h| format!("{h}px"))
        .unwrap_or_else(|| "auto".to_string());

    match &i.source {
        ImageSource::DataUri(uri) => {
            let style = format!("left:{}px;top:{}px;width:{}px;height:{};", i.x, i.y, i.width, height);
            let _ = writeln!(
                out,
                r#"<img class="field" data-key="{key}" alt="{key}" src="{}" style="{}">"#,
                escape(uri),
                escape(&style),
                key = escape(&i.key),
            );
        }
        ImageSource::Placeholder => {
            // A box needs a definite height; square it when none is set.
            let height = i.height.unwrap_or(i.width);
            let style = format!(
                "left:{}px;top:{}px;width:{}px;height:{}px;",
                i.x, i.y, i.width, height
            );
            let _ = writeln!(
                out,
                r#"<div class="field logo-placeholder" data-key="{}" style="{}">LOGO</div>"#,
                escape(&i.key),
                escape(&style)
            );
        }
    }
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
