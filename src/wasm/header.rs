use web_sys::{Document, Element};

use crate::error::Result;

pub const TITLE: &str = "Dot Screen";

/// Small dot-grid mark, `width` CSS pixels wide.
fn iso_svg(width: u32) -> String {
    let mut dots = String::new();
    for row in 0..3 {
        for col in 0..3 {
            let r = if row == 1 && col == 1 { 5 } else { 3 };
            dots.push_str(&format!(
                r#"<circle cx="{}" cy="{}" r="{r}" fill="currentColor"/>"#,
                8 + col * 14,
                8 + row * 14,
            ));
        }
    }
    format!(r#"<svg class="iso" width="{width}" height="{width}" viewBox="0 0 44 44" aria-hidden="true">{dots}</svg>"#)
}

/// Static page header; sits above the canvas and ignores the pointer.
pub fn mount(document: &Document, parent: &Element) -> Result<Element> {
    let header = document.create_element("header")?;
    header.set_class_name("header");
    header.set_inner_html(&iso_svg(44));

    let title = document.create_element("h1")?;
    title.set_class_name("sr-only");
    title.set_text_content(Some(TITLE));
    header.append_child(&title)?;

    parent.append_child(&header)?;
    Ok(header)
}
