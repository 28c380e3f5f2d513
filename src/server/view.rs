//! HTML rendering of a [`PageView`].
//!
//! Forms post back to the current URL (no `action` attribute), so the
//! mutation handler sees the current query string.

use crate::core::PageView;
use crate::domain::CatalogEntry;

/// Escape text for HTML element content and double-quoted attributes
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Render the whole page
pub fn render(view: &PageView) -> String {
    let mut html = String::from(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head><meta charset=\"utf-8\"><title>Pokedex</title></head>\n<body>\n<p class=\"page-title\">Pokedex</p>\n",
    );

    html.push_str(&filter_form(view));
    html.push_str("<main class=\"main-container\">\n");
    html.push_str(&grid(&view.displayed, "+", "capture"));
    html.push_str(&grid(&view.captured, "-", "release"));
    html.push_str("</main>\n</body>\n</html>\n");
    html
}

fn filter_form(view: &PageView) -> String {
    let filter = &view.state.filter;
    let mut html = String::from("<form method=\"post\">\n");

    html.push_str(&format!(
        "<input class=\"filter\" type=\"search\" name=\"filterName\" value=\"{}\">\n",
        escape(&filter.name)
    ));

    html.push_str("<select class=\"filter\" name=\"filterType\">\n<option value=\"\">All types</option>\n");
    for type_name in &view.types {
        let selected = if *type_name == filter.type_name { " selected" } else { "" };
        html.push_str(&format!(
            "<option value=\"{0}\"{1}>{0}</option>\n",
            escape(type_name),
            selected
        ));
    }
    html.push_str("</select>\n");

    html.push_str("<button type=\"submit\">Filter pokemon</button>\n");
    html.push_str("<input type=\"hidden\" name=\"intent\" value=\"filter\">\n</form>\n");
    html
}

fn grid(entries: &[CatalogEntry], button_label: &str, intent: &str) -> String {
    let mut html = String::from("<div class=\"pokemon-grid\">\n");

    for entry in entries {
        let name = escape(&entry.name);
        html.push_str("<div class=\"card\">\n");
        html.push_str(&format!(
            "<img src=\"{}\" alt=\"{}\">\n<p>{}</p>\n",
            escape(&entry.sprite_url),
            name,
            name
        ));

        html.push_str("<ul>");
        for type_name in &entry.types {
            html.push_str(&format!("<li>{}</li>", escape(type_name)));
        }
        html.push_str("</ul>\n");

        html.push_str(&format!(
            "<form method=\"post\"><input type=\"hidden\" name=\"intent\" value=\"{}\"><input type=\"hidden\" name=\"pokemonId\" value=\"{}\"><button type=\"submit\">{}</button></form>\n",
            intent, entry.id, button_label
        ));
        html.push_str("</div>\n");
    }

    html.push_str("</div>\n");
    html
}
