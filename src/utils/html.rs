// src/utils/html.rs

/// Renders AI prose for display: line breaks become `<br>` and the result is
/// passed through ammonia's whitelist, so markup the model emits survives
/// (`<b>`, lists) while scripts and event handlers are stripped.
pub fn render_rich_text(input: &str) -> String {
    let with_breaks = input.replace("\r\n", "\n").replace('\n', "<br>");
    ammonia::clean(&with_breaks)
}
