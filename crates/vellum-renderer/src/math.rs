//! LaTeX math to MathML via pulldown-latex.
//!
//! Math errors are contained the same way diagram errors are: the document
//! render continues and the failing expression becomes an inline error span
//! carrying the original source.

use markdown_weaver_escape::escape_html;
use pulldown_latex::{
    Parser, Storage,
    config::{DisplayMode, RenderConfig},
    mathml::push_mathml,
};

/// Render a LaTeX expression (without `$` delimiters) to HTML.
///
/// Returns MathML on success, or a `math-error` span wrapping the escaped
/// source on any parse or render error.
pub fn math_to_html(latex: &str, display_mode: bool) -> String {
    match render_mathml(latex, display_mode) {
        Ok(mathml) => mathml,
        Err(message) => error_span(latex, &message, display_mode),
    }
}

fn render_mathml(latex: &str, display_mode: bool) -> Result<String, String> {
    let storage = Storage::new();
    let events: Vec<_> = Parser::new(latex, &storage).collect();

    let parse_errors: Vec<String> = events
        .iter()
        .filter_map(|e| e.as_ref().err().map(|err| err.to_string()))
        .collect();
    if !parse_errors.is_empty() {
        return Err(parse_errors.join("; "));
    }

    let config = RenderConfig {
        display_mode: if display_mode {
            DisplayMode::Block
        } else {
            DisplayMode::Inline
        },
        ..Default::default()
    };
    let mut mathml = String::new();
    push_mathml(&mut mathml, events.into_iter(), config).map_err(|e| e.to_string())?;
    Ok(mathml)
}

fn error_span(latex: &str, message: &str, display_mode: bool) -> String {
    let mode_class = if display_mode {
        "math-display"
    } else {
        "math-inline"
    };
    let mut escaped_latex = String::new();
    let mut escaped_message = String::new();
    // Writing into a String cannot fail.
    let _ = escape_html(&mut escaped_latex, latex);
    let _ = escape_html(&mut escaped_message, message);
    format!(
        r#"<span class="math math-error {mode_class}" title="{escaped_message}"><code>{escaped_latex}</code></span>"#
    )
}
