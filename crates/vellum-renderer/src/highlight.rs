//! Class-based syntax highlighting for literal code listings.

use markdown_weaver_escape::escape_html;
use syntect::html::{ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

/// Class style shared by the highlighter and the generated theme CSS.
pub const CODE_CLASS_STYLE: ClassStyle = ClassStyle::Spaced;

#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum HighlightError {
    /// The caller falls back to a plain listing on this one.
    #[error("no syntax definition for `{language}`")]
    #[diagnostic(code(vellum_renderer::highlight::unknown_language))]
    UnknownLanguage { language: String },
    #[error(transparent)]
    #[diagnostic(code(vellum_renderer::highlight::parse))]
    Parse(#[from] syntect::Error),
}

pub struct Highlighter {
    syntaxes: SyntaxSet,
}

impl Default for Highlighter {
    fn default() -> Self {
        Self {
            syntaxes: SyntaxSet::load_defaults_newlines(),
        }
    }
}

impl Highlighter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Highlight a fenced block into a classed `<pre><code>` listing.
    pub fn highlight(&self, language: &str, code: &str) -> Result<String, HighlightError> {
        let syntax = self.syntaxes.find_syntax_by_token(language).ok_or_else(|| {
            HighlightError::UnknownLanguage {
                language: language.to_string(),
            }
        })?;

        let mut generator =
            ClassedHTMLGenerator::new_with_class_style(syntax, &self.syntaxes, CODE_CLASS_STYLE);
        for line in LinesWithEndings::from(code) {
            generator.parse_html_for_line_which_includes_newline(line)?;
        }

        let mut html = String::from("<pre><code class=\"language-");
        let _ = escape_html(&mut html, language);
        html.push_str("\">");
        html.push_str(&generator.finalize());
        html.push_str("</code></pre>");
        Ok(html)
    }
}
