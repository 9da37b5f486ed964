//! Stylesheet generation for the preview pane.
//!
//! Theme tokens become CSS custom properties on `.markdown-content`, with a
//! `.dark` ancestor selector swapping in the dark table; the structural rules
//! reference the variables and are theme-independent.

use crate::theme::{ColorScheme, PreviewTheme};

pub fn generate_preview_css(theme: &PreviewTheme) -> String {
    let mut css = String::with_capacity(8 * 1024);
    css.push_str(&variable_block(".markdown-content", &theme.light));
    css.push_str(&variable_block(".dark .markdown-content", &theme.dark));
    css.push_str(&format!(
        r#"
.markdown-content {{
    color: var(--md-text);
    background-color: var(--md-background);
    font-family: {body_font};
    font-size: {base_font_size};
    line-height: {line_height};
    word-wrap: break-word;
}}
"#,
        body_font = theme.fonts.body,
        base_font_size = theme.spacing.base_font_size,
        line_height = theme.spacing.line_height,
    ));
    css.push_str(&format!(
        r#"
.markdown-content pre,
.markdown-content code,
.markdown-textarea {{
    font-family: {mono_font};
}}

.markdown-textarea {{
    line-height: {line_height};
    tab-size: {tab_size};
    font-size: 14px;
}}

.markdown-content pre,
.markdown-content code {{
    font-size: {code_font_size};
}}
"#,
        mono_font = theme.fonts.monospace,
        line_height = theme.spacing.line_height,
        tab_size = theme.spacing.tab_size,
        code_font_size = theme.spacing.code_font_size,
    ));
    css.push_str(STRUCTURAL_RULES);
    css
}

fn variable_block(selector: &str, colors: &ColorScheme) -> String {
    format!(
        r#"{selector} {{
    --md-background: {background};
    --md-surface: {surface};
    --md-text: {text};
    --md-heading: {heading};
    --md-muted: {muted};
    --md-border: {border};
    --md-border-soft: {border_soft};
    --md-link: {link};
    --md-link-hover: {link_hover};
    --md-inline-code-bg: {inline_code_bg};
    --md-inline-code-text: {inline_code_text};
    --md-accent: {accent};
    --md-error-bg: {error_bg};
    --md-error-border: {error_border};
    --md-error-text: {error_text};
}}
"#,
        background = colors.background,
        surface = colors.surface,
        text = colors.text,
        heading = colors.heading,
        muted = colors.muted,
        border = colors.border,
        border_soft = colors.border_soft,
        link = colors.link,
        link_hover = colors.link_hover,
        inline_code_bg = colors.inline_code_bg,
        inline_code_text = colors.inline_code_text,
        accent = colors.accent,
        error_bg = colors.error_bg,
        error_border = colors.error_border,
        error_text = colors.error_text,
    )
}

const STRUCTURAL_RULES: &str = r#"
.markdown-content h1 {
    font-size: 2rem;
    font-weight: 600;
    color: var(--md-heading);
    margin: 0 0 16px;
    padding-bottom: 10px;
    border-bottom: 1px solid var(--md-border);
}

.markdown-content h2 {
    font-size: 1.5rem;
    font-weight: 600;
    color: var(--md-heading);
    margin: 24px 0 16px;
    padding-bottom: 8px;
    border-bottom: 1px solid var(--md-border-soft);
}

.markdown-content h3 {
    font-size: 1.25rem;
    font-weight: 600;
    color: var(--md-heading);
    margin: 24px 0 16px;
}

.markdown-content h4 {
    font-size: 1.125rem;
    font-weight: 600;
    color: var(--md-heading);
    margin: 24px 0 16px;
}

.markdown-content h5 {
    font-size: 1rem;
    font-weight: 600;
    color: var(--md-heading);
    margin: 24px 0 16px;
}

.markdown-content h6 {
    font-size: 0.875rem;
    font-weight: 600;
    color: var(--md-muted);
    margin: 24px 0 16px;
}

.markdown-content p {
    margin: 0 0 16px;
}

.markdown-content ul,
.markdown-content ol {
    margin: 0 0 16px;
    padding-left: 2rem;
}

.markdown-content ul li {
    list-style-type: disc;
    margin-bottom: 4px;
}

.markdown-content ol li {
    list-style-type: decimal;
    margin-bottom: 4px;
}

.markdown-content blockquote {
    margin: 0 0 16px;
    padding: 0 1rem;
    color: var(--md-muted);
    border-left: 0.25rem solid var(--md-border);
}

.markdown-content code {
    padding: 0.2em 0.4em;
    margin: 0;
    white-space: break-spaces;
    background-color: var(--md-inline-code-bg);
    color: var(--md-inline-code-text);
    border-radius: 6px;
}

.markdown-content pre {
    padding: 16px;
    overflow-x: auto;
    line-height: 1.45;
    background-color: var(--md-surface);
    border: 1px solid var(--md-border);
    border-radius: 6px;
    margin: 0 0 16px;
    color: var(--md-text);
}

.markdown-content pre code {
    background-color: transparent;
    padding: 0;
    margin: 0;
    font-size: 100%;
    color: inherit;
    white-space: pre;
    border: 0;
    border-radius: 0;
}

.markdown-content table {
    width: 100%;
    overflow: auto;
    border-collapse: collapse;
    border-spacing: 0;
    margin: 0 0 16px;
}

.markdown-content th {
    padding: 6px 13px;
    border: 1px solid var(--md-border);
    font-weight: 600;
    background-color: var(--md-surface);
    color: var(--md-heading);
}

.markdown-content td {
    padding: 6px 13px;
    border: 1px solid var(--md-border);
}

.markdown-content hr {
    height: 0.25em;
    padding: 0;
    margin: 24px 0;
    background-color: var(--md-border);
    border: 0;
}

.markdown-content a {
    color: var(--md-link);
    text-decoration: underline;
}

.markdown-content a:hover {
    color: var(--md-link-hover);
}

.markdown-content strong {
    font-weight: 600;
}

.markdown-content em {
    font-style: italic;
}

.markdown-content del {
    text-decoration: line-through;
}

.markdown-content input[type="checkbox"] {
    margin: 0 0.2em 0.25em -1.4em;
    vertical-align: middle;
    accent-color: var(--md-accent);
}

.markdown-content img {
    max-width: 100%;
    height: auto;
    border-style: none;
    box-sizing: content-box;
    background-color: var(--md-background);
}

.markdown-content .footnote-definition {
    color: var(--md-muted);
    font-size: 0.875rem;
}

.markdown-content .diagram {
    margin: 16px 0;
    display: flex;
    justify-content: center;
    overflow-x: auto;
    min-height: 100px;
}

.markdown-content .diagram svg {
    max-width: 100%;
    height: auto;
}

.markdown-content .diagram-loading {
    color: var(--md-muted);
    font-size: 0.875rem;
    align-self: center;
}

.markdown-content .diagram-error {
    padding: 16px;
    background-color: var(--md-error-bg);
    border: 1px solid var(--md-error-border);
    border-radius: 8px;
    width: 100%;
}

.markdown-content .diagram-error-title {
    color: var(--md-error-text);
    font-size: 0.875rem;
    font-weight: 500;
    margin: 0;
}

.markdown-content .diagram-error-body {
    color: var(--md-error-text);
    font-size: 0.75rem;
    margin: 4px 0 0;
}

.markdown-content .math-error {
    color: var(--md-error-text);
    border-bottom: 1px dotted var(--md-error-text);
}

.markdown-scrollbar::-webkit-scrollbar {
    width: 8px;
    height: 8px;
}

.markdown-scrollbar::-webkit-scrollbar-track {
    background: var(--md-surface);
}

.markdown-scrollbar::-webkit-scrollbar-thumb {
    background: var(--md-border);
    border-radius: 4px;
}
"#;

#[cfg(all(
    feature = "syntax-css",
    not(all(target_family = "wasm", target_os = "unknown"))
))]
pub use code_css::{CodeThemeCss, CssError, generate_code_css};

#[cfg(all(
    feature = "syntax-css",
    not(all(target_family = "wasm", target_os = "unknown"))
))]
mod code_css {
    use syntect::highlighting::ThemeSet;
    use syntect::html::css_for_theme_with_class_style;

    use crate::highlight::CODE_CLASS_STYLE;

    /// Bundled syntect themes matching the two preview schemes.
    const LIGHT_CODE_THEME: &str = "InspiredGitHub";
    const DARK_CODE_THEME: &str = "base16-ocean.dark";

    #[derive(Debug, Clone)]
    pub struct CodeThemeCss {
        pub light: String,
        pub dark: String,
    }

    #[derive(Debug, thiserror::Error, miette::Diagnostic)]
    pub enum CssError {
        #[error("syntax theme `{name}` is not bundled")]
        #[diagnostic(code(vellum_renderer::css::unknown_theme))]
        UnknownTheme { name: String },
        #[error(transparent)]
        #[diagnostic(code(vellum_renderer::css::theme))]
        Theme(#[from] syntect::Error),
    }

    /// Generate classed highlighting CSS for both preview schemes. The host
    /// scopes the dark sheet under its `.dark` ancestor selector.
    pub fn generate_code_css() -> Result<CodeThemeCss, CssError> {
        let themes = ThemeSet::load_defaults();
        Ok(CodeThemeCss {
            light: theme_css(&themes, LIGHT_CODE_THEME)?,
            dark: theme_css(&themes, DARK_CODE_THEME)?,
        })
    }

    fn theme_css(themes: &ThemeSet, name: &str) -> Result<String, CssError> {
        let theme = themes
            .themes
            .get(name)
            .ok_or_else(|| CssError::UnknownTheme {
                name: name.to_string(),
            })?;
        Ok(css_for_theme_with_class_style(theme, CODE_CLASS_STYLE)?)
    }

}
