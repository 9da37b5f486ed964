//! Preview color and typography tables.
//!
//! Two fixed schemes; the dark one is applied by a `.dark` ancestor class on
//! the rendering container, matching how the ambient theme flag is surfaced
//! to the diagram path.

use smol_str::SmolStr;

#[derive(Debug, Clone)]
pub struct PreviewTheme {
    pub light: ColorScheme,
    pub dark: ColorScheme,
    pub fonts: FontScheme,
    pub spacing: SpacingScheme,
}

impl Default for PreviewTheme {
    fn default() -> Self {
        Self {
            light: ColorScheme::light(),
            dark: ColorScheme::dark(),
            fonts: FontScheme::default(),
            spacing: SpacingScheme::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ColorScheme {
    pub background: SmolStr,
    pub surface: SmolStr,
    pub text: SmolStr,
    pub heading: SmolStr,
    pub muted: SmolStr,
    pub border: SmolStr,
    pub border_soft: SmolStr,
    pub link: SmolStr,
    pub link_hover: SmolStr,
    pub inline_code_bg: SmolStr,
    pub inline_code_text: SmolStr,
    pub accent: SmolStr,
    pub error_bg: SmolStr,
    pub error_border: SmolStr,
    pub error_text: SmolStr,
}

impl ColorScheme {
    pub fn light() -> Self {
        Self {
            background: SmolStr::new("#ffffff"),
            surface: SmolStr::new("#f6f8fa"),
            text: SmolStr::new("#24292f"),
            heading: SmolStr::new("#24292f"),
            muted: SmolStr::new("#656d76"),
            border: SmolStr::new("#d1d9e0"),
            border_soft: SmolStr::new("#d8dee4"),
            link: SmolStr::new("#0969da"),
            link_hover: SmolStr::new("#0550ae"),
            inline_code_bg: SmolStr::new("#afb8c133"),
            inline_code_text: SmolStr::new("#24292f"),
            accent: SmolStr::new("#0969da"),
            error_bg: SmolStr::new("#fef2f2"),
            error_border: SmolStr::new("#fecaca"),
            error_text: SmolStr::new("#b91c1c"),
        }
    }

    pub fn dark() -> Self {
        Self {
            background: SmolStr::new("#0d1117"),
            surface: SmolStr::new("#21262d"),
            text: SmolStr::new("#e6edf3"),
            heading: SmolStr::new("#f0f6fc"),
            muted: SmolStr::new("#7d8590"),
            border: SmolStr::new("#30363d"),
            border_soft: SmolStr::new("#21262d"),
            link: SmolStr::new("#58a6ff"),
            link_hover: SmolStr::new("#79c0ff"),
            inline_code_bg: SmolStr::new("rgba(110, 118, 129, 0.4)"),
            inline_code_text: SmolStr::new("#f85149"),
            accent: SmolStr::new("#58a6ff"),
            error_bg: SmolStr::new("rgba(127, 29, 29, 0.2)"),
            error_border: SmolStr::new("#991b1b"),
            error_text: SmolStr::new("#f87171"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FontScheme {
    pub body: SmolStr,
    pub monospace: SmolStr,
}

impl Default for FontScheme {
    fn default() -> Self {
        Self {
            body: SmolStr::new(
                "-apple-system, BlinkMacSystemFont, 'Segoe UI', 'Noto Sans', Helvetica, Arial, sans-serif",
            ),
            monospace: SmolStr::new(
                "ui-monospace, SFMono-Regular, 'SF Mono', Consolas, 'Liberation Mono', Menlo, monospace",
            ),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SpacingScheme {
    pub base_font_size: SmolStr,
    pub line_height: SmolStr,
    pub code_font_size: SmolStr,
    pub tab_size: SmolStr,
}

impl Default for SpacingScheme {
    fn default() -> Self {
        Self {
            base_font_size: SmolStr::new("16px"),
            line_height: SmolStr::new("1.5"),
            code_font_size: SmolStr::new("85%"),
            tab_size: SmolStr::new("2"),
        }
    }
}
