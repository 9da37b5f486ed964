//! Theme mode resolution and the two fixed diagram palettes.
//!
//! The ambient dark flag lives with the host (a `.dark` ancestor class in a
//! DOM host, an explicit parameter in a server-side host). The core depends
//! only on the `ThemeProvider` capability and re-derives the mode on every
//! render call; it is never cached here.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// The two supported presentation modes. There is no third theme and no
/// user-supplied palette.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }
}

/// Capability for reading the ambient theme at the moment of render.
///
/// Implementations are provided by the consuming application; the renderer
/// calls `current_mode` once per render and never stores the answer.
pub trait ThemeProvider: Send + Sync {
    fn current_mode(&self) -> ThemeMode;
}

/// An explicit mode is its own provider (server-side rendering, tests).
impl ThemeProvider for ThemeMode {
    fn current_mode(&self) -> ThemeMode {
        *self
    }
}

/// Unit type implementation - light default.
impl ThemeProvider for () {
    fn current_mode(&self) -> ThemeMode {
        ThemeMode::Light
    }
}

impl<T: ThemeProvider> ThemeProvider for &T {
    fn current_mode(&self) -> ThemeMode {
        (*self).current_mode()
    }
}

impl<T: ThemeProvider> ThemeProvider for Option<T> {
    fn current_mode(&self) -> ThemeMode {
        self.as_ref()
            .map(|p| p.current_mode())
            .unwrap_or(ThemeMode::Light)
    }
}

/// Shared dark-mode flag for hosts that toggle theme at runtime.
///
/// Cloning shares the underlying flag, so the host UI can flip it while
/// renderers observe the change on their next call.
#[derive(Debug, Clone, Default)]
pub struct AmbientFlag {
    dark: Arc<AtomicBool>,
}

impl AmbientFlag {
    pub fn new(dark: bool) -> Self {
        Self {
            dark: Arc::new(AtomicBool::new(dark)),
        }
    }

    pub fn set_dark(&self, dark: bool) {
        self.dark.store(dark, Ordering::Relaxed);
    }
}

impl ThemeProvider for AmbientFlag {
    fn current_mode(&self) -> ThemeMode {
        if self.dark.load(Ordering::Relaxed) {
            ThemeMode::Dark
        } else {
            ThemeMode::Light
        }
    }
}

/// Named color tokens handed to the engine, one fixed table per mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagramPalette {
    pub primary_color: SmolStr,
    pub primary_text_color: SmolStr,
    pub primary_border_color: SmolStr,
    pub line_color: SmolStr,
    pub secondary_color: SmolStr,
    pub tertiary_color: SmolStr,
    pub background: SmolStr,
    pub main_bkg: SmolStr,
    pub second_bkg: SmolStr,
    pub tertiary_bkg: SmolStr,
}

impl DiagramPalette {
    pub fn light() -> Self {
        Self {
            primary_color: SmolStr::new("#0969da"),
            primary_text_color: SmolStr::new("#24292f"),
            primary_border_color: SmolStr::new("#d1d9e0"),
            line_color: SmolStr::new("#656d76"),
            secondary_color: SmolStr::new("#f6f8fa"),
            tertiary_color: SmolStr::new("#ffffff"),
            background: SmolStr::new("#ffffff"),
            main_bkg: SmolStr::new("#f6f8fa"),
            second_bkg: SmolStr::new("#ffffff"),
            tertiary_bkg: SmolStr::new("#f6f8fa"),
        }
    }

    pub fn dark() -> Self {
        Self {
            primary_color: SmolStr::new("#58a6ff"),
            primary_text_color: SmolStr::new("#e6edf3"),
            primary_border_color: SmolStr::new("#30363d"),
            line_color: SmolStr::new("#484f58"),
            secondary_color: SmolStr::new("#21262d"),
            tertiary_color: SmolStr::new("#161b22"),
            background: SmolStr::new("#0d1117"),
            main_bkg: SmolStr::new("#21262d"),
            second_bkg: SmolStr::new("#30363d"),
            tertiary_bkg: SmolStr::new("#161b22"),
        }
    }

    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => Self::light(),
            ThemeMode::Dark => Self::dark(),
        }
    }
}
