use serde::{Deserialize, Serialize};

pub const DEFAULT_SCROLL_KEY: &str = "sidebar-scroll";

/// Folding behaviour of nested chapters.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FoldConfig {
    /// Render toggle controls and start deeper chapters collapsed.
    #[serde(default)]
    pub enable: bool,

    /// Chapters at a depth below this level start expanded.
    #[serde(default)]
    pub level: u32,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct SidebarConfig {
    /// Prefix that reaches the book root from the current page, e.g. `../`.
    pub path_to_root: String,

    #[serde(default)]
    pub fold: FoldConfig,

    pub scroll_key: String,
}

impl SidebarConfig {
    pub fn new(path_to_root: impl Into<String>) -> Self {
        Self {
            path_to_root: path_to_root.into(),
            ..Self::default()
        }
    }

    pub fn with_fold(mut self, fold: FoldConfig) -> Self {
        self.fold = fold;
        self
    }

    /// Read page globals set by the book template before the sidebar script.
    ///
    /// `window.path_to_root` is a plain string; `window.sidebar_fold` is an
    /// optional `{ enable, level }` object. Anything missing or malformed
    /// falls back to the defaults.
    pub fn from_window() -> Self {
        let mut config = Self::default();

        let Some(window) = web_sys::window() else {
            return config;
        };

        if let Ok(v) = js_sys::Reflect::get(&window, &"path_to_root".into()) {
            if let Some(s) = v.as_string() {
                config.path_to_root = s;
            }
        }

        if let Ok(fold) = js_sys::Reflect::get(&window, &"sidebar_fold".into()) {
            if !fold.is_undefined() && fold.is_object() {
                if let Ok(enable) = js_sys::Reflect::get(&fold, &"enable".into()) {
                    config.fold.enable = enable.as_bool().unwrap_or(false);
                }
                if let Ok(level) = js_sys::Reflect::get(&fold, &"level".into()) {
                    config.fold.level = level.as_f64().map(|l| l.max(0.0) as u32).unwrap_or(0);
                }
            }
        }

        config
    }
}

impl Default for SidebarConfig {
    fn default() -> Self {
        Self {
            path_to_root: String::new(),
            fold: FoldConfig::default(),
            scroll_key: DEFAULT_SCROLL_KEY.to_string(),
        }
    }
}
