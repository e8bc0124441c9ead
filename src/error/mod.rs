use wasm_bindgen::{JsCast, JsValue};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SidebarErrorKind {
    Dom,
    Storage,
    Toc,
}

#[derive(Clone, Debug)]
pub struct SidebarError {
    pub kind: SidebarErrorKind,
    pub message: String,
}

impl std::fmt::Display for SidebarError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl std::error::Error for SidebarError {}

impl SidebarError {
    pub(crate) fn dom(ctx: &str) -> Self {
        Self {
            kind: SidebarErrorKind::Dom,
            message: ctx.to_string(),
        }
    }

    pub(crate) fn js(kind: SidebarErrorKind, ctx: &str, e: JsValue) -> Self {
        let detail = e
            .as_string()
            .or_else(|| {
                e.dyn_into::<js_sys::Error>()
                    .ok()
                    .map(|e| String::from(e.message()))
            })
            .unwrap_or_else(|| "unknown JS error".to_string());
        Self {
            kind,
            message: format!("{ctx}: {detail}"),
        }
    }

    pub(crate) fn toc(e: impl std::fmt::Display) -> Self {
        Self {
            kind: SidebarErrorKind::Toc,
            message: e.to_string(),
        }
    }
}

pub type SidebarResult<T> = Result<T, SidebarError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_kind_and_message() {
        let e = SidebarError::dom("no sidebar host element");
        assert_eq!(e.kind, SidebarErrorKind::Dom);
        assert_eq!(e.to_string(), "Dom: no sidebar host element");
    }

    #[test]
    fn test_toc_error_wraps_parse_failure() {
        let parse = serde_json::from_str::<Vec<u32>>("[1,").unwrap_err();
        let e = SidebarError::toc(parse);
        assert_eq!(e.kind, SidebarErrorKind::Toc);
        assert!(!e.message.is_empty());
    }
}
