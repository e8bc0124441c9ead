use crate::error::{SidebarError, SidebarErrorKind, SidebarResult};
use std::cell::RefCell;
use std::collections::HashMap;

/// Session-scoped string storage holding the sidebar scroll offset.
pub trait ScrollStore {
    fn get(&self, key: &str) -> SidebarResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> SidebarResult<()>;
    fn remove(&self, key: &str) -> SidebarResult<()>;
}

pub fn save_scroll(store: &impl ScrollStore, key: &str, offset: i32) -> SidebarResult<()> {
    store.set(key, &offset.to_string())
}

/// Read and clear a saved offset, so it is applied at most once.
///
/// The key is removed even when its value does not parse.
pub fn take_scroll(store: &impl ScrollStore, key: &str) -> SidebarResult<Option<i32>> {
    let saved = store.get(key)?;
    store.remove(key)?;
    Ok(saved.and_then(|v| parse_offset(&v)))
}

fn parse_offset(v: &str) -> Option<i32> {
    let v = v.trim();
    if v.is_empty() {
        return None;
    }
    // scrollTop may have been fractional on high-DPI displays.
    v.parse::<i32>()
        .ok()
        .or_else(|| v.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f.round() as i32))
}

/// `window.sessionStorage`.
#[derive(Clone, Copy, Debug, Default)]
pub struct SessionScrollStore;

impl SessionScrollStore {
    fn storage() -> SidebarResult<web_sys::Storage> {
        let window = web_sys::window().ok_or_else(|| SidebarError::dom("no window"))?;
        window
            .session_storage()
            .map_err(|e| SidebarError::js(SidebarErrorKind::Storage, "sessionStorage", e))?
            .ok_or_else(|| SidebarError {
                kind: SidebarErrorKind::Storage,
                message: "sessionStorage unavailable".to_string(),
            })
    }
}

impl ScrollStore for SessionScrollStore {
    fn get(&self, key: &str) -> SidebarResult<Option<String>> {
        Self::storage()?
            .get_item(key)
            .map_err(|e| SidebarError::js(SidebarErrorKind::Storage, "getItem", e))
    }

    fn set(&self, key: &str, value: &str) -> SidebarResult<()> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| SidebarError::js(SidebarErrorKind::Storage, "setItem", e))
    }

    fn remove(&self, key: &str) -> SidebarResult<()> {
        Self::storage()?
            .remove_item(key)
            .map_err(|e| SidebarError::js(SidebarErrorKind::Storage, "removeItem", e))
    }
}

/// In-process store, used off the browser and in tests.
#[derive(Debug, Default)]
pub struct MemoryScrollStore {
    items: RefCell<HashMap<String, String>>,
}

impl ScrollStore for MemoryScrollStore {
    fn get(&self, key: &str) -> SidebarResult<Option<String>> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> SidebarResult<()> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> SidebarResult<()> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}
