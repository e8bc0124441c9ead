use crate::components::SidebarToc;
use crate::config::SidebarConfig;
use crate::error::{SidebarError, SidebarErrorKind, SidebarResult};
use crate::state::SidebarState;
use crate::storage::{save_scroll, take_scroll, ScrollStore, SessionScrollStore};
use crate::toc::{book_toc, TocTree};
use leptos::logging::{debug_warn, warn};
use leptos::prelude::*;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

/// Host element the book template places in `#sidebar`.
pub const HOST_SELECTOR: &str = "mdbook-sidebar-scrollbox";
const FALLBACK_HOST_SELECTOR: &str = "#sidebar .sidebar-scrollbox";

/// Render the sidebar into `container` and sync it with the current page.
///
/// Call once per page load. Failures are logged and leave the affected
/// feature out; they never block the page.
pub fn mount(container: HtmlElement, config: SidebarConfig) {
    mount_with_store(container, config, Rc::new(SessionScrollStore));
}

pub fn mount_with_store<S: ScrollStore + 'static>(
    container: HtmlElement,
    config: SidebarConfig,
    store: Rc<S>,
) {
    let location = current_location_href().unwrap_or_else(|e| {
        warn!("sidebar: {e}");
        String::new()
    });
    mount_at(container, config, store, &location);
}

/// Like [`mount_with_store`], for a page at `location` rather than the
/// current document URL.
pub fn mount_at<S: ScrollStore + 'static>(
    container: HtmlElement,
    config: SidebarConfig,
    store: Rc<S>,
    location: &str,
) {
    let items = book_toc().unwrap_or_else(|e| {
        warn!("sidebar: {e}");
        vec![]
    });

    let state = SidebarState::attach(TocTree::from_items(&items), &config, location);
    if state.active().is_none() {
        debug_warn!("sidebar: no entry matches {location}");
    }

    container.set_inner_html("");
    leptos::mount::mount_to(container.clone(), move || {
        let state = RwSignal::new(state);
        view! { <SidebarToc state=state /> }
    })
    .forget();

    if let Err(e) = track_scroll(&container, store.clone(), config.scroll_key.clone()) {
        warn!("sidebar: {e}");
    }

    restore_scroll(&container, store.as_ref(), &config.scroll_key);
}

/// Locate the sidebar host element in the current document.
pub fn find_host() -> SidebarResult<HtmlElement> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| SidebarError::dom("no document"))?;

    for selector in [HOST_SELECTOR, FALLBACK_HOST_SELECTOR] {
        let found = document
            .query_selector(selector)
            .map_err(|e| SidebarError::js(SidebarErrorKind::Dom, selector, e))?;
        if let Some(el) = found {
            return el
                .dyn_into::<HtmlElement>()
                .map_err(|_| SidebarError::dom("sidebar host is not an HTML element"));
        }
    }

    Err(SidebarError::dom("no sidebar host element"))
}

fn current_location_href() -> SidebarResult<String> {
    let window = web_sys::window().ok_or_else(|| SidebarError::dom("no window"))?;
    window
        .location()
        .href()
        .map_err(|e| SidebarError::js(SidebarErrorKind::Dom, "location.href", e))
}

/// Clicks inside these save the scroll offset. Toggle controls are anchors
/// too, but expanding a section is not a navigation.
const NAV_LINK_SELECTOR: &str = "a:not(.toggle)";

/// Save the container's scroll offset whenever a chapter link inside it is
/// clicked.
fn track_scroll<S: ScrollStore + 'static>(
    container: &HtmlElement,
    store: Rc<S>,
    key: String,
) -> SidebarResult<()> {
    let scrollbox = container.clone();
    let on_click = Closure::<dyn FnMut(web_sys::Event)>::new(move |ev: web_sys::Event| {
        let on_link = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
            .and_then(|el| el.closest(NAV_LINK_SELECTOR).ok().flatten())
            .is_some();
        if !on_link {
            return;
        }
        if let Err(e) = save_scroll(store.as_ref(), &key, scrollbox.scroll_top()) {
            warn!("sidebar: {e}");
        }
    });

    let options = web_sys::AddEventListenerOptions::new();
    options.set_passive(true);
    container
        .add_event_listener_with_callback_and_add_event_listener_options(
            "click",
            on_click.as_ref().unchecked_ref(),
            &options,
        )
        .map_err(|e| SidebarError::js(SidebarErrorKind::Dom, "addEventListener", e))?;

    // The sidebar lives as long as the page.
    on_click.forget();
    Ok(())
}

/// Apply a saved offset once, or bring the active entry into view when the
/// page was reached without a sidebar click.
fn restore_scroll(container: &HtmlElement, store: &impl ScrollStore, key: &str) {
    match take_scroll(store, key) {
        Ok(Some(offset)) => container.set_scroll_top(offset),
        Ok(None) => scroll_active_into_view(container),
        Err(e) => {
            warn!("sidebar: {e}");
            scroll_active_into_view(container);
        }
    }
}

fn scroll_active_into_view(container: &HtmlElement) {
    let Ok(Some(active)) = container.query_selector(".active") else {
        return;
    };

    let options = web_sys::ScrollIntoViewOptions::new();
    options.set_block(web_sys::ScrollLogicalPosition::Center);
    active.scroll_into_view_with_scroll_into_view_options(&options);
}
