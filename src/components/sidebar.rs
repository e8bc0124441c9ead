use crate::models::SectionNumber;
use crate::state::SidebarState;
use crate::toc::{NodeId, NodeKind, TocNode};
use leptos::prelude::*;

/// The book's table of contents as nested ordered lists.
///
/// Markup follows the book theme's stylesheet: a chapter's children live in a
/// sibling `<li><ol class="section">` right after the chapter's own item.
#[component]
pub fn SidebarToc(state: RwSignal<SidebarState>) -> impl IntoView {
    let roots = state.with_untracked(|s| s.tree().roots().to_vec());
    toc_list(state, roots, "chapter")
}

fn toc_list(state: RwSignal<SidebarState>, ids: Vec<NodeId>, class: &'static str) -> AnyView {
    view! {
        <ol class=class>
            {ids.into_iter().map(|id| toc_item(state, id)).collect_view()}
        </ol>
    }
    .into_any()
}

fn toc_item(state: RwSignal<SidebarState>, id: NodeId) -> AnyView {
    let Some(TocNode { kind, children, .. }) =
        state.with_untracked(|s| s.tree().get(id).cloned())
    else {
        return ().into_any();
    };

    let (name, number) = match kind {
        NodeKind::Separator => return view! { <li class="spacer"></li> }.into_any(),
        NodeKind::PartTitle(title) => {
            return view! { <li class="part-title">{title}</li> }.into_any();
        }
        NodeKind::Chapter { name, number, .. } => (name, number),
    };

    let href = state.with_untracked(|s| s.href(id).map(String::from));
    let has_toggle = state.with_untracked(|s| s.has_toggle(id));

    let entry = match href {
        Some(href) => view! {
            <a href=href class:active=move || state.with(|s| s.is_active(id))>
                {chapter_label(number, name)}
            </a>
        }
        .into_any(),
        None => view! { <div>{chapter_label(number, name)}</div> }.into_any(),
    };

    let toggle = has_toggle.then(|| {
        view! {
            <a
                class="toggle"
                on:click=move |_| {
                    state.update(|s| {
                        s.toggle(id);
                    });
                }
            >
                <div>"❱"</div>
            </a>
        }
    });

    let children = (!children.is_empty())
        .then(move || view! { <li>{toc_list(state, children, "section")}</li> });

    view! {
        <li class=move || state.with(|s| s.item_class(id))>
            {entry}
            {toggle}
        </li>
        {children}
    }
    .into_any()
}

fn chapter_label(number: Option<SectionNumber>, name: String) -> impl IntoView {
    let number = number.map(|n| {
        view! { <strong aria-hidden="true">{n.to_string()}</strong>" " }
    });
    view! { {number}{name} }
}
