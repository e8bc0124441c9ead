use crate::config::{FoldConfig, SidebarConfig};
use crate::links::{current_page, parse_location, resolve, rewrite_href};
use crate::toc::{NodeId, NodeKind, TocTree};
use std::collections::BTreeSet;

/// Sidebar state for one attach cycle.
///
/// Built once from the tree, the config and the document URL. After that the
/// only transition is [`SidebarState::toggle`].
#[derive(Clone, Debug)]
pub struct SidebarState {
    tree: TocTree,
    /// Rendered href per node (root-path prefix applied), `None` for nodes
    /// without a link.
    hrefs: Vec<Option<String>>,
    active: Option<NodeId>,
    expanded: BTreeSet<NodeId>,
    toggles: bool,
}

impl SidebarState {
    pub fn attach(tree: TocTree, config: &SidebarConfig, location_href: &str) -> Self {
        // Compare in the browser's serialized form, so encoded and unencoded
        // spellings of the same page agree.
        let base = parse_location(location_href);
        let current = current_page(base.as_ref().map_or(location_href, |b| b.as_str()));

        let hrefs: Vec<Option<String>> = tree
            .nodes()
            .map(|n| n.path().map(|p| rewrite_href(&config.path_to_root, p)))
            .collect();

        let mut expanded = initially_expanded(&tree, config.fold);

        let mut links = hrefs
            .iter()
            .enumerate()
            .filter_map(|(i, h)| h.as_deref().map(|h| (NodeId(i), h)));

        let exact = base.as_ref().and_then(|base| {
            links
                .clone()
                .find(|(_, href)| resolve(base, href).is_some_and(|h| h == current))
                .map(|(id, _)| id)
        });

        // The root index page aliases the first chapter, unless some entry
        // links to it directly.
        let alias_first = config.path_to_root.is_empty() && current.ends_with("/index.html");
        let active = exact.or_else(|| {
            if alias_first {
                links.next().map(|(id, _)| id)
            } else {
                None
            }
        });

        if let Some(id) = active {
            expanded.insert(id);
            expanded.extend(tree.ancestors(id));
        }

        Self {
            tree,
            hrefs,
            active,
            expanded,
            toggles: config.fold.enable,
        }
    }

    pub fn tree(&self) -> &TocTree {
        &self.tree
    }

    pub fn active(&self) -> Option<NodeId> {
        self.active
    }

    pub fn is_active(&self, id: NodeId) -> bool {
        self.active == Some(id)
    }

    pub fn is_expanded(&self, id: NodeId) -> bool {
        self.expanded.contains(&id)
    }

    pub fn expanded(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.expanded.iter().copied()
    }

    pub fn href(&self, id: NodeId) -> Option<&str> {
        self.hrefs.get(id.0).and_then(|h| h.as_deref())
    }

    /// Whether `id` renders an expand/collapse control.
    pub fn has_toggle(&self, id: NodeId) -> bool {
        self.toggles
            && self
                .tree
                .get(id)
                .is_some_and(|n| n.is_chapter() && n.has_children())
    }

    /// Flip one chapter's expanded state. Returns the new state, or `None`
    /// when `id` has no toggle control.
    pub fn toggle(&mut self, id: NodeId) -> Option<bool> {
        if !self.has_toggle(id) {
            return None;
        }
        if self.expanded.remove(&id) {
            Some(false)
        } else {
            self.expanded.insert(id);
            Some(true)
        }
    }

    /// Class attribute of a node's `<li>`.
    pub fn item_class(&self, id: NodeId) -> String {
        let Some(node) = self.tree.get(id) else {
            return String::new();
        };
        match &node.kind {
            NodeKind::Chapter { number, .. } => {
                let mut class = String::from("chapter-item");
                if self.is_expanded(id) {
                    class.push_str(" expanded");
                }
                if number.is_none() {
                    class.push_str(" affix");
                }
                class
            }
            NodeKind::PartTitle(_) => "part-title".to_string(),
            NodeKind::Separator => "spacer".to_string(),
        }
    }
}

fn initially_expanded(tree: &TocTree, fold: FoldConfig) -> BTreeSet<NodeId> {
    tree.nodes()
        .filter(|n| n.is_chapter())
        .filter(|n| !fold.enable || n.depth < fold.level)
        .filter(|n| n.has_children() || !fold.enable)
        .map(|n| n.id)
        .collect()
}
