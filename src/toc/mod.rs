use crate::error::{SidebarError, SidebarResult};
use crate::models::{Chapter, SectionNumber, TocItem};

/// Table of contents emitted by the book build.
pub(crate) const BOOK_TOC_JSON: &str = include_str!("../../book/toc.json");

pub fn parse_toc(json: &str) -> SidebarResult<Vec<TocItem>> {
    serde_json::from_str(json).map_err(SidebarError::toc)
}

pub fn book_toc() -> SidebarResult<Vec<TocItem>> {
    parse_toc(BOOK_TOC_JSON)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub usize);

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Chapter {
        name: String,
        number: Option<SectionNumber>,
        path: Option<String>,
    },
    PartTitle(String),
    Separator,
}

#[derive(Clone, Debug)]
pub struct TocNode {
    pub id: NodeId,
    pub kind: NodeKind,
    pub parent: Option<NodeId>,
    pub depth: u32,
    pub children: Vec<NodeId>,
}

impl TocNode {
    pub fn path(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Chapter { path, .. } => path.as_deref(),
            _ => None,
        }
    }

    pub fn is_chapter(&self) -> bool {
        matches!(self.kind, NodeKind::Chapter { .. })
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

/// The navigation tree flattened into document order.
#[derive(Clone, Debug, Default)]
pub struct TocTree {
    nodes: Vec<TocNode>,
    roots: Vec<NodeId>,
}

impl TocTree {
    pub fn from_items(items: &[TocItem]) -> Self {
        let mut tree = Self::default();
        tree.roots = tree.push_items(items, None, 0);
        tree
    }

    fn push_items(&mut self, items: &[TocItem], parent: Option<NodeId>, depth: u32) -> Vec<NodeId> {
        let mut ids = Vec::with_capacity(items.len());
        for item in items {
            let id = NodeId(self.nodes.len());
            ids.push(id);

            let (kind, children) = match item {
                TocItem::Chapter(Chapter {
                    name,
                    number,
                    path,
                    children,
                }) => (
                    NodeKind::Chapter {
                        name: name.clone(),
                        number: number.clone(),
                        path: path.clone(),
                    },
                    children.as_slice(),
                ),
                TocItem::PartTitle { title } => (NodeKind::PartTitle(title.clone()), &[][..]),
                TocItem::Separator => (NodeKind::Separator, &[][..]),
            };

            self.nodes.push(TocNode {
                id,
                kind,
                parent,
                depth,
                children: vec![],
            });

            let child_ids = self.push_items(children, Some(id), depth + 1);
            self.nodes[id.0].children = child_ids;
        }
        ids
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn get(&self, id: NodeId) -> Option<&TocNode> {
        self.nodes.get(id.0)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &TocNode> {
        self.nodes.iter()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Strict ancestors of `id`, nearest first.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut cur = self.get(id).and_then(|n| n.parent);
        while let Some(p) = cur {
            out.push(p);
            cur = self.get(p).and_then(|n| n.parent);
        }
        out
    }

    pub fn find_by_path(&self, path: &str) -> Option<NodeId> {
        self.nodes.iter().find(|n| n.path() == Some(path)).map(|n| n.id)
    }
}
