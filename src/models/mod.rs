use serde::{Deserialize, Serialize};

/// One entry of the book's table of contents, as emitted by the book build.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum TocItem {
    Chapter(Chapter),
    PartTitle { title: String },
    Separator,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Chapter {
    pub name: String,

    /// Section number, e.g. `[3, 4, 1]`. Prefix/suffix chapters have none.
    #[serde(default)]
    pub number: Option<SectionNumber>,

    /// Link target relative to the book root. `None` marks a draft chapter.
    #[serde(default)]
    pub path: Option<String>,

    #[serde(default)]
    pub children: Vec<TocItem>,
}

impl Chapter {
    pub fn is_draft(&self) -> bool {
        self.path.is_none()
    }

    pub fn is_affix(&self) -> bool {
        self.number.is_none()
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
#[serde(transparent)]
pub struct SectionNumber(pub Vec<u32>);

impl std::fmt::Display for SectionNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for n in &self.0 {
            write!(f, "{n}.")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_number_display() {
        assert_eq!(SectionNumber(vec![3, 4, 1]).to_string(), "3.4.1.");
        assert_eq!(SectionNumber(vec![1]).to_string(), "1.");
        assert_eq!(SectionNumber::default().to_string(), "");
    }

    #[test]
    fn test_toc_item_contract_deserialize() {
        let json = r#"[
            {"kind": "chapter", "name": "Intro", "path": "intro.html"},
            {"kind": "part-title", "title": "Hardware"},
            {"kind": "chapter", "name": "EC", "number": [3], "path": "ec/index.html",
             "children": [{"kind": "chapter", "name": "Battery", "number": [3, 1]}]},
            {"kind": "separator"}
        ]"#;
        let items: Vec<TocItem> = serde_json::from_str(json).expect("toc should parse");
        assert_eq!(items.len(), 4);

        let TocItem::Chapter(intro) = &items[0] else {
            panic!("expected chapter");
        };
        assert!(intro.is_affix());
        assert!(!intro.is_draft());
        assert!(intro.children.is_empty());

        assert_eq!(
            items[1],
            TocItem::PartTitle {
                title: "Hardware".to_string()
            }
        );

        let TocItem::Chapter(ec) = &items[2] else {
            panic!("expected chapter");
        };
        let TocItem::Chapter(battery) = &ec.children[0] else {
            panic!("expected nested chapter");
        };
        assert!(battery.is_draft());
        assert_eq!(battery.number, Some(SectionNumber(vec![3, 1])));

        assert_eq!(items[3], TocItem::Separator);
    }
}
