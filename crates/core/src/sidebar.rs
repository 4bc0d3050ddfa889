use crate::catalog::{Category, LocationId};
use crate::filter::CategoryGroup;
use crate::i18n::Language;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarItem {
    pub id: LocationId,
    pub title: String,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarGroup {
    pub category: Category,
    pub heading: String,
    pub items: Vec<SidebarItem>,
}

/// What the sidebar list shows.
///
/// `Pending` only exists before the first render, so an empty result is
/// never confused with "not computed yet".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SidebarView {
    #[default]
    Pending,
    NoResults {
        message: String,
    },
    Groups(Vec<SidebarGroup>),
}

impl SidebarView {
    pub fn build(groups: &[CategoryGroup<'_>], language: Language) -> Self {
        let strings = language.strings();
        if groups.is_empty() {
            return Self::NoResults {
                message: strings.no_results.to_string(),
            };
        }

        Self::Groups(
            groups
                .iter()
                .map(|group| SidebarGroup {
                    category: group.category,
                    heading: strings.category(group.category).to_string(),
                    items: group
                        .records
                        .iter()
                        .map(|record| SidebarItem {
                            id: record.id,
                            title: record.name(language).to_string(),
                            summary: record.summary(language),
                        })
                        .collect(),
                })
                .collect(),
        )
    }

    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    pub fn groups(&self) -> &[SidebarGroup] {
        match self {
            Self::Groups(groups) => groups,
            Self::Pending | Self::NoResults { .. } => &[],
        }
    }

    pub fn items(&self) -> impl Iterator<Item = &SidebarItem> {
        self.groups().iter().flat_map(|group| group.items.iter())
    }

    pub fn item_count(&self) -> usize {
        self.groups().iter().map(|group| group.items.len()).sum()
    }

    pub fn item(&self, index: usize) -> Option<&SidebarItem> {
        self.items().nth(index)
    }

    pub fn position_of(&self, id: LocationId) -> Option<usize> {
        self.items().position(|item| item.id == id)
    }

    pub fn contains(&self, id: LocationId) -> bool {
        self.position_of(id).is_some()
    }
}
