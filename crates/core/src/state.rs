use crate::catalog::Category;
use crate::i18n::{Language, UiStrings};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.eq_ignore_ascii_case("all") {
            return Some(Self::All);
        }
        Category::parse(value).map(Self::Only)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Only(category) => category.as_str(),
        }
    }

    pub fn admits(self, category: Category) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == category,
        }
    }

    pub const fn label(self, strings: &UiStrings) -> &'static str {
        match self {
            Self::All => strings.all_categories,
            Self::Only(category) => strings.category(category),
        }
    }

    /// Filter choices in dropdown order: "all" first, then every category.
    pub fn options() -> impl Iterator<Item = Self> {
        std::iter::once(Self::All).chain(Category::ALL.into_iter().map(Self::Only))
    }

    fn position(self) -> usize {
        match self {
            Self::All => 0,
            Self::Only(category) => Category::ALL
                .iter()
                .position(|candidate| *candidate == category)
                .map_or(0, |index| index + 1),
        }
    }

    fn at(position: usize) -> Self {
        match position {
            0 => Self::All,
            n => Category::ALL
                .get(n - 1)
                .copied()
                .map_or(Self::All, Self::Only),
        }
    }

    pub fn next(self) -> Self {
        Self::at((self.position() + 1) % (Category::ALL.len() + 1))
    }

    pub fn prev(self) -> Self {
        let len = Category::ALL.len() + 1;
        Self::at((self.position() + len - 1) % len)
    }
}

/// The three user-controlled inputs that decide what is displayed.
///
/// Fields are private; every mutation goes through a setter that reports
/// whether anything changed, so callers can skip redundant renders.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewState {
    language: Language,
    category_filter: CategoryFilter,
    search_text: String,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn language(&self) -> Language {
        self.language
    }

    pub const fn category_filter(&self) -> CategoryFilter {
        self.category_filter
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub const fn strings(&self) -> &'static UiStrings {
        self.language.strings()
    }

    pub fn set_language(&mut self, language: Language) -> bool {
        let changed = self.language != language;
        self.language = language;
        changed
    }

    pub fn set_category_filter(&mut self, filter: CategoryFilter) -> bool {
        let changed = self.category_filter != filter;
        self.category_filter = filter;
        changed
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) -> bool {
        let text = text.into();
        let changed = self.search_text != text;
        self.search_text = text;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_english_all_and_empty() {
        let state = ViewState::new();
        assert_eq!(state.language(), Language::En);
        assert_eq!(state.category_filter(), CategoryFilter::All);
        assert_eq!(state.search_text(), "");
    }

    #[test]
    fn setters_report_changes() {
        let mut state = ViewState::new();
        assert!(state.set_language(Language::Ar));
        assert!(!state.set_language(Language::Ar));
        assert!(state.set_category_filter(CategoryFilter::Only(Category::Sport)));
        assert!(!state.set_category_filter(CategoryFilter::Only(Category::Sport)));
        assert!(state.set_search_text("gym"));
        assert!(!state.set_search_text(String::from("gym")));
    }

    #[test]
    fn filter_parses_all_and_categories() {
        assert_eq!(CategoryFilter::parse("ALL"), Some(CategoryFilter::All));
        assert_eq!(
            CategoryFilter::parse("coffeeshop"),
            Some(CategoryFilter::Only(Category::Coffeeshop))
        );
        assert_eq!(CategoryFilter::parse("museum"), None);
    }

    #[test]
    fn filter_cycles_through_every_option() {
        let forward: Vec<_> = std::iter::successors(Some(CategoryFilter::All), |filter| {
            Some(filter.next())
        })
        .take(10)
        .collect();

        assert_eq!(forward[1], CategoryFilter::Only(Category::Home));
        assert_eq!(forward[8], CategoryFilter::Only(Category::Company));
        assert_eq!(forward[9], CategoryFilter::All);
        assert_eq!(CategoryFilter::All.prev(), CategoryFilter::Only(Category::Company));
        assert_eq!(CategoryFilter::options().count(), 9);
    }

    #[test]
    fn filter_labels_use_the_bundle() {
        let strings = Language::Ar.strings();
        assert_eq!(CategoryFilter::All.label(strings), "جميع الفئات");
        assert_eq!(
            CategoryFilter::Only(Category::Health).label(strings),
            "الصحة"
        );
    }
}
