//! Static UI string bundles for the supported languages.
//!
//! Every bundle is a `'static` struct, so a missing string is a compile
//! error rather than blank text at runtime.

use std::fmt;

use crate::catalog::Category;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    En,
    Ar,
}

impl Language {
    pub const ALL: [Self; 2] = [Self::En, Self::Ar];

    pub const fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ar => "ar",
        }
    }

    /// Accepts a bare code or a tagged locale such as `ar-LB`.
    pub fn parse(code: &str) -> Option<Self> {
        let primary = code.trim().split(['-', '_']).next().unwrap_or_default();
        match primary.to_lowercase().as_str() {
            "en" => Some(Self::En),
            "ar" => Some(Self::Ar),
            _ => None,
        }
    }

    /// Unsupported codes fall back to the default language.
    pub fn from_code_or_default(code: &str) -> Self {
        Self::parse(code).unwrap_or_else(|| {
            tracing::warn!(code, "unsupported language, falling back to English");
            Self::default()
        })
    }

    pub const fn direction(self) -> TextDirection {
        match self {
            Self::Ar => TextDirection::Rtl,
            Self::En => TextDirection::Ltr,
        }
    }

    pub const fn toggle(self) -> Self {
        match self {
            Self::En => Self::Ar,
            Self::Ar => Self::En,
        }
    }

    pub const fn strings(self) -> &'static UiStrings {
        match self {
            Self::En => &ENGLISH,
            Self::Ar => &ARABIC,
        }
    }

    /// Name of the language in that language, for the switcher.
    pub const fn native_name(self) -> &'static str {
        match self {
            Self::En => "English",
            Self::Ar => "العربية",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextDirection {
    Ltr,
    Rtl,
}

impl TextDirection {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ltr => "ltr",
            Self::Rtl => "rtl",
        }
    }

    pub const fn is_rtl(self) -> bool {
        matches!(self, Self::Rtl)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct CategoryLabels {
    pub home: &'static str,
    pub telecom: &'static str,
    pub retail: &'static str,
    pub abandoned: &'static str,
    pub sport: &'static str,
    pub coffeeshop: &'static str,
    pub health: &'static str,
    pub company: &'static str,
}

impl CategoryLabels {
    pub const fn get(&self, category: Category) -> &'static str {
        match category {
            Category::Home => self.home,
            Category::Telecom => self.telecom,
            Category::Retail => self.retail,
            Category::Abandoned => self.abandoned,
            Category::Sport => self.sport,
            Category::Coffeeshop => self.coffeeshop,
            Category::Health => self.health,
            Category::Company => self.company,
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct UiStrings {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub sidebar_title: &'static str,
    pub search_placeholder: &'static str,
    pub all_categories: &'static str,
    pub weather_title: &'static str,
    pub weather_loading: &'static str,
    pub legend_title: &'static str,
    pub created_by: &'static str,
    pub by: &'static str,
    pub last_updated: &'static str,
    pub no_results: &'static str,
    pub popup_footer: &'static str,
    pub categories: CategoryLabels,
}

impl UiStrings {
    pub const fn category(&self, category: Category) -> &'static str {
        self.categories.get(category)
    }

    pub fn credit_line(&self) -> String {
        format!("{} ♥ {}", self.created_by, self.by)
    }
}

pub static ENGLISH: UiStrings = UiStrings {
    title: "Welcome to My Neighborhood in Tripoli",
    subtitle: "Explore the places around my home in Lebanon's second largest city",
    sidebar_title: "Neighborhood in Tripoli",
    search_placeholder: "Search places...",
    all_categories: "All Categories",
    weather_title: "Current Weather",
    weather_loading: "Loading weather data...",
    legend_title: "Map Legend",
    created_by: "Created with",
    by: "by a Computer Engineering Student",
    last_updated: "Last updated:",
    no_results: "No locations found matching your search.",
    popup_footer: "Click outside to close",
    categories: CategoryLabels {
        home: "Home",
        telecom: "Telecom",
        retail: "Retail",
        abandoned: "Abandoned",
        sport: "Sports",
        coffeeshop: "Coffee Shops",
        health: "Health",
        company: "Company",
    },
};

pub static ARABIC: UiStrings = UiStrings {
    title: "مرحبًا بكم في حيي في طرابلس",
    subtitle: "استكشف الأماكن حول منزلي في ثاني أكبر مدينة في لبنان",
    sidebar_title: "حيي في طرابلس",
    search_placeholder: "ابحث عن أماكن...",
    all_categories: "جميع الفئات",
    weather_title: "الطقس الحالي",
    weather_loading: "جاري تحميل بيانات الطقس...",
    legend_title: "مفتاح الخريطة",
    created_by: "تم إنشاؤه بـ",
    by: "من قبل طالب هندسة حاسوب",
    last_updated: "آخر تحديث:",
    no_results: "لا توجد أماكن تطابق بحثك.",
    popup_footer: "انقر خارج النافذة للإغلاق",
    categories: CategoryLabels {
        home: "المنزل",
        telecom: "الاتصالات",
        retail: "التجزئة",
        abandoned: "مهجور",
        sport: "الرياضة",
        coffeeshop: "مقاهي",
        health: "الصحة",
        company: "شركة",
    },
};

/// Bundle for a language code; unsupported codes get the English bundle.
pub fn translate(code: &str) -> &'static UiStrings {
    Language::from_code_or_default(code).strings()
}
