//! Popup content bound to each map marker.

use std::sync::LazyLock;

use regex::Regex;

use crate::catalog::{DetailEntry, LocationId, LocationRecord};
use crate::i18n::{Language, TextDirection};

pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/300x160?text=Place+Image";

/// Decides whether an image reference can be displayed.
pub trait AssetResolver {
    fn is_available(&self, asset: &str) -> bool;
}

impl<F> AssetResolver for F
where
    F: Fn(&str) -> bool,
{
    fn is_available(&self, asset: &str) -> bool {
        self(asset)
    }
}

/// Resolver for shells that display whatever they are given and let the
/// renderer deal with broken references.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnyAsset;

impl AssetResolver for AnyAsset {
    fn is_available(&self, asset: &str) -> bool {
        !asset.trim().is_empty()
    }
}

pub fn resolve_image(image: &str, assets: &dyn AssetResolver) -> String {
    if image.trim().is_empty() || !assets.is_available(image) {
        PLACEHOLDER_IMAGE.to_string()
    } else {
        image.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Popup {
    pub location: LocationId,
    pub language: Language,
    pub title: String,
    pub category_label: String,
    pub image: String,
    pub description: String,
    pub details: Vec<DetailEntry>,
    pub footer: String,
}

impl Popup {
    pub fn build(record: &LocationRecord, language: Language, assets: &dyn AssetResolver) -> Self {
        let strings = language.strings();
        Self {
            location: record.id,
            language,
            title: record.name(language).to_string(),
            category_label: strings.category(record.category).to_string(),
            image: resolve_image(&record.image, assets),
            description: record.description(language).to_string(),
            details: record.details(language).to_vec(),
            footer: strings.popup_footer.to_string(),
        }
    }

    pub const fn direction(&self) -> TextDirection {
        self.language.direction()
    }

    pub fn uses_placeholder(&self) -> bool {
        self.image == PLACEHOLDER_IMAGE
    }

    /// Detail rows with markup flattened for text-only shells.
    pub fn plain_details(&self) -> Vec<(String, String)> {
        self.details
            .iter()
            .map(|entry| (entry.label.clone(), rich_text_to_plain(&entry.value)))
            .collect()
    }

    /// HTML rendering for web map providers. Text fields are escaped; detail
    /// values are rich text and pass through as-is.
    pub fn to_html(&self) -> String {
        let details: String = self
            .details
            .iter()
            .map(|entry| {
                format!(
                    "<p><strong>{}:</strong> {}</p>",
                    escape_html(&entry.label),
                    entry.value
                )
            })
            .collect();

        format!(
            concat!(
                r#"<div class="popup" dir="{dir}">"#,
                r#"<div class="popup-header"><h3>{title}</h3><p>{category}</p></div>"#,
                r#"<div class="popup-body">"#,
                r#"<img src="{image}" alt="{title}" class="popup-image" "#,
                r#"onerror="this.src='{placeholder}'">"#,
                r#"<p>{description}</p>"#,
                r#"<div class="location-details">{details}</div>"#,
                r#"</div>"#,
                r#"<div class="popup-footer">{footer}</div>"#,
                r#"</div>"#
            ),
            dir = self.direction().as_str(),
            title = escape_html(&self.title),
            category = escape_html(&self.category_label),
            image = escape_html(&self.image),
            placeholder = PLACEHOLDER_IMAGE,
            description = escape_html(&self.description),
            details = details,
            footer = escape_html(&self.footer),
        )
    }
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[allow(clippy::expect_used)]
static LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<a\s[^>]*?href\s*=\s*["']([^"']*)["'][^>]*>(.*?)</a\s*>"#)
        .expect("link pattern")
});

#[allow(clippy::expect_used)]
static LINE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<br\s*/?>").expect("line break pattern"));

#[allow(clippy::expect_used)]
static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("tag pattern"));

/// Flattens inline markup: links become `text <url>`, line breaks become
/// ` · `, any other tag is dropped.
pub fn rich_text_to_plain(value: &str) -> String {
    let linked = LINK.replace_all(value, "$2 <$1>");
    let broken = LINE_BREAK.replace_all(&linked, " · ");
    let stripped = TAG.replace_all(&broken, "");
    stripped
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn record(id: LocationId) -> LocationRecord {
        Catalog::embedded()
            .expect("embedded catalog")
            .get(id)
            .cloned()
            .expect("record")
    }

    #[test]
    fn popup_is_localized() {
        let popup = Popup::build(&record(10), Language::Ar, &AnyAsset);
        assert_eq!(popup.title, "مقهى ماغ");
        assert_eq!(popup.category_label, "مقاهي");
        assert_eq!(popup.footer, "انقر خارج النافذة للإغلاق");
        assert_eq!(popup.direction(), TextDirection::Rtl);
        assert_eq!(popup.details[0].value, "قهوة، شاي، حلويات");
    }

    #[test]
    fn unavailable_image_falls_back_to_placeholder() {
        let nothing_on_disk = |_: &str| false;
        let popup = Popup::build(&record(1), Language::En, &nothing_on_disk);
        assert!(popup.uses_placeholder());

        let popup = Popup::build(&record(1), Language::En, &AnyAsset);
        assert_eq!(popup.image, "home.jpg");
    }

    #[test]
    fn blank_image_reference_uses_placeholder() {
        assert_eq!(resolve_image("  ", &AnyAsset), PLACEHOLDER_IMAGE);
    }

    #[test]
    fn links_flatten_to_text_and_url() {
        let plain = rich_text_to_plain(concat!(
            r#"<a href="https://www.facebook.com/connextisp" target="_blank">Facebook</a><br>"#,
            r#"<a href="https://connext-lb.net/" target="_blank">Official Website</a>"#,
        ));
        assert_eq!(
            plain,
            concat!(
                "Facebook <https://www.facebook.com/connextisp> · ",
                "Official Website <https://connext-lb.net/>"
            )
        );
    }

    #[test]
    fn single_quoted_links_are_understood() {
        let plain = rich_text_to_plain(
            concat!(
                "<a href='https://whc.unesco.org/en/list/1702/' target='_blank'>",
                "Architectural Digest</a>"
            ),
        );
        assert_eq!(plain, "Architectural Digest <https://whc.unesco.org/en/list/1702/>");
        assert_eq!(rich_text_to_plain("Not listed"), "Not listed");
    }

    #[test]
    fn html_escapes_text_but_keeps_rich_details() {
        let html = Popup::build(&record(5), Language::En, &AnyAsset).to_html();
        assert!(html.contains("<h3>Tripoli Train Station</h3>"));
        assert!(html.contains("Lebanon&#39;s forgotten rail era"));
        assert!(html.contains("<a href='https://www.reuters.com/"));
        assert!(html.contains(r#"dir="ltr""#));
        assert!(html.contains("Click outside to close"));
    }

    #[test]
    fn html_detail_rows_keep_source_order() {
        let popup = Popup::build(&record(3), Language::En, &AnyAsset);
        let html = popup.to_html();
        assert!(popup.details.len() > 1);

        let positions: Vec<usize> = popup
            .details
            .iter()
            .map(|entry| {
                let row = format!("<p><strong>{}:</strong> ", escape_html(&entry.label));
                html.find(&row).expect("detail row")
            })
            .collect();
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
        assert_eq!(html.matches("<p><strong>").count(), popup.details.len());
    }
}
