use std::collections::BTreeMap;
use std::sync::Arc;

pub(crate) const DRAFT_STATUS_KEY: &str = "notification.navigation.item.relation.status.draft";

/// Built-in English messages, keyed the same way host translations are.
const EN: &[(&str, &str)] = &[
    ("popup.item.header", "Edit navigation item"),
    ("popup.item.form.title.label", "Title"),
    ("popup.item.form.title.placeholder", "e.g. Blog"),
    ("popup.item.form.menuAttached.label", "MenuAttached"),
    ("popup.item.form.type.label", "Internal link"),
    ("popup.item.form.path.label", "Path"),
    ("popup.item.form.path.placeholder", "e.g. Blog"),
    ("popup.item.form.externalPath.label", "External URL"),
    (
        "popup.item.form.externalPath.placeholder",
        "e.g. https://example.com",
    ),
    ("popup.item.form.relatedType.label", "Related Type"),
    ("popup.item.form.relatedType.placeholder", "Related Type"),
    ("popup.item.form.related.label", "Related"),
    ("popup.item.form.related.search", "Search..."),
    (
        "popup.item.form.related.empty",
        "There are no more entities of \"{contentTypeName}\" to select",
    ),
    ("popup.item.form.audience.label", "Audience"),
    ("popup.item.form.uiRouterKey.label", "UI router key"),
    ("popup.item.form.error.required", "This field is required"),
    (
        "popup.item.form.error.externalPath",
        "Provide a full URL, e.g. https://example.com",
    ),
    ("popup.item.form.error.path", "Path cannot contain whitespace"),
    ("popup.item.form.button.save", "Save"),
    ("popup.item.form.button.cancel", "Cancel"),
    ("notification.navigation.item.relation.status.draft", "draft"),
    ("page.header", "Navigation"),
    ("page.item.new", "New item"),
    ("page.item.edit", "Edit"),
    ("page.items.empty", "No navigation items yet."),
    ("page.config.loading", "Loading configuration..."),
];

/// Translation lookup with `{name}` interpolation.
///
/// Cheap to clone; the message table is shared.
#[derive(Clone, Debug, PartialEq)]
pub struct I18n {
    messages: Arc<BTreeMap<String, String>>,
}

impl I18n {
    pub fn english() -> Self {
        Self {
            messages: Arc::new(
                EN.iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
            ),
        }
    }

    /// Missing keys render as the key itself.
    pub fn t(&self, key: &str) -> String {
        self.messages
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }

    pub fn t_with(&self, key: &str, params: &[(&str, &str)]) -> String {
        let mut out = self.t(key);
        for (name, value) in params {
            out = out.replace(&format!("{{{}}}", name), value);
        }
        out
    }
}

impl Default for I18n {
    fn default() -> Self {
        Self::english()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known_key() {
        let i18n = I18n::english();
        assert_eq!(i18n.t("popup.item.form.title.label"), "Title");
        assert_eq!(i18n.t(DRAFT_STATUS_KEY), "draft");
    }

    #[test]
    fn test_missing_key_falls_back_to_key() {
        let i18n = I18n::english();
        assert_eq!(i18n.t("nope.not.here"), "nope.not.here");
    }

    #[test]
    fn test_interpolation() {
        let i18n = I18n::english();
        let msg = i18n.t_with("popup.item.form.related.empty", &[("contentTypeName", "Pages")]);
        assert_eq!(msg, "There are no more entities of \"Pages\" to select");
    }
}
