use crate::i18n::I18n;
use crate::navigation::item::{NavigationItemPayload, NavigationItemType};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Field name (payload key) -> message.
pub(crate) type FormErrors = BTreeMap<String, String>;

fn external_url_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?:[a-zA-Z][a-zA-Z0-9+.-]*://[^\s/?#]+[^\s]*|mailto:[^\s]+|tel:[^\s]+)$")
            .expect("static regex")
    })
}

/// Submit-time rules for a navigation item.
///
/// The relation rules depend on whether the chosen related type is a single type,
/// since single types resolve their entity without a picker.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct FormSchema {
    pub is_single_selected: bool,
}

impl FormSchema {
    pub fn new(is_single_selected: bool) -> Self {
        Self { is_single_selected }
    }

    pub fn validate(&self, payload: &NavigationItemPayload, i18n: &I18n) -> FormErrors {
        let mut errors = FormErrors::new();
        let required = || i18n.t("popup.item.form.error.required");

        match payload.item_type {
            NavigationItemType::External => {
                if payload.title.trim().is_empty() {
                    errors.insert("title".to_string(), required());
                }
                match payload.external_path.as_deref().map(str::trim) {
                    None | Some("") => {
                        errors.insert("externalPath".to_string(), required());
                    }
                    Some(url) if !external_url_re().is_match(url) => {
                        errors.insert(
                            "externalPath".to_string(),
                            i18n.t("popup.item.form.error.externalPath"),
                        );
                    }
                    Some(_) => {}
                }
            }
            NavigationItemType::Internal => {
                if let Some(path) = payload.path.as_deref() {
                    if path.chars().any(char::is_whitespace) {
                        errors.insert("path".to_string(), i18n.t("popup.item.form.error.path"));
                    }
                }
                if payload.related_type.is_none() {
                    errors.insert("relatedType".to_string(), required());
                }
                if payload.related.is_none() && !self.is_single_selected {
                    errors.insert("related".to_string(), required());
                }
            }
        }

        if payload.ui_router_key.as_deref().map_or(true, str::is_empty) {
            errors.insert("uiRouterKey".to_string(), required());
        }

        errors
    }
}
