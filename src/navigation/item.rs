use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};

/// Id of a content entity or navigation item.
///
/// Backends hand these out as JSON numbers (SQL ids) or strings (uuids, document ids);
/// both are accepted and compared by their string form only where the UI needs it.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(untagged)]
pub(crate) enum EntityId {
    Num(i64),
    Str(String),
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityId::Num(n) => write!(f, "{}", n),
            EntityId::Str(s) => write!(f, "{}", s),
        }
    }
}

#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default, Display, AsRefStr,
)]
pub(crate) enum NavigationItemType {
    #[default]
    #[serde(rename = "INTERNAL")]
    #[strum(serialize = "INTERNAL")]
    Internal,
    #[serde(rename = "EXTERNAL")]
    #[strum(serialize = "EXTERNAL")]
    External,
}

impl NavigationItemType {
    pub fn from_internal_toggle(is_internal: bool) -> Self {
        if is_internal {
            Self::Internal
        } else {
            Self::External
        }
    }
}

/// A select option. Used for both the related entity (value = entity id) and the
/// related type (value = content-type uid).
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct OptionItem<V = String> {
    pub value: V,
    pub label: String,
}

impl<V> OptionItem<V> {
    pub fn new(value: V, label: impl Into<String>) -> Self {
        Self {
            value,
            label: label.into(),
        }
    }
}

/// Navigation item as persisted by the host.
///
/// Unknown keys (parent, order, nested items, ...) are carried through untouched.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct NavigationItemData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,

    #[serde(default)]
    pub title: String,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub item_type: Option<NavigationItemType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub menu_attached: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related: Option<EntityId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_type: Option<String>,

    #[serde(default)]
    pub audience: Vec<EntityId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ui_router_key: Option<String>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl NavigationItemData {
    /// "New item" popups are opened with empty data.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// `type` and the presence of `related` agree with each other.
    ///
    /// External items are always considered consistent; their relation is dropped later.
    pub fn is_relation_correct(&self) -> bool {
        self.item_type != Some(NavigationItemType::Internal) || self.related.is_some()
    }
}

/// In-memory edit state of a navigation item.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct NavigationItemDraft {
    pub id: Option<EntityId>,
    pub title: String,
    pub item_type: Option<NavigationItemType>,
    pub path: Option<String>,
    pub external_path: Option<String>,
    pub menu_attached: Option<bool>,
    pub related: Option<OptionItem<EntityId>>,
    pub related_type: Option<OptionItem<String>>,
    pub audience: Vec<EntityId>,

    /// UI-only: set on every edit, never submitted.
    pub updated: bool,

    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl NavigationItemDraft {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Items without an explicit type are internal links.
    pub fn effective_type(&self) -> NavigationItemType {
        self.item_type.unwrap_or_default()
    }

    pub fn is_external(&self) -> bool {
        self.effective_type() == NavigationItemType::External
    }
}

/// Sanitized navigation item handed to the submit collaborator.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct NavigationItemPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,

    pub title: String,

    #[serde(rename = "type")]
    pub item_type: NavigationItemType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_path: Option<String>,

    pub menu_attached: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related: Option<EntityId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_type: Option<String>,

    #[serde(default)]
    pub audience: Vec<EntityId>,

    pub is_single: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ui_router_key: Option<String>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl From<NavigationItemPayload> for NavigationItemData {
    fn from(p: NavigationItemPayload) -> Self {
        Self {
            id: p.id,
            title: p.title,
            item_type: Some(p.item_type),
            path: p.path,
            external_path: p.external_path,
            menu_attached: Some(p.menu_attached),
            related: p.related,
            related_type: p.related_type,
            audience: p.audience,
            ui_router_key: p.ui_router_key,
            extra: p.extra,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_data_contract_deserialize() {
        let json = r#"{
            "id": 3,
            "title": "Blog",
            "type": "INTERNAL",
            "path": "/blog",
            "related": 7,
            "relatedType": "application::article.article",
            "menuAttached": true,
            "order": 2
        }"#;
        let parsed: NavigationItemData =
            serde_json::from_str(json).expect("navigation item should parse");
        assert_eq!(parsed.id, Some(EntityId::Num(3)));
        assert_eq!(parsed.item_type, Some(NavigationItemType::Internal));
        assert_eq!(parsed.related, Some(EntityId::Num(7)));
        assert_eq!(
            parsed.related_type.as_deref(),
            Some("application::article.article")
        );
        assert_eq!(parsed.menu_attached, Some(true));
        // Unknown keys survive.
        assert_eq!(parsed.extra["order"], 2);
    }

    #[test]
    fn test_item_data_accepts_string_ids() {
        let parsed: NavigationItemData =
            serde_json::from_str(r#"{"related": "abc-1", "type": "INTERNAL"}"#)
                .expect("should parse");
        assert_eq!(parsed.related, Some(EntityId::Str("abc-1".to_string())));
        assert_eq!(parsed.related.unwrap().to_string(), "abc-1");
    }

    #[test]
    fn test_empty_item_data() {
        let parsed: NavigationItemData = serde_json::from_str("{}").expect("should parse");
        assert!(parsed.is_empty());
        assert!(parsed.is_relation_correct());
    }

    #[test]
    fn test_internal_item_without_related_is_incorrect() {
        let data = NavigationItemData {
            item_type: Some(NavigationItemType::Internal),
            ..Default::default()
        };
        assert!(!data.is_relation_correct());

        let data = NavigationItemData {
            item_type: Some(NavigationItemType::External),
            ..Default::default()
        };
        assert!(data.is_relation_correct());
    }

    #[test]
    fn test_payload_serialization_omits_absent_fields() {
        let payload = NavigationItemPayload {
            id: None,
            title: "Docs".to_string(),
            item_type: NavigationItemType::External,
            path: None,
            external_path: Some("https://docs.example.com".to_string()),
            menu_attached: false,
            related: None,
            related_type: None,
            audience: vec![],
            is_single: false,
            ui_router_key: Some("docs".to_string()),
            extra: Default::default(),
        };
        let v = serde_json::to_value(payload).expect("should serialize");
        assert_eq!(v["type"], "EXTERNAL");
        assert_eq!(v["externalPath"], "https://docs.example.com");
        assert_eq!(v["menuAttached"], false);
        assert_eq!(v["isSingle"], false);
        assert!(v.get("path").is_none());
        assert!(v.get("related").is_none());
        assert!(v.get("relatedType").is_none());
    }

    #[test]
    fn test_type_toggle_mapping() {
        assert_eq!(
            NavigationItemType::from_internal_toggle(true),
            NavigationItemType::Internal
        );
        assert_eq!(
            NavigationItemType::from_internal_toggle(false),
            NavigationItemType::External
        );
        assert_eq!(NavigationItemType::External.to_string(), "EXTERNAL");
    }
}
