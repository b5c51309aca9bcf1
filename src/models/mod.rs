use crate::navigation::{ContentType, EntityId, NameFields};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Audience {
    pub id: EntityId,
    pub name: String,
}

/// Navigation plugin config as served by the host backend.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct NavigationConfig {
    #[serde(default)]
    pub content_types: Vec<ContentType>,

    /// Collection uid -> fields used to label entities of that collection.
    #[serde(default)]
    pub content_types_name_fields: NameFields,

    #[serde(default)]
    pub available_audience: Vec<Audience>,

    #[serde(default)]
    pub allowed_levels: Option<u32>,

    /// Host-defined extra item fields. Carried, not rendered.
    #[serde(default)]
    pub additional_fields: Vec<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_contract_deserialize() {
        let json = r#"{
            "contentTypes": [
                {"uid": "application::page.page", "label": "Pages", "collectionName": "pages"},
                {"uid": "application::home.home", "name": "home", "isSingle": true, "available": false}
            ],
            "contentTypesNameFields": {"default": ["title"], "application::page.page": ["name"]},
            "availableAudience": [{"id": 1, "name": "Members"}],
            "allowedLevels": 2
        }"#;
        let parsed: NavigationConfig = serde_json::from_str(json).expect("config should parse");
        assert_eq!(parsed.content_types.len(), 2);
        assert!(parsed.content_types[1].is_single);
        assert!(!parsed.content_types[1].available);
        assert_eq!(
            parsed.content_types_name_fields.fields_for("application::page.page"),
            vec!["name".to_string()]
        );
        assert_eq!(parsed.available_audience[0].name, "Members");
        assert_eq!(parsed.allowed_levels, Some(2));
        assert!(parsed.additional_fields.is_empty());
    }

    #[test]
    fn test_config_defaults_when_empty() {
        let parsed: NavigationConfig = serde_json::from_str("{}").expect("config should parse");
        assert_eq!(parsed, NavigationConfig::default());
    }
}
