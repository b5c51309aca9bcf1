use crate::navigation::item::EntityId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Fields tried, in order, when a collection has no name-field entry of its own
/// and the host did not configure a `default` one.
const FALLBACK_NAME_FIELDS: &[&str] = &["title", "subject", "name"];

/// A category of linkable entities, as registered by the host.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ContentType {
    pub uid: String,

    #[serde(default)]
    pub label: Option<String>,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub label_singular: Option<String>,

    #[serde(default)]
    pub is_single: bool,

    #[serde(default)]
    pub endpoint: Option<String>,

    #[serde(default)]
    pub collection_name: Option<String>,

    /// Plugin namespace owning the type, used to route entity fetches.
    #[serde(default)]
    pub plugin: Option<String>,

    /// `false` for single types whose only instance is unpublished.
    #[serde(default = "default_true")]
    pub available: bool,
}

fn default_true() -> bool {
    true
}

impl ContentType {
    pub fn display_label(&self) -> String {
        self.label
            .clone()
            .or_else(|| self.name.clone())
            .unwrap_or_else(|| self.uid.clone())
    }

    /// Identifier the fetch collaborator addresses this type's entities by.
    pub fn fetch_type(&self) -> String {
        self.endpoint
            .clone()
            .or_else(|| self.collection_name.clone())
            .unwrap_or_else(|| self.uid.clone())
    }
}

/// A concrete linkable record. Fields vary per collection.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub(crate) struct ContentTypeEntity {
    pub id: EntityId,

    #[serde(
        rename = "__collectionName",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub collection_name: Option<String>,

    #[serde(flatten)]
    pub fields: serde_json::Map<String, serde_json::Value>,
}

impl ContentTypeEntity {
    /// String form of a scalar field; empty strings count as missing.
    pub fn field_text(&self, field: &str) -> Option<String> {
        match self.fields.get(field)? {
            serde_json::Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            serde_json::Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

/// Marks an entity (or, for single types, a content type) already linked by
/// another navigation item.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct UsedContentTypeEntity {
    pub id: EntityId,

    #[serde(rename = "__collectionName")]
    pub collection_name: String,
}

/// Collection uid -> field names holding a human readable label.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(transparent)]
pub(crate) struct NameFields(pub BTreeMap<String, Vec<String>>);

impl NameFields {
    pub fn fields_for(&self, collection: &str) -> Vec<String> {
        if let Some(fields) = self.0.get(collection) {
            return fields.clone();
        }
        if let Some(fields) = self.0.get("default") {
            return fields.clone();
        }
        FALLBACK_NAME_FIELDS.iter().map(|f| f.to_string()).collect()
    }
}

/// Something whose label may need a draft marker.
pub(crate) trait Publishable {
    fn is_published(&self) -> bool;
}

impl Publishable for ContentTypeEntity {
    /// Collections without a publication flow are always published.
    fn is_published(&self) -> bool {
        ["published_at", "publishedAt"]
            .iter()
            .find_map(|k| self.fields.get(*k))
            .map(|v| !v.is_null())
            .unwrap_or(true)
    }
}

impl Publishable for ContentType {
    fn is_published(&self) -> bool {
        self.available
    }
}

/// Resolve a human readable label for `entity` within `collection`.
///
/// Single types are labelled by the type itself. Returns an empty string when no
/// configured field holds a value.
pub(crate) fn extract_related_item_label(
    entity: &ContentTypeEntity,
    collection: &str,
    name_fields: &NameFields,
    content_types: &[ContentType],
) -> String {
    if let Some(ct) = content_types.iter().find(|ct| ct.uid == collection) {
        if ct.is_single {
            return ct
                .label_singular
                .clone()
                .unwrap_or_else(|| ct.display_label());
        }
    }

    name_fields
        .fields_for(collection)
        .iter()
        .find_map(|f| entity.field_text(f))
        .unwrap_or_default()
}

/// Command describing one page of entities to fetch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct FetchRequest {
    pub type_name: String,
    pub query: Option<String>,
    pub plugin: Option<String>,
}

/// Everything the form derives its options from. Owned by the popup.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct Catalog {
    pub content_types: Vec<ContentType>,

    /// Current page of entities of the selected related type.
    pub entities: Vec<ContentTypeEntity>,

    pub used_entities: Vec<UsedContentTypeEntity>,

    /// Single types consumed by other navigation items.
    pub used_content_types: Vec<UsedContentTypeEntity>,

    pub name_fields: NameFields,
}

impl Catalog {
    pub fn content_type(&self, uid: &str) -> Option<&ContentType> {
        self.content_types.iter().find(|ct| ct.uid == uid)
    }

    pub fn entity(&self, id: &EntityId) -> Option<&ContentTypeEntity> {
        self.entities.iter().find(|e| &e.id == id)
    }

    pub fn entity_label(&self, entity: &ContentTypeEntity, collection: &str) -> String {
        extract_related_item_label(entity, collection, &self.name_fields, &self.content_types)
    }

    pub fn fetch_request_for(&self, uid: &str, query: Option<String>) -> Option<FetchRequest> {
        let ct = self.content_type(uid)?;
        Some(FetchRequest {
            type_name: ct.fetch_type(),
            query,
            plugin: ct.plugin.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entity(v: serde_json::Value) -> ContentTypeEntity {
        serde_json::from_value(v).expect("entity should parse")
    }

    fn pages() -> ContentType {
        ContentType {
            uid: "application::page.page".to_string(),
            label: Some("Pages".to_string()),
            collection_name: Some("pages".to_string()),
            available: true,
            ..Default::default()
        }
    }

    fn homepage() -> ContentType {
        ContentType {
            uid: "application::homepage.homepage".to_string(),
            name: Some("homepage".to_string()),
            label_singular: Some("Homepage".to_string()),
            is_single: true,
            available: false,
            ..Default::default()
        }
    }

    #[test]
    fn test_content_type_contract_deserialize() {
        let ct: ContentType = serde_json::from_value(json!({
            "uid": "plugin::blog.post",
            "name": "post",
            "isSingle": false,
            "endpoint": "posts",
            "plugin": "blog"
        }))
        .expect("content type should parse");
        assert!(ct.available);
        assert_eq!(ct.display_label(), "post");
        assert_eq!(ct.fetch_type(), "posts");
        assert_eq!(ct.plugin.as_deref(), Some("blog"));
    }

    #[test]
    fn test_fetch_type_prefers_endpoint_then_collection() {
        assert_eq!(pages().fetch_type(), "pages");
        assert_eq!(homepage().fetch_type(), "application::homepage.homepage");
    }

    #[test]
    fn test_label_uses_configured_fields_in_order() {
        let mut map = BTreeMap::new();
        map.insert(
            "application::page.page".to_string(),
            vec!["headline".to_string(), "title".to_string()],
        );
        let fields = NameFields(map);
        let e = entity(json!({"id": 1, "title": "Fallback", "headline": "Main"}));
        assert_eq!(
            extract_related_item_label(&e, "application::page.page", &fields, &[pages()]),
            "Main"
        );

        let e = entity(json!({"id": 2, "title": "Fallback", "headline": ""}));
        assert_eq!(
            extract_related_item_label(&e, "application::page.page", &fields, &[pages()]),
            "Fallback"
        );
    }

    #[test]
    fn test_label_falls_back_to_default_fields() {
        let mut map = BTreeMap::new();
        map.insert("default".to_string(), vec!["name".to_string()]);
        let fields = NameFields(map);
        let e = entity(json!({"id": 1, "name": "Jane", "title": "ignored"}));
        assert_eq!(extract_related_item_label(&e, "other", &fields, &[]), "Jane");

        let e = entity(json!({"id": 1, "subject": "Hello"}));
        assert_eq!(
            extract_related_item_label(&e, "other", &NameFields::default(), &[]),
            "Hello"
        );
        let e = entity(json!({"id": 1}));
        assert_eq!(
            extract_related_item_label(&e, "other", &NameFields::default(), &[]),
            ""
        );
    }

    #[test]
    fn test_single_type_label_is_type_label() {
        let e = entity(json!({"id": 1, "title": "whatever"}));
        assert_eq!(
            extract_related_item_label(
                &e,
                "application::homepage.homepage",
                &NameFields::default(),
                &[homepage()]
            ),
            "Homepage"
        );
    }

    #[test]
    fn test_entity_publication_status() {
        assert!(entity(json!({"id": 1})).is_published());
        assert!(entity(json!({"id": 1, "published_at": "2024-01-01"})).is_published());
        assert!(!entity(json!({"id": 1, "published_at": null})).is_published());
        assert!(!entity(json!({"id": 1, "publishedAt": null})).is_published());
        assert!(!homepage().is_published());
        assert!(pages().is_published());
    }

    #[test]
    fn test_entity_keeps_collection_name_apart_from_fields() {
        let e = entity(json!({"id": "x", "__collectionName": "pages", "title": "T"}));
        assert_eq!(e.collection_name.as_deref(), Some("pages"));
        assert!(e.fields.get("__collectionName").is_none());
        assert_eq!(e.field_text("title").as_deref(), Some("T"));
    }

    #[test]
    fn test_fetch_request_for_unknown_type_is_none() {
        let catalog = Catalog {
            content_types: vec![pages()],
            ..Default::default()
        };
        assert!(catalog.fetch_request_for("missing", None).is_none());
        let req = catalog
            .fetch_request_for("application::page.page", Some("ab".to_string()))
            .expect("known type");
        assert_eq!(req.type_name, "pages");
        assert_eq!(req.query.as_deref(), Some("ab"));
        assert!(req.plugin.is_none());
    }
}
