use crate::api::{ApiClient, EnvConfig};
use crate::models::NavigationConfig;
use crate::navigation::{NavigationItemData, UsedContentTypeEntity};
use leptos::prelude::*;

#[derive(Clone, Copy)]
pub(crate) struct AppState {
    pub api_client: RwSignal<ApiClient>,

    /// Trailing debounce for entity search, from `window.ENV`.
    pub search_debounce_ms: i32,

    /// Loaded from backend.
    pub config: RwSignal<Option<NavigationConfig>>,
    pub config_loading: RwSignal<bool>,

    /// Host-level error surface (config and entity fetch failures).
    pub error: RwSignal<Option<String>>,

    /// Navigation items being edited. Kept in memory only.
    pub items: RwSignal<Vec<NavigationItemData>>,
}

impl AppState {
    pub fn new() -> Self {
        let env = EnvConfig::new();

        Self {
            api_client: RwSignal::new(ApiClient::from_env(&env)),
            search_debounce_ms: env.search_debounce_ms,
            config: RwSignal::new(None),
            config_loading: RwSignal::new(false),
            error: RwSignal::new(None),
            items: RwSignal::new(vec![]),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Copy)]
pub(crate) struct AppContext(pub AppState);

/// Entities linked by `items`, skipping the item at `except`.
pub(crate) fn used_entities(
    items: &[NavigationItemData],
    except: Option<usize>,
) -> Vec<UsedContentTypeEntity> {
    items
        .iter()
        .enumerate()
        .filter(|(i, _)| Some(*i) != except)
        .filter_map(|(_, item)| {
            Some(UsedContentTypeEntity {
                id: item.related.clone()?,
                collection_name: item.related_type.clone()?,
            })
        })
        .collect()
}

/// Single types linked by `items`, skipping the item at `except`.
pub(crate) fn used_single_types(
    items: &[NavigationItemData],
    except: Option<usize>,
    config: &NavigationConfig,
) -> Vec<UsedContentTypeEntity> {
    used_entities(items, except)
        .into_iter()
        .filter(|used| {
            config
                .content_types
                .iter()
                .any(|ct| ct.is_single && ct.uid == used.collection_name)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::{ContentType, EntityId, NavigationItemType};

    fn item(related: Option<i64>, related_type: Option<&str>) -> NavigationItemData {
        NavigationItemData {
            item_type: Some(NavigationItemType::Internal),
            related: related.map(EntityId::Num),
            related_type: related_type.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_used_entities_skips_edited_item_and_unlinked() {
        let items = vec![
            item(Some(1), Some("page")),
            item(Some(2), Some("page")),
            item(None, None),
        ];
        let used = used_entities(&items, Some(1));
        assert_eq!(
            used,
            vec![UsedContentTypeEntity {
                id: EntityId::Num(1),
                collection_name: "page".to_string(),
            }]
        );
        assert_eq!(used_entities(&items, None).len(), 2);
    }

    #[test]
    fn test_used_single_types_only_reports_single_types() {
        let config = NavigationConfig {
            content_types: vec![
                ContentType {
                    uid: "page".to_string(),
                    ..Default::default()
                },
                ContentType {
                    uid: "home".to_string(),
                    is_single: true,
                    ..Default::default()
                },
            ],
            ..Default::default()
        };
        let items = vec![item(Some(1), Some("page")), item(Some(1), Some("home"))];
        let used = used_single_types(&items, None, &config);
        assert_eq!(used.len(), 1);
        assert_eq!(used[0].collection_name, "home");
    }
}
