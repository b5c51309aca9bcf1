use crate::i18n::{I18n, DRAFT_STATUS_KEY};
use crate::models::{Audience, NavigationConfig};
use crate::navigation::content::{Catalog, ContentTypeEntity, Publishable, UsedContentTypeEntity};
use crate::navigation::item::{NavigationItemData, NavigationItemDraft, NavigationItemType, OptionItem};

/// Prefix `label` with the uppercase, bracketed draft marker when `item` is unpublished.
pub(crate) fn append_label_publication_status(
    label: &str,
    item: &impl Publishable,
    i18n: &I18n,
) -> String {
    if item.is_published() {
        label.to_string()
    } else {
        format!("[{}] {}", i18n.t(DRAFT_STATUS_KEY).to_uppercase(), label)
    }
}

/// Identifies one in-flight entity fetch. Only the latest ticket is honored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct FetchTicket {
    generation: u64,
}

/// Presentation state of the navigation item popup.
///
/// Holds the catalog the form derives its options from, prepares the form's initial
/// draft, and sequences entity fetches so a superseded response never overwrites a
/// newer page.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct ItemPopupController {
    open: bool,
    loading: bool,
    data: NavigationItemData,
    catalog: Catalog,
    audience: Vec<Audience>,
    generation: u64,
}

impl ItemPopupController {
    pub fn new(config: &NavigationConfig) -> Self {
        let mut s = Self::default();
        s.apply_config(config);
        s
    }

    pub fn apply_config(&mut self, config: &NavigationConfig) {
        self.catalog.content_types = config.content_types.clone();
        self.catalog.name_fields = config.content_types_name_fields.clone();
        self.audience = config.available_audience.clone();
    }

    /// Entities and single types already linked by other navigation items.
    pub fn set_usage(
        &mut self,
        used_entities: Vec<UsedContentTypeEntity>,
        used_content_types: Vec<UsedContentTypeEntity>,
    ) {
        self.catalog.used_entities = used_entities;
        self.catalog.used_content_types = used_content_types;
    }

    pub fn open(&mut self, data: NavigationItemData) {
        self.data = data;
        self.open = true;
    }

    /// Entities of the last session belong to whatever type it had selected; drop them.
    pub fn close(&mut self) {
        self.open = false;
        self.loading = false;
        self.data = NavigationItemData::default();
        self.catalog.entities.clear();
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn data(&self) -> &NavigationItemData {
        &self.data
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn available_audience(&self) -> &[Audience] {
        &self.audience
    }

    /// Initial draft for the form: bare relation ids resolved into decorated options.
    ///
    /// An internal item persisted without a related entity is inconsistent; its type
    /// and relation are dropped and the user starts that part over.
    pub fn prepare_form_data(&self, i18n: &I18n) -> NavigationItemDraft {
        let data = &self.data;
        let correct = data.is_relation_correct();
        let resolve = correct && data.item_type != Some(NavigationItemType::External);

        let related_type = data
            .related_type
            .as_ref()
            .filter(|_| resolve)
            .map(|uid| match self.catalog.content_type(uid) {
                Some(ct) => OptionItem::new(
                    uid.clone(),
                    append_label_publication_status(&ct.display_label(), ct, i18n),
                ),
                None => OptionItem::new(uid.clone(), uid.clone()),
            });

        let related = data.related.as_ref().filter(|_| resolve).map(|id| {
            let label = match (self.catalog.entity(id), data.related_type.as_deref()) {
                (Some(entity), Some(uid)) => self.entity_option_label(entity, uid, i18n),
                _ => id.to_string(),
            };
            OptionItem::new(id.clone(), label)
        });

        NavigationItemDraft {
            id: data.id.clone(),
            title: data.title.clone(),
            item_type: if correct { data.item_type } else { None },
            path: data.path.clone(),
            external_path: data.external_path.clone(),
            menu_attached: data.menu_attached,
            related,
            related_type,
            audience: data.audience.clone(),
            updated: false,
            extra: data.extra.clone(),
        }
    }

    fn entity_option_label(&self, entity: &ContentTypeEntity, uid: &str, i18n: &I18n) -> String {
        append_label_publication_status(&self.catalog.entity_label(entity, uid), entity, i18n)
    }

    /// Start a fetch; any ticket issued before this one becomes stale.
    ///
    /// The current page is dropped right away: it may belong to another related type,
    /// and must not feed options or auto-selection while the new page is in flight.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.generation = self.generation.saturating_add(1);
        self.loading = true;
        self.catalog.entities.clear();
        FetchTicket {
            generation: self.generation,
        }
    }

    pub fn is_current(&self, ticket: FetchTicket) -> bool {
        ticket.generation == self.generation
    }

    /// Store a fetched page. Returns `false` (and changes nothing) for stale tickets.
    pub fn receive_entities(
        &mut self,
        ticket: FetchTicket,
        entities: Vec<ContentTypeEntity>,
    ) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.catalog.entities = entities;
        self.loading = false;
        true
    }

    pub fn fetch_failed(&mut self, ticket: FetchTicket) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.loading = false;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::content::ContentType;
    use crate::navigation::form::ItemFormController;
    use crate::navigation::item::EntityId;
    use serde_json::json;

    fn article_type() -> ContentType {
        ContentType {
            uid: "article".to_string(),
            label: Some("Articles".to_string()),
            collection_name: Some("articles".to_string()),
            available: true,
            ..Default::default()
        }
    }

    fn entity(v: serde_json::Value) -> ContentTypeEntity {
        serde_json::from_value(v).expect("entity should parse")
    }

    fn popup_with_entities(entities: Vec<ContentTypeEntity>) -> ItemPopupController {
        let mut popup = ItemPopupController::new(&NavigationConfig {
            content_types: vec![article_type()],
            ..Default::default()
        });
        let ticket = popup.begin_fetch();
        assert!(popup.receive_entities(ticket, entities));
        popup
    }

    fn blog_data() -> NavigationItemData {
        serde_json::from_value(json!({
            "title": "Blog",
            "type": "INTERNAL",
            "related": 7,
            "relatedType": "article"
        }))
        .expect("should parse")
    }

    #[test]
    fn test_unpublished_related_gets_draft_marker() {
        let mut popup = popup_with_entities(vec![entity(
            json!({"id": 7, "title": "Hello", "published_at": null}),
        )]);
        popup.open(blog_data());

        let draft = popup.prepare_form_data(&I18n::english());
        let related = draft.related.expect("related should resolve");
        assert_eq!(related.value, EntityId::Num(7));
        assert!(related.label.starts_with("[DRAFT] "), "{}", related.label);
        assert_eq!(related.label, "[DRAFT] Hello");

        let related_type = draft.related_type.expect("related type should resolve");
        assert_eq!(related_type.value, "article");
        assert_eq!(related_type.label, "Articles");
        assert_eq!(draft.item_type, Some(NavigationItemType::Internal));
    }

    #[test]
    fn test_published_related_has_plain_label() {
        let mut popup = popup_with_entities(vec![entity(
            json!({"id": 7, "title": "Hello", "published_at": "2024-05-01T00:00:00Z"}),
        )]);
        popup.open(blog_data());
        let draft = popup.prepare_form_data(&I18n::english());
        assert_eq!(draft.related.unwrap().label, "Hello");
    }

    #[test]
    fn test_missing_entity_falls_back_to_id_label() {
        let mut popup = popup_with_entities(vec![]);
        popup.open(blog_data());
        let draft = popup.prepare_form_data(&I18n::english());
        assert_eq!(draft.related.unwrap().label, "7");
    }

    #[test]
    fn test_inconsistent_relation_is_cleared() {
        let mut popup = popup_with_entities(vec![]);
        popup.open(NavigationItemData {
            title: "Broken".to_string(),
            item_type: Some(NavigationItemType::Internal),
            related_type: Some("article".to_string()),
            ..Default::default()
        });
        let draft = popup.prepare_form_data(&I18n::english());
        assert_eq!(draft.item_type, None);
        assert!(draft.related.is_none());
        assert!(draft.related_type.is_none());
        assert_eq!(draft.title, "Broken");
    }

    #[test]
    fn test_external_item_relation_is_not_resolved() {
        let mut popup = popup_with_entities(vec![entity(json!({"id": 7, "title": "Hello"}))]);
        let mut data = blog_data();
        data.item_type = Some(NavigationItemType::External);
        popup.open(data);
        let draft = popup.prepare_form_data(&I18n::english());
        assert_eq!(draft.item_type, Some(NavigationItemType::External));
        assert!(draft.related.is_none());
        assert!(draft.related_type.is_none());
    }

    #[test]
    fn test_unavailable_content_type_label_is_marked() {
        let ct = ContentType {
            available: false,
            ..article_type()
        };
        let label = append_label_publication_status("Articles", &ct, &I18n::english());
        assert_eq!(label, "[DRAFT] Articles");
    }

    #[test]
    fn test_stale_fetch_response_is_discarded() {
        let mut popup = ItemPopupController::default();
        let first = popup.begin_fetch();
        let second = popup.begin_fetch();
        assert!(popup.is_loading());

        assert!(!popup.receive_entities(first, vec![entity(json!({"id": 1}))]));
        assert!(popup.catalog().entities.is_empty());
        assert!(popup.is_loading());

        assert!(popup.receive_entities(second, vec![entity(json!({"id": 2}))]));
        assert_eq!(popup.catalog().entities[0].id, EntityId::Num(2));
        assert!(!popup.is_loading());
    }

    fn homepage_type() -> ContentType {
        ContentType {
            uid: "homepage".to_string(),
            label: Some("Homepage".to_string()),
            is_single: true,
            available: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_close_drops_previous_page() {
        let mut popup = popup_with_entities(vec![entity(json!({"id": 42, "title": "Old"}))]);
        popup.open(blog_data());
        popup.close();
        assert!(popup.catalog().entities.is_empty());

        // A persisted relation is no longer labelled from the old page.
        popup.open(blog_data());
        let draft = popup.prepare_form_data(&I18n::english());
        assert_eq!(draft.related.map(|r| r.label).as_deref(), Some("7"));
    }

    #[test]
    fn test_in_flight_fetch_does_not_feed_auto_select_from_old_page() {
        let mut popup = ItemPopupController::new(&NavigationConfig {
            content_types: vec![article_type(), homepage_type()],
            ..Default::default()
        });
        let ticket = popup.begin_fetch();
        assert!(popup.receive_entities(ticket, vec![entity(json!({"id": 42, "title": "Article"}))]));
        popup.open(NavigationItemData::default());

        let i18n = I18n::english();
        let mut form = ItemFormController::default();
        let homepage = Some(OptionItem::new("homepage".to_string(), "Homepage"));
        let req = form.on_related_type_change(homepage, popup.catalog());
        assert!(req.is_some());

        let ticket = popup.begin_fetch();
        assert!(popup.catalog().entities.is_empty());
        assert!(!form.auto_select(popup.catalog(), &i18n));
        assert!(form.draft().related.is_none());

        // The fetch fails: Save stays disabled and nothing foreign is submitted.
        assert!(popup.fetch_failed(ticket));
        assert!(form.submit_disabled());
        assert!(!form.auto_select(popup.catalog(), &i18n));
        assert!(form.draft().related.is_none());
    }

    #[test]
    fn test_fetch_failure_only_clears_loading_for_current_ticket() {
        let mut popup = ItemPopupController::default();
        let first = popup.begin_fetch();
        let second = popup.begin_fetch();
        assert!(!popup.fetch_failed(first));
        assert!(popup.is_loading());
        assert!(popup.fetch_failed(second));
        assert!(!popup.is_loading());
    }

    #[test]
    fn test_open_and_close() {
        let mut popup = ItemPopupController::default();
        assert!(!popup.is_open());
        popup.open(blog_data());
        assert!(popup.is_open());
        assert_eq!(popup.data().title, "Blog");
        popup.close();
        assert!(!popup.is_open());
        assert!(popup.data().is_empty());
    }
}
