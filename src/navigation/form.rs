use crate::i18n::I18n;
use crate::navigation::content::{Catalog, FetchRequest};
use crate::navigation::item::{
    EntityId, NavigationItemDraft, NavigationItemPayload, NavigationItemType, OptionItem,
};
use crate::navigation::popup::append_label_publication_status;
use crate::navigation::validation::{FormErrors, FormSchema};
use crate::util::slug_key;

/// A single field edit.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum FieldChange {
    Title(String),
    Path(String),
    ExternalPath(String),
    MenuAttached(bool),
    Related(Option<OptionItem<EntityId>>),
    Audience(Vec<EntityId>),
}

/// Edit state of one navigation item.
///
/// Derived values (options, slug key, single-type flag) are recomputed from the draft
/// and a [`Catalog`] on every call. State changes that require new entities return a
/// [`FetchRequest`]; issuing it is the caller's job.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct ItemFormController {
    initialized: bool,
    draft: NavigationItemDraft,

    /// The draft as first latched, used to restore `related` when the user returns
    /// to the persisted related type.
    original: NavigationItemDraft,

    search_input: Option<String>,
    search_query: Option<String>,
    errors: FormErrors,
}

impl ItemFormController {
    pub fn new(data: NavigationItemDraft) -> Self {
        let mut s = Self::default();
        s.initialize(data);
        s
    }

    /// Seed the draft. Latches on the first non-empty data; later calls are no-ops.
    pub fn initialize(&mut self, data: NavigationItemDraft) {
        if self.initialized || data.is_empty() {
            return;
        }
        self.initialized = true;
        self.original = data.clone();
        self.draft = data;
    }

    pub fn draft(&self) -> &NavigationItemDraft {
        &self.draft
    }

    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    pub fn error(&self, field: &str) -> Option<String> {
        self.errors.get(field).cloned()
    }

    pub fn search_input(&self) -> Option<&str> {
        self.search_input.as_deref()
    }

    pub fn search_query(&self) -> Option<&str> {
        self.search_query.as_deref()
    }

    fn touch(&mut self) {
        self.draft.updated = true;
    }

    pub fn on_field_change(&mut self, change: FieldChange) {
        match change {
            FieldChange::Title(v) => self.draft.title = v,
            FieldChange::Path(v) => self.draft.path = Some(v),
            FieldChange::ExternalPath(v) => self.draft.external_path = Some(v),
            FieldChange::MenuAttached(v) => self.draft.menu_attached = Some(v),
            FieldChange::Related(v) => self.draft.related = v,
            FieldChange::Audience(v) => self.draft.audience = v,
        }
        self.touch();
    }

    pub fn on_type_toggle(&mut self, is_internal: bool) {
        self.draft.item_type = Some(NavigationItemType::from_internal_toggle(is_internal));
        self.touch();
    }

    /// Switch the related type.
    ///
    /// Clears the entity search. Going back to the persisted related type restores the
    /// persisted related entity; any other type clears it.
    pub fn on_related_type_change(
        &mut self,
        value: Option<OptionItem<String>>,
        catalog: &Catalog,
    ) -> Option<FetchRequest> {
        let reverted = match (&self.original.related_type, &value) {
            (Some(original), Some(next)) => original.value == next.value,
            _ => false,
        };

        self.search_input = None;
        self.search_query = None;
        self.draft.related = if reverted {
            self.original.related.clone()
        } else {
            None
        };
        self.draft.related_type = value;
        self.touch();

        self.fetch_request(catalog)
    }

    /// Keystroke in the entity search box. Does not trigger a fetch by itself.
    pub fn on_search_input(&mut self, value: String) {
        self.search_input = Some(value);
    }

    /// The debounce window elapsed: make `value` the active search query.
    pub fn commit_search_query(
        &mut self,
        value: String,
        catalog: &Catalog,
    ) -> Option<FetchRequest> {
        let query = Some(value).filter(|q| !q.trim().is_empty());
        if query == self.search_query {
            return None;
        }
        self.search_query = query;
        self.fetch_request(catalog)
    }

    /// Page of entities to fetch for the selected related type and active query.
    pub fn fetch_request(&self, catalog: &Catalog) -> Option<FetchRequest> {
        let uid = &self.draft.related_type.as_ref()?.value;
        catalog.fetch_request_for(uid, self.search_query.clone())
    }

    pub fn is_external(&self) -> bool {
        self.draft.is_external()
    }

    /// Translation key stem of the path input currently shown.
    pub fn path_source_name(&self) -> &'static str {
        if self.is_external() {
            "externalPath"
        } else {
            "path"
        }
    }

    pub fn is_single_selected(&self, catalog: &Catalog) -> bool {
        self.draft
            .related_type
            .as_ref()
            .and_then(|rt| catalog.content_type(&rt.value))
            .map(|ct| ct.is_single)
            .unwrap_or(false)
    }

    /// Selectable entities of the related type.
    ///
    /// Entities linked by other items are hidden, except the one this draft already
    /// points at.
    pub fn related_entity_options(
        &self,
        catalog: &Catalog,
        i18n: &I18n,
    ) -> Vec<OptionItem<EntityId>> {
        let related_type = self
            .draft
            .related_type
            .as_ref()
            .map(|rt| rt.value.as_str())
            .unwrap_or_default();
        let selected = self.draft.related.as_ref().map(|r| &r.value);

        catalog
            .entities
            .iter()
            .filter(|entity| {
                !catalog.used_entities.iter().any(|used| {
                    used.collection_name == related_type
                        && Some(&used.id) != selected
                        && used.id == entity.id
                })
            })
            .map(|entity| {
                let label = catalog.entity_label(entity, related_type);
                OptionItem::new(
                    entity.id.clone(),
                    append_label_publication_status(&label, entity, i18n),
                )
            })
            .collect()
    }

    /// Selectable related types. Single types consumed by another item are hidden
    /// unless currently selected.
    pub fn related_type_options(&self, catalog: &Catalog, i18n: &I18n) -> Vec<OptionItem<String>> {
        let selected = self.draft.related_type.as_ref().map(|rt| rt.value.as_str());

        catalog
            .content_types
            .iter()
            .filter(|ct| {
                !ct.is_single
                    || Some(ct.uid.as_str()) == selected
                    || !catalog
                        .used_content_types
                        .iter()
                        .any(|used| used.collection_name == ct.uid)
            })
            .map(|ct| {
                OptionItem::new(
                    ct.uid.clone(),
                    append_label_publication_status(&ct.display_label(), ct, i18n),
                )
            })
            .collect()
    }

    /// Slug used by front-end routers: from the title, else from the related entity.
    pub fn ui_router_key(&self, catalog: &Catalog) -> Option<String> {
        if !self.draft.title.is_empty() {
            return slug_key(&self.draft.title);
        }

        let related = self.draft.related.as_ref()?;
        let related_type = self.draft.related_type.as_ref()?;
        let entity = catalog.entity(&related.value)?;
        slug_key(&catalog.entity_label(entity, &related_type.value))
    }

    /// The option [`auto_select`](Self::auto_select) would apply, if any.
    pub fn auto_select_candidate(
        &self,
        catalog: &Catalog,
        i18n: &I18n,
    ) -> Option<OptionItem<EntityId>> {
        if !self.is_single_selected(catalog) {
            return None;
        }
        let mut options = self.related_entity_options(catalog, i18n);
        if options.len() != 1 {
            return None;
        }
        let only = options.remove(0);
        if self.draft.related.as_ref() == Some(&only) {
            None
        } else {
            Some(only)
        }
    }

    /// Single types have exactly one entity; select it without asking.
    pub fn auto_select(&mut self, catalog: &Catalog, i18n: &I18n) -> bool {
        match self.auto_select_candidate(catalog, i18n) {
            Some(option) => {
                self.on_field_change(FieldChange::Related(Some(option)));
                true
            }
            None => false,
        }
    }

    pub fn submit_disabled(&self) -> bool {
        self.draft.item_type != Some(NavigationItemType::External) && self.draft.related.is_none()
    }

    /// Show the "no more entities" hint under the entity picker: nothing to pick and no
    /// search narrowing it. Single types have no picker, so never.
    pub fn no_more_entities(&self, catalog: &Catalog, i18n: &I18n) -> bool {
        self.draft.related_type.is_some()
            && !self.is_single_selected(catalog)
            && self.search_query.is_none()
            && self.related_entity_options(catalog, i18n).is_empty()
    }

    /// Payload as the persistence layer expects it.
    pub fn sanitize(&self, catalog: &Catalog) -> NavigationItemPayload {
        let d = &self.draft;
        let item_type = d.effective_type();
        let internal = item_type == NavigationItemType::Internal;

        NavigationItemPayload {
            id: d.id.clone(),
            title: d.title.clone(),
            item_type,
            path: d.path.clone().filter(|_| internal),
            external_path: d.external_path.clone().filter(|_| !internal),
            menu_attached: d.menu_attached.unwrap_or(false),
            related: d.related.as_ref().filter(|_| internal).map(|r| r.value.clone()),
            related_type: d
                .related_type
                .as_ref()
                .filter(|_| internal)
                .map(|rt| rt.value.clone()),
            audience: d.audience.clone(),
            is_single: internal && self.is_single_selected(catalog),
            ui_router_key: self.ui_router_key(catalog),
            extra: d.extra.clone(),
        }
    }

    /// Sanitize and validate. Errors are kept on the controller for inline display.
    pub fn submit(
        &mut self,
        catalog: &Catalog,
        i18n: &I18n,
    ) -> Result<NavigationItemPayload, FormErrors> {
        let payload = self.sanitize(catalog);
        let errors = FormSchema::new(self.is_single_selected(catalog)).validate(&payload, i18n);
        if errors.is_empty() {
            self.errors.clear();
            Ok(payload)
        } else {
            self.errors = errors.clone();
            Err(errors)
        }
    }
}
