mod content;
mod debounce;
mod form;
mod item;
mod popup;
mod validation;

pub(crate) use content::{
    Catalog, ContentType, ContentTypeEntity, FetchRequest, NameFields, UsedContentTypeEntity,
};
pub(crate) use debounce::Debouncer;
pub(crate) use form::{FieldChange, ItemFormController};
pub(crate) use item::{
    EntityId, NavigationItemData, NavigationItemDraft, NavigationItemPayload, NavigationItemType,
    OptionItem,
};
pub(crate) use popup::ItemPopupController;
