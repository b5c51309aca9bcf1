mod item_form;
mod item_popup;

pub(crate) use item_form::NavigationItemForm;
pub(crate) use item_popup::NavigationItemPopup;
