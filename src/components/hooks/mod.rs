pub mod use_can_scroll_vertical;
pub mod use_random;
