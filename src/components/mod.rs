pub mod hooks;
pub mod navigation;
pub mod ui;
