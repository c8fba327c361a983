pub mod chat_area;
pub mod input_bar;
pub mod search_panel;
pub mod toast;
