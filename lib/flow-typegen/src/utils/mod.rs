pub mod parsing;
pub mod pretty_display;
