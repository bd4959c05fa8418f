pub mod as_grapheme;
pub mod num;
pub mod pretty;
