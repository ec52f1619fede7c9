pub mod cover_letter;
pub mod form;
pub mod resume;
pub mod template;
