pub mod category;
pub mod essay;
