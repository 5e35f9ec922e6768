pub mod concat;
pub mod select;
