pub mod attribute;
pub mod catalog;
pub mod extent;
pub mod mesh;
pub mod shared;
