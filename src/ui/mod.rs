pub mod charts;
pub mod map;
pub mod panels;
pub mod table;
pub mod views;
