pub mod data;
pub mod hello;
