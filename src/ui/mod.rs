pub mod app;
pub mod cell;
pub mod layout;
