pub mod background;
pub mod panels;
pub mod plot;
