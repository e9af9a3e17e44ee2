pub mod a001_product;
pub mod a002_order;
pub mod reference;
pub mod setup;
