// Application layer: the price-list pipeline and the storefront pieces around it.

pub mod cart;
pub mod forms;
pub mod notify;
pub mod order;
pub mod pipelines;
