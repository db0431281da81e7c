pub mod asset_node;
pub mod manifest;
pub mod display_item;

pub use asset_node::*;
pub use manifest::*;
pub use display_item::*;
