pub mod scanner;
pub mod filters;

pub use scanner::{scan_root, scan_root_with_progress, write_manifest};
pub use filters::*;
pub use qbox_assets_domain::Manifest;
