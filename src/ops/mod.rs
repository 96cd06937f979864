pub mod store_ops;
pub mod sync_ops;
