//! Scalar cell results and accessors over them

pub mod access;
pub mod store;

pub use access::{create_data_access, CellScalarAccess, CompactedCellAccess, DenseCellAccess};
pub use store::{ResultStore, ScalarResult, StorageLayout};
