//! Output boundary: CSV tables and the regression design matrix

pub mod tables;
pub mod design;

pub use tables::{write_all, write_practices, write_rows};
pub use design::{DesignMatrix, DESIGN_MATRIX_FILE};
