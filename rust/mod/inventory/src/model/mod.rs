mod storage_box;
mod validate;

pub use storage_box::*;
pub use validate::*;
