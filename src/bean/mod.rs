//! Property copying between beans and maps, plus the helpers built on it.
//!
//! [`BeanCopier`] does the work; [`CopyOptions`] decides which properties
//! move and how strictly. The free functions in [`util`] cover the common
//! cases.

pub mod cache;
pub mod copier;
pub mod naming;
pub mod options;
pub mod util;

pub use cache::PropertyTable;
pub use copier::BeanCopier;
pub use naming::{format_keyword, NamingStrategy};
pub use options::{CopyOptions, CopyOptionsBuilder};
