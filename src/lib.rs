//! Bean path expressions and property copying over dynamic structured values.
//!
//! - [`path`] parses expressions such as `person.friends[2].name` and reads or
//!   writes the value they address.
//! - [`value`] is the data model: beans of declared [`value::BeanType`]s,
//!   maps and lists.
//! - [`bean`] copies properties between beans and maps under
//!   [`bean::CopyOptions`].
//! - [`convert`] coerces values to a property's declared kind.
//! - [`file`] and [`config`] back the `beanpath` command.
//!
//! # Example
//!
//! ```
//! use beanpath::bean::{BeanCopier, CopyOptions};
//! use beanpath::path::BeanPath;
//! use beanpath::value::{Bean, BeanType, Value, ValueKind};
//!
//! let user = BeanType::builder("User")
//!     .property("username", ValueKind::String)
//!     .property("age", ValueKind::I32)
//!     .build();
//!
//! let source = Value::from(serde_json::json!({"UserName": "ann", "age": "41"}));
//! let mut target = Value::Bean(Bean::new(&user));
//! let options = CopyOptions::builder().ignore_case(true).build();
//! BeanCopier::new(&source, &mut target, &options).copy().unwrap();
//!
//! let age = BeanPath::parse("user.age").unwrap();
//! assert_eq!(age.get(&target).unwrap().as_ref(), &Value::Integer(41));
//! ```

pub mod bean;
pub mod config;
pub mod convert;
pub mod error;
pub mod file;
pub mod path;
pub mod value;

pub use bean::{BeanCopier, CopyOptions, NamingStrategy};
pub use error::{BeanError, ConvertError};
pub use path::BeanPath;
pub use value::{Bean, BeanType, Value, ValueKind};
