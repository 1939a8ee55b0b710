//! Bean path expressions: parsing, reading and writing.
//!
//! A bean path addresses a location inside a [`Value`](crate::value::Value)
//! made of beans, maps and lists.
//!
//! # Supported Syntax
//!
//! - `name` / `.name` - Field or map key
//! - `['name']` - Bracket notation (quotes stripped)
//! - `[index]` - List index (supports negative indices)
//! - `[start:end:step]` - List slice, end exclusive
//! - `[0,2]` / `['a','b']` - Several indices or keys
//! - `$` - Leading root marker
//!
//! # Examples
//!
//! ```
//! use beanpath::path::BeanPath;
//! use beanpath::value::Value;
//!
//! let mut root = Value::map();
//! let path = BeanPath::parse("person.friends[0].name").unwrap();
//! path.set(&mut root, "Bob").unwrap();
//! assert_eq!(path.get(&root).unwrap().as_ref(), &Value::from("Bob"));
//! ```

pub mod ast;
pub mod evaluator;
mod mutator;
pub mod parser;

pub use ast::{BeanPath, Segment, Slice};
pub use evaluator::Evaluator;
pub use parser::Parser;
