//! kvconf - line-oriented `key = value` configuration loading into typed records.
//!
//! This library provides:
//! - Quote- and comment-aware line parsing
//! - Binding of values into named, typed fields of a caller-owned record
//! - Duplicate detection for scalar keys and append semantics for list keys
//!
//! # File format
//!
//! ```text
//! # full-line comment
//! Port = 8000                 # trailing comment
//! Motd = "quoted # kept, \" escaped quote"
//! AdminEmail = foo@example.org
//! AdminEmail = bar@example.org
//! ```
//!
//! # Example
//!
//! ```no_run
//! use kvconf::schema::{Destination, Schema};
//!
//! struct Config {
//! 	port: u16,
//! 	debug: bool,
//! 	admin_email: Vec<String>,
//! }
//!
//! impl Destination for Config {
//! 	fn schema(&mut self) -> Schema<'_> {
//! 		Schema::new()
//! 			.field("Port", &mut self.port)
//! 			.field("Debug", &mut self.debug)
//! 			.field("AdminEmail", &mut self.admin_email)
//! 	}
//! }
//!
//! let mut config = Config {
//! 	port: 8080,
//! 	debug: false,
//! 	admin_email: vec![],
//! };
//! kvconf::load("app.cfg", &mut config).unwrap();
//! println!("listening on {}", config.port);
//! ```

pub mod error;
pub mod loader;
pub mod parser;
pub mod schema;

pub use error::{ErrorKind, KvconfError, Result, SyntaxError, ValueError};
pub use loader::{ListMode, LoadOptions, Loader, load, load_reader, load_str};
pub use schema::{Destination, Field, FieldDescriptor, FieldKind, ScalarKind, Schema};
