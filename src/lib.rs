//! `optbind` is a declarative command line option parser with typed field binding.
//!
//! Options are declared up front against `&mut` fields; running the parse binds the
//! token stream directly into those fields.  A parse never stops at the first problem:
//! the whole stream is scanned and every violation is reported, merged per option.
//!
//! * Long options match via `--name value` or `--name=value`.
//! * Short options match via `-x value`, `-xVALUE`, or merged as `-xyz`.
//! * Un-prefixed tokens (including `-`, `--`, and negative numbers) route to the
//!   positional list.
//!
//! ### Example
//! ```
//! use optbind::{List, OptionDecl, OptionParser, PositionalDecl, Scalar, Switch};
//!
//! let mut verbose = false;
//! let mut count: u32 = 1;
//! let mut files: Vec<String> = Vec::default();
//!
//! let session = OptionParser::new("example")
//!     .about("Processes the files.")
//!     .add(
//!         OptionDecl::new(Switch::new(&mut verbose, true))
//!             .long("verbose")
//!             .short('v')
//!             .help("Print extra detail."),
//!     )
//!     .add(
//!         OptionDecl::new(Scalar::new(&mut count))
//!             .long("count")
//!             .short('n')
//!             .default_value("1")
//!             .help("How many times to process."),
//!     )
//!     .positional(PositionalDecl::new(List::new(&mut files), "files"))
//!     .build()
//!     .unwrap();
//!
//! let outcome = session.parse(&["-v", "--count=3", "a.txt", "b.txt"]);
//!
//! assert!(outcome.success());
//! assert!(verbose);
//! assert_eq!(count, 3);
//! assert_eq!(files, vec!["a.txt".to_string(), "b.txt".to_string()]);
//! ```
#![deny(missing_docs)]
mod api;
mod constant;
mod model;
mod parser;
mod registry;
mod scanner;
#[allow(missing_docs)]
pub mod prelude;

pub use api::*;
pub use model::*;
pub use parser::{ParseOutcome, ParseSession, ParsingError, Violation};
pub use registry::{DeclarationError, OptionSpec};

#[cfg(test)]
#[macro_use]
extern crate assert_matches;
