pub(crate) mod error;
pub(crate) mod printer;
pub(crate) mod session;
mod strategy;
mod validate;

pub use error::{ParsingError, Violation};
pub use session::{ParseOutcome, ParseSession};

pub(crate) use error::ErrorList;
