mod binding;
mod core;
mod declare;
mod field;

pub use binding::{GenericBindable, InvalidConversion};
pub use core::OptionParser;
pub use declare::{OptionDecl, PositionalDecl};
pub use field::{List, Optional, Scalar, Switch};

pub(crate) use binding::{AnonymousBindable, AnonymousBinding};
