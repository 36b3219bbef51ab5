use crate::api::binding::{AnonymousBindable, AnonymousBinding, GenericBindable};
use crate::model::Arity;
use crate::registry::{OptionSpec, PositionalList};

/// The declared rule for one option, paired with the field it binds into.
///
/// At least one of [`OptionDecl::long`]/[`OptionDecl::short`] must be given;
/// building a parser with a nameless declaration is a configuration error.
///
/// ### Example
/// ```
/// use optbind::{OptionDecl, Scalar};
///
/// let mut count: u32 = 0;
/// OptionDecl::new(Scalar::new(&mut count))
///     .long("count")
///     .short('c')
///     .required()
///     .help("The number of widgets.");
/// ```
pub struct OptionDecl<'a, T> {
    binding: AnonymousBinding<'a, T>,
    arity: Arity,
    long: Option<String>,
    short: Option<char>,
    required: bool,
    exclusive_set: Option<String>,
    default: Option<Vec<String>>,
    help: Option<String>,
}

impl<'a, T> OptionDecl<'a, T> {
    /// Declare an option over the given field binding.
    /// The arity is taken from the binding ([`crate::Switch`] → `Boolean`,
    /// [`crate::Scalar`]/[`crate::Optional`] → `Scalar`, [`crate::List`] → `Array`).
    pub fn new(field: impl GenericBindable<'a, T> + 'a) -> Self {
        let arity = field.arity();
        Self {
            binding: AnonymousBinding::erase(field),
            arity,
            long: None,
            short: None,
            required: false,
            exclusive_set: None,
            default: None,
            help: None,
        }
    }

    /// Set the long name (matched via `--name` or `--name=value`).
    pub fn long(mut self, name: impl Into<String>) -> Self {
        self.long.replace(name.into());
        self
    }

    /// Set the short name (matched via `-x`, `-xyz`, or `-xVALUE`).
    pub fn short(mut self, short: char) -> Self {
        self.short.replace(short);
        self
    }

    /// Mark the option as required; an absent required option fails the parse.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Document the help message for this option.
    /// If repeated, only the final message applies.
    pub fn help(mut self, description: impl Into<String>) -> Self {
        self.help.replace(description.into());
        self
    }

    /// Set a default raw value, bound into the field before any token is processed.
    /// Repeat to build up a multi-element default for an `Array` option.
    pub fn default_value(mut self, token: impl Into<String>) -> Self {
        self.default.get_or_insert_with(Vec::default).push(token.into());
        self
    }

    /// Set several default raw values at once; shorthand for repeated
    /// [`OptionDecl::default_value`].
    pub fn default_values(
        mut self,
        tokens: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.default
            .get_or_insert_with(Vec::default)
            .extend(tokens.into_iter().map(Into::into));
        self
    }

    /// Place the option in a mutually exclusive set.
    /// At most one member of a set may be present in a single parse
    /// (when [`crate::ParseSettings::enforce_mutual_exclusion`] is set).
    pub fn exclusive(mut self, set: impl Into<String>) -> Self {
        self.exclusive_set.replace(set.into());
        self
    }

    /// Re-declare the arity as a delimited list: the option takes one token which is
    /// split into elements by `separator`.  Requires an `Array`-capable binding.
    pub fn delimited(mut self, separator: char) -> Self {
        self.arity = Arity::DelimitedList(separator);
        self
    }

    pub(crate) fn consume(self) -> (OptionSpec, Box<dyn AnonymousBindable + 'a>) {
        let OptionDecl {
            binding,
            arity,
            long,
            short,
            required,
            exclusive_set,
            default,
            help,
        } = self;

        (
            OptionSpec {
                long,
                short,
                required,
                arity,
                exclusive_set,
                default,
                help,
            },
            Box::new(binding),
        )
    }
}

/// The destination rule for un-prefixed value tokens.
/// At most one may be declared per parser; a second is a configuration error.
///
/// ### Example
/// ```
/// use optbind::{List, PositionalDecl};
///
/// let mut files: Vec<String> = Vec::default();
/// PositionalDecl::new(List::new(&mut files), "files")
///     .limit(2)
///     .help("The files to process.");
/// ```
pub struct PositionalDecl<'a, T> {
    binding: AnonymousBinding<'a, T>,
    plural: bool,
    name: String,
    limit: Option<usize>,
    help: Option<String>,
}

impl<'a, T> PositionalDecl<'a, T> {
    /// Declare an unbounded positional list over the given field binding.
    /// The binding must be `Array`-capable.
    pub fn new(field: impl GenericBindable<'a, T> + 'a, name: impl Into<String>) -> Self {
        let plural = field.arity().plural();
        Self {
            binding: AnonymousBinding::erase(field),
            plural,
            name: name.into(),
            limit: None,
            help: None,
        }
    }

    /// Bound the number of accepted values.
    /// `limit(0)` disallows positional values entirely.
    pub fn limit(mut self, maximum: usize) -> Self {
        self.limit.replace(maximum);
        self
    }

    /// Document the help message for the positional list.
    pub fn help(mut self, description: impl Into<String>) -> Self {
        self.help.replace(description.into());
        self
    }

    pub(crate) fn consume(self) -> PositionalList<'a> {
        let PositionalDecl {
            binding,
            plural,
            name,
            limit,
            help,
        } = self;

        PositionalList::new(name, limit, help, plural, Box::new(binding))
    }
}
