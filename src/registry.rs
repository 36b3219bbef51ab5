use std::collections::HashMap;
use thiserror::Error;

use crate::api::{AnonymousBindable, InvalidConversion};
use crate::model::Arity;
use crate::parser::{ErrorList, Violation};

/// A malformed option declaration.
/// Raised at build time, before any token is processed; never surfaced as a parse error.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DeclarationError {
    /// An option declared neither a long nor a short name.
    #[error("an option must declare a long or short name.")]
    NamelessOption,

    /// Two options share a long name.
    #[error("cannot duplicate the option '{0}'.")]
    DuplicateOption(String),

    /// Two options share a short name.
    #[error("cannot duplicate the short option '{0}'.")]
    DuplicateShortOption(char),

    /// More than one positional list was declared.
    #[error("cannot declare more than one positional list.")]
    DuplicatePositionalList,

    /// The declared arity does not fit the bound field
    /// (ex: `Array` arity over a scalar field, or the reverse).
    #[error("the arity of '{0}' does not fit its bound field.")]
    ArityMismatch(String),

    /// The declared default does not fit the arity
    /// (any default on a `Boolean`, or a multi-token default on a single-value arity).
    #[error("the default of '{0}' does not fit its arity.")]
    MalformedDefault(String),
}

/// The declared rule for one option: names, arity, requiredness, exclusivity, default.
/// Immutable once the registry is built.
#[derive(Debug, Clone)]
pub struct OptionSpec {
    pub(crate) long: Option<String>,
    pub(crate) short: Option<char>,
    pub(crate) required: bool,
    pub(crate) arity: Arity,
    pub(crate) exclusive_set: Option<String>,
    pub(crate) default: Option<Vec<String>>,
    pub(crate) help: Option<String>,
}

impl OptionSpec {
    /// The long name, if declared.
    pub fn long(&self) -> Option<&str> {
        self.long.as_deref()
    }

    /// The short name, if declared.
    pub fn short(&self) -> Option<char> {
        self.short
    }

    /// Whether the option must be present in the token stream.
    pub fn required(&self) -> bool {
        self.required
    }

    /// The declared arity.
    pub fn arity(&self) -> Arity {
        self.arity
    }

    /// The help message, if documented.
    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// The name the option is reported under: the long name when declared, else the short.
    pub fn identity(&self) -> String {
        match (&self.long, &self.short) {
            (Some(long), _) => long.clone(),
            (None, Some(short)) => short.to_string(),
            (None, None) => unreachable!("internal error - a spec must carry at least one name"),
        }
    }
}

pub(crate) struct Registered<'a> {
    pub(crate) spec: OptionSpec,
    pub(crate) binding: Box<dyn AnonymousBindable + 'a>,
    pub(crate) defined_at: Option<usize>,
}

/// Name → rule lookup over every declared option.
/// Read-only during parsing, except for the one-way `defined_at` stamps.
pub(crate) struct OptionRegistry<'a> {
    entries: Vec<Registered<'a>>,
    by_long: HashMap<String, usize>,
    by_short: HashMap<char, usize>,
    case_sensitive: bool,
    next_defined: usize,
}

impl<'a> OptionRegistry<'a> {
    pub(crate) fn new(
        declarations: Vec<(OptionSpec, Box<dyn AnonymousBindable + 'a>)>,
        case_sensitive: bool,
    ) -> Result<Self, DeclarationError> {
        let mut entries: Vec<Registered<'a>> = Vec::with_capacity(declarations.len());
        let mut by_long = HashMap::default();
        let mut by_short = HashMap::default();

        for (spec, binding) in declarations.into_iter() {
            if spec.long.is_none() && spec.short.is_none() {
                return Err(DeclarationError::NamelessOption);
            }

            if !compatible(spec.arity, binding.arity()) {
                return Err(DeclarationError::ArityMismatch(spec.identity()));
            }

            if let Some(default) = &spec.default {
                let malformed = match spec.arity {
                    Arity::Boolean => true,
                    Arity::Scalar | Arity::DelimitedList(_) => default.len() != 1,
                    Arity::Array => false,
                };

                if malformed {
                    return Err(DeclarationError::MalformedDefault(spec.identity()));
                }
            }

            let index = entries.len();

            if let Some(long) = &spec.long {
                let key = fold(long, case_sensitive);

                if by_long.insert(key, index).is_some() {
                    return Err(DeclarationError::DuplicateOption(long.clone()));
                }
            }

            if let Some(short) = spec.short {
                let key = fold_short(short, case_sensitive);

                if by_short.insert(key, index).is_some() {
                    return Err(DeclarationError::DuplicateShortOption(short));
                }
            }

            entries.push(Registered {
                spec,
                binding,
                defined_at: None,
            });
        }

        Ok(Self {
            entries,
            by_long,
            by_short,
            case_sensitive,
            next_defined: 0,
        })
    }

    pub(crate) fn resolve_long(&self, name: &str) -> Option<usize> {
        self.by_long.get(&fold(name, self.case_sensitive)).copied()
    }

    pub(crate) fn resolve_short(&self, short: char) -> Option<usize> {
        self.by_short
            .get(&fold_short(short, self.case_sensitive))
            .copied()
    }

    pub(crate) fn spec(&self, index: usize) -> &OptionSpec {
        &self.entries[index].spec
    }

    pub(crate) fn entries(&self) -> &[Registered<'a>] {
        &self.entries
    }

    /// Flip the one-way "defined" flag, stamping the definition order.
    /// Setting it twice is idempotent.
    pub(crate) fn mark_defined(&mut self, index: usize) {
        let entry = &mut self.entries[index];

        if entry.defined_at.is_none() {
            entry.defined_at = Some(self.next_defined);
            self.next_defined += 1;
        }
    }

    /// Signal presence to the binding without feeding values (boolean options).
    pub(crate) fn mark_matched(&mut self, index: usize) {
        self.entries[index].binding.matched();
    }

    pub(crate) fn bind(&mut self, index: usize, values: &[&str]) -> Result<(), InvalidConversion> {
        let entry = &mut self.entries[index];
        entry.binding.matched();
        entry.binding.bind(values)
    }

    /// Bind every declared default into its destination field, for options the token
    /// stream never defined.
    ///
    /// Runs after the scan rather than before it: a collection-backed option must not
    /// be seeded underneath user-supplied elements.  Defaults do not stamp the
    /// "defined" flag, so a required option is not satisfied by its default.
    pub(crate) fn apply_defaults(&mut self, errors: &mut ErrorList) {
        for entry in self.entries.iter_mut() {
            if entry.defined_at.is_some() {
                continue;
            }

            if let Some(default) = &entry.spec.default {
                let values: Vec<&str> = match entry.spec.arity {
                    Arity::DelimitedList(separator) => {
                        default.iter().flat_map(|raw| raw.split(separator)).collect()
                    }
                    _ => default.iter().map(String::as_str).collect(),
                };

                if let Err(error) = entry.binding.bind(&values) {
                    errors.record(
                        entry.spec.identity(),
                        Violation::Format {
                            detail: error.to_string(),
                        },
                    );
                }
            }
        }
    }
}

fn compatible(declared: Arity, field: Arity) -> bool {
    match declared {
        Arity::Boolean => matches!(field, Arity::Boolean),
        Arity::Scalar => matches!(field, Arity::Scalar),
        Arity::Array | Arity::DelimitedList(_) => matches!(field, Arity::Array),
    }
}

fn fold(name: &str, case_sensitive: bool) -> String {
    if case_sensitive {
        name.to_string()
    } else {
        name.to_lowercase()
    }
}

fn fold_short(short: char, case_sensitive: bool) -> char {
    if case_sensitive {
        short
    } else {
        short.to_ascii_lowercase()
    }
}

/// The destination for un-prefixed value tokens.
pub(crate) struct PositionalList<'a> {
    name: String,
    limit: Option<usize>,
    help: Option<String>,
    pub(crate) plural: bool,
    binding: Box<dyn AnonymousBindable + 'a>,
    accepted: usize,
}

impl<'a> PositionalList<'a> {
    pub(crate) fn new(
        name: String,
        limit: Option<usize>,
        help: Option<String>,
        plural: bool,
        binding: Box<dyn AnonymousBindable + 'a>,
    ) -> Self {
        Self {
            name,
            limit,
            help,
            plural,
            binding,
            accepted: 0,
        }
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn limit(&self) -> Option<usize> {
        self.limit
    }

    pub(crate) fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Route one value token into the positional destination.
    /// Exceeding the element bound is a failure for that token only; the scan continues.
    pub(crate) fn accept(&mut self, token: &str, errors: &mut ErrorList) {
        if let Some(limit) = self.limit {
            if self.accepted >= limit {
                errors.record(
                    self.name.clone(),
                    Violation::Format {
                        detail: format!("too many values (limit {limit})."),
                    },
                );
                return;
            }
        }

        self.binding.matched();

        match self.binding.bind(&[token]) {
            Ok(()) => self.accepted += 1,
            Err(error) => errors.record(
                self.name.clone(),
                Violation::Format {
                    detail: error.to_string(),
                },
            ),
        }
    }
}
