/// The value-cardinality of an option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Takes no value; presence alone binds the switch target.
    Boolean,
    /// Takes precisely one value.
    Scalar,
    /// Takes one or more whole tokens.
    Array,
    /// Takes one token, split into elements by the separator character.
    DelimitedList(char),
}

impl Arity {
    /// Whether this arity feeds more than one element into its field.
    pub(crate) fn plural(&self) -> bool {
        match self {
            Arity::Boolean | Arity::Scalar => false,
            Arity::Array | Arity::DelimitedList(_) => true,
        }
    }
}

impl std::fmt::Display for Arity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Per-session behaviour toggles.
///
/// ### Example
/// ```
/// use optbind::ParseSettings;
///
/// let settings = ParseSettings::default()
///     .case_insensitive()
///     .enforce_mutual_exclusion();
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ParseSettings {
    pub(crate) case_sensitive: bool,
    pub(crate) enforce_mutual_exclusion: bool,
    pub(crate) ignore_unknown: bool,
}

impl Default for ParseSettings {
    fn default() -> Self {
        Self {
            case_sensitive: true,
            enforce_mutual_exclusion: false,
            ignore_unknown: false,
        }
    }
}

impl ParseSettings {
    /// Resolve option names without regard to case.
    pub fn case_insensitive(mut self) -> Self {
        self.case_sensitive = false;
        self
    }

    /// Reject parses where multiple members of an exclusive set are present.
    pub fn enforce_mutual_exclusion(mut self) -> Self {
        self.enforce_mutual_exclusion = true;
        self
    }

    /// Skip unknown option names and stray values instead of recording errors.
    pub fn ignore_unknown_arguments(mut self) -> Self {
        self.ignore_unknown = true;
        self
    }
}
