use crate::api::binding::AnonymousBindable;
use crate::api::declare::{OptionDecl, PositionalDecl};
use crate::model::ParseSettings;
use crate::parser::printer::{PositionalUsage, Printer};
use crate::parser::session::ParseSession;
use crate::registry::{DeclarationError, OptionRegistry, OptionSpec, PositionalList};

/// The entry point: collects declarations, then builds a [`ParseSession`].
///
/// Declarations are only checked at [`OptionParser::build`]; a malformed set of
/// declarations surfaces there as a [`DeclarationError`], never as a parse error.
///
/// ### Example
/// ```
/// use optbind::{OptionDecl, OptionParser, Scalar};
///
/// let mut count: u32 = 0;
/// let session = OptionParser::new("program")
///     .about("Counts the widgets.")
///     .add(OptionDecl::new(Scalar::new(&mut count)).long("count").short('c'))
///     .build()
///     .unwrap();
/// let outcome = session.parse(&["-c", "5"]);
///
/// assert!(outcome.success());
/// assert_eq!(count, 5);
/// ```
pub struct OptionParser<'a> {
    program: String,
    about: Option<String>,
    settings: ParseSettings,
    declarations: Vec<(OptionSpec, Box<dyn AnonymousBindable + 'a>)>,
    positional: Option<PositionalList<'a>>,
    duplicate_positional: bool,
}

impl<'a> OptionParser<'a> {
    /// Start a parser for the named program.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            about: None,
            settings: ParseSettings::default(),
            declarations: Vec::default(),
            positional: None,
            duplicate_positional: false,
        }
    }

    /// Document what the program does; rendered in the help message.
    pub fn about(mut self, description: impl Into<String>) -> Self {
        self.about.replace(description.into());
        self
    }

    /// Replace the default [`ParseSettings`].
    pub fn settings(mut self, settings: ParseSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Declare an option.
    pub fn add<T>(mut self, declaration: OptionDecl<'a, T>) -> Self {
        self.declarations.push(declaration.consume());
        self
    }

    /// Declare the positional list.
    pub fn positional<T>(mut self, declaration: PositionalDecl<'a, T>) -> Self {
        if self.positional.is_some() {
            self.duplicate_positional = true;
        } else {
            self.positional.replace(declaration.consume());
        }

        self
    }

    /// Check every declaration and produce the session.
    pub fn build(self) -> Result<ParseSession<'a>, DeclarationError> {
        if self.duplicate_positional {
            return Err(DeclarationError::DuplicatePositionalList);
        }

        if let Some(positional) = &self.positional {
            if !positional.plural {
                return Err(DeclarationError::ArityMismatch(positional.name().to_string()));
            }
        }

        let specs: Vec<OptionSpec> = self
            .declarations
            .iter()
            .map(|(spec, _)| spec.clone())
            .collect();
        let registry = OptionRegistry::new(self.declarations, self.settings.case_sensitive)?;
        let usage = self.positional.as_ref().map(|positional| PositionalUsage {
            name: positional.name().to_string(),
            plural: positional.plural,
            limit: positional.limit(),
            help: positional.help().map(|help| help.to_string()),
        });
        let printer = Printer::terminal(self.program, self.about, specs, usage);

        Ok(ParseSession::new(
            registry,
            self.positional,
            self.settings,
            printer,
        ))
    }
}
