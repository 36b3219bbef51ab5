use crate::model::ParseSettings;
use crate::parser::error::{ErrorList, ParsingError, Violation};
use crate::parser::printer::Printer;
use crate::parser::strategy::{match_long, match_short};
use crate::parser::validate::enforce;
use crate::registry::{OptionRegistry, PositionalList};
use crate::scanner::{classify, Disposition, TokenCursor};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// The result of one parse: either clean, or every violation the token stream produced.
#[derive(Debug, PartialEq, Eq)]
pub struct ParseOutcome {
    errors: Vec<ParsingError>,
}

impl ParseOutcome {
    /// Whether the parse completed without a single violation.
    pub fn success(&self) -> bool {
        self.errors.is_empty()
    }

    /// The per-option errors, in the order the options first failed.
    pub fn errors(&self) -> &[ParsingError] {
        &self.errors
    }
}

/// A fully declared parser, ready to run against a token stream.
///
/// The session owns the field bindings, so [`ParseSession::parse`] consumes it; once the
/// parse returns, the bound variables are released back to the caller.
///
/// ### Example
/// ```
/// use optbind::{OptionDecl, OptionParser, Scalar, Switch};
///
/// let mut verbose = false;
/// let mut count: u32 = 0;
/// let session = OptionParser::new("program")
///     .add(OptionDecl::new(Switch::new(&mut verbose, true)).long("verbose").short('v'))
///     .add(OptionDecl::new(Scalar::new(&mut count)).long("count").short('c'))
///     .build()
///     .unwrap();
/// let outcome = session.parse(&["-v", "--count", "5"]);
///
/// assert!(outcome.success());
/// assert!(verbose);
/// assert_eq!(count, 5);
/// ```
pub struct ParseSession<'a> {
    registry: OptionRegistry<'a>,
    positional: Option<PositionalList<'a>>,
    settings: ParseSettings,
    printer: Printer,
}

impl<'a> ParseSession<'a> {
    pub(crate) fn new(
        registry: OptionRegistry<'a>,
        positional: Option<PositionalList<'a>>,
        settings: ParseSettings,
        printer: Printer,
    ) -> Self {
        Self {
            registry,
            positional,
            settings,
            printer,
        }
    }

    /// Run the parse over the raw tokens (program name excluded).
    ///
    /// The scan is exhaustive: a violation never stops it, so the outcome reports every
    /// problem in the stream, merged per option.  Fields bound from well-formed portions
    /// of a failing stream keep their values.
    pub fn parse(mut self, tokens: &[&str]) -> ParseOutcome {
        #[cfg(feature = "tracing_debug")]
        {
            debug!("parsing tokens: {tokens:?}");
        }

        let mut errors = ErrorList::default();
        let mut cursor = TokenCursor::new(tokens);

        while let Some(token) = cursor.take_next() {
            #[cfg(feature = "tracing_debug")]
            {
                debug!("token: {token}");
            }

            match classify(token) {
                Disposition::Long { name, inline } => match_long(
                    &mut self.registry,
                    &self.settings,
                    name,
                    inline,
                    &mut cursor,
                    &mut errors,
                ),
                Disposition::Short { cluster } => match_short(
                    &mut self.registry,
                    &self.settings,
                    cluster,
                    &mut cursor,
                    &mut errors,
                ),
                Disposition::Value(value) => match &mut self.positional {
                    Some(positional) => positional.accept(value, &mut errors),
                    None => {
                        if !self.settings.ignore_unknown {
                            errors.record(
                                value.to_string(),
                                Violation::Format {
                                    detail: "unexpected value.".to_string(),
                                },
                            );
                        }
                    }
                },
            }
        }

        self.registry.apply_defaults(&mut errors);
        enforce(&self.registry, &self.settings, &mut errors);

        ParseOutcome {
            errors: errors.into_errors(),
        }
    }

    /// Render the help message from the declared options and positional list.
    pub fn help_message(&self) -> String {
        self.printer.help_message()
    }
}
