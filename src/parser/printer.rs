use terminal_size::{terminal_size, Width};

use crate::model::Arity;
use crate::registry::OptionSpec;

const PADDING_WIDTH: usize = 3;
const MAIN_INDENT: usize = 1;
// Let's assume the average word length is 5.
// Then 17 is a good minimum, because it allows precisely 3 words with a space between them.
const MINIMUM_MIDDLE_WIDTH: usize = 17;
const DEFAULT_TOTAL_WIDTH: usize = 80;
// Target 95% of the total width, so the rendering doesn't literally use the full space.
const TARGET_TOTAL_FACTOR: f64 = 0.95;

pub(crate) struct PositionalUsage {
    pub(crate) name: String,
    pub(crate) plural: bool,
    pub(crate) limit: Option<usize>,
    pub(crate) help: Option<String>,
}

/// Renders the help message from the declared rules.
pub(crate) struct Printer {
    program: String,
    about: Option<String>,
    options: Vec<OptionSpec>,
    positional: Option<PositionalUsage>,
    terminal_width: Option<usize>,
}

impl Printer {
    pub(crate) fn terminal(
        program: String,
        about: Option<String>,
        options: Vec<OptionSpec>,
        positional: Option<PositionalUsage>,
    ) -> Self {
        let terminal_width = if let Some((Width(terminal_width), _)) = terminal_size() {
            Some(terminal_width as usize)
        } else {
            None
        };

        Self::new(program, about, options, positional, terminal_width)
    }

    pub(crate) fn new(
        program: String,
        about: Option<String>,
        mut options: Vec<OptionSpec>,
        positional: Option<PositionalUsage>,
        terminal_width: Option<usize>,
    ) -> Self {
        options.sort_by_key(|spec| spec.identity());
        Self {
            program,
            about,
            options,
            positional,
            terminal_width,
        }
    }

    pub(crate) fn help_message(&self) -> String {
        let mut summary = Vec::default();
        let mut option_rows: Vec<(String, String)> = Vec::default();

        for spec in &self.options {
            let grammar = grammar(spec);
            let compact = match spec.short() {
                Some(short) => format!("-{short}{grammar}"),
                None => format!(
                    "--{name}{grammar}",
                    name = spec.long().unwrap_or_else(|| {
                        unreachable!("internal error - a spec must carry at least one name")
                    })
                ),
            };

            if spec.required() {
                summary.push(compact);
            } else {
                summary.push(format!("[{compact}]"));
            }

            let flags = match (spec.long(), spec.short()) {
                (Some(long), Some(short)) => format!("-{short}{grammar}, --{long}{grammar}"),
                (Some(long), None) => format!("--{long}{grammar}"),
                (None, Some(short)) => format!("-{short}{grammar}"),
                (None, None) => {
                    unreachable!("internal error - a spec must carry at least one name")
                }
            };

            let mut description = String::default();

            if spec.required() {
                description.push_str("(required)");
            }

            if let Some(help) = spec.help() {
                if !description.is_empty() {
                    description.push(' ');
                }

                description.push_str(help);
            }

            option_rows.push((flags, description));
        }

        let positional_row = self.positional.as_ref().map(|positional| {
            let grammar = positional_grammar(positional);
            summary.push(grammar.clone());

            let mut description = String::default();

            if let Some(limit) = positional.limit {
                description.push_str(&format!("(at most {limit})"));
            }

            if let Some(help) = &positional.help {
                if !description.is_empty() {
                    description.push(' ');
                }

                description.push_str(help);
            }

            (grammar, description)
        });

        let left_width = option_rows
            .iter()
            .chain(positional_row.iter())
            .map(|(left, _)| left.len())
            .max()
            .unwrap_or(1);
        let middle_width = self.middle_width(left_width);
        let mut lines = Vec::default();

        if summary.is_empty() {
            lines.push(format!("usage: {program}", program = self.program));
        } else {
            lines.push(format!(
                "usage: {program} {summary}",
                program = self.program,
                summary = summary.join(" ")
            ));
        }

        if let Some(about) = &self.about {
            lines.push(String::default());

            for line in wrap(about, middle_width + left_width + PADDING_WIDTH) {
                lines.push(line);
            }
        }

        if let Some((left, middle)) = &positional_row {
            lines.push(String::default());
            lines.push("positional arguments:".to_string());
            render_row(&mut lines, left_width, middle_width, left, middle);
        }

        if !option_rows.is_empty() {
            lines.push(String::default());
            lines.push("options:".to_string());

            for (left, middle) in &option_rows {
                render_row(&mut lines, left_width, middle_width, left, middle);
            }
        }

        lines.join("\n")
    }

    fn middle_width(&self, left_width: usize) -> usize {
        let total = self.terminal_width.unwrap_or(DEFAULT_TOTAL_WIDTH);
        let target = (total as f64 * TARGET_TOTAL_FACTOR) as usize;
        let non_middle = MAIN_INDENT + left_width + PADDING_WIDTH;

        if non_middle + MINIMUM_MIDDLE_WIDTH <= target {
            target - non_middle
        } else {
            MINIMUM_MIDDLE_WIDTH
        }
    }
}

fn grammar(spec: &OptionSpec) -> String {
    let name_example = spec.identity().to_ascii_uppercase().replace('-', "_");

    match spec.arity() {
        Arity::Boolean => String::default(),
        Arity::Scalar => format!(" {name_example}"),
        Arity::Array => format!(" {name_example} [...]"),
        Arity::DelimitedList(separator) => format!(" {name_example}[{separator}...]"),
    }
}

fn positional_grammar(positional: &PositionalUsage) -> String {
    let name_example = positional.name.to_ascii_uppercase().replace('-', "_");

    if positional.plural {
        format!("[{name_example} ...]")
    } else {
        name_example
    }
}

fn render_row(
    lines: &mut Vec<String>,
    left_width: usize,
    middle_width: usize,
    left: &str,
    middle: &str,
) {
    let parts = wrap(middle, middle_width);

    if parts.is_empty() {
        lines.push(format!("{:MAIN_INDENT$}{left}", ""));
        return;
    }

    for (i, part) in parts.iter().enumerate() {
        if i == 0 {
            lines.push(format!(
                "{:MAIN_INDENT$}{left:left_width$}{:PADDING_WIDTH$}{part}",
                "", ""
            ));
        } else {
            lines.push(format!(
                "{:MAIN_INDENT$}{:left_width$}{:PADDING_WIDTH$}{part}",
                "", "", ""
            ));
        }
    }
}

fn wrap(paragraph: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::default();
    let mut current = String::default();

    for word in paragraph.split_whitespace() {
        let word_width = word.chars().count();

        if !current.is_empty() && current.chars().count() + 1 + word_width <= width {
            current.push(' ');
            current.push_str(word);
            continue;
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }

        // Hyphenate words too wide for the column, splitting on character boundaries.
        let mut remainder = word;

        while remainder.chars().count() > width {
            let boundary = remainder
                .char_indices()
                .nth(width - 1)
                .map(|(index, _)| index)
                .unwrap_or_else(|| {
                    unreachable!("internal error - the word is wider than the column")
                });
            let (head, tail) = remainder.split_at(boundary);
            lines.push(format!("{head}-"));
            remainder = tail;
        }

        current.push_str(remainder);
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(
        long: Option<&str>,
        short: Option<char>,
        arity: Arity,
        required: bool,
        help: Option<&str>,
    ) -> OptionSpec {
        OptionSpec {
            long: long.map(|l| l.to_string()),
            short,
            required,
            arity,
            exclusive_set: None,
            default: None,
            help: help.map(|h| h.to_string()),
        }
    }

    #[test]
    fn help_empty() {
        // Setup
        let printer = Printer::new("program".to_string(), None, Vec::default(), None, Some(120));

        // Execute
        let message = printer.help_message();

        // Verify
        assert_eq!(message, "usage: program");
    }

    #[test]
    fn help_option() {
        // Setup
        let printer = Printer::new(
            "program".to_string(),
            None,
            vec![spec(
                Some("count"),
                Some('c'),
                Arity::Scalar,
                false,
                Some("The number."),
            )],
            None,
            Some(120),
        );

        // Execute
        let message = printer.help_message();

        // Verify
        assert_eq!(
            message,
            r#"usage: program [-c COUNT]

options:
 -c COUNT, --count COUNT   The number."#
        );
    }

    #[test]
    fn help_required_option() {
        // Setup
        let printer = Printer::new(
            "program".to_string(),
            None,
            vec![spec(
                Some("count"),
                None,
                Arity::Scalar,
                true,
                Some("The number."),
            )],
            None,
            Some(120),
        );

        // Execute
        let message = printer.help_message();

        // Verify
        assert_eq!(
            message,
            r#"usage: program --count COUNT

options:
 --count COUNT   (required) The number."#
        );
    }

    #[test]
    fn help_sorted_options() {
        // Setup
        let printer = Printer::new(
            "program".to_string(),
            None,
            vec![
                spec(Some("zeta"), None, Arity::Boolean, false, None),
                spec(Some("alpha"), None, Arity::Boolean, false, None),
            ],
            None,
            Some(120),
        );

        // Execute
        let message = printer.help_message();

        // Verify
        assert_eq!(
            message,
            r#"usage: program [--alpha] [--zeta]

options:
 --alpha
 --zeta"#
        );
    }

    #[test]
    fn help_positional() {
        // Setup
        let printer = Printer::new(
            "program".to_string(),
            Some("Does the thing.".to_string()),
            vec![spec(Some("verbose"), Some('v'), Arity::Boolean, false, None)],
            Some(PositionalUsage {
                name: "files".to_string(),
                plural: true,
                limit: Some(2),
                help: Some("The files.".to_string()),
            }),
            Some(120),
        );

        // Execute
        let message = printer.help_message();

        // Verify
        assert_eq!(
            message,
            r#"usage: program [-v] [FILES ...]

Does the thing.

positional arguments:
 [FILES ...]     (at most 2) The files.

options:
 -v, --verbose"#
        );
    }

    #[test]
    fn help_grammar() {
        // Setup
        let printer = Printer::new(
            "program".to_string(),
            None,
            vec![
                spec(Some("tags"), None, Arity::Array, false, None),
                spec(Some("parts"), None, Arity::DelimitedList(','), false, None),
            ],
            None,
            Some(120),
        );

        // Execute
        let message = printer.help_message();

        // Verify
        assert!(message.contains("[--parts PARTS[,...]]"));
        assert!(message.contains("[--tags TAGS [...]]"));
    }

    #[test]
    fn help_wraps_narrow_terminal() {
        // Setup
        let printer = Printer::new(
            "program".to_string(),
            None,
            vec![spec(
                Some("count"),
                None,
                Arity::Scalar,
                false,
                Some("A rather long help message which cannot fit on a single line."),
            )],
            None,
            Some(40),
        );

        // Execute
        let message = printer.help_message();

        // Verify
        let lines: Vec<&str> = message.lines().collect();
        assert!(lines.len() > 4);
        assert!(lines.iter().all(|line| line.len() <= 40));
    }

    #[test]
    fn wrap_hyphenates() {
        assert_eq!(
            wrap("abcdefghij", 5),
            vec!["abcd-".to_string(), "efgh-".to_string(), "ij".to_string()]
        );
        assert_eq!(wrap("ab cd ef", 5), vec!["ab cd".to_string(), "ef".to_string()]);
        assert_eq!(wrap("  ", 5), Vec::<String>::default());
    }

    #[test]
    fn wrap_hyphenates_multibyte() {
        // Hyphenation must split on character boundaries, not byte offsets.
        let word = "é".repeat(10);
        assert_eq!(
            wrap(&word, 5),
            vec![
                format!("{}-", "é".repeat(4)),
                format!("{}-", "é".repeat(4)),
                "é".repeat(2),
            ]
        );
    }

    #[test]
    fn help_multibyte_option() {
        // Setup
        let help = "€".repeat(25);
        let printer = Printer::new(
            "program".to_string(),
            None,
            vec![spec(
                Some("count"),
                None,
                Arity::Scalar,
                false,
                Some(help.as_str()),
            )],
            None,
            Some(40),
        );

        // Execute
        let message = printer.help_message();

        // Verify
        assert!(message.lines().all(|line| line.chars().count() <= 40));
        assert!(message.contains('-'));
    }
}
