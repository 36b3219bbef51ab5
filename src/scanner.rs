use crate::constant::{EQUALS, LONG_PREFIX, SHORT_PREFIX};

/// The syntactic class of a single raw token.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Disposition<'t> {
    /// A `--name` or `--name=value` token.
    Long {
        name: &'t str,
        inline: Option<&'t str>,
    },
    /// A `-x`, `-xyz`, or `-xVALUE` token; the cluster excludes the prefix.
    Short { cluster: &'t str },
    /// Anything else, including `-`, `--`, and negative numbers.
    Value(&'t str),
}

/// Classify a raw token by its prefix.
///
/// The bare tokens `-` and `--` are values, not markers.  A `-` followed by a numeric
/// remainder (ex: `-5`, `-2.5`) is a value, so negative numbers pass through to
/// positional or value consumption untouched.
pub(crate) fn classify(token: &str) -> Disposition<'_> {
    if let Some(remainder) = token.strip_prefix(LONG_PREFIX) {
        if remainder.is_empty() {
            return Disposition::Value(token);
        }

        return match remainder.split_once(EQUALS) {
            Some((name, inline)) => Disposition::Long {
                name,
                inline: Some(inline),
            },
            None => Disposition::Long {
                name: remainder,
                inline: None,
            },
        };
    }

    if let Some(remainder) = token.strip_prefix(SHORT_PREFIX) {
        if remainder.is_empty() || numeric(remainder) {
            return Disposition::Value(token);
        }

        return Disposition::Short { cluster: remainder };
    }

    Disposition::Value(token)
}

/// Whether the remainder of a `-` token reads as a number.
/// Digit-leading forms only: `inf` and `nan` parse as floats, but `-inf` must stay a
/// short cluster.
fn numeric(remainder: &str) -> bool {
    let digit_led = remainder.starts_with(|c: char| c.is_ascii_digit())
        || (remainder.starts_with('.')
            && remainder[1..].starts_with(|c: char| c.is_ascii_digit()));

    digit_led && remainder.parse::<f64>().is_ok()
}

/// A forward-only scan position over the token stream.
///
/// There is no retreat operation; strategies that need lookahead use [`TokenCursor::peek`]
/// and only advance once they decide to consume.
pub(crate) struct TokenCursor<'t> {
    tokens: &'t [&'t str],
    index: usize,
}

impl<'t> TokenCursor<'t> {
    pub(crate) fn new(tokens: &'t [&'t str]) -> Self {
        Self { tokens, index: 0 }
    }

    /// Consume and return the next token, whatever its class.
    pub(crate) fn take_next(&mut self) -> Option<&'t str> {
        let token = self.tokens.get(self.index).copied();

        if token.is_some() {
            self.index += 1;
        }

        token
    }

    pub(crate) fn peek(&self) -> Option<&'t str> {
        self.tokens.get(self.index).copied()
    }

    /// Consume the next token only if it classifies as a value.
    pub(crate) fn take_value(&mut self) -> Option<&'t str> {
        match self.peek().map(classify) {
            Some(Disposition::Value(token)) => {
                self.index += 1;
                Some(token)
            }
            _ => None,
        }
    }

    /// Greedily consume every contiguous value token from the current position.
    pub(crate) fn collect_values(&mut self) -> Vec<&'t str> {
        let mut values = Vec::default();

        while let Some(token) = self.take_value() {
            values.push(token);
        }

        values
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("--name", Disposition::Long { name: "name", inline: None })]
    #[case("--name=value", Disposition::Long { name: "name", inline: Some("value") })]
    #[case("--name=", Disposition::Long { name: "name", inline: Some("") })]
    #[case("--name=a=b", Disposition::Long { name: "name", inline: Some("a=b") })]
    #[case("-x", Disposition::Short { cluster: "x" })]
    #[case("-abc", Disposition::Short { cluster: "abc" })]
    #[case("-n5", Disposition::Short { cluster: "n5" })]
    #[case("--", Disposition::Value("--"))]
    #[case("-", Disposition::Value("-"))]
    #[case("-5", Disposition::Value("-5"))]
    #[case("-5.5", Disposition::Value("-5.5"))]
    #[case("-.5", Disposition::Value("-.5"))]
    #[case("-inf", Disposition::Short { cluster: "inf" })]
    #[case("-nan", Disposition::Short { cluster: "nan" })]
    #[case("-infinity", Disposition::Short { cluster: "infinity" })]
    #[case("value", Disposition::Value("value"))]
    #[case("", Disposition::Value(""))]
    fn classify_token(#[case] token: &str, #[case] expected: Disposition) {
        assert_eq!(classify(token), expected);
    }

    #[test]
    fn cursor_take_next() {
        let tokens = ["a", "--b"];
        let mut cursor = TokenCursor::new(&tokens);

        assert_eq!(cursor.take_next(), Some("a"));
        assert_eq!(cursor.peek(), Some("--b"));
        assert_eq!(cursor.take_next(), Some("--b"));
        assert_eq!(cursor.take_next(), None);
        assert_eq!(cursor.peek(), None);
    }

    #[test]
    fn cursor_take_value() {
        let tokens = ["a", "--b"];
        let mut cursor = TokenCursor::new(&tokens);

        assert_eq!(cursor.take_value(), Some("a"));
        // A marker token is not consumed by take_value.
        assert_eq!(cursor.take_value(), None);
        assert_eq!(cursor.peek(), Some("--b"));
    }

    #[test]
    fn cursor_collect_values() {
        let tokens = ["a", "-5", "b", "--stop", "c"];
        let mut cursor = TokenCursor::new(&tokens);

        assert_eq!(cursor.collect_values(), vec!["a", "-5", "b"]);
        assert_eq!(cursor.peek(), Some("--stop"));
        assert_eq!(cursor.collect_values(), Vec::<&str>::default());
    }
}
