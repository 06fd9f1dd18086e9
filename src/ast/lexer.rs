use logos::Logos;

#[derive(Logos, Debug, PartialEq)]
pub(crate) enum NameToken {
    #[regex(r"[_a-zA-Z][_0-9a-zA-Z]*")]
    Name,

    #[error]
    Error,
}

/// Checks whether `value` consists of exactly one GraphQL name.
///
/// Names match `/^[_A-Za-z][_0-9A-Za-z]*$/`.
/// [Reference](https://spec.graphql.org/October2021/#Name)
#[inline]
pub fn is_name(value: &str) -> bool {
    let mut lex = NameToken::lexer(value);
    lex.next() == Some(NameToken::Name) && lex.span().end == value.len()
}

#[cfg(test)]
mod tests {
    use super::is_name;

    #[test]
    fn valid_names() {
        for name in ["a", "_", "__typename", "Foo", "foo_bar", "x1", "_1", "ALL_CAPS_9"] {
            assert!(is_name(name), "expected `{name}` to be a valid name");
        }
    }

    #[test]
    fn invalid_names() {
        for name in ["", "1a", "9", "foo bar", " foo", "foo ", "foo-bar", "-", "é", "fooé", "a.b", "$a"] {
            assert!(!is_name(name), "expected `{name}` to be an invalid name");
        }
    }
}
