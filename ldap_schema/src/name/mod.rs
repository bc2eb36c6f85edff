//! Distinguished names and their components.
//!
//! Names are parsed against a [`Schema`](crate::Schema) and borrow it: each
//! RDN holds the attribute type it resolved to at parse time.

mod dn;
mod rdn;

pub use self::{
    dn::{Ancestors, Dn},
    rdn::Rdn,
};

const ESCAPE: char = '\\';

/// Split `text` at every `separator` that is not escaped with a backslash.
///
/// Always yields at least one (possibly empty) part.
pub(crate) fn split_unescaped(text: &str, separator: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut escaped = false;
    for (index, c) in text.char_indices() {
        if escaped {
            escaped = false;
        } else if c == ESCAPE {
            escaped = true;
        } else if c == separator {
            parts.push(&text[start..index]);
            start = index + c.len_utf8();
        }
    }
    parts.push(&text[start..]);
    parts
}

/// Split `text` at the first unescaped `separator`.
pub(crate) fn split_once_unescaped(text: &str, separator: char) -> Option<(&str, &str)> {
    let mut escaped = false;
    for (index, c) in text.char_indices() {
        if escaped {
            escaped = false;
        } else if c == ESCAPE {
            escaped = true;
        } else if c == separator {
            return Some((&text[..index], &text[index + c.len_utf8()..]));
        }
    }
    None
}

/// Trim surrounding whitespace, keeping a trailing whitespace character that
/// is escaped with a backslash.
pub(crate) fn trim_unescaped(text: &str) -> &str {
    let start = text.trim_start();
    let trimmed = start.trim_end();
    let escapes = trimmed.chars().rev().take_while(|c| *c == ESCAPE).count();
    if escapes % 2 == 0 {
        return trimmed;
    }
    match start[trimmed.len()..].chars().next() {
        Some(c) => &start[..trimmed.len() + c.len_utf8()],
        None => trimmed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_unescaped() {
        assert_eq!(split_unescaped("a=1,b=2", ','), vec!["a=1", "b=2"]);
        assert_eq!(split_unescaped("", ','), vec![""]);
        assert_eq!(
            split_unescaped(r"cn=Doe\, John,dc=com", ','),
            vec![r"cn=Doe\, John", "dc=com"]
        );
        assert_eq!(
            split_unescaped(r"cn=a\\,dc=com", ','),
            vec![r"cn=a\\", "dc=com"]
        );
        assert_eq!(split_unescaped(r"cn=a\2Cb", ','), vec![r"cn=a\2Cb"]);
    }

    #[test]
    fn test_split_once_unescaped() {
        assert_eq!(split_once_unescaped("a=b=c", '='), Some(("a", "b=c")));
        assert_eq!(split_once_unescaped(r"a\=b=c", '='), Some((r"a\=b", "c")));
        assert_eq!(split_once_unescaped("abc", '='), None);
    }

    #[test]
    fn test_trim_unescaped() {
        assert_eq!(trim_unescaped("  a b  "), "a b");
        assert_eq!(trim_unescaped(r" \ a\  "), r"\ a\ ");
        assert_eq!(trim_unescaped(r"a\\  "), r"a\\");
        assert_eq!(trim_unescaped(r"a\"), r"a\");
        assert_eq!(trim_unescaped("   "), "");
    }
}
