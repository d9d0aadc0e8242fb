// File: src/core/tokenizer.rs
//! Splits phrases and already-cased identifiers into words.

/// Trims the phrase and drops punctuation that can never be part of an
/// identifier. Letters, digits, whitespace, `_` and `-` survive.
pub fn clean_text(text: &str) -> String {
    text.trim()
        .chars()
        .filter(|&c| c.is_alphanumeric() || c.is_whitespace() || c == '_' || c == '-')
        .collect()
}

/// Splits `text` into words, whatever casing style it arrives in.
///
/// Boundaries are a lowercase letter or digit followed by an uppercase letter,
/// `_`, `-`, whitespace and a change of script. Accented Latin letters stay
/// with their word; a run of any other script is kept as one opaque word.
pub fn tokenize(text: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut chars = text.trim().chars().peekable();

    while let Some(c) = chars.next() {
        if c == '_' || c == '-' || c.is_whitespace() {
            flush(&mut words, &mut current);
            continue;
        }

        if let Some(last) = current.chars().last() {
            if is_latin(last) != is_latin(c) {
                flush(&mut words, &mut current);
            }
        }
        current.push(c);

        if let Some(&next) = chars.peek() {
            if is_camel_boundary(c, next) {
                flush(&mut words, &mut current);
            }
        }
    }
    flush(&mut words, &mut current);

    words
}

/// ASCII plus the Latin-1 Supplement and Latin Extended-A/B letters.
fn is_latin(c: char) -> bool {
    c.is_ascii() || (c.is_alphabetic() && c <= '\u{024F}')
}

fn is_camel_boundary(prev: char, next: char) -> bool {
    is_latin(prev)
        && is_latin(next)
        && (prev.is_lowercase() || prev.is_ascii_digit())
        && next.is_uppercase()
}

fn flush(words: &mut Vec<String>, current: &mut String) {
    if !current.is_empty() {
        words.push(std::mem::take(current));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_space_separated_phrase() {
        assert_eq!(tokenize("user name"), vec!["user", "name"]);
        assert_eq!(tokenize("  total   items  "), vec!["total", "items"]);
    }

    #[test]
    fn test_cased_identifiers() {
        assert_eq!(tokenize("userName"), vec!["user", "Name"]);
        assert_eq!(tokenize("UserName"), vec!["User", "Name"]);
        assert_eq!(tokenize("user_name"), vec!["user", "name"]);
        assert_eq!(tokenize("user-name"), vec!["user", "name"]);
        assert_eq!(tokenize("_user__name_"), vec!["user", "name"]);
        assert_eq!(tokenize("MAX_RETRY_COUNT"), vec!["MAX", "RETRY", "COUNT"]);
    }

    #[test]
    fn test_acronym_runs_are_not_split() {
        assert_eq!(tokenize("HTTPServer"), vec!["HTTPServer"]);
        assert_eq!(tokenize("getHTTPResponse"), vec!["get", "HTTPResponse"]);
    }

    #[test]
    fn test_digit_before_uppercase_is_a_boundary() {
        assert_eq!(tokenize("a1B"), vec!["a1", "B"]);
        assert_eq!(tokenize("utf8Decoder"), vec!["utf8", "Decoder"]);
    }

    #[test]
    fn test_no_boundary_returns_whole_input() {
        assert_eq!(tokenize("username"), vec!["username"]);
    }

    #[test]
    fn test_non_ascii_run_is_one_token() {
        assert_eq!(tokenize("用户数量"), vec!["用户数量"]);
        assert_eq!(tokenize("user用户"), vec!["user", "用户"]);
    }

    #[test]
    fn test_accented_letters_stay_in_word() {
        assert_eq!(tokenize("café order"), vec!["café", "order"]);
        assert_eq!(tokenize("caféOrder"), vec!["café", "Order"]);
        assert_eq!(tokenize("naïve_größe"), vec!["naïve", "größe"]);
        assert_eq!(tokenize("café用户"), vec!["café", "用户"]);
    }

    #[test]
    fn test_blank_input() {
        assert!(tokenize("").is_empty());
        assert!(tokenize(" \t ").is_empty());
    }

    #[test]
    fn test_clean_text_drops_punctuation() {
        assert_eq!(clean_text("  user's name!  "), "users name");
        assert_eq!(clean_text("user-name_id"), "user-name_id");
        assert_eq!(clean_text("用户，数量"), "用户数量");
    }
}
