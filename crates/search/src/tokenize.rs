//! Line cleaning and token splitting for the indexer.
//!
//! Cleaning is a pure character-deletion pass; it never introduces token
//! boundaries. Splitting happens afterwards on spaces and square brackets.

/// Characters removed from every source line before splitting.
pub const STRIPPED_PUNCTUATION: &[char] = &[
    ',', '.', ':', ';', '?', '(', ')', '!', '{', '}', '|', '/', '\\', '^', '\n',
];

/// Characters that separate tokens after cleaning.
pub const TOKEN_DELIMITERS: &[char] = &[' ', '[', ']'];

/// Delete every [`STRIPPED_PUNCTUATION`] character from `line`.
///
/// `"end.of,line"` becomes `"endofline"`: the words are glued, not split.
pub fn strip_punctuation(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    out.extend(line.chars().filter(|ch| !STRIPPED_PUNCTUATION.contains(ch)));
    out
}

/// Split a cleaned line into tokens.
///
/// Runs of delimiters produce no empty tokens, and each token is trimmed of
/// surrounding whitespace (tabs, carriage returns) before it is kept.
pub fn split_tokens(cleaned: &str) -> impl Iterator<Item = &str> {
    cleaned
        .split(TOKEN_DELIMITERS)
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(line: &str) -> Vec<String> {
        let cleaned = strip_punctuation(line);
        split_tokens(&cleaned).map(str::to_string).collect()
    }

    #[test]
    fn strip_punctuation_deletes_listed_characters() {
        assert_eq!(
            strip_punctuation("a,b.c:d;e?f(g)h!i{j}k|l/m\\n^o\n"),
            "abcdefghijklmno"
        );
    }

    #[test]
    fn strip_punctuation_keeps_other_symbols() {
        assert_eq!(strip_punctuation("it's 100% \"fine\"-ish"), "it's 100% \"fine\"-ish");
    }

    #[test]
    fn split_on_spaces_and_brackets() {
        assert_eq!(tokens("the [quick]brown  fox"), vec!["the", "quick", "brown", "fox"]);
    }

    #[test]
    fn punctuation_glues_rather_than_splits() {
        assert_eq!(tokens("end.of,line"), vec!["endofline"]);
    }

    #[test]
    fn tokens_are_trimmed() {
        assert_eq!(tokens("\tfoo \r"), vec!["foo"]);
    }

    #[test]
    fn tabs_inside_a_token_do_not_split_it() {
        assert_eq!(tokens("foo\tbar"), vec!["foo\tbar"]);
    }

    #[test]
    fn blank_lines_produce_no_tokens() {
        assert!(tokens("").is_empty());
        assert!(tokens("  [ ] , . \n").is_empty());
    }

    #[test]
    fn unicode_tokens_survive() {
        assert_eq!(
            tokens("Phœnician or Greek navigators."),
            vec!["Phœnician", "or", "Greek", "navigators"]
        );
    }
}
