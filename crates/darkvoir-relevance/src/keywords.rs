//! Keyword extraction from user queries.

const STOPWORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "if", "then", "to", "of", "in", "on", "at", "for",
    "with", "from", "into", "about", "as", "is", "are", "was", "were", "be", "been", "being",
    "am", "do", "does", "did", "have", "has", "had", "will", "would", "can", "could", "should",
    "shall", "may", "might", "must", "this", "that", "these", "those", "i", "me", "my", "we",
    "our", "you", "your", "he", "she", "it", "its", "they", "them", "their", "there", "here",
    "how", "what", "where", "when", "why", "who", "which", "please", "want", "need", "help",
];

/// Extract at most `max` lowercase keywords in first-occurrence order.
///
/// Stopwords and tokens of length ≤ 2 are dropped. No frequency
/// weighting: a token appearing five times ranks the same as one
/// appearing once.
pub fn extract_keywords(query: &str, max: usize) -> Vec<String> {
    let mut keywords: Vec<String> = Vec::new();
    for token in query.to_lowercase().split_whitespace() {
        let token = token.trim_matches(|c: char| !c.is_alphanumeric());
        if token.len() <= 2 || STOPWORDS.contains(&token) {
            continue;
        }
        if keywords.iter().any(|k| k == token) {
            continue;
        }
        keywords.push(token.to_string());
        if keywords.len() == max {
            break;
        }
    }
    keywords
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_stopwords_and_short_tokens() {
        let kws = extract_keywords("where is the OK button on my page", 5);
        assert_eq!(kws, vec!["button", "page"]);
    }

    #[test]
    fn test_lowercases_and_trims_punctuation() {
        let kws = extract_keywords("Click \"Checkout\" now!", 5);
        assert_eq!(kws, vec!["click", "checkout", "now"]);
    }

    #[test]
    fn test_caps_at_max_in_first_occurrence_order() {
        let kws = extract_keywords(
            "login password username remember forgot reset recover",
            5,
        );
        assert_eq!(
            kws,
            vec!["login", "password", "username", "remember", "forgot"]
        );
    }

    #[test]
    fn test_duplicates_keep_first_occurrence() {
        let kws = extract_keywords("cart cart cart checkout cart", 5);
        assert_eq!(kws, vec!["cart", "checkout"]);
    }

    #[test]
    fn test_empty_query() {
        assert!(extract_keywords("", 5).is_empty());
        assert!(extract_keywords("a an to", 5).is_empty());
    }

    #[test]
    fn test_never_returns_stopword_or_short_token() {
        let kws = extract_keywords("how do I fix an error in it", 5);
        for kw in &kws {
            assert!(kw.len() > 2);
            assert!(!STOPWORDS.contains(&kw.as_str()));
        }
    }
}
