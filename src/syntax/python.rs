use super::{Rule, SpanStyle};
use std::sync::OnceLock;

/// Reserved words, matched on word boundaries.
const KEYWORDS: &[&str] = &[
    "def", "class", "import", "from", "return", "if", "else", "elif", "for", "while", "in", "and",
    "or", "not", "True", "False", "None",
];

/// Rule order matters: the renderer applies passes in order, so comment
/// attributes land over string attributes over keyword attributes.
pub(super) fn rules() -> &'static [Rule] {
    static RULES: OnceLock<Vec<Rule>> = OnceLock::new();
    RULES.get_or_init(|| {
        let keywords = format!(r"\b(?:{})\b", KEYWORDS.join("|"));
        [
            Rule::new(&keywords, SpanStyle::Keyword),
            Rule::new(r#""[^"]*"|'[^']*'"#, SpanStyle::Str),
            Rule::new(r"#.*", SpanStyle::Comment),
        ]
        .into_iter()
        .flatten()
        .collect()
    })
}
