use super::{Rule, SpanStyle};
use std::sync::OnceLock;

/// Heading lines (1-6 markers followed by whitespace) and doubled-marker
/// bold spans. Single-line only; everything subtler is the preview host's
/// job.
pub(super) fn rules() -> &'static [Rule] {
    static RULES: OnceLock<Vec<Rule>> = OnceLock::new();
    RULES.get_or_init(|| {
        [
            Rule::new(r"(?m)^#{1,6}\s.*", SpanStyle::Heading),
            Rule::new(r"\*\*[^*]+\*\*", SpanStyle::Bold),
        ]
        .into_iter()
        .flatten()
        .collect()
    })
}
