use crate::types::{MatchResult, SuffixSet};

/// Classify one matched host name against the working suffix set.
///
/// `candidate` is the matched text from the first subdomain label to the end
/// of the suffix. Rules, in order:
///
/// 1. The whole candidate is a registered suffix (`edu.br`, `com.br`): a bare
///    mention, `(None, candidate)`.
/// 2. Otherwise the longest proper suffix at a label boundary that is in the
///    set is the tld, and only the label right before it is kept:
///    `www.a.example.com.br` gives `(example.com.br, com.br)`.
///    The root suffix takes part like any other entry, so `olar.br` is always
///    the domain `(olar.br, br)` and never a bare `br` mention.
/// 3. No suffix in the set: the match is dropped.
pub(crate) fn classify(candidate: &str, suffixes: &SuffixSet) -> Option<MatchResult> {
    let host = candidate.to_lowercase();

    if suffixes.contains(&host) {
        return Some(MatchResult::bare(host));
    }

    // Dots scanned left to right, so the first hit is the longest suffix.
    let mut label_start = 0;
    for (dot, _) in host.match_indices('.') {
        let suffix = &host[dot + 1..];
        if suffixes.contains(suffix) {
            return Some(MatchResult::full(&host[label_start..], suffix));
        }
        label_start = dot + 1;
    }

    None
}
