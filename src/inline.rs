use std::sync::OnceLock;

use regex::Regex;

use crate::block::Run;

fn bold_regex() -> &'static Regex {
    static BOLD_REGEX: OnceLock<Regex> = OnceLock::new();
    BOLD_REGEX.get_or_init(|| Regex::new(r"\*\*(.*?)\*\*").expect("Invalid bold regex"))
}

/// Split block text into plain and emphasized runs.
///
/// Only `**bold**` is recognized. An opening `**` without a closer stays in
/// the surrounding plain run. Empty spans (including `****`) produce no run.
pub fn split_runs(text: &str) -> Vec<Run> {
    let mut runs = Vec::new();
    let mut cursor = 0;

    for captures in bold_regex().captures_iter(text) {
        let (Some(whole), Some(inner)) = (captures.get(0), captures.get(1)) else {
            continue;
        };
        if whole.start() > cursor {
            runs.push(Run::plain(&text[cursor..whole.start()]));
        }
        if !inner.as_str().is_empty() {
            runs.push(Run::emphasized(inner.as_str()));
        }
        cursor = whole.end();
    }

    if cursor < text.len() {
        runs.push(Run::plain(&text[cursor..]));
    }

    runs
}

/// True when a run mentions a numeric citation such as `[12]`.
pub fn has_citation(text: &str) -> bool {
    static CITATION_REGEX: OnceLock<Regex> = OnceLock::new();
    CITATION_REGEX
        .get_or_init(|| Regex::new(r"\[\d+\]").expect("Invalid citation regex"))
        .is_match(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn bold_then_plain() {
        assert_eq!(
            split_runs("**bold** and plain"),
            vec![Run::emphasized("bold"), Run::plain(" and plain")]
        );
    }

    #[test]
    fn plain_text_is_single_run() {
        assert_eq!(split_runs("just text"), vec![Run::plain("just text")]);
    }

    #[test]
    fn empty_text_has_no_runs() {
        assert!(split_runs("").is_empty());
    }

    #[test]
    fn multiple_spans_are_non_greedy() {
        assert_eq!(
            split_runs("a **b** c **d**"),
            vec![
                Run::plain("a "),
                Run::emphasized("b"),
                Run::plain(" c "),
                Run::emphasized("d"),
            ]
        );
    }

    #[rstest]
    #[case("an **open marker")]
    #[case("**")]
    #[case("trailing **")]
    fn unterminated_emphasis_is_literal(#[case] text: &str) {
        assert_eq!(split_runs(text), vec![Run::plain(text)]);
    }

    #[test]
    fn empty_emphasis_is_dropped() {
        assert_eq!(
            split_runs("a****b"),
            vec![Run::plain("a"), Run::plain("b")]
        );
    }

    #[test]
    fn other_markup_passes_through() {
        assert_eq!(
            split_runs("*italic* `code` [link](x)"),
            vec![Run::plain("*italic* `code` [link](x)")]
        );
    }

    #[test]
    fn runs_cover_text_without_markers() {
        let text = "mixed **中文** text **with** markers";
        let joined: String = split_runs(text).into_iter().map(|r| r.content).collect();
        assert_eq!(joined, text.replace("**", ""));
    }

    #[rstest]
    #[case("as shown in [3].", true)]
    #[case("see [12] and [13]", true)]
    #[case("[a] is not numeric", false)]
    #[case("no citation", false)]
    fn citation_detection(#[case] text: &str, #[case] expected: bool) {
        assert_eq!(has_citation(text), expected);
    }
}
