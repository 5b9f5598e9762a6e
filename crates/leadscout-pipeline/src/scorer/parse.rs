const SCORE_LABEL: &str = "Score:";

/// Pull the numeric score out of a scoring reply.
///
/// Looks at the first line containing `Score:` and reads every ASCII digit on
/// that line as one integer. Returns `None` when no such line exists or it
/// holds no digits. The value is not range-checked; a run of digits too
/// large for `u32` saturates to `u32::MAX`, so a date or timestamp on the
/// score line still counts as a score above any threshold.
#[must_use]
pub fn parse_score(reply: &str) -> Option<u32> {
    let line = reply.lines().find(|line| line.contains(SCORE_LABEL))?;
    let digits: String = line.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    // Only overflow can fail here.
    Some(digits.parse().unwrap_or(u32::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_score_with_trailing_note() {
        assert_eq!(parse_score("Score: 8 (strong business signal)"), Some(8));
    }

    #[test]
    fn reads_score_from_later_line() {
        let reply = "Business Context: mid-size retailer\nScore: 9\nRecommendation: LEAD";
        assert_eq!(parse_score(reply), Some(9));
    }

    #[test]
    fn tolerates_markdown_emphasis() {
        assert_eq!(parse_score("**Score:** 10"), Some(10));
    }

    #[test]
    fn first_score_line_wins() {
        assert_eq!(parse_score("Score: 4\nScore: 9"), Some(4));
    }

    #[test]
    fn missing_label_yields_none() {
        assert_eq!(parse_score("This looks like a strong lead, 9 out of 10."), None);
    }

    #[test]
    fn label_without_digits_yields_none() {
        assert_eq!(parse_score("Score: high"), None);
    }

    #[test]
    fn all_digits_on_the_line_are_joined() {
        assert_eq!(parse_score("Score: 8/10"), Some(810));
    }

    #[test]
    fn oversized_digit_run_saturates() {
        assert_eq!(
            parse_score("Score: 7 (reviewed 2025-03-09 12:00)"),
            Some(u32::MAX)
        );
        assert_eq!(parse_score(&format!("Score: {}", "9".repeat(40))), Some(u32::MAX));
    }
}
