use leadscout_core::Item;

/// Characters of post body included in the prompt.
pub const PROMPT_BODY_CHARS: usize = 600;

/// Fixed system instructions sent with every scoring request.
pub const SCORING_INSTRUCTIONS: &str = "\
You qualify B2B leads for business intelligence and analytics services.

Read each Reddit post and decide whether the author represents a business
that could buy BI services. Real leads mention a company, team, or clients;
describe reporting or decision-making problems at an organisational level;
show authority or influence over tooling; and imply budget or urgency.

Not leads: students with homework, personal projects, job seekers, people
asking how to use a tool, tool comparisons with no business context, and
vendors promoting their own products.

Scoring guide:
9-10: clear business need, decision authority, budget signals.
7-8: business context with real analytics pain points.
5-6: some business context, unclear authority or budget.
3-4: mostly personal or educational.
1-2: no commercial potential.

Be critical. Most posts are not leads. Always begin your answer with a
line of the form 'Score: N'.";

/// Build the per-post qualification prompt.
///
/// The body is cut to [`PROMPT_BODY_CHARS`] characters; a missing author is
/// rendered as the placeholder.
#[must_use]
pub fn build_prompt(item: &Item) -> String {
    let body: String = item.body_text().chars().take(PROMPT_BODY_CHARS).collect();
    format!(
        "Analyze this post for B2B lead qualification.\n\n\
         Title: {title}\n\
         Content: {body}\n\
         Subreddit: r/{source}\n\
         Author: u/{author}\n\n\
         Answer these questions:\n\
         1. Is this a business, or an individual?\n\
         2. Does the author appear to make or influence purchasing decisions?\n\
         3. Which business problems are described?\n\
         4. Are there signs of budget or urgency?\n\
         5. Which red flags suggest this is not a lead?\n\n\
         Reply in exactly this format:\n\
         Score: [1-10]\n\
         Business Context: [company size, industry, role]\n\
         Decision Authority: [high/medium/low/none]\n\
         Pain Points: [specific problems]\n\
         Budget Indicators: [signs of budget]\n\
         Red Flags: [reasons this may not be a lead]\n\
         Recommendation: [LEAD / NOT A LEAD, with reason]",
        title = item.title,
        source = item.source,
        author = item.author_or_placeholder(),
    )
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn item(body: Option<&str>, author: Option<&str>) -> Item {
        Item {
            id: "p1".into(),
            title: "Our ops team drowns in spreadsheets".into(),
            body: body.map(Into::into),
            author: author.map(Into::into),
            source: "excel".into(),
            popularity: 3,
            comment_count: 1,
            created_at: Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap(),
            url: "https://reddit.com/r/excel/comments/p1/".into(),
        }
    }

    #[test]
    fn prompt_carries_post_fields() {
        let prompt = build_prompt(&item(Some("We need KPI tracking"), Some("cfo_jane")));
        assert!(prompt.contains("Title: Our ops team drowns in spreadsheets"));
        assert!(prompt.contains("Content: We need KPI tracking"));
        assert!(prompt.contains("Subreddit: r/excel"));
        assert!(prompt.contains("Author: u/cfo_jane"));
        assert!(prompt.contains("Score: [1-10]"));
    }

    #[test]
    fn prompt_uses_placeholder_for_missing_author() {
        let prompt = build_prompt(&item(None, None));
        assert!(prompt.contains("Author: u/N/A"));
        assert!(prompt.contains("Content: \n"));
    }

    #[test]
    fn prompt_truncates_long_body() {
        let body = "x".repeat(PROMPT_BODY_CHARS + 50);
        let prompt = build_prompt(&item(Some(&body), None));
        assert!(prompt.contains(&"x".repeat(PROMPT_BODY_CHARS)));
        assert!(!prompt.contains(&"x".repeat(PROMPT_BODY_CHARS + 1)));
    }
}
