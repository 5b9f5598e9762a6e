//! Plain-text run report on stdout.

use leadscout_core::{ProgressEvent, RunResult};
use leadscout_pipeline::{
    score_tier, select_explored, select_leads, ExploredQuery, ExploredSummary, LeadQuery,
    LeadSummary,
};

pub(crate) fn print_run_report(
    result: &RunResult,
    progress: &[ProgressEvent],
    lead_query: &LeadQuery,
    explored_query: Option<&ExploredQuery>,
) {
    let summary = LeadSummary::from_leads(&result.leads);
    let explored = ExploredSummary::from_records(&result.explored);
    let warnings = progress.iter().filter(|e| e.is_warning()).count();

    println!("# Lead Report");
    println!();
    println!("**Posts fetched**: {}", result.stats.total_fetched);
    println!("**Keyword matches**: {}", result.stats.analyzed);
    println!("**Leads**: {}", summary.total_leads);
    match summary.average_score {
        Some(avg) => println!("**Average score**: {avg:.1}"),
        None => println!("**Average score**: -"),
    }
    println!("**High quality (8+)**: {}", summary.high_quality);
    println!(
        "**Sources**: {} with leads, {} explored",
        summary.distinct_sources, explored.distinct_sources
    );
    if warnings > 0 {
        println!("**Warnings**: {warnings}");
    }
    println!();

    if !summary.by_source.is_empty() {
        println!("{:<28}LEADS", "SOURCE");
        for (source, count) in &summary.by_source {
            println!("{:<28}{count}", format!("r/{source}"));
        }
        println!();
    }

    let leads = select_leads(&result.leads, lead_query);
    if leads.is_empty() {
        println!("no leads match the current filters");
    } else {
        println!("| Score | Tier | Source | Date | Author | Title | URL |");
        println!("|-------|------|--------|------|--------|-------|-----|");
        for lead in leads {
            println!(
                "| {} | {} | r/{} | {} | u/{} | {} | {} |",
                lead.relevance_score,
                score_tier(lead.relevance_score),
                lead.source,
                lead.date,
                lead.author,
                table_cell(&lead.title),
                lead.url
            );
        }
    }

    if let Some(query) = explored_query {
        println!();
        println!("## Explored posts");
        println!();
        println!(
            "{} explored, {} keyword matches, {} scored, {} leads",
            explored.total, explored.keyword_matches, explored.scored, explored.leads
        );
        println!();
        println!("| Date | Source | Score | Lead | Upvotes | Comments | Title |");
        println!("|------|--------|-------|------|---------|----------|-------|");
        for record in select_explored(&result.explored, query) {
            println!(
                "| {} | r/{} | {} | {} | {} | {} | {} |",
                record.date,
                record.source,
                record
                    .score
                    .map_or_else(|| "-".to_string(), |s| s.to_string()),
                if record.is_lead { "yes" } else { "no" },
                record.popularity,
                record.comment_count,
                table_cell(&record.title)
            );
        }
    }
}

/// Keep a title on one table row.
fn table_cell(text: &str) -> String {
    text.replace('|', "/").replace(['\n', '\r'], " ")
}
