use hargacek_core::{format_rupiah, AppConfig, Product};
use hargacek_scraper::{Orchestrator, SearchOutcome};

pub(crate) async fn run_search(
    config: &AppConfig,
    keyword: &str,
    json: bool,
    limit: Option<usize>,
) -> anyhow::Result<()> {
    let keyword = keyword.trim();
    if keyword.is_empty() {
        anyhow::bail!("search keyword must not be blank");
    }

    let orchestrator = Orchestrator::from_config(config)?;
    tracing::info!(
        keyword,
        sources = ?orchestrator.adapter_names(),
        "starting search"
    );
    let outcome = orchestrator.run_detailed(keyword).await?;
    let shown = limit.unwrap_or(outcome.products.len());

    if json {
        let products: Vec<&Product> = outcome.products.iter().take(shown).collect();
        println!("{}", serde_json::to_string_pretty(&products)?);
        return Ok(());
    }

    print_products(&outcome, shown);
    print_reports(&outcome);
    Ok(())
}

fn print_products(outcome: &SearchOutcome, shown: usize) {
    if outcome.products.is_empty() {
        println!("No listings found.");
        return;
    }

    println!(
        "{:<16} {:<16} {:<24} NAME",
        "PRICE", "SOURCE", "SELLER"
    );
    println!("{}", "-".repeat(100));
    for product in outcome.products.iter().take(shown) {
        println!(
            "{:<16} {:<16} {:<24} {}",
            format_rupiah(product.price),
            truncate(&product.source, 16),
            truncate(&product.seller, 24),
            truncate(&product.name, 60),
        );
    }
    if shown < outcome.products.len() {
        println!("... {} more", outcome.products.len() - shown);
    }
}

fn print_reports(outcome: &SearchOutcome) {
    println!();
    for report in &outcome.reports {
        let status = match &report.error {
            None => format!("{} records", report.records),
            Some(error) => format!("failed: {error}"),
        };
        println!(
            "{:<16} {:>7}ms  {status}",
            truncate(&report.source, 16),
            report.elapsed.as_millis()
        );
    }
    if outcome.failed_sources() > 0 {
        println!(
            "{} of {} sources failed",
            outcome.failed_sources(),
            outcome.reports.len()
        );
    }
}

/// Cuts `value` to at most `max` characters, marking the cut with `~`.
fn truncate(value: &str, max: usize) -> String {
    if value.chars().count() <= max {
        return value.to_string();
    }
    let mut cut: String = value.chars().take(max.saturating_sub(1)).collect();
    cut.push('~');
    cut
}
