use hargacek_core::AppConfig;
use hargacek_scraper::{configured_sites, Orchestrator};

pub(crate) fn run_sites(config: &AppConfig) -> anyhow::Result<()> {
    let sites = configured_sites(config)?;
    match &config.sites_path {
        Some(path) => println!("Site profiles from {}", path.display()),
        None => println!("Built-in site profiles"),
    }
    println!();
    println!("{:<16} {:<8} SEARCH URL", "NAME", "ENABLED");
    println!("{}", "-".repeat(90));
    for site in &sites {
        println!(
            "{:<16} {:<8} {}",
            site.name,
            if site.enabled { "yes" } else { "no" },
            site.search_url
        );
    }

    println!();
    if config.serpapi_api_key.is_some() {
        println!("Shopping API: enabled (engine {})", config.serpapi_engine);
    } else {
        println!("Shopping API: disabled (SERPAPI_API_KEY not set)");
    }

    let orchestrator = Orchestrator::from_config(config)?;
    println!("Active sources: {}", orchestrator.adapter_names().join(", "));
    Ok(())
}
