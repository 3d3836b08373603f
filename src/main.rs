use komik_scraper::blacklist::Blacklist;
use komik_scraper::config::Config;
use komik_scraper::http_client::HttpClient;
use komik_scraper::registry::DomainRegistry;
use komik_scraper::scraper::{ListQuery, Scraper};
use std::time::Duration;

fn usage() -> ! {
    eprintln!("Usage: komik-scraper <command>");
    eprintln!("  list [query] [limit]   list or search comics");
    eprintln!("  detail <path>          comic detail for a listing path");
    eprintln!("  pages <path>           reader pages for a chapter path");
    std::process::exit(2);
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = Config::load();
    let client = HttpClient::new(Duration::from_secs(config.scraper.timeout_secs))?;
    let scraper = Scraper::new(
        client,
        DomainRegistry::default(),
        Blacklist::new(&config.scraper.blacklist),
        config.scraper.clone(),
    );

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        Some("list") => {
            let query = match args.get(1) {
                Some(q) => ListQuery::search(q.clone()),
                None => ListQuery::default(),
            };
            let limit = args.get(2).and_then(|n| n.parse::<i64>().ok());
            let comics = scraper.list_comics(&query, limit).await;
            println!("{}", serde_json::to_string_pretty(&comics)?);
        }
        Some("detail") => {
            let path = args.get(1).map(String::as_str).unwrap_or_else(|| usage());
            let detail = scraper.get_comic_detail(path).await?;
            println!("{}", serde_json::to_string_pretty(&detail)?);
        }
        Some("pages") => {
            let path = args.get(1).map(String::as_str).unwrap_or_else(|| usage());
            let pages = scraper.get_comic_pages(path).await?;
            println!("{}", serde_json::to_string_pretty(&pages)?);
        }
        _ => usage(),
    }

    Ok(())
}
