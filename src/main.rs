use clap::Parser;
use std::error::Error;

mod args;
use args::Args;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize logging
    env_logger::init();

    // Parse command-line arguments
    let scrape = Args::parse().into_scrape()?;

    ::log::info!("Starting scrape for URI: {}", scrape.config().start_url);
    println!("Note: rendering pages requires a WebDriver server (e.g., ChromeDriver).");
    println!(
        "Set WEBDRIVER_URL environment variable if not using {}",
        scrape.config().webdriver_url
    );

    let output_path = scrape.config().output_path.clone();
    let records = scrape.run_to_file().await?;

    println!(
        "Finished scraping {} pages. Data saved to '{}'.",
        records.len(),
        output_path
    );
    Ok(())
}
