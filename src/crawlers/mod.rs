pub mod crawler;
pub mod fetcher;
pub mod web;

pub use crawler::Crawler;
pub use fetcher::PageFetcher;
pub use web::WebDriverFetcher;
