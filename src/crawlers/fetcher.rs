use crate::error::FetchError;

/// Turns a URL into fully rendered markup.
///
/// Implementations must not return until client-side rendering has settled.
/// The crawler drives one fetch at a time, so `&mut self` is fine for
/// implementations that hold a browser session.
#[allow(async_fn_in_trait)]
pub trait PageFetcher {
    /// Fetch the rendered HTML for `url`
    async fn fetch(&mut self, url: &str) -> Result<String, FetchError>;
}
