// transport.rs
use crate::config::ScraperConfig;
use crate::scraper::ScraperError;
use reqwest::blocking::{Client, Request};
use tracing::debug;
use url::Url;

/// Issues one GET and hands back the response body.
pub trait Transport {
    fn get(&self, url: &Url, query: &[(&'static str, String)]) -> Result<String, ScraperError>;
}

pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(config: &ScraperConfig) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()
            .map_err(|e| ScraperError::Network(e.to_string()))?;

        Ok(Self { client })
    }

    /// The GET a search sends, built but not sent.
    pub fn request(&self, url: &Url, query: &[(&'static str, String)]) -> Result<Request, ScraperError> {
        self.client
            .get(url.clone())
            .query(query)
            .build()
            .map_err(|e| ScraperError::Network(e.to_string()))
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &Url, query: &[(&'static str, String)]) -> Result<String, ScraperError> {
        let request = self.request(url, query)?;
        let resp = self
            .client
            .execute(request)
            .map_err(|e| ScraperError::Network(e.to_string()))?;

        let status = resp.status();
        debug!(url = %resp.url(), status = status.as_u16(), "search request");

        // `text` consumes the response, so the connection is released on
        // every path below.
        let text = resp
            .text()
            .map_err(|e| ScraperError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(ScraperError::HttpStatus {
                status: status.as_u16(),
                body: text,
            });
        }

        Ok(text)
    }
}
