use tracing::debug;

use crate::errors::RecapError;

pub const DEFAULT_BASE_URL: &str = "https://nonapa.com";

/// Client for the ladder-statistics site.
#[derive(Debug, Clone)]
pub struct NonapaClient {
    pub base_url: String,
    client: reqwest::Client,
}

impl NonapaClient {
    pub fn new(base_url: String) -> Self {
        let base_url = if base_url.ends_with('/') {
            base_url[..base_url.len() - 1].to_string()
        } else {
            base_url
        };

        let client = reqwest::Client::builder()
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36")
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self { base_url, client }
    }

    pub fn games_url(&self, region_id: u32, realm_id: u32, user_id: u64, season: u32) -> String {
        format!(
            "{}/games/{}/{}/{}?season={}",
            self.base_url, region_id, realm_id, user_id, season
        )
    }

    /// Fetches the raw games page for one player and season.
    pub async fn fetch_games_page(
        &self,
        region_id: u32,
        realm_id: u32,
        user_id: u64,
        season: u32,
    ) -> Result<String, anyhow::Error> {
        let url = self.games_url(region_id, realm_id, user_id, season);
        debug!(url = %url, "fetching games page");

        let resp = self.client.get(&url).send().await?;
        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            return Err(RecapError::ServerStatus {
                status: status.as_u16(),
                body: body.chars().take(200).collect(),
            }
            .into());
        }

        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn games_url_shape() {
        let client = NonapaClient::new("https://nonapa.com/".to_string());
        assert_eq!(
            client.games_url(1, 1305, 123456, 38),
            "https://nonapa.com/games/1/1305/123456?season=38"
        );
    }
}
