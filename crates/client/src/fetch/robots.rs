//! robots.txt compliance with caching.
//!
//! Fetches and caches robots.txt files per-host, respecting a 24-hour TTL.
//! A crawl walks hundreds of pages on one host, so after the first page every
//! check is a cache hit.

use robotstxt_rs::RobotsTxt;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use url::Url;

/// Default TTL for robots.txt cache (24 hours).
const ROBOTS_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Maximum size of robots.txt to fetch (1MB).
const MAX_ROBOTS_SIZE: usize = 1024 * 1024;

/// Error type for robots.txt operations.
#[derive(Debug, thiserror::Error)]
pub enum RobotsError {
    #[error("robots.txt disallowed: {path} (robots_url: {robots_url})")]
    Disallowed { path: String, robots_url: String },

    #[error("failed to fetch robots.txt: {0}")]
    FetchError(String),

    #[error("robots.txt too large")]
    TooLarge,
}

struct CachedRobots {
    robots: RobotsTxt,
    fetched_at: Instant,
}

impl CachedRobots {
    fn is_expired(&self) -> bool {
        self.fetched_at.elapsed() > ROBOTS_TTL
    }
}

/// In-memory cache for robots.txt files, keyed by robots.txt URL.
pub struct RobotsCache {
    cache: RwLock<HashMap<String, CachedRobots>>,
    user_agent: String,
    http: reqwest::Client,
}

fn robots_url(url: &Url) -> String {
    match url.port() {
        Some(port) => format!("{}://{}:{port}/robots.txt", url.scheme(), url.host_str().unwrap_or("")),
        None => format!("{}://{}/robots.txt", url.scheme(), url.host_str().unwrap_or("")),
    }
}

impl RobotsCache {
    /// Create a cache that reuses the fetch client's HTTP connection pool.
    pub fn new(user_agent: String, http: reqwest::Client) -> Self {
        Self { cache: RwLock::new(HashMap::new()), user_agent, http }
    }

    /// Check whether `url` may be fetched.
    ///
    /// Fetches and caches robots.txt for the host on a miss. A disallowed path
    /// is reported as [`RobotsError::Disallowed`].
    pub async fn check(&self, url: &Url) -> Result<(), RobotsError> {
        let key = robots_url(url);

        let cached = {
            let cache = self.cache.read().await;
            cache
                .get(&key)
                .filter(|c| !c.is_expired())
                .map(|c| c.robots.can_fetch(&self.user_agent, url.as_str()))
        };

        let allowed = match cached {
            Some(allowed) => {
                tracing::trace!(robots_url = %key, allowed, "robots.txt cache hit");
                allowed
            }
            None => {
                let robots = self.fetch_robots(&key).await?;
                let allowed = robots.can_fetch(&self.user_agent, url.as_str());
                let mut cache = self.cache.write().await;
                cache.insert(key.clone(), CachedRobots { robots, fetched_at: Instant::now() });
                allowed
            }
        };

        if allowed { Ok(()) } else { Err(RobotsError::Disallowed { path: url.path().to_string(), robots_url: key }) }
    }

    async fn fetch_robots(&self, url: &str) -> Result<RobotsTxt, RobotsError> {
        let response = self
            .http
            .get(url)
            .header("User-Agent", &self.user_agent)
            .send()
            .await
            .map_err(|e| RobotsError::FetchError(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            if let Some(len) = response.content_length()
                && len as usize > MAX_ROBOTS_SIZE
            {
                return Err(RobotsError::TooLarge);
            }

            let bytes = response
                .bytes()
                .await
                .map_err(|e| RobotsError::FetchError(e.to_string()))?;

            if bytes.len() > MAX_ROBOTS_SIZE {
                return Err(RobotsError::TooLarge);
            }

            Ok(RobotsTxt::parse(&String::from_utf8_lossy(&bytes)))
        } else if status.is_client_error() {
            tracing::debug!(robots_url = url, "robots.txt not found, allowing all");
            Ok(RobotsTxt::parse(""))
        } else {
            Err(RobotsError::FetchError(format!("status {status}")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cache_with(body: &str, fetched_at: Instant) -> RobotsCache {
        let cache = RobotsCache::new("dexcrawl/0.1".to_string(), reqwest::Client::new());
        let entry = CachedRobots { robots: RobotsTxt::parse(body), fetched_at };
        cache
            .cache
            .try_write()
            .unwrap()
            .insert("https://www.serebii.net/robots.txt".into(), entry);
        cache
    }

    #[test]
    fn test_cached_robots_expiry() {
        let robots = RobotsTxt::parse("User-agent: *\nAllow: /");
        let mut cached = CachedRobots { robots, fetched_at: Instant::now() };
        assert!(!cached.is_expired());

        cached.fetched_at = Instant::now() - ROBOTS_TTL - Duration::from_secs(1);
        assert!(cached.is_expired());
    }

    #[test]
    fn test_robots_url_keeps_port() {
        let url = Url::parse("http://127.0.0.1:8080/pokedex-swsh/bulbasaur").unwrap();
        assert_eq!(robots_url(&url), "http://127.0.0.1:8080/robots.txt");

        let url = Url::parse("https://www.serebii.net/pokedex-swsh/bulbasaur").unwrap();
        assert_eq!(robots_url(&url), "https://www.serebii.net/robots.txt");
    }

    #[tokio::test]
    async fn test_check_uses_cached_allow() {
        let cache = cache_with("User-agent: *\nAllow: /", Instant::now());
        let url = Url::parse("https://www.serebii.net/pokedex-swsh/bulbasaur").unwrap();
        assert!(cache.check(&url).await.is_ok());
    }

    #[tokio::test]
    async fn test_check_uses_cached_disallow() {
        let cache = cache_with("User-agent: *\nDisallow: /pokedex-swsh/", Instant::now());
        let url = Url::parse("https://www.serebii.net/pokedex-swsh/bulbasaur").unwrap();
        let err = cache.check(&url).await.unwrap_err();
        assert!(matches!(err, RobotsError::Disallowed { ref path, .. } if path == "/pokedex-swsh/bulbasaur"));
    }
}
