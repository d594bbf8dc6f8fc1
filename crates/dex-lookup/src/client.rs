//! Reference API client
//!
//! `GET {base}/pokemon/{term}`; a 404 means "no such creature".

use crate::error::LookupError;
use crate::lookup::{LookupOutcome, PokemonLookup};
use crate::term::SearchTerm;
use async_trait::async_trait;
use dex_model::ApiPokemon;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

/// Public reference API root
pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// HTTP settings for [`PokeApiClient`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupConfig {
    /// API root, without the `/pokemon` segment
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// `User-Agent` header value
    pub user_agent: String,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(10),
            user_agent: format!("dexfield/{}", crate::VERSION),
        }
    }
}

/// reqwest-backed [`PokemonLookup`]
#[derive(Debug, Clone)]
pub struct PokeApiClient {
    http: Client,
    base: Url,
}

impl PokeApiClient {
    /// Create a client
    ///
    /// # Errors
    /// - `LookupError::BaseUrl` if `base_url` is not an absolute http(s) URL
    /// - `LookupError::Transport` if the HTTP client cannot be built
    pub fn new(config: &LookupConfig) -> Result<Self, LookupError> {
        let base = Url::parse(&config.base_url)
            .map_err(|e| LookupError::BaseUrl(format!("{}: {e}", config.base_url)))?;
        if base.cannot_be_a_base() || !matches!(base.scheme(), "http" | "https") {
            return Err(LookupError::BaseUrl(config.base_url.clone()));
        }

        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self { http, base })
    }

    /// Request URL for a term
    ///
    /// # Errors
    /// - `LookupError::Unaddressable` for `.` and `..`
    /// - `LookupError::BaseUrl` if the base cannot take path segments
    pub fn endpoint(&self, term: &SearchTerm) -> Result<Url, LookupError> {
        if !term.is_addressable() {
            return Err(LookupError::Unaddressable(term.to_string()));
        }
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| LookupError::BaseUrl(self.base.to_string()))?
            .pop_if_empty()
            .push("pokemon")
            .push(term.as_str());
        Ok(url)
    }
}

#[async_trait]
impl PokemonLookup for PokeApiClient {
    async fn lookup(&self, term: &SearchTerm) -> Result<LookupOutcome, LookupError> {
        if !term.is_addressable() {
            tracing::debug!("No record can be named {:?}", term.as_str());
            return Ok(LookupOutcome::NotFound);
        }
        let url = self.endpoint(term)?;
        tracing::debug!("Looking up {} at {}", term, url);

        let response = self
            .http
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;

        let outcome = interpret(status, &body);
        match &outcome {
            Ok(LookupOutcome::Found(p)) => tracing::debug!("Resolved {} to #{}", term, p.id),
            Ok(LookupOutcome::NotFound) => tracing::debug!("No record for {}", term),
            Err(e) => tracing::warn!("Lookup for {} failed: {}", term, e),
        }
        outcome
    }
}

/// Map a response to an outcome
pub(crate) fn interpret(status: StatusCode, body: &[u8]) -> Result<LookupOutcome, LookupError> {
    if status == StatusCode::NOT_FOUND {
        return Ok(LookupOutcome::NotFound);
    }
    if !status.is_success() {
        return Err(LookupError::Status(status.as_u16()));
    }
    let pokemon = ApiPokemon::from_slice(body)?.normalize()?;
    Ok(LookupOutcome::Found(pokemon))
}

#[cfg(test)]
mod tests {
    use super::*;
    use dex_model::{ModelError, PokemonType};

    fn client(base: &str) -> PokeApiClient {
        PokeApiClient::new(&LookupConfig {
            base_url: base.to_string(),
            ..LookupConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn endpoint_appends_term() {
        let c = client("https://pokeapi.co/api/v2");
        let term = SearchTerm::parse("Pikachu").unwrap();
        assert_eq!(
            c.endpoint(&term).unwrap().as_str(),
            "https://pokeapi.co/api/v2/pokemon/pikachu"
        );
    }

    #[test]
    fn endpoint_tolerates_trailing_slash_and_escapes() {
        let c = client("http://localhost:8080/api/v2/");
        let term = SearchTerm::parse("mr mime").unwrap();
        assert_eq!(
            c.endpoint(&term).unwrap().as_str(),
            "http://localhost:8080/api/v2/pokemon/mr%20mime"
        );
    }

    #[test]
    fn endpoint_refuses_dot_segments() {
        let c = client("https://pokeapi.co/api/v2");
        for raw in [".", ".."] {
            let term = SearchTerm::parse(raw).unwrap();
            let err = c.endpoint(&term).unwrap_err();
            assert!(matches!(err, LookupError::Unaddressable(ref t) if t == raw));
        }
    }

    #[test]
    fn rejects_non_http_base() {
        let err = PokeApiClient::new(&LookupConfig {
            base_url: "mailto:someone@example.com".to_string(),
            ..LookupConfig::default()
        })
        .unwrap_err();
        assert!(matches!(err, LookupError::BaseUrl(_)));
    }

    #[test]
    fn interpret_not_found() {
        assert_eq!(
            interpret(StatusCode::NOT_FOUND, b"Not Found").unwrap(),
            LookupOutcome::NotFound
        );
    }

    #[test]
    fn interpret_server_error() {
        let err = interpret(StatusCode::INTERNAL_SERVER_ERROR, b"").unwrap_err();
        assert!(matches!(err, LookupError::Status(500)));
    }

    #[test]
    fn interpret_success() {
        let body = br#"{
            "id": 6, "name": "charizard",
            "types": [
                {"slot": 1, "type": {"name": "fire"}},
                {"slot": 2, "type": {"name": "flying"}}
            ],
            "sprites": {"front_default": "https://example.test/6.png"},
            "height": 17, "weight": 905
        }"#;
        let LookupOutcome::Found(p) = interpret(StatusCode::OK, body).unwrap() else {
            panic!("expected a record");
        };
        assert_eq!(p.types, vec![PokemonType::Fire, PokemonType::Flying]);
        assert_eq!(p.weight, Some(905));
    }

    #[test]
    fn interpret_garbage() {
        let err = interpret(StatusCode::OK, b"<html/>").unwrap_err();
        assert!(matches!(err, LookupError::Invalid(ModelError::Decode(_))));
    }
}
