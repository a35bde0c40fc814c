//! HTTP implementation of [`FavoritesBackend`].

use super::backend::FavoritesBackend;
use super::models::FavoriteAck;
use crate::domain::{FavoritesError, FetchError, Pet, Result};
use crate::infrastructure::http::{self, build_client, endpoint};
use crate::Config;
use futures_util::future::BoxFuture;
use reqwest::{Client, Response, Url};
use tracing::Instrument;

/// Talks to `{base_url}{favorites_path}`.
#[derive(Debug, Clone)]
pub struct HttpFavorites {
    client: Client,
    url: Url,
}

impl HttpFavorites {
    #[must_use]
    pub const fn new(client: Client, url: Url) -> Self {
        Self { client, url }
    }

    /// # Errors
    ///
    /// Returns a configuration error if the endpoint URL is invalid or the
    /// client cannot be built.
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = build_client(config.request_timeout())?;
        Self::with_client(config, client)
    }

    /// # Errors
    ///
    /// Returns a configuration error if the endpoint URL is invalid.
    pub fn with_client(config: &Config, client: Client) -> Result<Self> {
        let url = endpoint(&config.base_url, &config.favorites_path)?;
        Ok(Self::new(client, url))
    }

    /// `{favorites_path}/{segment}`, with `segment` percent-encoded.
    fn child_url(&self, segment: &str) -> std::result::Result<Url, FavoritesError> {
        let mut url = self.url.clone();
        url.path_segments_mut()
            .map_err(|()| FavoritesError::Rejected(format!("cannot extend favorites URL {}", self.url)))?
            .pop_if_empty()
            .push(segment);
        Ok(url)
    }

    /// Interprets a create/delete acknowledgement.
    ///
    /// A failure status whose body still carries `{ok: false, error}` is
    /// reported as a rejection with the server's message. A success status
    /// with an empty body counts as acknowledged.
    async fn acknowledge(response: Response) -> std::result::Result<(), FavoritesError> {
        let status = response.status();
        let body = http::read_body(response).await?;

        if status.is_success() && body.iter().all(u8::is_ascii_whitespace) {
            return Ok(());
        }

        match serde_json::from_slice::<FavoriteAck>(&body) {
            Ok(ack) if status.is_success() && ack.ok => Ok(()),
            Ok(ack) if status.is_success() || ack.error.is_some() => {
                Err(FavoritesError::Rejected(ack.reason(status.as_u16())))
            }
            Err(e) if status.is_success() => Err(FetchError::Malformed(e.to_string()).into()),
            _ => Err(FetchError::HttpStatus(status.as_u16()).into()),
        }
    }

    async fn post_favorite(&self, pet: &Pet) -> std::result::Result<(), FavoritesError> {
        if pet.id().is_none() || pet.name().is_none() {
            return Err(FavoritesError::Rejected("id and name required".to_string()));
        }

        let response = http::send(self.client.post(self.url.clone()).json(pet)).await?;
        Self::acknowledge(response).await?;
        tracing::debug!(pet_id = ?pet.id(), "favorite saved");
        Ok(())
    }

    async fn get_favorites(&self) -> std::result::Result<Vec<Pet>, FavoritesError> {
        let response = http::send(self.client.get(self.url.clone())).await?;
        http::ensure_success(&response)?;
        let body = http::read_body(response).await?;
        let pets: Vec<Pet> =
            serde_json::from_slice(&body).map_err(|e| FetchError::Malformed(e.to_string()))?;
        tracing::debug!(count = pets.len(), "favorites listed");
        Ok(pets)
    }

    async fn delete_favorite(&self, id: &str) -> std::result::Result<(), FavoritesError> {
        let url = self.child_url(id)?;
        let response = http::send(self.client.delete(url)).await?;
        Self::acknowledge(response).await?;
        tracing::debug!(pet_id = %id, "favorite removed");
        Ok(())
    }

    async fn get_export(&self) -> std::result::Result<Vec<u8>, FavoritesError> {
        let url = self.child_url("export.csv")?;
        let response = http::send(self.client.get(url)).await?;
        http::ensure_success(&response)?;
        let body = http::read_body(response).await?;
        tracing::debug!(bytes = body.len(), "favorites exported");
        Ok(body)
    }
}

impl FavoritesBackend for HttpFavorites {
    fn add<'a>(&'a self, pet: &'a Pet) -> BoxFuture<'a, std::result::Result<(), FavoritesError>> {
        Box::pin(
            self.post_favorite(pet)
                .instrument(tracing::debug_span!("favorites_add")),
        )
    }

    fn list(&self) -> BoxFuture<'_, std::result::Result<Vec<Pet>, FavoritesError>> {
        Box::pin(
            self.get_favorites()
                .instrument(tracing::debug_span!("favorites_list")),
        )
    }

    fn remove<'a>(&'a self, id: &'a str) -> BoxFuture<'a, std::result::Result<(), FavoritesError>> {
        Box::pin(
            self.delete_favorite(id)
                .instrument(tracing::debug_span!("favorites_remove", pet_id = %id)),
        )
    }

    fn export_csv(&self) -> BoxFuture<'_, std::result::Result<Vec<u8>, FavoritesError>> {
        Box::pin(
            self.get_export()
                .instrument(tracing::debug_span!("favorites_export")),
        )
    }
}
