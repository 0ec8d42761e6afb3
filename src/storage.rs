use std::path::PathBuf;

use serde::Deserialize;
use ureq::Agent;
use url::Url;

use crate::error::{Error, ErrorKind};

pub const UPLOAD_ENDPOINT: &str = "https://storage.googleapis.com/upload/storage/v1";
pub const METADATA_TOKEN_URL: &str =
  "http://metadata.google.internal/computeMetadata/v1/instance/service-accounts/default/token";

#[derive(Clone)]
pub enum Credentials {
  Bearer(String),
  /// Ask the instance metadata server for the attached service account's token.
  MetadataServer,
}

impl core::fmt::Debug for Credentials {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Bearer(_) => f.write_str("Bearer(<hidden>)"),
      Self::MetadataServer => f.write_str("MetadataServer"),
    }
  }
}

impl From<Option<String>> for Credentials {
  fn from(token: Option<String>) -> Self {
    token.map_or(Self::MetadataServer, Self::Bearer)
  }
}

#[derive(Debug, Clone)]
pub enum Destination {
  File(PathBuf),
  Gcs {
    bucket: String,
    object: String,
    credentials: Credentials,
  },
}

#[derive(Deserialize)]
struct TokenResponse {
  access_token: String,
}

impl Destination {
  /// Stores `body` at this destination.
  ///
  /// # Errors
  /// Returns an error if the file cannot be written or the upload fails.
  pub fn write(&self, agent: &Agent, body: &[u8], content_type: &str) -> Result<(), Error> {
    match self {
      Self::File(path) => {
        std::fs::write(path, body)?;
        log::info!(path:? = path, bytes = body.len(); "wrote feed");
      }
      Self::Gcs { bucket, object, credentials } => {
        let url = upload_url(bucket, object)?;
        let token = bearer_token(agent, credentials)?;

        agent
          .post(url.as_str())
          .set("Authorization", &format!("Bearer {token}"))
          .set("Content-Type", content_type)
          .send_bytes(body)
          .map_err(|e| Error {
            kind: ErrorKind::Storage,
            message: format!("uploading gs://{bucket}/{object}: {e}"),
          })?;

        log::info!(bucket = bucket.as_str(), object = object.as_str(), bytes = body.len(); "uploaded feed");
      }
    }

    Ok(())
  }
}

/// Cloud Storage JSON API simple media upload url.
///
/// # Errors
/// Returns an error if the bucket name does not form a valid url.
pub fn upload_url(bucket: &str, object: &str) -> Result<Url, Error> {
  Ok(Url::parse_with_params(
    &format!("{UPLOAD_ENDPOINT}/b/{bucket}/o"),
    &[("uploadType", "media"), ("name", object)],
  )?)
}

fn bearer_token(agent: &Agent, credentials: &Credentials) -> Result<String, Error> {
  match credentials {
    Credentials::Bearer(token) => Ok(token.clone()),
    Credentials::MetadataServer => {
      let body = agent
        .get(METADATA_TOKEN_URL)
        .set("Metadata-Flavor", "Google")
        .call()?
        .into_string()?;

      parse_token(&body)
    }
  }
}

fn parse_token(body: &str) -> Result<String, Error> {
  serde_json::from_str::<TokenResponse>(body)
    .map(|response| response.access_token)
    .map_err(|e| Error::new(ErrorKind::Storage, format!("metadata token response: {e}")))
}
