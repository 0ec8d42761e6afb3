use std::time::Duration;

use ureq::{Agent, AgentBuilder};
use url::Url;

use crate::error::{Error, ErrorKind};

pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

pub fn agent(timeout: Duration) -> Agent {
  AgentBuilder::new()
    .timeout(timeout)
    .user_agent(USER_AGENT)
    .build()
}

/// Downloads the schedule page as text.
///
/// # Errors
/// Returns an error if the request fails, the server answers with a non-2xx
/// status, or the body is not text.
pub fn page(agent: &Agent, url: &Url) -> Result<String, Error> {
  let response = agent.get(url.as_str()).call()?;
  log::info!(url = url.as_str(), status = response.status(); "fetched schedule page");

  response.into_string().map_err(|e| Error {
    kind: ErrorKind::Http,
    message: format!("reading {url}: {e}"),
  })
}
