//! Fetching the startup documents from a local directory or an HTTP root.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use reqwest::Client;
use serde::de::DeserializeOwned;
use url::Url;

use super::model::{Documents, QuestionBank, QuizConfig};
use crate::error::LoadError;

/// Location of the question bank, relative to the asset root.
pub const QUESTIONS_DOCUMENT: &str = "assets/data/questions.json";
/// Location of the quiz configuration, relative to the asset root.
pub const CONFIG_DOCUMENT: &str = "assets/data/quiz_config.json";

/// Where documents and images are served from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetSource {
    Dir(PathBuf),
    Remote(Url),
}

impl AssetSource {
    /// Resolve a root-relative asset path (as found in the config) to a
    /// display/fetch location.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::InvalidSource`] when a remote root cannot be joined
    /// with `relative`.
    pub fn resolve(&self, relative: &str) -> Result<Location, LoadError> {
        let relative = relative.trim_start_matches('/');
        match self {
            AssetSource::Dir(root) => Ok(Location::File(root.join(relative))),
            AssetSource::Remote(base) => {
                let base = if base.path().ends_with('/') {
                    base.clone()
                } else {
                    let mut b = base.clone();
                    b.set_path(&format!("{}/", base.path()));
                    b
                };
                base.join(relative)
                    .map(Location::Url)
                    .map_err(|e| LoadError::InvalidSource {
                        location: base.to_string(),
                        message: e.to_string(),
                    })
            }
        }
    }

    /// Read one asset completely.
    ///
    /// # Errors
    ///
    /// IO, HTTP transport and non-success status errors, tagged with `relative`.
    pub async fn read(&self, client: &Client, relative: &str) -> Result<Vec<u8>, LoadError> {
        match self.resolve(relative)? {
            Location::File(path) => {
                tokio::fs::read(&path)
                    .await
                    .map_err(|source| LoadError::Read {
                        document: relative.to_string(),
                        source,
                    })
            }
            Location::Url(url) => {
                let fetch_err = |source| LoadError::Fetch {
                    document: relative.to_string(),
                    source,
                };
                let resp = client.get(url).send().await.map_err(fetch_err)?;
                if !resp.status().is_success() {
                    return Err(LoadError::Status {
                        document: relative.to_string(),
                        status: resp.status().as_u16(),
                    });
                }
                let bytes = resp.bytes().await.map_err(fetch_err)?;
                Ok(bytes.to_vec())
            }
        }
    }

    async fn read_json<T: DeserializeOwned>(
        &self,
        client: &Client,
        relative: &str,
    ) -> Result<T, LoadError> {
        let bytes = self.read(client, relative).await?;
        serde_json::from_slice(&bytes).map_err(|source| LoadError::Parse {
            document: relative.to_string(),
            source,
        })
    }
}

impl FromStr for AssetSource {
    type Err = LoadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.starts_with("http://") || s.starts_with("https://") {
            Url::parse(s)
                .map(AssetSource::Remote)
                .map_err(|e| LoadError::InvalidSource {
                    location: s.to_string(),
                    message: e.to_string(),
                })
        } else {
            Ok(AssetSource::Dir(PathBuf::from(s)))
        }
    }
}

impl fmt::Display for AssetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetSource::Dir(path) => write!(f, "{}", path.display()),
            AssetSource::Remote(url) => write!(f, "{url}"),
        }
    }
}

/// A resolved asset location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    File(PathBuf),
    Url(Url),
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::File(path) => write!(f, "{}", path.display()),
            Location::Url(url) => write!(f, "{url}"),
        }
    }
}

/// Fetch both documents concurrently. Either one failing fails the load.
///
/// # Errors
///
/// The first [`LoadError`] raised by either document.
pub async fn load_documents(source: &AssetSource) -> Result<Documents, LoadError> {
    let client = Client::new();
    let (bank, config) = tokio::try_join!(
        source.read_json::<QuestionBank>(&client, QUESTIONS_DOCUMENT),
        source.read_json::<QuizConfig>(&client, CONFIG_DOCUMENT),
    )?;
    tracing::debug!(
        %source,
        cute = bank.cute.len(),
        memory = bank.memory.len(),
        "documents loaded"
    );
    Ok(Documents { bank, config })
}
