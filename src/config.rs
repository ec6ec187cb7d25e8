use std::fmt;

use reqwest::Url;
use reqwest::header::HeaderValue;

use crate::ClientError;

/// Default Notion API origin.
pub const DEFAULT_BASE_URL: &str = "https://api.notion.com/";

/// Notion API release sent in the `Notion-Version` header.
pub const DEFAULT_NOTION_VERSION: &str = "2022-06-28";

/// Integration secret sent as a bearer token.
///
/// Stored as a pre-built, sensitive `Authorization` header value so it is
/// never rendered by `Debug` output or request logging.
#[derive(Clone)]
pub struct Credential {
    authorization: HeaderValue,
}

impl Credential {
    pub fn new(token: impl AsRef<str>) -> Result<Self, ClientError> {
        let mut authorization = HeaderValue::from_str(&format!("Bearer {}", token.as_ref()))
            .map_err(|_| ClientError::InvalidHeader {
                name: "Authorization",
            })?;
        authorization.set_sensitive(true);
        Ok(Self { authorization })
    }

    pub(crate) fn authorization(&self) -> &HeaderValue {
        &self.authorization
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// Immutable settings shared by every call a client makes.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    base_url: Url,
    notion_version: HeaderValue,
    credential: Credential,
}

impl ClientConfig {
    /// Creates a configuration for the public Notion API using `token`.
    pub fn new(token: impl AsRef<str>) -> Result<Self, ClientError> {
        Ok(Self {
            base_url: parse_base_url(DEFAULT_BASE_URL)?,
            notion_version: HeaderValue::from_static(DEFAULT_NOTION_VERSION),
            credential: Credential::new(token)?,
        })
    }

    /// Points the client at another origin, e.g. a proxy or a mock server.
    ///
    /// The URL is normalized to include a trailing slash, so relative endpoint
    /// paths join correctly.
    pub fn with_base_url(mut self, base_url: impl AsRef<str>) -> Result<Self, ClientError> {
        self.base_url = parse_base_url(base_url.as_ref())?;
        Ok(self)
    }

    /// Overrides the `Notion-Version` header.
    pub fn with_notion_version(mut self, version: impl AsRef<str>) -> Result<Self, ClientError> {
        self.notion_version =
            HeaderValue::from_str(version.as_ref()).map_err(|_| ClientError::InvalidHeader {
                name: "Notion-Version",
            })?;
        Ok(self)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub(crate) fn notion_version(&self) -> &HeaderValue {
        &self.notion_version
    }

    pub(crate) fn credential(&self) -> &Credential {
        &self.credential
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ClientError> {
    let parsed = Url::parse(raw).map_err(|_| ClientError::InvalidBaseUrl(raw.to_owned()))?;
    if parsed.cannot_be_a_base() {
        return Err(ClientError::InvalidBaseUrl(raw.to_owned()));
    }
    Ok(ensure_trailing_slash(parsed))
}

fn ensure_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let mut path = url.path().to_owned();
        path.push('/');
        url.set_path(&path);
    }
    url
}
