use reqwest::Method;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;
use url::Url;

use crate::{ClientConfig, ClientError, HttpRequest};

const NOTION_VERSION: HeaderName = HeaderName::from_static("notion-version");

/// Turns a method, relative path and optional body into an [`HttpRequest`].
///
/// Performs no I/O. Every request carries the API version and bearer
/// credential; `Content-Type` is set only when a body is present.
#[derive(Clone, Copy, Debug)]
pub(crate) struct RequestBuilder<'a> {
    config: &'a ClientConfig,
}

impl<'a> RequestBuilder<'a> {
    pub(crate) fn new(config: &'a ClientConfig) -> Self {
        Self { config }
    }

    pub(crate) fn build<B>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<&B>,
    ) -> Result<HttpRequest, ClientError>
    where
        B: Serialize + ?Sized,
    {
        let body = body
            .map(serde_json::to_vec)
            .transpose()
            .map_err(ClientError::Encoding)?;

        let mut url = self.build_url(path)?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }

        let mut headers = HeaderMap::new();
        headers.insert(NOTION_VERSION, self.config.notion_version().clone());
        headers.insert(AUTHORIZATION, self.config.credential().authorization().clone());
        if body.is_some() {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }

        log::trace!("built {method} {}", url.path());

        Ok(HttpRequest {
            method,
            url,
            headers,
            body,
        })
    }

    /// Joins `segments` into a path relative to the base URL.
    ///
    /// Each segment is percent-encoded with the path-segment set, so an id
    /// containing `/` or a space stays one segment.
    pub(crate) fn segment_path(&self, segments: &[&str]) -> Result<String, ClientError> {
        let mut url = self.config.base_url().clone();
        let base_len = url.path().len();
        url.path_segments_mut()
            .map_err(|()| ClientError::InvalidPath(segments.join("/")))?
            .pop_if_empty()
            .extend(segments);
        Ok(url.path()[base_len..].to_owned())
    }

    fn build_url(&self, path: &str) -> Result<Url, ClientError> {
        let relative = path.trim_start_matches('/');
        self.config
            .base_url()
            .join(relative)
            .map_err(|_| ClientError::InvalidPath(path.to_owned()))
    }
}


/// Query pairs carrying a continuation cursor; empty for the first page.
pub(crate) fn cursor_query(cursor: Option<&str>) -> Vec<(&'static str, &str)> {
    cursor
        .filter(|value| !value.is_empty())
        .map(|value| ("start_cursor", value))
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use reqwest::Method;
    use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
    use serde_json::json;

    use super::{RequestBuilder, cursor_query};
    use crate::{ClientConfig, ClientError};

    fn config() -> ClientConfig {
        ClientConfig::new("secret_token")
            .expect("valid token")
            .with_base_url("https://example.com/api")
            .expect("valid url")
    }

    #[test]
    fn joins_paths_from_base_with_nested_prefix() {
        let config = config();
        let request = RequestBuilder::new(&config)
            .build::<()>(Method::GET, "/v1/databases", &[], None)
            .expect("request builds");
        assert_eq!(request.url.as_str(), "https://example.com/api/v1/databases");
    }

    #[test]
    fn bodiless_request_has_auth_and_version_but_no_content_type() {
        let config = config();
        let request = RequestBuilder::new(&config)
            .build::<()>(Method::GET, "v1/databases", &[], None)
            .expect("request builds");

        assert_eq!(request.headers["notion-version"], "2022-06-28");
        assert_eq!(request.headers[AUTHORIZATION], "Bearer secret_token");
        assert!(request.headers[AUTHORIZATION].is_sensitive());
        assert!(request.headers.get(CONTENT_TYPE).is_none());
        assert!(request.body.is_none());
    }

    #[test]
    fn json_body_sets_content_type() {
        let config = config();
        let body = json!({"parent": {"database_id": "abc"}});
        let request = RequestBuilder::new(&config)
            .build(Method::POST, "v1/pages", &[], Some(&body))
            .expect("request builds");

        assert_eq!(request.headers[CONTENT_TYPE], "application/json");
        let sent: serde_json::Value =
            serde_json::from_slice(request.body.as_deref().expect("body present"))
                .expect("valid json");
        assert_eq!(sent, body);
    }

    #[test]
    fn cursor_is_appended_as_query_parameter() {
        let config = config();
        let request = RequestBuilder::new(&config)
            .build::<()>(Method::GET, "v1/databases", &cursor_query(Some("abc=1")), None)
            .expect("request builds");
        assert_eq!(request.url.query(), Some("start_cursor=abc%3D1"));

        assert!(cursor_query(Some("")).is_empty());
        assert!(cursor_query(None).is_empty());
    }

    #[test]
    fn unserializable_body_is_an_encoding_error() {
        let config = config();
        let mut body = HashMap::new();
        body.insert((1, 2), "tuple keys are not valid JSON object keys");

        let error = RequestBuilder::new(&config)
            .build(Method::POST, "v1/pages", &[], Some(&body))
            .expect_err("encoding should fail");
        assert!(matches!(error, ClientError::Encoding(_)));
    }

    #[test]
    fn ids_stay_one_path_segment() {
        let config = config();
        let builder = RequestBuilder::new(&config);

        let path = builder
            .segment_path(&["v1", "blocks", "a/b c+d", "children"])
            .expect("path builds");
        assert_eq!(path, "v1/blocks/a%2Fb%20c+d/children");
        assert_eq!(
            builder
                .segment_path(&["v1", "blocks", "1429989f-e8ac-4eff-bc8f-57f56486db54"])
                .expect("path builds"),
            "v1/blocks/1429989f-e8ac-4eff-bc8f-57f56486db54"
        );

        let request = builder
            .build::<()>(Method::GET, &path, &[], None)
            .expect("request builds");
        assert_eq!(
            request.url.as_str(),
            "https://example.com/api/v1/blocks/a%2Fb%20c+d/children"
        );
        assert_eq!(request.url.path_segments().map(Iterator::count), Some(5));
    }
}
