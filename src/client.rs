use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::model::{Block, Database, DatabaseQuery, NewPage, Page};
use crate::pagination::{Pages, collect_all};
use crate::request::{RequestBuilder, cursor_query};
use crate::response::decode;
use crate::{ClientConfig, ClientError, HttpRequest, ReqwestTransport, Transport};

const PAGES_PATH: &str = "v1/pages";
const DATABASES_PATH: &str = "v1/databases";

/// Blocking Notion API client.
///
/// Every call runs to completion on the calling thread: list endpoints are
/// walked page by page until the server reports no more results, and any
/// failing page fails the whole call. The client holds no mutable state, so
/// one instance can serve concurrent calls from several threads when its
/// transport allows it.
#[derive(Clone, Debug)]
pub struct NotionClient<X = ReqwestTransport> {
    config: ClientConfig,
    transport: X,
}

impl NotionClient {
    /// Creates a client using the default `reqwest` transport.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        Ok(Self::with_transport(config, ReqwestTransport::new()?))
    }
}

impl<X: Transport> NotionClient<X> {
    /// Creates a client that sends every request through `transport`.
    pub fn with_transport(config: ClientConfig, transport: X) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Creates a page and returns the server's representation of it.
    pub fn add_page(&self, page: &NewPage) -> Result<Page, ClientError> {
        self.request_json(Method::POST, PAGES_PATH, &[], Some(page))
    }

    /// Lists every database shared with the integration, in server order.
    pub fn list_databases(&self) -> Result<Vec<Database>, ClientError> {
        collect_all(&self.transport, |cursor| self.database_page(cursor))
    }

    /// Finds the first database whose title text is exactly `name`.
    ///
    /// Stops fetching as soon as a match is seen. Untitled databases never
    /// match. Returns [`ClientError::NotFound`] after the last page.
    pub fn find_database(&self, name: &str) -> Result<Database, ClientError> {
        let pages =
            Pages::<_, Database, _>::new(&self.transport, |cursor| self.database_page(cursor));

        for page in pages {
            let found = page?
                .into_iter()
                .find(|database| database.name() == Some(name));
            if let Some(database) = found {
                return Ok(database);
            }
        }

        Err(ClientError::NotFound {
            resource: "database",
            name: name.to_owned(),
        })
    }

    /// Lists all direct children of a block or page.
    pub fn list_blocks(&self, block_id: &str) -> Result<Vec<Block>, ClientError> {
        let path = self
            .builder()
            .segment_path(&["v1", "blocks", block_id, "children"])?;
        collect_all(&self.transport, |cursor| {
            self.builder()
                .build::<()>(Method::GET, &path, &cursor_query(cursor), None)
        })
    }

    /// Returns every page of a database matching `query`.
    ///
    /// The query is re-sent for each page with `start_cursor` set to the
    /// previous page's continuation.
    pub fn query_database(
        &self,
        database_id: &str,
        query: &DatabaseQuery,
    ) -> Result<Vec<Page>, ClientError> {
        let path = self
            .builder()
            .segment_path(&["v1", "databases", database_id, "query"])?;
        let mut body = query.clone();
        collect_all(&self.transport, |cursor| {
            body.start_cursor = cursor.map(str::to_owned);
            self.builder()
                .build(Method::POST, &path, &[], Some(&body))
        })
    }

    /// Sends a single request to any endpoint and decodes the `200` body.
    ///
    /// `path` is relative to the configured base URL, e.g. `v1/users/me`.
    /// The body is encoded before anything is sent.
    pub fn request_json<B, T>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<&B>,
    ) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.builder().build(method, path, query, body)?;
        log::debug!("sending {} {}", request.method, request.url.path());

        let response = self.transport.send(request)?;
        decode(response.status, &response.body)
    }

    fn database_page(&self, cursor: Option<&str>) -> Result<HttpRequest, ClientError> {
        self.builder()
            .build::<()>(Method::GET, DATABASES_PATH, &cursor_query(cursor), None)
    }

    fn builder(&self) -> RequestBuilder<'_> {
        RequestBuilder::new(&self.config)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use reqwest::Method;
    use serde_json::{Value, json};

    use super::NotionClient;
    use crate::model::{DatabaseQuery, NewPage, Parent, PropertyValue};
    use crate::testing::ScriptedTransport;
    use crate::{ClientConfig, ClientError};

    fn client(transport: &ScriptedTransport) -> NotionClient<&ScriptedTransport> {
        let config = ClientConfig::new("secret")
            .expect("valid token")
            .with_base_url("https://mock.notion.test")
            .expect("valid url");
        NotionClient::with_transport(config, transport)
    }

    fn body_of(transport: &ScriptedTransport, index: usize) -> Value {
        let requests = transport.requests();
        serde_json::from_slice(requests[index].body.as_deref().expect("body present"))
            .expect("valid json")
    }

    #[test]
    fn client_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<NotionClient>();
    }

    #[test]
    fn add_page_posts_body_and_returns_created_page() {
        let transport = ScriptedTransport::new().respond(
            200,
            json!({"object": "page", "id": "new-page", "parent": {"type": "page_id", "page_id": "p-1"}}),
        );

        let page = client(&transport)
            .add_page(&NewPage::under(Parent::PageId("p-1".to_owned())).property("title", PropertyValue::title("Hi")))
            .expect("created");

        assert_eq!(page.id, "new-page");
        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, Method::POST);
        assert_eq!(requests[0].url.as_str(), "https://mock.notion.test/v1/pages");
        assert_eq!(requests[0].headers["content-type"], "application/json");
        assert_eq!(body_of(&transport, 0)["parent"], json!({"page_id": "p-1"}));
    }

    #[test]
    fn add_page_surfaces_remote_validation_error() {
        let transport = ScriptedTransport::new().respond(
            400,
            json!({"object": "error", "status": 400, "code": "validation_error", "message": "Name is not a property that exists."}),
        );

        let error = client(&transport)
            .add_page(&NewPage::in_database("db"))
            .expect_err("rejected");

        match error {
            ClientError::Remote { status, failure } => {
                assert_eq!(status.as_u16(), 400);
                assert_eq!(failure.code, "validation_error");
                assert_eq!(failure.message, "Name is not a property that exists.");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn list_blocks_walks_children_pages() {
        let paragraph = |text: &str| {
            json!({"object": "block", "id": text, "type": "paragraph",
                   "paragraph": {"rich_text": [{"type": "text", "text": {"content": text}}]}})
        };
        let transport = ScriptedTransport::new()
            .respond(200, json!({"results": [paragraph("a")], "has_more": true, "next_cursor": "n1"}))
            .respond(200, json!({"results": [paragraph("b")], "has_more": false, "next_cursor": null}));

        let blocks = client(&transport).list_blocks("parent/id").expect("listed");

        let ids: Vec<&str> = blocks.iter().map(|block| block.meta.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        let urls: Vec<String> = transport
            .requests()
            .iter()
            .map(|request| request.url.to_string())
            .collect();
        assert_eq!(
            urls,
            vec![
                "https://mock.notion.test/v1/blocks/parent%2Fid/children".to_owned(),
                "https://mock.notion.test/v1/blocks/parent%2Fid/children?start_cursor=n1".to_owned(),
            ]
        );
    }

    #[test]
    fn query_database_overwrites_cursor_in_each_body() {
        let row = |id: &str| json!({"id": id, "parent": {"type": "database_id", "database_id": "db"}});
        let transport = ScriptedTransport::new()
            .respond(200, json!({"results": [row("r1")], "has_more": true, "next_cursor": "c1"}))
            .respond(200, json!({"results": [row("r2")], "has_more": false}));

        let query = DatabaseQuery {
            start_cursor: Some("stale".to_owned()),
            ..DatabaseQuery::default().page_size(1)
        };
        let pages = client(&transport).query_database("db", &query).expect("queried");

        assert_eq!(pages.len(), 2);
        assert_eq!(body_of(&transport, 0), json!({"page_size": 1}));
        assert_eq!(body_of(&transport, 1), json!({"page_size": 1, "start_cursor": "c1"}));
        assert_eq!(
            transport.requests()[1].url.as_str(),
            "https://mock.notion.test/v1/databases/db/query"
        );
    }

    #[test]
    fn request_json_reaches_unmodelled_endpoints() {
        let transport =
            ScriptedTransport::new().respond(200, json!({"object": "user", "id": "bot-1"}));

        let me: Value = client(&transport)
            .request_json::<(), _>(Method::GET, "/v1/users/me", &[], None)
            .expect("decoded");

        assert_eq!(me["id"], "bot-1");
        assert!(transport.requests()[0].headers.get("content-type").is_none());
    }
}
