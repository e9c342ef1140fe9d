use std::sync::Arc;

use serde_json::json;

use restbind::interface::{
    config::{ContainerSpec, EndpointConfig, Mode},
    page::{InMemoryPage, Page},
};

fn page() -> Arc<InMemoryPage> {
    let page = Arc::new(InMemoryPage::new());
    page.define("row-template", "<tr><td>{{id}}</td><td>{{name}}</td></tr>");
    page.define("row-container", "");
    page
}

#[cfg(feature = "default-http-client")]
#[tokio::test]
async fn test_call_through_default_http_client() {
    use httptest::{matchers::request, responders::json_encoded, Expectation, Server};
    use restbind::{client::DefaultHttpClient, endpoint::Endpoint};

    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/rows"))
            .respond_with(json_encoded(json!([{"id": 1, "name": "one"}, {"id": 2, "name": "two"}]))),
    );

    let page = page();
    let config = EndpointConfig {
        // url_str("") would carry a trailing slash and request "//rows"
        host: format!("http://{}", server.addr()),
        path: "/rows".to_string(),
        container: Some("row-container".into()),
        template: Some("row-template".to_string()),
        ..Default::default()
    };
    let endpoint = Endpoint::new(config, DefaultHttpClient::new().unwrap(), page.clone());

    endpoint.call(None, None).await;
    assert_eq!(
        page.read("row-container"),
        Some("<tr><td>1</td><td>one</td></tr><tr><td>2</td><td>two</td></tr>".to_string()),
    );
}

#[cfg(feature = "default-http-client")]
#[tokio::test]
async fn test_unreachable_host_is_connection_error() {
    use restbind::{client::DefaultHttpClient, endpoint::Endpoint};

    let page = page();
    page.define("error-template", "<p>{{summary}}</p>");

    // nothing listens on port 1, the connect is refused immediately
    let config = EndpointConfig {
        host: "http://127.0.0.1:1".to_string(),
        path: "/rows".to_string(),
        container: Some("row-container".into()),
        template: Some("row-template".to_string()),
        error_template: Some("error-template".to_string()),
        ..Default::default()
    };
    let endpoint = Endpoint::new(config, DefaultHttpClient::new().unwrap(), page.clone());

    endpoint.call(None, None).await;
    assert_eq!(page.read("row-container"), Some("<p>connection error</p>".to_string()));
}

#[tokio::test]
async fn test_call_through_axum_service() {
    use axum::{routing::get, Json, Router};
    use tower::ServiceExt;

    let app = Router::new()
        .route("/rows", get(|| async { Json(json!([{"id": 7, "name": "seven"}])) }))
        .map_request(|req: http::Request<bytes::Bytes>| req.map(axum::body::Body::from));

    let page = page();
    page.define("row-container", "<tr><td>0</td><td>zero</td></tr>");

    let config = EndpointConfig {
        host: "http://localhost".to_string(),
        path: "/rows".to_string(),
        container: Some(ContainerSpec { id: "row-container".to_string(), mode: Mode::Rewrite }.into()),
        template: Some("row-template".to_string()),
        ..Default::default()
    };
    let endpoint = restbind::endpoint::Endpoint::new(config, app, page.clone());

    endpoint.call(None, None).await;
    assert_eq!(page.read("row-container"), Some("<tr><td>7</td><td>seven</td></tr>".to_string()));
}
