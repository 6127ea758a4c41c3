//! End-to-end resolution through the unpkg registry client

use std::sync::Arc;

use mockito::{Matcher, Server};

use dataproxy_version::config::{ClientConfig, EnvironmentView};
use dataproxy_version::version::error::{FetchError, ResolveError};
use dataproxy_version::version::registries::UnpkgRegistry;
use dataproxy_version::version::resolver::VersionResolver;

fn resolver_for(server: &Server) -> VersionResolver {
    VersionResolver::with_engine_version(
        Arc::new(UnpkgRegistry::new(&server.url(), "prisma")),
        "4.18.0",
    )
}

#[tokio::test]
async fn resolves_published_version_from_registry() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock(
            "GET",
            Matcher::Regex(r"^/prisma@(<|%3C)=4\.18\.0/package\.json$".to_string()),
        )
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"version":"4.18.0"}"#)
        .expect(2)
        .create_async()
        .await;

    let resolver = resolver_for(&server);
    let config = ClientConfig::new("4.18.0-dev.31");
    let env = EnvironmentView::default();

    let first = resolver.resolve(&config, &env).await.unwrap();
    let second = resolver.resolve(&config, &env).await.unwrap();

    mock.assert_async().await;
    assert_eq!(first, "4.18.0");
    assert_eq!(first, second);
}

#[tokio::test]
async fn not_found_surfaces_status_and_body() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", Matcher::Any)
        .with_status(404)
        .with_body("not found")
        .create_async()
        .await;

    let resolver = resolver_for(&server);
    let result = resolver
        .resolve(
            &ClientConfig::new("4.18.0-dev.31"),
            &EnvironmentView::default(),
        )
        .await;

    mock.assert_async().await;
    let err = result.unwrap_err();
    assert!(err.to_string().contains("404"));
    match err {
        ResolveError::UpstreamFetch(FetchError::Status {
            status,
            status_text,
            body,
        }) => {
            assert_eq!(status, 404);
            assert_eq!(status_text, "Not Found");
            assert_eq!(body, "not found");
        }
        other => panic!("expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn malformed_payload_is_distinguished_from_status_failure() {
    let mut server = Server::new_async().await;

    let _mock = server
        .mock("GET", Matcher::Any)
        .with_status(200)
        .with_body("{\"version\":")
        .create_async()
        .await;

    let resolver = resolver_for(&server);
    let result = resolver
        .resolve(
            &ClientConfig::new("4.18.0-dev.31"),
            &EnvironmentView::default(),
        )
        .await;

    assert!(matches!(
        result,
        Err(ResolveError::UpstreamFetch(FetchError::Parse(_)))
    ));
}

#[tokio::test]
async fn release_client_never_contacts_registry() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let resolver = resolver_for(&server);
    let result = resolver
        .resolve(&ClientConfig::new("4.18.0"), &EnvironmentView::default())
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(result, "4.18.0");
}
