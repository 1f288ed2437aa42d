use super::*;

#[test]
fn methods_map_one_to_one() {
    assert_eq!(http_method(Method::Get), reqwest::Method::GET);
    assert_eq!(http_method(Method::Post), reqwest::Method::POST);
    assert_eq!(http_method(Method::Put), reqwest::Method::PUT);
    assert_eq!(http_method(Method::Delete), reqwest::Method::DELETE);
}

#[tokio::test]
async fn unreachable_host_is_a_network_error() {
    let config = ClientConfig::default()
        .with_base_url("http://127.0.0.1:9")
        .with_timeout(Duration::from_secs(2));
    let transport = ReqwestTransport::new(config).expect("client");
    let err = transport.execute(ApiRequest::get("/posts/")).await.expect_err("refused");
    assert!(matches!(err, TransportError::Network(_) | TransportError::Timeout(_)));
}
