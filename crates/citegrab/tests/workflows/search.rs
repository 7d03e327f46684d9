use super::*;

#[traced_test]
#[tokio::test]
async fn test_search_sends_relevance_query() -> TestResult<()> {
  let server = MockServer::start().await;
  let body = feed(&[entry(
    "2301.07041v2",
    "Verifiable Fully\n  Homomorphic Encryption",
    "Builds on arXiv:2201.00001.",
    &format!("{}/pdf/2301.07041v2", server.uri()),
  )]);

  Mock::given(method("GET"))
    .and(path("/api/query"))
    .and(query_param("search_query", "homomorphic encryption"))
    .and(query_param("max_results", "1"))
    .and(query_param("sortBy", "relevance"))
    .and(query_param("sortOrder", "descending"))
    .respond_with(ResponseTemplate::new(200).set_body_string(body))
    .expect(1)
    .mount(&server)
    .await;

  let client = ArxivClient::with_api_url(format!("{}/api/query", server.uri()));
  let results = client.search(&SearchQuery::new("homomorphic encryption")).await?;

  assert_eq!(results.len(), 1);
  assert_eq!(results[0].title, "Verifiable Fully Homomorphic Encryption");
  assert_eq!(results[0].author_names(), "Alice Researcher, Bob Scholar");
  assert_eq!(results[0].entry_stem(), "2301.07041v2");
  assert_eq!(results[0].primary_category.as_deref(), Some("cs.CR"));
  Ok(())
}

#[tokio::test]
async fn test_search_respects_max_results() -> TestResult<()> {
  let server = MockServer::start().await;
  let entries: Vec<String> = (1..=3)
    .map(|i| entry(&format!("2301.0000{i}v1"), &format!("Paper {i}"), "Abstract.", "http://x/pdf"))
    .collect();

  Mock::given(method("GET"))
    .and(query_param("max_results", "3"))
    .respond_with(ResponseTemplate::new(200).set_body_string(feed(&entries)))
    .mount(&server)
    .await;

  let client = ArxivClient::with_api_url(format!("{}/api/query", server.uri()));
  let results = client.search(&SearchQuery::new("paper").with_max_results(3)).await?;
  let titles: Vec<&str> = results.iter().map(|r| r.title.as_str()).collect();
  assert_eq!(titles, ["Paper 1", "Paper 2", "Paper 3"]);
  Ok(())
}

#[tokio::test]
async fn test_search_without_results() -> TestResult<()> {
  let server = MockServer::start().await;
  Mock::given(method("GET"))
    .respond_with(ResponseTemplate::new(200).set_body_string(feed(&[])))
    .mount(&server)
    .await;

  let client = ArxivClient::with_api_url(format!("{}/api/query", server.uri()));
  assert!(client.search(&SearchQuery::new("nothing matches")).await?.is_empty());
  Ok(())
}

#[tokio::test]
async fn test_search_server_error_is_network_error() {
  let server = MockServer::start().await;
  Mock::given(method("GET")).respond_with(ResponseTemplate::new(503)).mount(&server).await;

  let client = ArxivClient::with_api_url(format!("{}/api/query", server.uri()));
  let result = client.search(&SearchQuery::new("anything")).await;
  assert!(matches!(result, Err(citegrab::error::CitegrabError::Network(_))));
}

#[tokio::test]
async fn test_lookup_by_identifier() -> TestResult<()> {
  let server = MockServer::start().await;
  Mock::given(method("GET"))
    .and(query_param("id_list", "2201.00001"))
    .respond_with(ResponseTemplate::new(200).set_body_string(feed(&[entry(
      "2201.00001v1",
      "Cited Paper",
      "Abstract.",
      "http://x/pdf",
    )])))
    .mount(&server)
    .await;
  Mock::given(method("GET"))
    .and(query_param("id_list", "2202.99999"))
    .respond_with(ResponseTemplate::new(200).set_body_string(feed(&[partial_entry("2202.99999")])))
    .mount(&server)
    .await;

  let client = ArxivClient::with_api_url(format!("{}/api/query", server.uri()));
  let found = client.lookup("arXiv:2201.00001").await?.expect("paper should be found");
  assert_eq!(found.title, "Cited Paper");
  assert!(client.lookup("2202.99999").await?.is_none());
  Ok(())
}

#[tokio::test]
async fn test_lookup_rejects_malformed_identifier_without_request() {
  let server = MockServer::start().await;
  Mock::given(method("GET"))
    .respond_with(ResponseTemplate::new(200))
    .expect(0)
    .mount(&server)
    .await;

  let client = ArxivClient::with_api_url(format!("{}/api/query", server.uri()));
  assert!(client.lookup("not-an-id").await.is_err());
}
