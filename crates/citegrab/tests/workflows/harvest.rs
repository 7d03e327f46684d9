use super::*;

/// Mounts the main paper, one downloadable citation, one citation arXiv does not know, one
/// citation whose lookup fails and one citation whose PDF is gone.
async fn mount_paper_with_citations(server: &MockServer) {
  let uri = server.uri();
  let summary = "Extends arXiv:2201.00001, compares with ARXIV:2202.99999, arXiv:2204.00004 and \
                 arXiv:2203.00003.";

  Mock::given(method("GET"))
    .and(path("/api/query"))
    .and(query_param("search_query", "main paper"))
    .respond_with(ResponseTemplate::new(200).set_body_string(feed(&[entry(
      "2301.07041v2",
      "Main: Paper?",
      summary,
      &format!("{uri}/pdf/2301.07041v2"),
    )])))
    .mount(server)
    .await;
  Mock::given(method("GET"))
    .and(query_param("id_list", "2201.00001"))
    .respond_with(ResponseTemplate::new(200).set_body_string(feed(&[entry(
      "2201.00001v1",
      "A Rather Long Cited Title That Gets Truncated",
      "Abstract.",
      &format!("{uri}/pdf/2201.00001v1"),
    )])))
    .mount(server)
    .await;
  Mock::given(method("GET"))
    .and(query_param("id_list", "2202.99999"))
    .respond_with(ResponseTemplate::new(200).set_body_string(feed(&[partial_entry("2202.99999")])))
    .mount(server)
    .await;
  Mock::given(method("GET"))
    .and(query_param("id_list", "2204.00004"))
    .respond_with(ResponseTemplate::new(500))
    .mount(server)
    .await;
  Mock::given(method("GET"))
    .and(query_param("id_list", "2203.00003"))
    .respond_with(ResponseTemplate::new(200).set_body_string(feed(&[entry(
      "2203.00003v1",
      "Withdrawn",
      "Abstract.",
      &format!("{uri}/pdf/gone"),
    )])))
    .mount(server)
    .await;

  for pdf in ["/pdf/2301.07041v2", "/pdf/2201.00001v1"] {
    Mock::given(method("GET"))
      .and(path(pdf))
      .respond_with(ResponseTemplate::new(200).set_body_bytes(PDF_BYTES.to_vec()))
      .mount(server)
      .await;
  }
  Mock::given(method("GET"))
    .and(path("/pdf/gone"))
    .respond_with(ResponseTemplate::new(410))
    .mount(server)
    .await;
}

#[traced_test]
#[tokio::test]
async fn test_harvest_downloads_paper_and_citations() -> TestResult<()> {
  let server = MockServer::start().await;
  mount_paper_with_citations(&server).await;
  let dir = tempdir()?;

  let harvester = Harvester::from_config(&mock_config(&server, dir.path()))?;
  let results = harvester.client().search(&SearchQuery::new("main paper")).await?;
  assert_eq!(results.len(), 1);

  let mut events = Vec::new();
  let report = harvester
    .harvest(&results[0], "20240131_142501", |event| events.push(event.to_string()))
    .await?;

  let folder = dir.path().join("20240131_142501-Main_ Paper_");
  assert_eq!(report.folder.path, folder);
  assert_eq!(report.main_pdf, Some(folder.join("2301.07041v2.pdf")));
  assert_eq!(std::fs::read(folder.join("2301.07041v2.pdf"))?, PDF_BYTES);

  let citations = folder.join("citations");
  let cited = citations.join("2201.00001_A Rather Long Cited Title That.pdf");
  assert_eq!(std::fs::read(&cited)?, PDF_BYTES);

  let outcomes: Vec<(String, CitationOutcome)> = report
    .citations
    .into_iter()
    .map(|(citation, outcome)| (citation.to_string(), outcome))
    .collect();
  assert_eq!(outcomes.len(), 4);
  assert_eq!(outcomes[0], ("arXiv:2201.00001".to_string(), CitationOutcome::Downloaded(cited)));
  assert_eq!(outcomes[1], ("arXiv:2202.99999".to_string(), CitationOutcome::NotFound));
  assert_eq!(outcomes[2].0, "arXiv:2204.00004");
  assert!(matches!(outcomes[2].1, CitationOutcome::Error(_)), "{:?}", outcomes[2]);
  // A failed lookup does not stop the remaining citations.
  assert_eq!(
    outcomes[3],
    (
      "arXiv:2203.00003".to_string(),
      CitationOutcome::Failed(citations.join("2203.00003_Withdrawn.pdf"))
    )
  );

  assert!(events
    .iter()
    .any(|e| e == "Downloading citation: A Rather Long Cited Title That Gets Truncated"));
  assert!(events.iter().any(|e| e == "No arXiv paper found for arXiv:2202.99999"));
  assert!(events.iter().any(|e| e.starts_with("Error downloading citation arXiv:2204.00004: ")));
  assert!(events.iter().any(|e| e == "Failed to download: 2203.00003_Withdrawn.pdf"));
  Ok(())
}

#[tokio::test]
async fn test_harvest_without_citations_flag() -> TestResult<()> {
  let server = MockServer::start().await;
  mount_paper_with_citations(&server).await;
  let dir = tempdir()?;

  let harvester =
    Harvester::from_config(&mock_config(&server, dir.path()).with_follow_citations(false))?;
  let results = harvester.client().search(&SearchQuery::new("main paper")).await?;
  let report = harvester.harvest(&results[0], "20240131_142501", |_| {}).await?;

  assert!(report.main_pdf.is_some());
  assert!(report.citations.is_empty());
  assert!(report.folder.citations.is_none());
  assert!(!report.folder.path.join("citations").exists());
  Ok(())
}

#[tokio::test]
async fn test_harvest_same_folder_twice() -> TestResult<()> {
  let server = MockServer::start().await;
  mount_paper_with_citations(&server).await;
  let dir = tempdir()?;

  let harvester =
    Harvester::from_config(&mock_config(&server, dir.path()).with_follow_citations(false))?;
  let results = harvester.client().search(&SearchQuery::new("main paper")).await?;
  let first = harvester.harvest(&results[0], "20240131_142501", |_| {}).await?;
  let second = harvester.harvest(&results[0], "20240131_142501", |_| {}).await?;

  assert_eq!(first.folder, second.folder);
  Ok(())
}
