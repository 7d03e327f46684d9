use super::*;

#[tokio::test]
async fn test_download_writes_full_body() -> TestResult<()> {
  let server = MockServer::start().await;
  // Several times the chunk size so the body arrives and is written in pieces.
  let body: Vec<u8> = (0..50_000u32).map(|i| (i % 251) as u8).collect();
  Mock::given(method("GET"))
    .and(path("/pdf/2301.07041v2"))
    .respond_with(ResponseTemplate::new(200).set_body_bytes(body.clone()))
    .mount(&server)
    .await;

  let dir = tempdir()?;
  let destination = dir.path().join("2301.07041v2.pdf");
  let ok = Downloader::new()
    .download_pdf(&format!("{}/pdf/2301.07041v2", server.uri()), &destination)
    .await;

  assert!(ok);
  assert_eq!(std::fs::read(&destination)?, body);
  Ok(())
}

#[tokio::test]
async fn test_download_non_success_status_is_failure() -> TestResult<()> {
  let server = MockServer::start().await;
  Mock::given(method("GET"))
    .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
    .mount(&server)
    .await;

  let dir = tempdir()?;
  let destination = dir.path().join("missing.pdf");
  let url = format!("{}/pdf/missing", server.uri());
  let ok = Downloader::new().download_pdf(&url, &destination).await;

  assert!(!ok);
  assert!(!destination.exists());
  Ok(())
}

#[tokio::test]
async fn test_fetch_to_file_reports_status() -> TestResult<()> {
  let server = MockServer::start().await;
  Mock::given(method("GET")).respond_with(ResponseTemplate::new(403)).mount(&server).await;

  let dir = tempdir()?;
  let error = Downloader::new()
    .fetch_to_file(&format!("{}/pdf/locked", server.uri()), &dir.path().join("locked.pdf"))
    .await
    .unwrap_err();
  assert!(error.to_string().contains("403"));
  Ok(())
}
