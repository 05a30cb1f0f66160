use insiderkit::{Insider, InsiderError};

#[tokio::test]
#[ignore]
async fn get_daily_index() {
    let insider = Insider::new("test_agent example@example.com").unwrap();
    let url = "https://www.sec.gov/Archives/edgar/daily-index/2023/QTR3/company.20230815.idx";

    let body = insider.get(url).await.unwrap();
    assert!(body.contains("Daily Index of EDGAR Dissemination Feed by Company Name"));
}

#[tokio::test]
#[ignore]
async fn missing_document_is_not_found() {
    let insider = Insider::new("test_agent example@example.com").unwrap();
    let url = "https://www.sec.gov/Archives/edgar/daily-index/2023/QTR3/company.20230812.idx";

    let result = insider.get(url).await;
    assert!(matches!(
        result,
        Err(InsiderError::NotFound) | Err(InsiderError::AccessDenied(_))
    ));
}
