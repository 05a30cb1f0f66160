mod common;

use common::read_fixture;
use insiderkit::parsing::form4::{extract, qualifies};
use insiderkit::{Disqualified, Field, FilingRecord};

const DIRECTOR_SALE_FIXTURE: &str = "filings/0000320193-23-000081.txt";
const OPTION_EXERCISE_FIXTURE: &str = "filings/0001000004-23-000007.txt";
const URL: &str = "https://www.sec.gov/Archives/edgar/data/320193/0000320193-23-000081.txt";

#[test]
fn extract_director_sale_fixture() {
    let content = read_fixture(DIRECTOR_SALE_FIXTURE);
    let record = extract(&content, URL).expect("director sale should qualify");

    assert_eq!(record.url, URL);
    assert_eq!(record.date.as_deref(), Some("2023-08-11"));
    assert_eq!(record.issuer_cik.as_deref(), Some("0000320193"));
    assert_eq!(record.issuer_name.as_deref(), Some("Apple Inc."));
    assert_eq!(record.issuer_ticker.as_deref(), Some("AAPL"));
    assert_eq!(record.owner_cik.as_deref(), Some("0001214128"));
    assert_eq!(record.owner_name.as_deref(), Some("LEVINSON ARTHUR D"));
    assert_eq!(record.director.as_deref(), Some("1"));
    assert_eq!(record.officer.as_deref(), Some("0"));
    assert_eq!(record.ten_percent_owner.as_deref(), Some("0"));
    assert_eq!(record.officer_title.as_deref(), Some(""));
    assert_eq!(record.transaction_date.as_deref(), Some("2023-08-11"));
    assert_eq!(record.transaction_code.as_deref(), Some("S"));
    assert_eq!(record.number_of_shares.as_deref(), Some("50000"));
    assert_eq!(record.price_per_share.as_deref(), Some("177.97"));
    assert_eq!(record.shares_owned_following.as_deref(), Some("4180057"));
    assert_eq!(record.ownership_nature.as_deref(), Some("D"));
}

#[test]
fn extract_fixture_resolves_every_field() {
    let record = extract(&read_fixture(DIRECTOR_SALE_FIXTURE), URL).unwrap();
    for field in Field::ALL {
        assert!(record.field(field).is_some(), "{} unresolved", field.column());
    }
}

#[test]
fn option_exercise_fixture_is_disqualified() {
    let content = read_fixture(OPTION_EXERCISE_FIXTURE);

    assert_eq!(qualifies(&content), Err(Disqualified::NoBuyOrSell));
    assert!(extract(&content, URL).is_none());
}

#[test]
fn record_serializes_with_column_names() {
    let record = extract(&read_fixture(DIRECTOR_SALE_FIXTURE), URL).unwrap();
    let value = serde_json::to_value(&record).unwrap();

    assert_eq!(value["Issuer Ticker"], "AAPL");
    assert_eq!(value["Shares Owned Following Trans"], "4180057");

    let back: FilingRecord = serde_json::from_value(value).unwrap();
    assert_eq!(back, record);
}
