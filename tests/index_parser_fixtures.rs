mod common;

use common::read_fixture;
use insiderkit::parsing::index::{IndexConfig, IndexParser, parse_index};

const COMPANY_INDEX_FIXTURE: &str = "indexes/company.20230815.idx";
const SOURCE: &str = "https://www.sec.gov/Archives/edgar/daily-index/2023/QTR3/company.20230815.idx";

#[test]
fn parse_company_index_fixture() {
    let content = read_fixture(COMPANY_INDEX_FIXTURE);
    let parser = IndexParser::new(IndexConfig::default());

    let records = parser.parse(&content, SOURCE);
    assert_eq!(records.len(), 5);

    let first = &records[0];
    assert_eq!(first.company_name, "ACME WIDGETS INC");
    assert_eq!(first.form_type, "8-K");
    assert_eq!(first.cik, "1000001");
    assert_eq!(first.date_filed, "20230815");
    assert_eq!(first.file_name, "edgar/data/1000001/0001000001-23-000010.txt");
    assert!(records.iter().all(|r| r.idx_name == SOURCE));
}

#[test]
fn parse_company_index_keeps_forms_with_spaces() {
    let records = parse_index(&read_fixture(COMPANY_INDEX_FIXTURE), SOURCE);

    let forms: Vec<&str> = records.iter().map(|r| r.form_type.as_str()).collect();
    assert_eq!(forms, vec!["8-K", "4", "SC 13G/A", "4/A", "10-Q"]);

    let berkshire = &records[2];
    assert_eq!(berkshire.company_name, "BERKSHIRE HATHAWAY INC");
    assert_eq!(berkshire.cik, "1067983");
}

#[test]
fn parse_company_index_banner_is_skipped() {
    let content = read_fixture("indexes/company.20230814.idx");
    let records = parse_index(&content, SOURCE);

    assert_eq!(records.len(), 3);
    assert!(records.iter().all(|r| r.date_filed == "20230814"));
    assert!(
        records
            .iter()
            .all(|r| r.get("company_name") != Some("Company Name"))
    );
}

#[test]
fn parse_index_only_banner() {
    let content = read_fixture(COMPANY_INDEX_FIXTURE);
    let banner: String = content.lines().take(11).map(|l| format!("{l}\n")).collect();

    assert!(parse_index(&banner, SOURCE).is_empty());
}
