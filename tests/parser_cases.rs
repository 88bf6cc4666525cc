use pretty_assertions::assert_eq;
use wago_quote_parser::{
    Cell, Layout, MemoryDocument, MemoryPage, ParseOptions, QuoteError, QuoteRecord, RecordKind,
    TableGrid, WarningCode, parse_quote_document,
};

fn table(rows: &[&[&str]]) -> Vec<Vec<String>> {
    rows.iter()
        .map(|row| row.iter().map(|cell| (*cell).to_string()).collect())
        .collect()
}

fn record(part: &str, series: &str, description: &str, price: &str, discount: &str) -> QuoteRecord {
    QuoteRecord {
        part_number: part.to_string(),
        series: series.to_string(),
        description: description.to_string(),
        price: price.to_string(),
        discount: discount.to_string(),
    }
}

#[test]
fn one_page_product_table() {
    let document = MemoryDocument::new("quote.pdf").with_page(
        "Quote: 1001",
        vec![table(&[
            &["WAGO Part #", "Description", "Price"],
            &["750-500", "8-Channel Module", "125.00"],
        ])],
    );

    let parsed =
        parse_quote_document(&document, &ParseOptions::default()).expect("quote should parse");

    assert_eq!(
        parsed.records,
        vec![record("750-500", "", "8-Channel Module", "$125.00", "")]
    );
    assert_eq!(parsed.records[0].kind(), RecordKind::Product);
}

#[test]
fn series_discount_written_in_description() {
    let document = MemoryDocument::new("quote.pdf").with_page(
        "",
        vec![table(&[
            &["Part Number", "Description", "Price"],
            &["", "281 Series Volume Discount 15%", ""],
        ])],
    );

    let parsed =
        parse_quote_document(&document, &ParseOptions::default()).expect("quote should parse");

    assert_eq!(parsed.records, vec![record("", "281", "Volume", "", "15%")]);
    assert_eq!(parsed.records[0].kind(), RecordKind::SeriesDiscount);
}

#[test]
fn description_discounts_can_be_switched_off() {
    let document = MemoryDocument::new("quote.pdf").with_page(
        "",
        vec![table(&[
            &["Part Number", "Description", "Price"],
            &["", "281 Series Volume Discount 15%", ""],
        ])],
    );
    let options = ParseOptions {
        embedded_series_discounts: false,
        ..ParseOptions::default()
    };

    let error = parse_quote_document(&document, &options).expect_err("row should be dropped");

    assert!(matches!(error, QuoteError::NoRows(_)));
}

#[test]
fn headerless_table_infers_roles_from_content() {
    let document = MemoryDocument::new("quote.pdf").with_page(
        "",
        vec![table(&[
            &["750-500", "750", "Module A", "$10.00", "5%"],
            &["750-501", "750", "Module B", "$12.00", ""],
            &["", "787", "Power supplies", "", "8 %"],
        ])],
    );

    let parsed =
        parse_quote_document(&document, &ParseOptions::default()).expect("quote should parse");

    assert_eq!(
        parsed.records,
        vec![
            record("750-500", "", "Module A", "$10.00", ""),
            record("750-501", "", "Module B", "$12.00", ""),
            record("", "787", "Power supplies", "", "8%"),
        ]
    );
}

#[test]
fn roles_are_inferred_per_table() {
    let document = MemoryDocument::new("quote.pdf").with_page(
        "",
        vec![
            table(&[
                &["Part No", "Description", "Price"],
                &["2002-1201", "Terminal block", "$0.52"],
            ]),
            table(&[
                &["Description", "Part Number", "Discount", "Unit Price"],
                &["Jumper", "2002-402", "", "$0.31"],
            ]),
        ],
    );

    let parsed =
        parse_quote_document(&document, &ParseOptions::default()).expect("quote should parse");

    assert_eq!(
        parsed.records,
        vec![
            record("2002-1201", "", "Terminal block", "$0.52", ""),
            record("2002-402", "", "Jumper", "$0.31", ""),
        ]
    );
}

#[test]
fn numeric_cells_are_formatted_as_prices() {
    let page = MemoryPage {
        text: Some("Quotation No. 55-A".to_string()),
        tables: vec![TableGrid::new(
            1,
            vec![
                vec!["Part Number".into(), "Description".into(), "Price".into()],
                vec!["750-600".into(), "End module".into(), Cell::Number(4.5)],
                vec![Cell::Empty, "continued".into(), Cell::Empty],
            ],
        )],
    };
    let document = MemoryDocument::new("quote.pdf").with_memory_page(page);

    let parsed =
        parse_quote_document(&document, &ParseOptions::default()).expect("quote should parse");

    assert_eq!(
        parsed.records,
        vec![record("750-600", "", "End module", "$4.50", "")]
    );
    assert_eq!(parsed.report.rows_dropped, 1);
    assert_eq!(parsed.metadata.quote_number.as_deref(), Some("55-A"));
}

#[test]
fn single_row_tables_contribute_nothing() {
    let document = MemoryDocument::new("quote.pdf").with_page(
        "",
        vec![table(&[&["750-500", "Module", "$5.00"]])],
    );

    let error =
        parse_quote_document(&document, &ParseOptions::default()).expect_err("nothing usable");

    assert!(matches!(error, QuoteError::NoRows(_)));
}

#[test]
fn trailing_discount_summary_on_last_page_is_scanned() {
    let mut document = MemoryDocument::new("quote.pdf").with_page("Quote #: 9001", Vec::new());
    for _ in 0..10 {
        document = document.with_page(
            "",
            vec![table(&[
                &["Part Number", "Description", "Price"],
                &["750-500", "Module", "$1.00"],
            ])],
        );
    }
    document = document.with_page(
        "Series discounts",
        vec![table(&[
            &["Part Number", "Series", "Description", "Price", "Discount"],
            &["", "221", "Lever connectors", "", "30%"],
        ])],
    );

    let parsed =
        parse_quote_document(&document, &ParseOptions::default()).expect("quote should parse");

    assert_eq!(parsed.report.pages_scanned, vec![2, 3, 4, 5, 6, 7, 8, 9, 12]);
    assert_eq!(parsed.records.len(), 9);
    assert_eq!(
        parsed.records.last(),
        Some(&record("", "221", "Lever connectors", "", "30%"))
    );
    assert!(!parsed.report.all_pages_fallback);
}

#[test]
fn unreadable_pages_become_warnings() {
    let document = MemoryDocument::new("quote.pdf")
        .with_memory_page(MemoryPage::default())
        .with_page(
            "",
            vec![table(&[
                &["Part Number", "Description", "Price"],
                &["750-500", "Module", "$1.00"],
            ])],
        );

    let parsed =
        parse_quote_document(&document, &ParseOptions::default()).expect("quote should parse");

    assert_eq!(parsed.records.len(), 1);
    assert_eq!(parsed.metadata.quote_number, None);
    assert!(
        parsed
            .report
            .warnings
            .iter()
            .any(|warning| warning.code == WarningCode::PageTextUnavailable)
    );
}

#[test]
fn fixed_layout_scans_every_page() {
    let document = MemoryDocument::new("init.pdf")
        .with_page(
            "Q 4410",
            vec![table(&[
                &["Part", "Description", "Price"],
                &["750-352", "Fieldbus coupler", "$310.00"],
            ])],
        )
        .with_page(
            "",
            vec![table(&[
                &["787-1602", "Power supply", "$95.00"],
                &["787-1606", "Power supply 5 A", "$140.00"],
            ])],
        );

    let parsed = parse_quote_document(&document, &ParseOptions::with_layout(Layout::Fixed))
        .expect("quote should parse");

    let parts = parsed
        .records
        .iter()
        .map(|record| record.part_number.as_str())
        .collect::<Vec<_>>();
    assert_eq!(parts, vec!["750-352", "787-1602", "787-1606"]);
    assert_eq!(parsed.metadata.quote_number.as_deref(), Some("4410"));
    assert_eq!(parsed.metadata.date, None);
    assert_eq!(parsed.report.pages_scanned, vec![1, 2]);
}

#[test]
fn amount_column_is_never_read_as_a_discount() {
    let document = MemoryDocument::new("quote.pdf").with_page(
        "",
        vec![table(&[
            &["Part Number", "Description", "Qty", "Unit Price", "Amount"],
            &["750-500", "Module", "2", "$10.00", "$20.00"],
            &["", "Freight", "", "", "$25.00"],
        ])],
    );

    let parsed =
        parse_quote_document(&document, &ParseOptions::default()).expect("quote should parse");

    assert_eq!(
        parsed.records,
        vec![record("750-500", "", "Module", "$10.00", "")]
    );
    assert_eq!(parsed.report.rows_dropped, 1);
}

#[test]
fn priced_row_mentioning_series_discount_stays_a_product() {
    let document = MemoryDocument::new("quote.pdf").with_page(
        "",
        vec![table(&[
            &["Part Number", "Description", "Price"],
            &[
                "2002-1201",
                "2002 Series terminal block, volume discount 5% applied",
                "$0.52",
            ],
        ])],
    );

    let parsed =
        parse_quote_document(&document, &ParseOptions::default()).expect("quote should parse");

    assert_eq!(
        parsed.records,
        vec![record(
            "2002-1201",
            "",
            "2002 Series terminal block, volume discount 5% applied",
            "$0.52",
            ""
        )]
    );
}

#[test]
fn four_digit_series_is_not_cut_to_three_digits() {
    let document = MemoryDocument::new("init.pdf").with_page(
        "Q 4410",
        vec![table(&[
            &["Part", "Description", "Price"],
            &["", "2273 Series compact splicing Discount 12%", ""],
            &["750-352", "Fieldbus coupler", "$310.00"],
        ])],
    );

    let parsed = parse_quote_document(&document, &ParseOptions::with_layout(Layout::Fixed))
        .expect("quote should parse");

    assert_eq!(
        parsed.records,
        vec![record("750-352", "", "Fieldbus coupler", "$310.00", "")]
    );
    assert_eq!(parsed.report.rows_dropped, 1);
}
