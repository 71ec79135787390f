//! Integration tests for billing-core

use billing_core::{
    compute_document_totals, compute_line_item,
    utils::{MemoryCatalog, MemoryDocumentStore, StrictLineItemValidator},
    Adjustment, CalculationError, CalculatorConfig, CatalogError, DocumentAdjustments,
    DocumentCalculator, DocumentDraft, DocumentKind, DocumentStore, GstCategory,
    LineItemComputed, LineItemInput, Product, ProductCatalog, SupplyType, TaxTreatment,
};
use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use std::str::FromStr;

fn dec(s: &str) -> BigDecimal {
    BigDecimal::from_str(s).unwrap()
}

fn line(qty: &str, price: &str, discount: &str, tax: &str) -> LineItemComputed {
    compute_line_item(
        &LineItemInput::new("Item".to_string(), dec(qty), dec(price))
            .with_discount(dec(discount))
            .with_tax_rate(dec(tax)),
    )
    .unwrap()
}

fn scenario_adjustments() -> DocumentAdjustments {
    DocumentAdjustments::new()
        .with_freight(Adjustment::fixed(dec("50")))
        .with_packing_forwarding(Adjustment::fixed(dec("0")))
        .with_discount_on_all(Adjustment::percentage(dec("2")))
        .with_round_off(dec("0"))
}

#[test]
fn test_end_to_end_scenario() {
    let item1 = line("2", "500", "0", "18");
    let item2 = line("1", "1000", "5", "12");

    assert_eq!(item1.taxable_amount, dec("1000"));
    assert_eq!(item1.tax_amount, dec("180"));
    assert_eq!(item1.line_total, dec("1180"));
    assert_eq!(item2.taxable_amount, dec("950"));
    assert_eq!(item2.tax_amount, dec("114"));
    assert_eq!(item2.line_total, dec("1064"));

    let totals = compute_document_totals(&[item1, item2], &scenario_adjustments()).unwrap();

    assert_eq!(totals.item_count, 2);
    assert_eq!(totals.total_quantity, dec("3"));
    assert_eq!(totals.subtotal, dec("1950"));
    assert_eq!(totals.total_tax, dec("294"));
    assert_eq!(totals.freight_amount, dec("50"));
    assert_eq!(totals.pf_amount, dec("0"));
    assert_eq!(totals.discount_all_amount, dec("39"));
    assert_eq!(totals.grand_total.to_string(), "2255.00");
    assert_eq!(totals.total_cgst + totals.total_sgst, dec("294"));
}

#[test]
fn test_order_independence() {
    let items = vec![
        line("2", "500", "0", "18"),
        line("1", "1000", "5", "12"),
        line("7", "13.37", "2.5", "5"),
        line("0.5", "999.99", "0", "28"),
    ];
    let adjustments = scenario_adjustments().with_round_off(dec("-0.37"));
    let expected = compute_document_totals(&items, &adjustments).unwrap();

    let permutations: [[usize; 4]; 4] = [[3, 2, 1, 0], [1, 0, 3, 2], [2, 3, 0, 1], [0, 2, 1, 3]];
    for order in permutations {
        let shuffled: Vec<LineItemComputed> = order.iter().map(|&i| items[i].clone()).collect();
        let totals = compute_document_totals(&shuffled, &adjustments).unwrap();
        assert_eq!(totals, expected);
    }
}

#[test]
fn test_zero_items_boundary() {
    let adjustments = DocumentAdjustments::new()
        .with_freight(Adjustment::fixed(dec("40")))
        .with_packing_forwarding(Adjustment::percentage(dec("5")))
        .with_discount_on_all(Adjustment::fixed(dec("15")))
        .with_round_off(dec("0.25"));

    let totals = compute_document_totals(&[], &adjustments).unwrap();

    assert_eq!(totals.item_count, 0);
    assert_eq!(totals.subtotal, dec("0"));
    assert_eq!(totals.total_tax, dec("0"));
    assert_eq!(totals.pf_amount, dec("0"));
    assert_eq!(totals.grand_total, dec("25.25"));
    assert!(totals.tax_summary.is_empty());
}

#[test]
fn test_percentage_and_fixed_charges_are_equivalent() {
    let items = vec![line("3", "250", "10", "18"), line("1", "80", "0", "5")];
    // subtotal = 675 + 80 = 755, 4% of it = 30.2
    let as_percentage = DocumentAdjustments::new().with_freight(Adjustment::percentage(dec("4")));
    let as_fixed = DocumentAdjustments::new().with_freight(Adjustment::fixed(dec("30.2")));

    let by_percentage = compute_document_totals(&items, &as_percentage).unwrap();
    let by_fixed = compute_document_totals(&items, &as_fixed).unwrap();

    assert_eq!(by_percentage.freight_amount, dec("30.20"));
    assert_eq!(by_percentage.grand_total, by_fixed.grand_total);
}

#[test]
fn test_discount_before_tax_contract() {
    let item = line("1", "100", "10", "18");

    assert_eq!(item.taxable_amount, dec("90.00"));
    assert_eq!(item.tax_amount, dec("16.20"));
    assert_eq!(item.line_total, dec("106.20"));
}

#[test]
fn test_round_off_sign() {
    let items = vec![line("1", "1000", "0", "0")];

    let down = compute_document_totals(
        &items,
        &DocumentAdjustments::new().with_round_off(dec("-1.25")),
    )
    .unwrap();
    assert_eq!(down.grand_total, dec("998.75"));
    assert_eq!(down.round_off, dec("-1.25"));

    let up = compute_document_totals(
        &items,
        &DocumentAdjustments::new().with_round_off(dec("1.25")),
    )
    .unwrap();
    assert_eq!(up.grand_total, dec("1001.25"));
}

#[test]
fn test_idempotence() {
    let items = vec![line("3", "33.333", "7.5", "12"), line("1", "0.01", "0", "28")];
    let adjustments = scenario_adjustments();

    let first = compute_document_totals(&items, &adjustments).unwrap();
    let second = compute_document_totals(&items, &adjustments).unwrap();

    assert_eq!(first, second);
    assert_eq!(first.grand_total.to_string(), second.grand_total.to_string());
}

#[test]
fn test_invalid_input_blocks_totals() {
    let calculator = DocumentCalculator::default();
    let items = vec![
        LineItemInput::new("Good".to_string(), dec("1"), dec("10")),
        LineItemInput::new("Bad".to_string(), dec("1"), dec("-10")),
    ];

    let err = calculator
        .compute(&items, &DocumentAdjustments::new())
        .unwrap_err();

    match err {
        CalculationError::InvalidItem { index, source } => {
            assert_eq!(index, 1);
            assert_eq!(source.field(), "unit_price");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_inter_state_split_does_not_change_totals() {
    let items = vec![
        LineItemInput::new("Item".to_string(), dec("2"), dec("500")).with_tax_rate(dec("18")),
        LineItemInput::new("Item".to_string(), dec("1"), dec("1000"))
            .with_discount(dec("5"))
            .with_tax_rate(dec("12")),
    ];

    let intra = DocumentCalculator::default()
        .compute(&items, &scenario_adjustments())
        .unwrap();
    let inter = DocumentCalculator::new(CalculatorConfig::inter_state())
        .compute(&items, &scenario_adjustments())
        .unwrap();

    assert_eq!(intra.totals.total_cgst, dec("147"));
    assert_eq!(intra.totals.total_sgst, dec("147"));
    assert_eq!(inter.totals.total_igst, dec("294"));
    assert_eq!(intra.totals.grand_total, inter.totals.grand_total);
    assert_eq!(inter.totals.tax_summary[0].rate.igst_rate, dec("12"));
}

#[test]
fn test_inclusive_and_exclusive_rows_mix() {
    let items = vec![
        LineItemInput::new("Retail pack".to_string(), dec("2"), dec("112"))
            .with_tax_rate(dec("12"))
            .with_tax_treatment(TaxTreatment::Inclusive),
        LineItemInput::new("Service".to_string(), dec("1"), dec("100")).with_tax_rate(dec("18")),
    ];

    let computation = DocumentCalculator::default()
        .compute(&items, &DocumentAdjustments::new())
        .unwrap();

    assert_eq!(computation.items[0].taxable_amount, dec("200"));
    assert_eq!(computation.items[0].line_total, dec("224"));
    assert_eq!(computation.totals.subtotal, dec("300"));
    assert_eq!(computation.totals.total_tax, dec("42"));
    assert_eq!(computation.totals.grand_total, dec("342"));
}

#[test]
fn test_strict_validator_on_calculator() {
    let calculator = DocumentCalculator::with_validator(
        CalculatorConfig::default(),
        Box::new(StrictLineItemValidator),
    );
    let items = vec![LineItemInput::new("".to_string(), dec("1"), dec("10"))];

    let err = calculator
        .compute(&items, &DocumentAdjustments::new())
        .unwrap_err();
    assert!(matches!(err, CalculationError::InvalidItem { index: 0, .. }));
}

fn sample_catalog() -> MemoryCatalog {
    let catalog = MemoryCatalog::new();
    catalog
        .insert(Product::new(
            "P-100".to_string(),
            "Office chair".to_string(),
            dec("500"),
            GstCategory::Higher.rate(),
        ))
        .unwrap();
    catalog
        .insert(Product::new(
            "P-200".to_string(),
            "Printer paper".to_string(),
            dec("1000"),
            GstCategory::Standard.rate(),
        ))
        .unwrap();
    catalog
}

#[tokio::test]
async fn test_draft_prefilled_from_catalog() {
    let catalog = sample_catalog();
    let calculator = DocumentCalculator::default();
    let mut draft = DocumentDraft::new(DocumentKind::Purchase);

    let chair = draft.add_product(&catalog, "P-100", dec("2")).await.unwrap();
    let paper = draft.add_product(&catalog, "P-200", dec("1")).await.unwrap();
    draft
        .update_item(paper, |item| item.discount_percent = dec("5"))
        .unwrap();
    draft.set_adjustments(scenario_adjustments());

    assert_eq!(draft.items()[chair].description, "Office chair");
    assert_eq!(draft.items()[chair].product_id.as_deref(), Some("P-100"));
    assert_eq!(draft.items()[chair].tax_rate_percent, dec("18"));

    let totals = draft.compute(&calculator).unwrap().totals;
    assert_eq!(totals.grand_total, dec("2255"));

    assert_eq!(catalog.list_products().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_unknown_product_is_reported() {
    let catalog = sample_catalog();
    let mut draft = DocumentDraft::new(DocumentKind::Sales);

    let err = draft
        .add_product(&catalog, "P-999", dec("1"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        CalculationError::Catalog(CatalogError::ProductNotFound(ref id)) if id == "P-999"
    ));
    assert!(draft.is_empty());
}

#[tokio::test]
async fn test_store_accepts_verified_and_rejects_tampered_documents() {
    let catalog = sample_catalog();
    let calculator = DocumentCalculator::default();
    let mut store = MemoryDocumentStore::new(CalculatorConfig::default());

    let mut draft = DocumentDraft::new(DocumentKind::ProformaInvoice);
    draft.add_product(&catalog, "P-100", dec("4")).await.unwrap();
    let payload = draft
        .into_payload(
            &calculator,
            NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
            Some("PI-7".to_string()),
        )
        .unwrap();

    store.submit(&payload).await.unwrap();
    let stored = store.get_document(&payload.id).await.unwrap().unwrap();
    assert_eq!(stored.totals.grand_total, dec("2360"));

    let mut tampered = payload.clone();
    tampered.id = uuid::Uuid::new_v4();
    tampered.totals.grand_total = dec("1");

    let err = store.submit(&tampered).await.unwrap_err();
    assert!(matches!(
        err,
        CalculationError::TotalsMismatch {
            field: "grand_total",
            ..
        }
    ));
    assert_eq!(store.len().unwrap(), 1);
    assert!(store.get_document(&tampered.id).await.unwrap().is_none());

    let mut split_tampered = payload.clone();
    split_tampered.id = uuid::Uuid::new_v4();
    split_tampered.totals.total_sgst += &split_tampered.totals.total_cgst;
    split_tampered.totals.total_cgst = dec("0");

    let err = store.submit(&split_tampered).await.unwrap_err();
    assert!(matches!(
        err,
        CalculationError::TotalsMismatch {
            field: "total_cgst",
            ..
        }
    ));
    assert_eq!(store.len().unwrap(), 1);
}

#[test]
fn test_supply_type_config_round_trip() {
    let config = CalculatorConfig::from_json(r#"{"supply_type":"inter_state","scale":3}"#).unwrap();
    assert_eq!(config.supply_type, SupplyType::InterState);

    let totals = DocumentCalculator::new(config)
        .compute_document_totals(&[line("1", "0.3335", "0", "0")], &DocumentAdjustments::new())
        .unwrap();
    assert_eq!(totals.grand_total.to_string(), "0.334");
}
