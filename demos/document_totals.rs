//! Document total calculation examples

use billing_core::{
    Adjustment, CalculatorConfig, DocumentAdjustments, DocumentCalculator, DocumentDraft,
    DocumentKind, GstCategory, LineItemInput, TaxTreatment,
};
use bigdecimal::BigDecimal;
use chrono::NaiveDate;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("🧾 Billing Core - Document Total Examples\n");

    // 1. Build a purchase draft
    let mut draft = DocumentDraft::new(DocumentKind::Purchase);
    draft.add_item(
        LineItemInput::new("Rice - 10kg".to_string(), BigDecimal::from(2), BigDecimal::from(150))
            .with_tax_rate(GstCategory::Essential.rate()),
    );
    draft.add_item(
        LineItemInput::new(
            "Coffee powder - 500g".to_string(),
            BigDecimal::from(1),
            BigDecimal::from(400),
        )
        .with_tax_rate(GstCategory::Reduced.rate()),
    );
    draft.add_item(
        LineItemInput::new("Office chair".to_string(), BigDecimal::from(2), BigDecimal::from(500))
            .with_discount(BigDecimal::from(10))
            .with_tax_rate(GstCategory::Higher.rate()),
    );
    draft.add_item(
        LineItemInput::new(
            "Boxed printer".to_string(),
            BigDecimal::from(1),
            BigDecimal::from(11800),
        )
        .with_tax_rate(GstCategory::Higher.rate())
        .with_tax_treatment(TaxTreatment::Inclusive),
    );
    draft.set_adjustments(
        DocumentAdjustments::new()
            .with_freight(Adjustment::fixed(BigDecimal::from(250)))
            .with_packing_forwarding(Adjustment::percentage(BigDecimal::from(1)))
            .with_discount_on_all(Adjustment::percentage(BigDecimal::from(2)))
            .with_round_off("-0.40".parse()?),
    );

    // 2. Intra-state computation (CGST + SGST)
    let calculator = DocumentCalculator::default();
    let computation = draft.compute(&calculator)?;

    println!("🏢 {} (intra-state):", draft.kind().title());
    for (i, item) in computation.items.iter().map(|item| item.rounded(2)).enumerate() {
        println!(
            "    {}. {} × {} @ ₹{} = ₹{} (taxable ₹{}, tax ₹{})",
            i + 1,
            item.input.description,
            item.input.quantity,
            item.input.unit_price,
            item.line_total,
            item.taxable_amount,
            item.tax_amount
        );
    }
    println!();

    let totals = &computation.totals;
    println!("  Subtotal:              ₹{}", totals.subtotal);
    println!("  CGST:                  ₹{}", totals.total_cgst);
    println!("  SGST:                  ₹{}", totals.total_sgst);
    println!("  Freight:               ₹{}", totals.freight_amount);
    println!("  Packing & forwarding:  ₹{}", totals.pf_amount);
    println!("  Discount on all:      -₹{}", totals.discount_all_amount);
    println!("  Round off:             ₹{}", totals.round_off);
    println!("  Grand Total:           ₹{}", totals.grand_total);
    println!();

    println!("📊 Tax summary by rate:");
    for row in &totals.tax_summary {
        println!(
            "  {}%: taxable ₹{}, tax ₹{} (CGST {}% ₹{}, SGST {}% ₹{})",
            row.rate.total_rate,
            row.taxable_amount,
            row.tax_amount,
            row.rate.cgst_rate,
            row.split.cgst,
            row.rate.sgst_rate,
            row.split.sgst
        );
    }
    println!();

    // 3. Same document, inter-state (IGST only)
    let inter_state = DocumentCalculator::new(CalculatorConfig::inter_state());
    let inter_totals = draft.compute(&inter_state)?.totals;
    println!("🌍 Inter-state:");
    println!("  IGST:                  ₹{}", inter_totals.total_igst);
    println!("  Grand Total:           ₹{}", inter_totals.grand_total);
    println!();

    // 4. Invalid input blocks totals instead of showing a wrong figure
    println!("✅ Validation:");
    draft.update_item(0, |item| item.quantity = BigDecimal::from(-2))?;
    match draft.compute(&calculator) {
        Ok(_) => println!("  ✓ Totals computed"),
        Err(e) => println!("  ❌ {}", e),
    }
    draft.update_item(0, |item| item.quantity = BigDecimal::from(2))?;

    // 5. Submission payload
    let payload = draft.into_payload(
        &calculator,
        NaiveDate::from_ymd_opt(2024, 4, 1).ok_or("invalid date")?,
        Some("BILL-2024-001".to_string()),
    )?;
    println!("\n📦 Payload {} ready: grand total ₹{}", payload.id, payload.totals.grand_total);

    println!("\n🎉 Document total examples completed successfully!");
    Ok(())
}
