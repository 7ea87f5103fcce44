use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};

use crate::{
    core::{comparison::Comparison, savings::Verdict},
    fmt::{ItalianEuros, fixed_fee_label},
    quantity::cost::Euros,
    record::{BillRecord, OfferRecord, PricingKind, SupplyTariff},
};

const NOT_AVAILABLE: &str = "N/D";
const UNNORMALISED_FEE_LABEL: &str = "Quota fissa (CCV/PCV)";

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
        .enforce_styling();
    table
}

pub fn build_bill_table(bill: &BillRecord) -> Table {
    let mut rows = vec![
        ("Intestatario", bill.customer_name.as_deref()),
        ("Gestore attuale", Some(bill.current_supplier.as_str())),
        ("Indirizzo di fornitura", bill.supply_address.as_deref()),
        ("POD/PDR", bill.meter_id.as_deref()),
        ("Periodo di fatturazione", bill.billing_period.as_deref()),
        ("Consumo fatturato", Some(bill.billed_consumption.as_str())),
        ("Consumo annuo", Some(bill.annual_consumption.as_str())),
        ("Tipologia d'uso", bill.usage_category.as_deref()),
    ];
    match &bill.tariff {
        SupplyTariff::Electricity { total_cost, available_power, voltage, .. } => {
            rows.extend([
                ("Tipo fornitura", Some("Luce")),
                ("Costo totale energia", total_cost.as_deref()),
                ("Potenza disponibile", available_power.as_deref()),
                ("Tensione", voltage.as_deref()),
            ]);
        }
        SupplyTariff::Gas { total_cost, .. } => {
            rows.extend([("Tipo fornitura", Some("Gas")), ("Costo totale gas", total_cost.as_deref())]);
        }
        SupplyTariff::Unknown { total_cost, .. } => {
            rows.extend([("Tipo fornitura", Some("Sconosciuto")), ("Costo totale", total_cost.as_deref())]);
        }
    }

    let mut table = new_table();
    for (label, value) in rows {
        table.add_row(vec![
            Cell::new(label).add_attribute(Attribute::Dim),
            value.map_or_else(
                || Cell::new(NOT_AVAILABLE).add_attribute(Attribute::Dim),
                Cell::new,
            ),
        ]);
    }
    table
}

pub fn build_comparison_table(
    bill: &BillRecord,
    offer: &OfferRecord,
    comparison: &Comparison,
) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        Cell::new(""),
        Cell::new(&bill.current_supplier).add_attribute(Attribute::Bold),
        Cell::new(&offer.name).add_attribute(Attribute::Bold).fg(Color::Cyan),
    ]);

    if let Some(quote) = comparison.quote {
        table.add_row(vec![
            Cell::new(format!("Valore {} aggiornato", quote.index)),
            Cell::new(""),
            Cell::new(quote).set_alignment(CellAlignment::Right),
        ]);
    }
    table.add_row(vec![
        Cell::new(if offer.pricing == PricingKind::Indexed {
            "Contributo al consumo (spread)"
        } else {
            "Costo materia prima"
        }),
        Cell::new(bill.tariff.unit_price().unwrap_or(NOT_AVAILABLE))
            .set_alignment(CellAlignment::Right),
        Cell::new(&offer.unit_price).set_alignment(CellAlignment::Right),
    ]);
    // An unparseable offer fee is shown as written.
    let (fee_label, offer_fee) = if comparison.offer_fixed_fee > Euros::ZERO {
        (fixed_fee_label(comparison.period), ItalianEuros(comparison.offer_fixed_fee).to_string())
    } else {
        (UNNORMALISED_FEE_LABEL.to_owned(), offer.fixed_fee.clone())
    };
    table.add_row(vec![
        Cell::new(fee_label),
        Cell::new(bill.tariff.fixed_fee().unwrap_or(NOT_AVAILABLE))
            .set_alignment(CellAlignment::Right),
        Cell::new(offer_fee).set_alignment(CellAlignment::Right),
    ]);

    let offer_total = comparison.offer.map(|offer| offer.total());
    let (current_color, offer_color) = match comparison.savings.verdict {
        Verdict::Savings => (Color::Red, Color::Green),
        Verdict::Loss => (Color::Green, Color::Red),
        Verdict::Neutral => (Color::Reset, Color::Reset),
    };
    table.add_row(vec![
        Cell::new("Costo totale stimato").add_attribute(Attribute::Bold),
        Cell::new(ItalianEuros(comparison.current.total()))
            .set_alignment(CellAlignment::Right)
            .add_attribute(Attribute::Bold)
            .fg(current_color),
        offer_total
            .map_or_else(
                || Cell::new(NOT_AVAILABLE).add_attribute(Attribute::Dim),
                |total| Cell::new(ItalianEuros(total)).add_attribute(Attribute::Bold),
            )
            .set_alignment(CellAlignment::Right)
            .fg(offer_color),
    ]);
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::{
            estimate::CostEstimate,
            index::{MarketIndex, MarketIndexQuote},
            savings::Savings,
        },
        quantity::{consumption::Consumption, months::Months, price::UnitPrice},
    };

    fn bill() -> BillRecord {
        BillRecord {
            customer_name: None,
            current_supplier: "Enel Energia".to_owned(),
            supply_address: None,
            meter_id: None,
            billing_period: None,
            billed_consumption: "200 kWh".to_owned(),
            annual_consumption: "1800 kWh".to_owned(),
            usage_category: None,
            tariff: SupplyTariff::Electricity {
                unit_price: "0,15 €/kWh".to_owned(),
                total_cost: None,
                fixed_fee: "24,00 €".to_owned(),
                available_power: None,
                voltage: None,
            },
        }
    }

    #[test]
    fn test_build_bill_table() {
        let rendered = build_bill_table(&bill()).force_no_tty().to_string();
        assert!(rendered.contains("Enel Energia"), "{rendered}");
        assert!(rendered.contains("Luce"), "{rendered}");
        assert!(rendered.contains("1800 kWh"), "{rendered}");
        assert!(rendered.contains(NOT_AVAILABLE), "{rendered}");
    }

    #[test]
    fn test_build_comparison_table() {
        let bill = bill();
        let offer = OfferRecord {
            name: "Luce Facile".to_owned(),
            unit_price: "0,02 €/kWh".to_owned(),
            fixed_fee: "144 €/anno".to_owned(),
            pricing: PricingKind::Indexed,
        };
        let current = CostEstimate {
            unit_price: UnitPrice(0.15),
            consumption: Consumption(200.0),
            fixed_fee: Euros(24.0),
        };
        let comparison = Comparison {
            period: Months(2),
            current,
            offer: None,
            offer_fixed_fee: Euros(24.0),
            quote: Some(MarketIndexQuote { index: MarketIndex::Pun, price: UnitPrice(0.11) }),
            index_error: None,
            savings: Savings::UNKNOWN,
        };

        let rendered = build_comparison_table(&bill, &offer, &comparison).force_no_tty().to_string();
        assert!(rendered.contains("Valore PUN aggiornato"), "{rendered}");
        assert!(rendered.contains("0.11000 €/kWh"), "{rendered}");
        assert!(rendered.contains("Quota fissa (per 2 mesi)"), "{rendered}");
        assert!(rendered.contains("Contributo al consumo (spread)"), "{rendered}");
        assert!(rendered.contains("54,00 €"), "{rendered}");
        assert!(rendered.contains(NOT_AVAILABLE), "{rendered}");
    }

    #[test]
    fn test_build_comparison_table_unparseable_fee() {
        let offer = OfferRecord {
            name: "Gas Semplice".to_owned(),
            unit_price: "0,40 €/Smc".to_owned(),
            fixed_fee: "inclusa".to_owned(),
            pricing: PricingKind::Fixed,
        };
        let estimate = CostEstimate {
            unit_price: UnitPrice(0.4),
            consumption: Consumption(50.0),
            fixed_fee: Euros::ZERO,
        };
        let comparison = Comparison {
            period: Months(2),
            current: estimate,
            offer: Some(estimate),
            offer_fixed_fee: Euros::ZERO,
            quote: None,
            index_error: None,
            savings: Savings::compute(estimate.total(), Some(estimate.total())),
        };

        let rendered = build_comparison_table(&bill(), &offer, &comparison).force_no_tty().to_string();
        assert!(rendered.contains(UNNORMALISED_FEE_LABEL), "{rendered}");
        assert!(rendered.contains("inclusa"), "{rendered}");
        assert!(!rendered.contains("Quota fissa (per"), "{rendered}");
    }
}
