//! End-to-end: raw bytes -> normalized items -> selected -> planned document.

use slipgen_core::ItemId;
use slipgen_inventory::{ImportError, SelectionSpec, SourceKind, import};
use slipgen_layout::{
    CharBudgets, ItemsPerPage, LayoutConfig, LayoutWarning, SizeDomain, plan_document,
};

const FIVE_ROW_CSV: &str = "\
Product Name*,Product Type*,Quantity Received*,Barcode*,Vendor,Accepted Date
Blue Dream 3.5g,Flower,10,1A-001,C100 - Green Farms,2024-05-01
OG Kush 1g,Flower,4,1A-002,C100 - Green Farms,2024-05-01
Gummies 10pk,Edibles,20,1A-003,C200 - Sweet Labs,2024-05-02
Vape Cart 0.5g,Concentrates,8,1A-004,C300 - Cloud Co,2024-05-02
Pre-Roll 5pk,Pre-Roll,12,1A-005,,2024-05-03
";

const BAMBOO: &str = r#"{
  "from_license_number": "412345",
  "from_license_name": "Green Farms",
  "transferred_at": "2024-03-02T10:00:00Z",
  "inventory_transfer_items": [
    {"product_name": "Blue Dream 3.5g", "inventory_type": "Flower", "qty": 6,
     "inventory_id": "INV-1", "strain_name": "Blue Dream",
     "lab_result_data": {"potency": [{"type": "total-thc", "value": 22.4}]}},
    {"product_name": "Sour Diesel 1g", "inventory_type": "Flower", "qty": "unknown",
     "external_id": "EXT-2"},
    {"inventory_type": "Flower", "qty": 1}
  ]
}"#;

const CULTIVERA: &str = r#"{"data": {"manifest": {
  "from_license": {"name": "North Co", "license_number": 90210},
  "created_at": "2024-06-10T08:00:00Z",
  "packages": [
    {"category": "Edibles", "items": [
      {"id": "p-1", "quantity": 4, "product": {"name": "Gummies"}},
      {"barcode": "B-2", "quantity": 2, "product": {"name": "Chocolate Bar"}}
    ]},
    {"items": [
      {"barcode": "B-3", "quantity": 1, "product": {"name": "Tincture 30ml"}}
    ]}
  ]
}}}"#;

fn product_names(plan: &slipgen_layout::DocumentPlan) -> Vec<Vec<String>> {
    plan.context
        .pages
        .iter()
        .map(|p| p.slots.iter().map(|s| s.product_name.clone()).collect())
        .collect()
}

#[test]
fn five_csv_rows_at_four_per_page_make_two_pages() {
    let report = import(SourceKind::Csv, FIVE_ROW_CSV.as_bytes()).unwrap();
    assert!(report.is_clean());
    assert_eq!(report.items.len(), 5);

    let plan =
        plan_document(&report.items, &SelectionSpec::all(), &LayoutConfig::default()).unwrap();

    assert_eq!(plan.page_count(), 2);
    assert_eq!(
        product_names(&plan),
        vec![
            vec!["Blue Dream 3.5g", "OG Kush 1g", "Gummies 10pk", "Vape Cart 0.5g"],
            vec!["Pre-Roll 5pk", "", "", ""],
        ]
    );

    let last = &plan.context.pages[1].slots;
    assert!(!last[0].empty);
    assert_eq!(last[0].vendor, "Unknown Vendor");
    assert!(last[1..].iter().all(|s| s.empty && s.font_size.is_none()));

    let first = &plan.context.pages[0].slots[0];
    assert_eq!(first.vendor, "Green Farms");
    assert_eq!(first.accepted_date, "2024-05-01");
    assert_eq!(first.quantity_received, "10");
}

#[test]
fn bamboo_without_line_items_produces_nothing() {
    let err = import(
        SourceKind::Bamboo,
        br#"{"from_license_name": "Green Farms", "transferred_at": "2024-03-02"}"#,
    )
    .unwrap_err();

    let err = match err {
        ImportError::Normalization(err) => err,
        other => panic!("expected a normalization error, got {other:?}"),
    };
    assert!(err.is_batch_level());
    assert_eq!(err.field, "inventory_transfer_items");

    // No items means no pages, reported as a warning rather than an error.
    let plan = plan_document(&[], &SelectionSpec::all(), &LayoutConfig::default()).unwrap();
    assert_eq!(plan.page_count(), 0);
    assert_eq!(plan.warnings, vec![LayoutWarning::EmptySelection]);
}

#[test]
fn bamboo_batch_keeps_good_lines_and_flags_bad_ones() {
    let report = import(SourceKind::Bamboo, BAMBOO.as_bytes()).unwrap();

    assert_eq!(report.items.len(), 2);
    assert_eq!(report.rejected.len(), 1);
    assert_eq!(report.rejected[0].record_index(), Some(2));
    assert_eq!(report.warnings.len(), 1);

    let sour = &report.items[1];
    assert_eq!(sour.quantity(), 0.0);
    assert_eq!(sour.barcode(), "EXT-2");

    let config = LayoutConfig::default().with_items_per_page(ItemsPerPage::Two);
    let plan = plan_document(&report.items, &SelectionSpec::all(), &config).unwrap();
    assert_eq!(plan.page_count(), 1);

    let slot = &plan.context.pages[0].slots[0];
    assert_eq!(slot.thc_content, "22.4%");
    assert_eq!(slot.accepted_date, "2024-03-02");
    assert_eq!(slot.vendor, "Green Farms");
}

#[test]
fn cultivera_category_filter_and_explicit_picks() {
    let report = import(SourceKind::Cultivera, CULTIVERA.as_bytes()).unwrap();
    assert!(report.is_clean());

    let categories: Vec<&str> = report.items.iter().map(|i| i.category()).collect();
    assert_eq!(categories, vec!["Edibles", "Edibles", "uncategorized"]);

    let plan = plan_document(
        &report.items,
        &SelectionSpec::all().with_category("edibles"),
        &LayoutConfig::default().with_items_per_page(ItemsPerPage::Two),
    )
    .unwrap();
    assert_eq!(product_names(&plan), vec![vec!["Gummies", "Chocolate Bar"]]);

    // Explicit picks win over a search that matches nothing.
    let plan = plan_document(
        &report.items,
        &SelectionSpec::search("no such product")
            .with_explicit_ids([ItemId::positional("cultivera", 2)]),
        &LayoutConfig::default(),
    )
    .unwrap();
    assert_eq!(product_names(&plan), vec![vec!["Tincture 30ml", "", "", ""]]);
    assert_eq!(plan.context.pages[0].slots[0].vendor, "North Co");
}

#[test]
fn sixty_characters_in_a_twenty_character_slot_overflow() {
    let name = "Limited Edition Blue Dream Live Resin Cartridge 1g Sampler X";
    assert_eq!(name.chars().count(), 60);
    let csv = format!("Product Name,Quantity\n{name},1\n");
    let report = import(SourceKind::Csv, csv.as_bytes()).unwrap();

    let config = LayoutConfig {
        items_per_page: ItemsPerPage::Eight,
        char_budget_by_density: CharBudgets {
            two: 60,
            four: 40,
            six: 30,
            eight: 20,
        },
        ..LayoutConfig::default()
    };
    let plan = plan_document(&report.items, &SelectionSpec::all(), &config).unwrap();

    let slot = &plan.context.pages[0].slots[0];
    assert_eq!(slot.product_name, name);
    assert_eq!(slot.font_size, Some(SizeDomain::default().smallest().points()));
    assert!(slot.overflow);
    assert!(matches!(
        plan.warnings.as_slice(),
        [LayoutWarning::Overflow { longest_field: 60, .. }]
    ));
}

#[test]
fn potency_and_quantity_text_count_toward_the_slot_budget() {
    let csv = "Product Name,Vendor,Product Type,Quantity,Accepted Date,THC\n\
               Gum,Acme,Oil,1250000.75,2024-05-01,21.456789123\n";
    let report = import(SourceKind::Csv, csv.as_bytes()).unwrap();

    let config = LayoutConfig {
        char_budget_by_density: CharBudgets {
            two: 10,
            four: 10,
            six: 10,
            eight: 10,
        },
        ..LayoutConfig::default()
    };
    let plan = plan_document(&report.items, &SelectionSpec::all(), &config).unwrap();

    let slot = &plan.context.pages[0].slots[0];
    assert_eq!(slot.thc_content, "21.456789123%");
    assert_eq!(slot.quantity_received, "1250000.75");
    assert_eq!(slot.font_size, Some(8));
    assert!(!slot.overflow);
}

#[test]
fn rerunning_the_pipeline_is_bit_identical() {
    let run = || {
        let report = import(SourceKind::Csv, FIVE_ROW_CSV.as_bytes()).unwrap();
        let plan =
            plan_document(&report.items, &SelectionSpec::all(), &LayoutConfig::default()).unwrap();
        serde_json::to_string(&plan).unwrap()
    };
    assert_eq!(run(), run());
}
