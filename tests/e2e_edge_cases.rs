//! End-to-end tests for tolerated data defects and the fatal missing-input case.
//!
//! Dangling references, unknown country names, NaN and non-numeric cells,
//! duplicate keys, asymmetric trade pairs, and missing table files.

mod common;

use pretty_assertions::assert_eq;
use procure_kg::{BuilderConfig, Error, KnowledgeGraphBuilder, NodeAttrs, NodeType, Relation};

use common::{build_fixture, write_tables};

// ============================================================================
// 1. Dangling sourcing link is dropped, not raised
// ============================================================================

#[test]
fn test_sourcing_link_to_missing_component() {
    let links = "\
supplier_id,component_id,is_primary,unit_price_usd
SUP-0001,CMP-0001,1,1.40
SUP-0002,CMP-9999,0,1.55
SUP-9999,CMP-0002,0,2.00
";
    let builder = build_fixture(&[("sourcing_links", links)]);
    let graph = builder.graph();

    assert_eq!(graph.edge_count_of(Relation::Supplies), 1);
    assert_eq!(builder.edge_report().dropped(Relation::Supplies), 2);
    // Neither dangling supplier pair can form a co_supplier edge
    assert_eq!(graph.edge_count_of(Relation::CoSupplier), 0);
}

#[test]
fn test_co_supplier_pair_with_unknown_supplier_is_dropped() {
    let links = "\
supplier_id,component_id,is_primary,unit_price_usd
SUP-0001,CMP-0001,1,1.40
SUP-4040,CMP-0001,0,1.55
";
    let builder = build_fixture(&[("sourcing_links", links)]);
    assert_eq!(builder.graph().edge_count_of(Relation::CoSupplier), 0);
    assert_eq!(builder.edge_report().dropped(Relation::CoSupplier), 1);
}

// ============================================================================
// 2. Unknown country names
// ============================================================================

#[test]
fn test_supplier_in_unknown_country_has_no_located_in() {
    let suppliers = "\
supplier_id,name,category,country,annual_spend_usd,risk_tier
SUP-0001,Acme Corp,Electronics,China,1000,Low
SUP-0002,Bolt Ltd,Mechanical,Atlantis,2000,Medium
";
    let builder = build_fixture(&[("suppliers", suppliers)]);
    let graph = builder.graph();

    assert_eq!(graph.edge_count_of(Relation::LocatedIn), 1);
    let bolt = graph.resolve(NodeType::Supplier, "SUP-0002").unwrap();
    assert!(graph.outgoing(bolt, Some(Relation::LocatedIn)).is_empty());
}

#[test]
fn test_route_edges_gated_independently() {
    let routes = "\
route_id,origin_country,destination_country,component_id,transport_mode,transit_days
RTE-0001,Atlantis,Germany,CMP-0001,Air,3
RTE-0002,China,Germany,CMP-7777,Sea,30
";
    let builder = build_fixture(&[("routes", routes)]);
    let graph = builder.graph();

    let r1 = graph.resolve(NodeType::Route, "RTE-0001").unwrap();
    let r2 = graph.resolve(NodeType::Route, "RTE-0002").unwrap();

    let rels = |r: procure_kg::NodeRef| {
        graph
            .outgoing(r, None)
            .iter()
            .map(|e| e.relation)
            .collect::<Vec<_>>()
    };
    assert_eq!(rels(r1), vec![Relation::DeliversTo, Relation::Carries]);
    assert_eq!(rels(r2), vec![Relation::OriginatesIn, Relation::DeliversTo]);

    // Only the fully-resolved route contributes a trade pair
    assert_eq!(graph.edge_count_of(Relation::TradesWith), 1);
    assert_eq!(builder.edge_report().dropped(Relation::TradesWith), 1);
}

// ============================================================================
// 3. trades_with keeps both directions when both are observed
// ============================================================================

#[test]
fn test_trades_with_not_deduplicated_against_reverse() {
    let routes = "\
route_id,origin_country,destination_country,component_id,transport_mode
RTE-0001,China,Germany,CMP-0001,Sea
RTE-0002,Germany,China,CMP-0002,Sea
RTE-0003,China,Germany,CMP-0002,Rail
";
    let builder = build_fixture(&[("routes", routes)]);
    let graph = builder.graph();

    let china = graph.resolve(NodeType::Country, "COU-CHI").unwrap();
    let germany = graph.resolve(NodeType::Country, "COU-GER").unwrap();

    assert_eq!(graph.edge_count_of(Relation::TradesWith), 2);
    assert_eq!(graph.edges_between(Relation::TradesWith, china.index, germany.index).len(), 1);
    assert_eq!(graph.edges_between(Relation::TradesWith, germany.index, china.index).len(), 1);

    let order: Vec<_> = graph.edges_of(Relation::TradesWith).map(|e| (e.src, e.dst)).collect();
    assert_eq!(order, vec![(china, germany), (germany, china)]);
}

// ============================================================================
// 4. Missing, NaN and non-numeric feature cells coerce to zero
// ============================================================================

#[test]
fn test_bad_numeric_cells_coerce() {
    let countries = "\
country_id,name,geopolitical_risk,avg_tariff_rate,logistics_index
COU-CHI,China,NaN,0.1,
COU-GER,Germany,high,0.3,4.0
COU-IND,India,0.4,abc,2.0
";
    let builder = build_fixture(&[("countries", countries)]);
    let graph = builder.graph();

    let india = graph.node_by_key(NodeType::Country, "COU-IND").unwrap();
    match &india.attrs {
        NodeAttrs::Country(c) => {
            assert_eq!(c.geopolitical_risk, 0.4);
            assert_eq!(c.avg_tariff_rate, 0.0);
            assert_eq!(c.logistics_index, 2.0);
            // Column absent from the table
            assert_eq!(c.trade_agreements, 0.0);
        }
        other => panic!("unexpected attrs {other:?}"),
    }

    let m = &builder.features()[&NodeType::Country];
    assert_eq!(m.column("geopolitical_risk").unwrap(), vec![0.0, 0.0, 1.0]);
    assert_eq!(m.column("logistics_index").unwrap(), vec![0.0, 1.0, 0.5]);
    assert_eq!(m.column("trade_agreements").unwrap(), vec![0.0, 0.0, 0.0]);
}

// ============================================================================
// 5. Duplicate natural keys overwrite without a new index
// ============================================================================

#[test]
fn test_duplicate_supplier_key() {
    let suppliers = "\
supplier_id,name,category,country,annual_spend_usd,risk_tier
SUP-0001,Acme Corp,Electronics,China,1000,Low
SUP-0002,Bolt Ltd,Mechanical,Germany,2000,Medium
SUP-0001,Acme Renamed,Electronics,Germany,5000,High
";
    let builder = build_fixture(&[("suppliers", suppliers)]);
    let graph = builder.graph();

    assert_eq!(graph.node_count_of(NodeType::Supplier), 2);
    let acme = graph.node_by_key(NodeType::Supplier, "SUP-0001").unwrap();
    assert_eq!(acme.index, 0);
    assert_eq!(acme.label, "Acme Renamed");
    assert_eq!(builder.features()[&NodeType::Supplier].shape(), (2, 12));

    // located_in follows table rows, so the repeated row adds a second edge
    assert_eq!(graph.outgoing(acme.node_ref(), Some(Relation::LocatedIn)).len(), 2);
}

// ============================================================================
// 6. Header-only tables
// ============================================================================

#[test]
fn test_empty_contracts_table() {
    let contracts = "contract_id,supplier_id,primary_component_id,status,payment_terms\n";
    let builder = build_fixture(&[("contracts", contracts)]);

    assert_eq!(builder.graph().node_count_of(NodeType::Contract), 0);
    assert_eq!(builder.graph().edge_count_of(Relation::Covers), 0);
    assert!(!builder.features().contains_key(&NodeType::Contract));
    assert_eq!(builder.stats().n_nodes[&NodeType::Contract], 0);
}

// ============================================================================
// 7. A missing table aborts the build
// ============================================================================

#[test]
fn test_missing_table_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    write_tables(dir.path(), &[]);
    std::fs::remove_file(dir.path().join("routes.csv")).unwrap();

    let config = BuilderConfig::default()
        .with_data_dir(dir.path())
        .with_output_dir(dir.path().join("out"));
    let mut builder = KnowledgeGraphBuilder::new(config);
    let err = builder.build().err().unwrap();

    match &err {
        Error::MissingInput { path, .. } => assert!(path.ends_with("routes.csv")),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.to_string().contains("python -m src.data.generator"));
    assert_eq!(builder.graph().node_count(), 0);
    assert!(!dir.path().join("out").exists());
}
