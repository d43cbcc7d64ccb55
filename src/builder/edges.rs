//! Edge materialization: explicit relations from join tables, then the two
//! derived relations.
//!
//! An edge is added only when both endpoints already exist. Dangling
//! references are never errors: they are dropped, counted per relation, and
//! reported in the phase's log line.

use indexmap::{IndexMap, IndexSet};
use tracing::info;

use crate::graph::KnowledgeGraph;
use crate::loader::Tables;
use crate::model::*;

/// Added and dropped edge counts per relation for one build.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EdgeReport {
    pub added: IndexMap<Relation, usize>,
    pub dropped: IndexMap<Relation, usize>,
}

impl EdgeReport {
    fn record(&mut self, relation: Relation, added: Option<EdgeId>) {
        let slot = if added.is_some() { &mut self.added } else { &mut self.dropped };
        *slot.entry(relation).or_default() += 1;
    }

    fn drop_one(&mut self, relation: Relation) {
        *self.dropped.entry(relation).or_default() += 1;
    }

    pub fn added(&self, relation: Relation) -> usize {
        self.added.get(&relation).copied().unwrap_or(0)
    }

    pub fn dropped(&self, relation: Relation) -> usize {
        self.dropped.get(&relation).copied().unwrap_or(0)
    }

    pub fn total_dropped(&self) -> usize {
        self.dropped.values().sum()
    }
}

/// Insert all explicit and derived edges.
pub(crate) fn materialize_edges(graph: &mut KnowledgeGraph, tables: &Tables) -> EdgeReport {
    let mut report = EdgeReport::default();

    // supplies: one per sourcing link
    for row in tables.sourcing_links.rows() {
        let src = graph.resolve(NodeType::Supplier, row.text("supplier_id"));
        let dst = graph.resolve(NodeType::Component, row.text("component_id"));
        let added = match (src, dst) {
            (Some(s), Some(c)) => {
                let attrs = EdgeAttrs::Supplies {
                    is_primary: row.flag("is_primary"),
                    unit_price_usd: row.float("unit_price_usd"),
                };
                graph.add_edge(Relation::Supplies, s, c, Some(attrs))
            }
            _ => None,
        };
        report.record(Relation::Supplies, added);
    }
    info!(
        "  + {} supplies edges ({} dropped)",
        report.added(Relation::Supplies),
        report.dropped(Relation::Supplies)
    );

    // located_in: supplier → country, resolved through the country name
    for row in tables.suppliers.rows() {
        let src = graph.resolve(NodeType::Supplier, row.text("supplier_id"));
        let dst = graph.resolve_country_name(row.text("country"));
        let added = link(graph, Relation::LocatedIn, src, dst);
        report.record(Relation::LocatedIn, added);
    }
    info!(
        "  + {} located_in edges ({} dropped)",
        report.added(Relation::LocatedIn),
        report.dropped(Relation::LocatedIn)
    );

    // covers / signed_with: two per contract
    for row in tables.contracts.rows() {
        let contract = graph.resolve(NodeType::Contract, row.text("contract_id"));
        let component = graph.resolve(NodeType::Component, row.text("primary_component_id"));
        let supplier = graph.resolve(NodeType::Supplier, row.text("supplier_id"));
        let added = link(graph, Relation::Covers, contract, component);
        report.record(Relation::Covers, added);
        let added = link(graph, Relation::SignedWith, contract, supplier);
        report.record(Relation::SignedWith, added);
    }
    info!(
        "  + {} covers | {} signed_with ({} | {} dropped)",
        report.added(Relation::Covers),
        report.added(Relation::SignedWith),
        report.dropped(Relation::Covers),
        report.dropped(Relation::SignedWith)
    );

    // originates_in / delivers_to / carries: each gated on its own endpoint
    for row in tables.routes.rows() {
        let route = graph.resolve(NodeType::Route, row.text("route_id"));
        let origin = graph.resolve_country_name(row.text("origin_country"));
        let destination = graph.resolve_country_name(row.text("destination_country"));
        let component = graph.resolve(NodeType::Component, row.text("component_id"));
        let added = link(graph, Relation::OriginatesIn, route, origin);
        report.record(Relation::OriginatesIn, added);
        let added = link(graph, Relation::DeliversTo, route, destination);
        report.record(Relation::DeliversTo, added);
        let added = link(graph, Relation::Carries, route, component);
        report.record(Relation::Carries, added);
    }
    info!(
        "  + {} originates_in | {} delivers_to | {} carries ({} dropped)",
        report.added(Relation::OriginatesIn),
        report.added(Relation::DeliversTo),
        report.added(Relation::Carries),
        report.dropped(Relation::OriginatesIn)
            + report.dropped(Relation::DeliversTo)
            + report.dropped(Relation::Carries)
    );

    derive_co_supplier(graph, tables, &mut report);
    derive_trades_with(graph, tables, &mut report);
    info!(
        "  + {} co_supplier | {} trades_with (derived, {} dropped)",
        report.added(Relation::CoSupplier),
        report.added(Relation::TradesWith),
        report.dropped(Relation::CoSupplier) + report.dropped(Relation::TradesWith)
    );

    report
}

fn link(
    graph: &mut KnowledgeGraph,
    relation: Relation,
    src: Option<NodeRef>,
    dst: Option<NodeRef>,
) -> Option<EdgeId> {
    match (src, dst) {
        (Some(s), Some(d)) => graph.add_edge(relation, s, d, None),
        _ => None,
    }
}

/// Any two distinct suppliers sourcing a common component are co-suppliers.
///
/// Pairs are unordered and deduplicated (sorted by key), so a pair sharing
/// several components is processed once. Each pair yields both directions.
fn derive_co_supplier(graph: &mut KnowledgeGraph, tables: &Tables, report: &mut EdgeReport) {
    let mut component_to_suppliers: IndexMap<&str, Vec<&str>> = IndexMap::new();
    for row in tables.sourcing_links.rows() {
        component_to_suppliers
            .entry(row.text("component_id"))
            .or_default()
            .push(row.text("supplier_id"));
    }

    let mut pairs: IndexSet<(&str, &str)> = IndexSet::new();
    for suppliers in component_to_suppliers.values() {
        for (i, a) in suppliers.iter().enumerate() {
            for b in &suppliers[i + 1..] {
                if a == b {
                    continue;
                }
                pairs.insert(if a < b { (*a, *b) } else { (*b, *a) });
            }
        }
    }

    for (a, b) in pairs {
        let src = graph.resolve(NodeType::Supplier, a);
        let dst = graph.resolve(NodeType::Supplier, b);
        match (src, dst) {
            (Some(s1), Some(s2)) => {
                let added = graph.add_edge(Relation::CoSupplier, s1, s2, None);
                report.record(Relation::CoSupplier, added);
                let added = graph.add_edge(Relation::CoSupplier, s2, s1, None);
                report.record(Relation::CoSupplier, added);
            }
            _ => report.drop_one(Relation::CoSupplier),
        }
    }
}

/// One edge per distinct (origin country, destination country) observed on
/// a route, in first-observed order. `(A, B)` and `(B, A)` are distinct
/// pairs and both become edges when both occur.
fn derive_trades_with(graph: &mut KnowledgeGraph, tables: &Tables, report: &mut EdgeReport) {
    let mut pairs: IndexSet<(NodeRef, NodeRef)> = IndexSet::new();
    for row in tables.routes.rows() {
        let origin = graph.resolve_country_name(row.text("origin_country"));
        let destination = graph.resolve_country_name(row.text("destination_country"));
        match (origin, destination) {
            (Some(o), Some(d)) => {
                pairs.insert((o, d));
            }
            _ => report.drop_one(Relation::TradesWith),
        }
    }

    for (o, d) in pairs {
        let added = graph.add_edge(Relation::TradesWith, o, d, None);
        report.record(Relation::TradesWith, added);
    }
}
