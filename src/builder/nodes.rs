//! Node materialization: one typed node per entity-table row.
//!
//! Processing order is fixed (supplier, component, country, contract,
//! route) and rows are read in file order, so the n-th distinct key of a
//! table receives index n-1. A repeated key overwrites the earlier node's
//! attributes without consuming a new index.

use tracing::info;

use crate::graph::KnowledgeGraph;
use crate::loader::{Row, Tables};
use crate::model::*;
use crate::schema::Schema;

/// Insert every entity row of `tables` as a node.
pub(crate) fn materialize_nodes(graph: &mut KnowledgeGraph, tables: &Tables, schema: &Schema) {
    for row in tables.suppliers.rows() {
        graph.upsert_node(row.text("supplier_id"), row.text("name"), supplier_attrs(&row));
    }
    log_count(graph, NodeType::Supplier);

    for row in tables.components.rows() {
        graph.upsert_node(
            row.text("component_id"),
            row.text("part_number"),
            component_attrs(&row, schema),
        );
    }
    log_count(graph, NodeType::Component);

    for row in tables.countries.rows() {
        let key = row.text("country_id");
        let name = row.text("name");
        graph.upsert_node(key, name, country_attrs(&row));
        graph.record_country_name(name, key);
    }
    log_count(graph, NodeType::Country);

    for row in tables.contracts.rows() {
        let key = row.text("contract_id");
        graph.upsert_node(key, key, contract_attrs(&row));
    }
    log_count(graph, NodeType::Contract);

    for row in tables.routes.rows() {
        let label = format!("{} -> {}", row.text("origin_country"), row.text("destination_country"));
        graph.upsert_node(row.text("route_id"), label, route_attrs(&row));
    }
    log_count(graph, NodeType::Route);
}

fn log_count(graph: &KnowledgeGraph, node_type: NodeType) {
    info!("  + {} {} nodes", graph.node_count_of(node_type), node_type);
}

fn supplier_attrs(row: &Row<'_>) -> NodeAttrs {
    NodeAttrs::Supplier(SupplierAttrs {
        country: row.text("country").to_string(),
        category: row.text("category").to_string(),
        risk_tier: row.text("risk_tier").to_string(),
        annual_spend_usd: row.float("annual_spend_usd"),
        on_time_delivery: row.float("on_time_delivery"),
        quality_score: row.float("quality_score"),
        lead_time_days: row.float("lead_time_days"),
        defect_rate_ppm: row.float("defect_rate_ppm"),
        financial_risk_score: row.float("financial_risk_score"),
        sustainability_score: row.float("sustainability_score"),
        years_active: row.float("years_active"),
        is_sole_source: row.float("is_sole_source"),
        is_preferred: row.float("is_preferred"),
        headcount: row.float("headcount"),
        revenue_usd_m: row.float("revenue_usd_M"),
    })
}

fn component_attrs(row: &Row<'_>, schema: &Schema) -> NodeAttrs {
    let criticality = row.get("criticality").unwrap_or("Low");
    NodeAttrs::Component(ComponentAttrs {
        category: row.text("category").to_string(),
        criticality: criticality.to_string(),
        unit_cost_usd: row.float("unit_cost_usd"),
        annual_volume: row.float("annual_volume"),
        lead_time_weeks: row.float("lead_time_weeks"),
        inventory_days: row.float("inventory_days"),
        weight_kg: row.float("weight_kg"),
        is_custom: row.float("is_custom"),
        criticality_encoded: f64::from(schema.encode_criticality(criticality)),
    })
}

fn country_attrs(row: &Row<'_>) -> NodeAttrs {
    NodeAttrs::Country(CountryAttrs {
        geopolitical_risk: row.float("geopolitical_risk"),
        avg_tariff_rate: row.float("avg_tariff_rate"),
        logistics_index: row.float("logistics_index"),
        currency_volatility: row.float("currency_volatility"),
        labor_cost_index: row.float("labor_cost_index"),
        trade_agreements: row.float("trade_agreements"),
    })
}

fn contract_attrs(row: &Row<'_>) -> NodeAttrs {
    NodeAttrs::Contract(ContractAttrs {
        status: row.text("status").to_string(),
        payment_terms: row.text("payment_terms").to_string(),
        value_usd: row.float("value_usd"),
        savings_realized_usd: row.float("savings_realized_usd"),
        sla_penalty_usd: row.float("sla_penalty_usd"),
        negotiation_rounds: row.float("negotiation_rounds"),
        duration_days: row.float("duration_days"),
        is_active: row.float("is_active"),
        auto_renew: row.float("auto_renew"),
        has_rebate: row.float("has_rebate"),
    })
}

fn route_attrs(row: &Row<'_>) -> NodeAttrs {
    NodeAttrs::Route(RouteAttrs {
        transport_mode: row.text("transport_mode").to_string(),
        transit_days: row.float("transit_days"),
        cost_per_kg_usd: row.float("cost_per_kg_usd"),
        reliability_score: row.float("reliability_score"),
        carbon_kg_per_ton: row.float("carbon_kg_per_ton"),
        is_active: row.float("is_active"),
        customs_delay_days: row.float("customs_delay_days"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::Table;

    #[test]
    fn test_component_criticality_encoding() {
        let csv = "component_id,part_number,criticality,unit_cost_usd\n\
                   CMP-0001,RES-1,Critical,2.5\n\
                   CMP-0002,RES-2,Bogus,NaN\n\
                   CMP-0003,RES-3,High,\n";
        let table = Table::from_reader("components", csv.as_bytes()).unwrap();
        let schema = Schema::procurement();
        let encoded: Vec<(f64, f64)> = table
            .rows()
            .map(|row| match component_attrs(&row, &schema) {
                NodeAttrs::Component(c) => (c.criticality_encoded, c.unit_cost_usd),
                other => panic!("unexpected attrs {other:?}"),
            })
            .collect();
        assert_eq!(encoded, vec![(3.0, 2.5), (0.0, 0.0), (2.0, 0.0)]);
    }

    #[test]
    fn test_missing_criticality_column_defaults_to_low() {
        let csv = "component_id,part_number\nCMP-0001,RES-1\n";
        let table = Table::from_reader("components", csv.as_bytes()).unwrap();
        let row = table.rows().next().unwrap();
        match component_attrs(&row, &Schema::procurement()) {
            NodeAttrs::Component(c) => {
                assert_eq!(c.criticality, "Low");
                assert_eq!(c.criticality_encoded, 0.0);
            }
            other => panic!("unexpected attrs {other:?}"),
        }
    }
}
