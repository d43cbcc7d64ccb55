//! Shared CSV fixtures: a tiny procurement dataset written into a temp dir.
//!
//! 3 suppliers, 2 components, 2 countries, 1 contract, 1 route and 4
//! sourcing links. SUP-0001 and SUP-0002 share CMP-0001; the SUP-0003 →
//! CMP-0002 link appears twice.

#![allow(dead_code)]

use std::path::Path;

use procure_kg::{BuilderConfig, KnowledgeGraphBuilder};

pub const SUPPLIERS: &str = "\
supplier_id,name,category,country,annual_spend_usd,on_time_delivery,quality_score,lead_time_days,defect_rate_ppm,financial_risk_score,sustainability_score,years_active,is_sole_source,is_preferred,headcount,revenue_usd_M,risk_tier
SUP-0001,Acme Corp,Electronics,China,1000,0.9,0.95,10,100,0.1,0.5,5,0,1,100,10.5,Low
SUP-0002,Bolt Ltd,Mechanical,Germany,2000,0.8,0.85,20,200,0.2,0.6,10,1,0,200,20.0,Medium
SUP-0003,Core Inc,Electronics,China,3000,0.7,0.75,30,300,0.3,0.7,15,0,0,300,30.0,High
";

pub const COMPONENTS: &str = "\
component_id,part_number,description,category,unit_cost_usd,annual_volume,criticality,lead_time_weeks,inventory_days,weight_kg,is_custom
CMP-0001,RES-10001,Resistor,Electronics,1.5,1000,High,4,30,0.01,0
CMP-0002,BRG-20002,Bearing,Mechanical,12.0,500,Critical,8,60,0.5,1
";

pub const COUNTRIES: &str = "\
country_id,name,geopolitical_risk,avg_tariff_rate,logistics_index,currency_volatility,labor_cost_index,trade_agreements
COU-CHI,China,0.5,0.1,3.6,0.05,0.3,20
COU-GER,Germany,0.1,0.02,4.1,0.02,0.9,45
";

pub const CONTRACTS: &str = "\
contract_id,supplier_id,primary_component_id,start_date,end_date,duration_days,value_usd,payment_terms,status,is_active,auto_renew,savings_realized_usd,sla_penalty_usd,negotiation_rounds,has_rebate
CON-0001,SUP-0001,CMP-0001,2024-01-01,2025-01-01,360,50000,Net 30,Active,1,0,2500,1000,3,1
";

pub const ROUTES: &str = "\
route_id,origin_country,destination_country,component_id,transport_mode,transit_days,cost_per_kg_usd,reliability_score,carbon_kg_per_ton,is_active,customs_delay_days
RTE-0001,China,Germany,CMP-0001,Sea,30,1.2,0.9,15.5,1,2
";

pub const SOURCING_LINKS: &str = "\
supplier_id,component_id,is_primary,unit_price_usd,share_pct
SUP-0001,CMP-0001,1,1.40,60.0
SUP-0002,CMP-0001,0,1.55,40.0
SUP-0003,CMP-0002,1,11.0,80.0
SUP-0003,CMP-0002,0,11.5,20.0
";

/// Write the six fixture tables into `dir`, replacing any table named in
/// `overrides` with the given CSV text.
pub fn write_tables(dir: &Path, overrides: &[(&str, &str)]) {
    let defaults = [
        ("suppliers", SUPPLIERS),
        ("components", COMPONENTS),
        ("countries", COUNTRIES),
        ("contracts", CONTRACTS),
        ("routes", ROUTES),
        ("sourcing_links", SOURCING_LINKS),
    ];
    for (name, body) in defaults {
        let body = overrides
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, b)| *b)
            .unwrap_or(body);
        std::fs::write(dir.join(format!("{name}.csv")), body).unwrap();
    }
}

/// Build in memory from the fixture (plus overrides).
pub fn build_fixture(overrides: &[(&str, &str)]) -> KnowledgeGraphBuilder {
    let dir = tempfile::tempdir().unwrap();
    write_tables(dir.path(), overrides);
    let config = BuilderConfig::default().with_data_dir(dir.path());
    let mut builder = KnowledgeGraphBuilder::new(config);
    builder.build_in_memory().unwrap();
    builder
}
