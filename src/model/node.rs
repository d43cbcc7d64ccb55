//! Node types and typed node attribute records.

use std::fmt;

use serde::{Deserialize, Serialize};
use super::{PropertyMap, Value};

/// Discriminator for a node's feature schema and index space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeType {
    Supplier,
    Component,
    Country,
    Contract,
    Route,
}

impl NodeType {
    /// Node materialization order. Also the order of every per-type report.
    pub const ALL: [NodeType; 5] = [
        NodeType::Supplier,
        NodeType::Component,
        NodeType::Country,
        NodeType::Contract,
        NodeType::Route,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NodeType::Supplier => "supplier",
            NodeType::Component => "component",
            NodeType::Country => "country",
            NodeType::Contract => "contract",
            NodeType::Route => "route",
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Position of a node inside its type's dense index range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeRef {
    pub node_type: NodeType,
    pub index: usize,
}

impl NodeRef {
    pub fn new(node_type: NodeType, index: usize) -> Self {
        Self { node_type, index }
    }
}

impl fmt::Display for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.node_type, self.index)
    }
}

// ============================================================================
// Per-type attribute records
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SupplierAttrs {
    pub country: String,
    pub category: String,
    pub risk_tier: String,
    pub annual_spend_usd: f64,
    pub on_time_delivery: f64,
    pub quality_score: f64,
    pub lead_time_days: f64,
    pub defect_rate_ppm: f64,
    pub financial_risk_score: f64,
    pub sustainability_score: f64,
    pub years_active: f64,
    pub is_sole_source: f64,
    pub is_preferred: f64,
    pub headcount: f64,
    pub revenue_usd_m: f64,
}

impl SupplierAttrs {
    pub const FEATURES: &'static [&'static str] = &[
        "annual_spend_usd", "on_time_delivery", "quality_score", "lead_time_days",
        "defect_rate_ppm", "financial_risk_score", "sustainability_score", "years_active",
        "is_sole_source", "is_preferred", "headcount", "revenue_usd_M",
    ];

    pub fn features(&self) -> Vec<f64> {
        vec![
            self.annual_spend_usd, self.on_time_delivery, self.quality_score,
            self.lead_time_days, self.defect_rate_ppm, self.financial_risk_score,
            self.sustainability_score, self.years_active, self.is_sole_source,
            self.is_preferred, self.headcount, self.revenue_usd_m,
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentAttrs {
    pub category: String,
    pub criticality: String,
    pub unit_cost_usd: f64,
    pub annual_volume: f64,
    pub lead_time_weeks: f64,
    pub inventory_days: f64,
    pub weight_kg: f64,
    pub is_custom: f64,
    /// Ordinal of `criticality`; derived, never read from the table.
    pub criticality_encoded: f64,
}

impl ComponentAttrs {
    pub const FEATURES: &'static [&'static str] = &[
        "unit_cost_usd", "annual_volume", "lead_time_weeks", "inventory_days",
        "weight_kg", "is_custom", "criticality_encoded",
    ];

    pub fn features(&self) -> Vec<f64> {
        vec![
            self.unit_cost_usd, self.annual_volume, self.lead_time_weeks,
            self.inventory_days, self.weight_kg, self.is_custom, self.criticality_encoded,
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CountryAttrs {
    pub geopolitical_risk: f64,
    pub avg_tariff_rate: f64,
    pub logistics_index: f64,
    pub currency_volatility: f64,
    pub labor_cost_index: f64,
    pub trade_agreements: f64,
}

impl CountryAttrs {
    pub const FEATURES: &'static [&'static str] = &[
        "geopolitical_risk", "avg_tariff_rate", "logistics_index",
        "currency_volatility", "labor_cost_index", "trade_agreements",
    ];

    pub fn features(&self) -> Vec<f64> {
        vec![
            self.geopolitical_risk, self.avg_tariff_rate, self.logistics_index,
            self.currency_volatility, self.labor_cost_index, self.trade_agreements,
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContractAttrs {
    pub status: String,
    pub payment_terms: String,
    pub value_usd: f64,
    pub savings_realized_usd: f64,
    pub sla_penalty_usd: f64,
    pub negotiation_rounds: f64,
    pub duration_days: f64,
    pub is_active: f64,
    pub auto_renew: f64,
    pub has_rebate: f64,
}

impl ContractAttrs {
    pub const FEATURES: &'static [&'static str] = &[
        "value_usd", "savings_realized_usd", "sla_penalty_usd", "negotiation_rounds",
        "duration_days", "is_active", "auto_renew", "has_rebate",
    ];

    pub fn features(&self) -> Vec<f64> {
        vec![
            self.value_usd, self.savings_realized_usd, self.sla_penalty_usd,
            self.negotiation_rounds, self.duration_days, self.is_active,
            self.auto_renew, self.has_rebate,
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteAttrs {
    pub transport_mode: String,
    pub transit_days: f64,
    pub cost_per_kg_usd: f64,
    pub reliability_score: f64,
    pub carbon_kg_per_ton: f64,
    pub is_active: f64,
    pub customs_delay_days: f64,
}

impl RouteAttrs {
    pub const FEATURES: &'static [&'static str] = &[
        "transit_days", "cost_per_kg_usd", "reliability_score",
        "carbon_kg_per_ton", "is_active", "customs_delay_days",
    ];

    pub fn features(&self) -> Vec<f64> {
        vec![
            self.transit_days, self.cost_per_kg_usd, self.reliability_score,
            self.carbon_kg_per_ton, self.is_active, self.customs_delay_days,
        ]
    }
}

/// Attribute record of a node, one variant per node type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "node_type", rename_all = "snake_case")]
pub enum NodeAttrs {
    Supplier(SupplierAttrs),
    Component(ComponentAttrs),
    Country(CountryAttrs),
    Contract(ContractAttrs),
    Route(RouteAttrs),
}

impl NodeAttrs {
    pub fn node_type(&self) -> NodeType {
        match self {
            NodeAttrs::Supplier(_) => NodeType::Supplier,
            NodeAttrs::Component(_) => NodeType::Component,
            NodeAttrs::Country(_) => NodeType::Country,
            NodeAttrs::Contract(_) => NodeType::Contract,
            NodeAttrs::Route(_) => NodeType::Route,
        }
    }

    /// Declared feature names, in column order.
    pub fn feature_names(node_type: NodeType) -> &'static [&'static str] {
        match node_type {
            NodeType::Supplier => SupplierAttrs::FEATURES,
            NodeType::Component => ComponentAttrs::FEATURES,
            NodeType::Country => CountryAttrs::FEATURES,
            NodeType::Contract => ContractAttrs::FEATURES,
            NodeType::Route => RouteAttrs::FEATURES,
        }
    }

    /// Raw (unnormalized) feature vector, aligned with `feature_names`.
    pub fn features(&self) -> Vec<f64> {
        match self {
            NodeAttrs::Supplier(a) => a.features(),
            NodeAttrs::Component(a) => a.features(),
            NodeAttrs::Country(a) => a.features(),
            NodeAttrs::Contract(a) => a.features(),
            NodeAttrs::Route(a) => a.features(),
        }
    }

    /// Categorical passthrough attributes.
    pub fn categorical(&self) -> Vec<(&'static str, &str)> {
        match self {
            NodeAttrs::Supplier(a) => vec![
                ("country", a.country.as_str()),
                ("category", a.category.as_str()),
                ("risk_tier", a.risk_tier.as_str()),
            ],
            NodeAttrs::Component(a) => vec![
                ("category", a.category.as_str()),
                ("criticality", a.criticality.as_str()),
            ],
            NodeAttrs::Country(_) => Vec::new(),
            NodeAttrs::Contract(a) => vec![
                ("status", a.status.as_str()),
                ("payment_terms", a.payment_terms.as_str()),
            ],
            NodeAttrs::Route(a) => vec![("transport_mode", a.transport_mode.as_str())],
        }
    }
}

// ============================================================================
// Node
// ============================================================================

/// A node in the procurement graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Natural key (e.g. `SUP-0001`), unique within the node type.
    pub key: String,
    /// Dense per-type index, fixed at creation.
    pub index: usize,
    pub label: String,
    pub attrs: NodeAttrs,
}

impl Node {
    pub fn node_type(&self) -> NodeType {
        self.attrs.node_type()
    }

    pub fn node_ref(&self) -> NodeRef {
        NodeRef::new(self.node_type(), self.index)
    }

    /// Flatten into an ordered attribute bag:
    /// `node_type`, `label`, categorical fields, then declared features.
    pub fn properties(&self) -> PropertyMap {
        let mut props = PropertyMap::new();
        props.insert("node_type".into(), Value::from(self.node_type().as_str()));
        props.insert("label".into(), Value::from(self.label.as_str()));
        for (name, value) in self.attrs.categorical() {
            props.insert(name.into(), Value::from(value));
        }
        let names = NodeAttrs::feature_names(self.node_type());
        for (name, value) in names.iter().zip(self.attrs.features()) {
            props.insert((*name).into(), Value::Float(value));
        }
        props
    }
}
