//! Change-impact assessment over downstream chains

use super::types::{AffectedEntities, ImpactReport, RiskLevel, TraceChainEntry};
use serde_json::Value;
use std::collections::{BTreeSet, HashSet};

/// Attribute names checked when collecting responsible owners
const OWNER_KEYS: [&str; 4] = ["owner", "PM", "ownerId", "assigneeId"];

/// Attribute names summed into the effort estimate. Both spellings occur in
/// imported data and both are summed when present on the same entity.
const EFFORT_KEYS: [&str; 2] = ["estimated_hours", "estimatedHours"];

/// Unit suffix on the reported effort estimate (person-hours)
const EFFORT_UNIT: &str = "人时";

/// Classifies downstream chain entries into impact buckets by entity type.
///
/// The default sets carry the ADAS domain types; callers with a different
/// schema override them. A type belongs to at most one bucket; types
/// outside every set still count toward the impact score.
#[derive(Debug, Clone)]
pub struct ImpactClassifier {
    swr_types: HashSet<String>,
    module_types: HashSet<String>,
    package_types: HashSet<String>,
}

impl Default for ImpactClassifier {
    fn default() -> Self {
        Self {
            swr_types: HashSet::from(["SWR".to_string()]),
            module_types: HashSet::from(["PerceptionFusion".to_string()]),
            package_types: HashSet::from(["ReleasePackage".to_string()]),
        }
    }
}

impl ImpactClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the requirement-like bucket types
    pub fn with_swr_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.swr_types = types.into_iter().map(Into::into).collect();
        self
    }

    /// Override the module-like bucket types
    pub fn with_module_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.module_types = types.into_iter().map(Into::into).collect();
        self
    }

    /// Override the release-package bucket types
    pub fn with_package_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.package_types = types.into_iter().map(Into::into).collect();
        self
    }

    /// Assess the change impact of a downstream chain.
    ///
    /// Risk precedence is deliberate: package-level exposure always
    /// dominates the requirement-count heuristic.
    pub fn assess(&self, chain: &[TraceChainEntry]) -> ImpactReport {
        let mut affected = AffectedEntities::default();
        for entry in chain {
            if self.swr_types.contains(&entry.entity_type) {
                affected.swr.push(entry.entity_id.clone());
            } else if self.module_types.contains(&entry.entity_type) {
                affected.modules.push(entry.entity_id.clone());
            } else if self.package_types.contains(&entry.entity_type) {
                affected.packages.push(entry.entity_id.clone());
            }
        }

        let mut owners: BTreeSet<String> = BTreeSet::new();
        for entry in chain {
            for key in OWNER_KEYS {
                if let Some(owner) = entry.data.get(key).and_then(Value::as_str) {
                    if !owner.is_empty() {
                        owners.insert(owner.to_string());
                    }
                }
            }
        }

        let risk_level = if !affected.packages.is_empty() {
            RiskLevel::High
        } else if affected.swr.len() > 3 {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        };

        let effort: f64 = chain
            .iter()
            .map(|entry| {
                EFFORT_KEYS
                    .iter()
                    .filter_map(|key| entry.data.get(*key).and_then(Value::as_f64))
                    .sum::<f64>()
            })
            .sum();

        ImpactReport {
            affected_entities: affected,
            notified_owners: owners.into_iter().collect(),
            risk_level,
            estimated_effort: format!("{}{}", effort, EFFORT_UNIT),
            impact_score: chain.len(),
            recommendation: recommendation(risk_level).to_string(),
        }
    }
}

/// Canned advice per risk level
fn recommendation(risk_level: RiskLevel) -> &'static str {
    match risk_level {
        RiskLevel::High => "建议召开变更评审会议，评估影响范围，制定详细的测试方案",
        RiskLevel::Medium => "建议通知所有相关责任人，更新相关测试用例",
        RiskLevel::Low => "影响范围较小，按正常流程处理",
    }
}
