//! Test-coverage aggregation along verification relations

use super::types::{CoverageReport, IssueRef};
use crate::graph::{Entity, EntityId, GraphSnapshot, RelationFilter};

/// Relation type linking a requirement-like entity to its test cases
pub const VERIFIED_BY: &str = "verified_by";
/// Relation type linking a test case to a defect it found
pub const FINDS: &str = "finds";

/// Test-case status value counted as passed
pub const STATUS_PASSED: &str = "通过";
/// Test-case status value counted as failed
pub const STATUS_FAILED: &str = "失败";

/// Aggregate test coverage for one entity.
///
/// Walks `verified_by` relations to test cases and, from each test case,
/// `finds` relations to issues. A test case in neither the passed nor the
/// failed state counts toward the total only, so `passed + failed` can be
/// less than `total_test_cases`. Issue rows are accumulated per
/// association: two test cases finding the same issue yield two rows.
pub fn coverage(entity_id: &EntityId, graph: &GraphSnapshot) -> CoverageReport {
    let verifying = RelationFilter::new()
        .with_source(entity_id.clone())
        .with_type(VERIFIED_BY);
    let test_cases: Vec<&Entity> = graph
        .relations_where(&verifying)
        .into_iter()
        .filter_map(|relation| graph.get_entity(&relation.target))
        .collect();

    let passed = test_cases
        .iter()
        .filter(|tc| tc.str_data("status") == Some(STATUS_PASSED))
        .count();
    let failed = test_cases
        .iter()
        .filter(|tc| tc.str_data("status") == Some(STATUS_FAILED))
        .count();

    let mut issues: Vec<IssueRef> = Vec::new();
    for test_case in &test_cases {
        let finding = RelationFilter::new()
            .with_source(test_case.id.clone())
            .with_type(FINDS);
        for relation in graph.relations_where(&finding) {
            if let Some(issue) = graph.get_entity(&relation.target) {
                issues.push(IssueRef {
                    issue_id: issue.id.clone(),
                    severity: issue.data.get("severity").cloned(),
                    status: issue.data.get("status").cloned(),
                    description: issue.data.get("description").cloned(),
                });
            }
        }
    }

    CoverageReport {
        total_test_cases: test_cases.len(),
        passed,
        failed,
        issues,
    }
}
