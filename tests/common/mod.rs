//! Shared fixtures for integration tests

use reqtrace::{Entity, GraphSnapshot, Relation};

/// A small ADAS traceability graph:
///
/// ```text
/// PROJ-1 --contains--> SYS-1 --refines--> SWR-1 --implemented_by--> MOD-1
///                                           |                         |
///                                           |                    packaged_in
///                                      verified_by                    v
///                                        /     \                   PKG-1
///                                      TC-1   TC-2 --finds--> BUG-1
/// ```
pub fn adas_graph() -> GraphSnapshot {
    let mut graph = GraphSnapshot::with_id("graph_adas01".into(), "ADAS追溯");

    graph.add_entity(
        Entity::new("PROJ-1", "VehicleProject").with_data("project_name", "L2+行泊一体"),
    );
    graph.add_entity(
        Entity::new("SYS-1", "SystemRequirement")
            .with_data("title", "感知系统需求")
            .with_data("owner", "王强"),
    );
    graph.add_entity(
        Entity::new("SWR-1", "SWR")
            .with_data("title", "融合跟踪")
            .with_data("owner", "张伟")
            .with_data("estimated_hours", 16),
    );
    graph.add_entity(
        Entity::new("MOD-1", "PerceptionFusion")
            .with_data("owner", "李娜")
            .with_data("estimatedHours", 8),
    );
    graph.add_entity(Entity::new("PKG-1", "ReleasePackage").with_data("PM", "赵敏"));
    graph.add_entity(Entity::new("TC-1", "TestCase").with_data("status", "通过"));
    graph.add_entity(Entity::new("TC-2", "TestCase").with_data("status", "失败"));
    graph.add_entity(
        Entity::new("BUG-1", "Issue")
            .with_data("severity", "major")
            .with_data("status", "open")
            .with_data("description", "目标丢失"),
    );

    graph.add_relation(Relation::new("e1", "PROJ-1", "SYS-1", "contains"));
    graph.add_relation(Relation::new("e2", "SYS-1", "SWR-1", "refines").with_confidence(0.95));
    graph.add_relation(Relation::new("e3", "SWR-1", "MOD-1", "implemented_by"));
    graph.add_relation(Relation::new("e4", "MOD-1", "PKG-1", "packaged_in"));
    graph.add_relation(Relation::new("e5", "SWR-1", "TC-1", "verified_by"));
    graph.add_relation(Relation::new("e6", "SWR-1", "TC-2", "verified_by"));
    graph.add_relation(Relation::new("e7", "TC-2", "BUG-1", "finds"));

    graph
}

/// The scenario graph from the traceability acceptance notes:
/// A -> B via produces, B -> T1 via verified_by, T1 passed.
pub fn produces_graph() -> GraphSnapshot {
    let mut graph = GraphSnapshot::new("scenario-a");
    graph.add_entity(Entity::new("A", "SystemRequirement"));
    graph.add_entity(Entity::new("B", "SWR"));
    graph.add_entity(Entity::new("T1", "TestCase").with_data("status", "通过"));
    graph.add_relation(Relation::new("e1", "A", "B", "produces"));
    graph.add_relation(Relation::new("e2", "B", "T1", "verified_by"));
    graph
}
