//! Root-path resolution over incoming relations

use super::types::PathSegment;
use crate::graph::{Entity, EntityId, GraphSnapshot};
use std::collections::HashSet;

/// Entity type treated as the project-level root by default
pub const ROOT_TYPE: &str = "VehicleProject";

/// Query enumerating every root-to-entity path for a start entity.
///
/// Walks incoming relations upward until a root-typed entity or an entity
/// with no resolvable parents is reached. Cycle protection is per branch:
/// an entity may legitimately appear on two different completed paths, but
/// never twice on the same one.
#[derive(Debug, Clone)]
pub struct RootPaths {
    origin: EntityId,
    root_types: HashSet<String>,
}

impl RootPaths {
    /// Create a path query for the given entity
    pub fn for_entity(origin: impl Into<EntityId>) -> Self {
        Self {
            origin: origin.into(),
            root_types: HashSet::from([ROOT_TYPE.to_string()]),
        }
    }

    /// Override the entity types treated as roots
    pub fn with_root_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.root_types = types.into_iter().map(Into::into).collect();
        self
    }

    /// Execute the query, returning each path ordered root first.
    ///
    /// An unknown start entity yields an empty list rather than an error;
    /// path lookups are a leniency the strict trace entry point does not
    /// share.
    pub fn execute(&self, graph: &GraphSnapshot) -> Vec<Vec<PathSegment>> {
        let mut paths: Vec<Vec<PathSegment>> = Vec::new();
        if graph.get_entity(&self.origin).is_none() {
            return paths;
        }

        // Each work item is one branch: the entity ids from the origin
        // upward, the current entity last.
        let mut stack: Vec<Vec<EntityId>> = vec![vec![self.origin.clone()]];

        while let Some(branch) = stack.pop() {
            let Some(current) = branch.last().cloned() else {
                continue;
            };
            let Some(entity) = graph.get_entity(&current) else {
                continue;
            };

            if self.root_types.contains(&entity.entity_type) {
                paths.push(to_segments(&branch, graph));
                continue;
            }

            let parents: Vec<&Entity> = graph
                .relations_to(&current)
                .into_iter()
                .filter_map(|relation| graph.get_entity(&relation.source))
                .collect();

            if parents.is_empty() {
                paths.push(to_segments(&branch, graph));
                continue;
            }

            // A parent already on this branch closes a cycle; that branch
            // is dropped, not emitted.
            for parent in parents.into_iter().rev() {
                if branch.contains(&parent.id) {
                    continue;
                }
                let mut extended = branch.clone();
                extended.push(parent.id.clone());
                stack.push(extended);
            }
        }

        paths
    }
}

/// Flatten a branch into root-first path segments
fn to_segments(branch: &[EntityId], graph: &GraphSnapshot) -> Vec<PathSegment> {
    branch
        .iter()
        .rev()
        .filter_map(|id| graph.get_entity(id))
        .map(|entity| PathSegment {
            id: entity.id.clone(),
            entity_type: entity.entity_type.clone(),
            label: display_label(entity),
        })
        .collect()
}

/// Human-readable label for a path segment: title, then project name,
/// then the raw id.
fn display_label(entity: &Entity) -> String {
    entity
        .str_data("title")
        .or_else(|| entity.str_data("project_name"))
        .map(str::to_string)
        .unwrap_or_else(|| entity.id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Relation;

    /// PROJ-1 -> SYS-1 -> SWR-1, plus SYS-2 -> SWR-1 (no project above SYS-2)
    fn hierarchy() -> GraphSnapshot {
        let mut graph = GraphSnapshot::new("hierarchy");
        graph.add_entity(
            Entity::new("PROJ-1", ROOT_TYPE).with_data("project_name", "L2+行泊一体"),
        );
        graph.add_entity(Entity::new("SYS-1", "SystemRequirement").with_data("title", "感知系统需求"));
        graph.add_entity(Entity::new("SYS-2", "SystemRequirement"));
        graph.add_entity(Entity::new("SWR-1", "SWR").with_data("title", "融合跟踪"));
        graph.add_relation(Relation::new("e1", "PROJ-1", "SYS-1", "contains"));
        graph.add_relation(Relation::new("e2", "SYS-1", "SWR-1", "refines"));
        graph.add_relation(Relation::new("e3", "SYS-2", "SWR-1", "refines"));
        graph
    }

    #[test]
    fn entity_without_incoming_relations_is_its_own_path() {
        let mut graph = GraphSnapshot::new("single");
        graph.add_entity(Entity::new("SWR-1", "SWR"));
        let paths = RootPaths::for_entity("SWR-1").execute(&graph);
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].len(), 1);
        assert_eq!(paths[0][0].id, EntityId::from("SWR-1"));
    }

    #[test]
    fn paths_are_ordered_root_first() {
        let graph = hierarchy();
        let paths = RootPaths::for_entity("SWR-1").execute(&graph);
        assert_eq!(paths.len(), 2);

        let project_path = paths
            .iter()
            .find(|p| p[0].id == EntityId::from("PROJ-1"))
            .expect("path through the project root");
        let ids: Vec<&str> = project_path.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["PROJ-1", "SYS-1", "SWR-1"]);
    }

    #[test]
    fn root_type_terminates_even_with_parents_above() {
        let mut graph = hierarchy();
        // A parent above the project root must not extend the path.
        graph.add_entity(Entity::new("ORG-1", "Organization"));
        graph.add_relation(Relation::new("e4", "ORG-1", "PROJ-1", "owns"));

        let paths = RootPaths::for_entity("SYS-1").execute(&graph);
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0][0].id, EntityId::from("PROJ-1"));
        assert_eq!(paths[0].len(), 2);
    }

    #[test]
    fn labels_prefer_title_then_project_name() {
        let graph = hierarchy();
        let paths = RootPaths::for_entity("SWR-1").execute(&graph);
        let project_path = paths
            .iter()
            .find(|p| p[0].id == EntityId::from("PROJ-1"))
            .expect("project path");
        assert_eq!(project_path[0].label, "L2+行泊一体");
        assert_eq!(project_path[1].label, "感知系统需求");

        let bare_path = paths
            .iter()
            .find(|p| p[0].id == EntityId::from("SYS-2"))
            .expect("bare path");
        assert_eq!(bare_path[0].label, "SYS-2");
    }

    #[test]
    fn unknown_entity_yields_empty_list() {
        let graph = hierarchy();
        let paths = RootPaths::for_entity("GHOST").execute(&graph);
        assert!(paths.is_empty());
    }

    #[test]
    fn cycles_do_not_hang_the_walk() {
        let mut graph = GraphSnapshot::new("cycle");
        for id in ["A", "B", "C"] {
            graph.add_entity(Entity::new(id, "SWR"));
        }
        // A <- B <- C <- A: every upward branch closes on itself.
        graph.add_relation(Relation::new("e1", "B", "A", "refines"));
        graph.add_relation(Relation::new("e2", "C", "B", "refines"));
        graph.add_relation(Relation::new("e3", "A", "C", "refines"));

        let paths = RootPaths::for_entity("A").execute(&graph);
        assert!(paths.is_empty());
    }

    #[test]
    fn shared_ancestor_appears_on_both_paths() {
        // PROJ -> SYS-A -> SWR, PROJ -> SYS-B -> SWR
        let mut graph = GraphSnapshot::new("diamond");
        graph.add_entity(Entity::new("PROJ", ROOT_TYPE));
        graph.add_entity(Entity::new("SYS-A", "SystemRequirement"));
        graph.add_entity(Entity::new("SYS-B", "SystemRequirement"));
        graph.add_entity(Entity::new("SWR", "SWR"));
        graph.add_relation(Relation::new("e1", "PROJ", "SYS-A", "contains"));
        graph.add_relation(Relation::new("e2", "PROJ", "SYS-B", "contains"));
        graph.add_relation(Relation::new("e3", "SYS-A", "SWR", "refines"));
        graph.add_relation(Relation::new("e4", "SYS-B", "SWR", "refines"));

        let paths = RootPaths::for_entity("SWR").execute(&graph);
        assert_eq!(paths.len(), 2);
        for path in &paths {
            assert_eq!(path[0].id, EntityId::from("PROJ"));
        }
    }

    #[test]
    fn dangling_parent_relations_count_as_no_parents() {
        let mut graph = GraphSnapshot::new("dangling");
        graph.add_entity(Entity::new("SWR-1", "SWR"));
        graph.add_relation(Relation::new("e1", "GHOST", "SWR-1", "refines"));

        let paths = RootPaths::for_entity("SWR-1").execute(&graph);
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].len(), 1);
    }
}
