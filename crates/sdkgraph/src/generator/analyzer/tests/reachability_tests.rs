use super::object_registry;
use crate::generator::analyzer::TypeGraph;

#[test]
fn test_reachability_is_transitive() {
  let registry = object_registry(&[("GetPet", &["Pet"]), ("Pet", &["Breed"]), ("Breed", &[]), ("Unused", &[])]);
  let graph = TypeGraph::build(&registry);

  let reached = graph.reachable_from([registry.lookup("GetPet").unwrap()]);
  let names = reached
    .iter()
    .map(|id| registry.get(*id).name.as_str())
    .collect::<Vec<_>>();

  assert_eq!(names, ["GetPet", "Pet", "Breed"], "ids follow registration order");
  assert!(!reached.contains(&registry.lookup("Unused").unwrap()));
}

#[test]
fn test_reachability_survives_cycles() {
  let registry = object_registry(&[("A", &["B"]), ("B", &["A"])]);
  let graph = TypeGraph::build(&registry);

  let reached = graph.reachable_from([registry.lookup("B").unwrap()]);
  assert_eq!(reached.len(), 2);
}

#[test]
fn test_empty_roots_reach_nothing() {
  let registry = object_registry(&[("A", &[])]);
  let graph = TypeGraph::build(&registry);

  assert!(graph.reachable_from([]).is_empty());
}
