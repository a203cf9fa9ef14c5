use pretty_assertions::assert_eq;
use record_graph::graph::{LinkKind, export_entity, export_primitive};
use record_graph::interaction::{Emphasis, node_emphasis};
use record_graph::model::{Hsl, NodeId, PairKey, Scalar};
use record_graph::{SelectionStateMachine, TransformOptions, project, transform};
use serde_json::json;

fn options() -> TransformOptions {
	TransformOptions::default()
}

#[test]
fn two_records_sharing_a_city() {
	let dataset = json!([
		{"name": "A", "city": "X"},
		{"name": "B", "city": "X"},
	]);
	let graph = transform(&dataset, &options()).expect("valid dataset");

	let city: Vec<_> = graph
		.primitives
		.iter()
		.filter(|p| p.path == ["city"] && p.value == Scalar::String("X".into()))
		.collect();
	assert_eq!(city.len(), 1);
	assert_eq!(city[0].entities, vec![NodeId::Entity(0), NodeId::Entity(1)]);

	for (entity, other) in [(0, 1), (1, 0)] {
		let e = &graph.entities[entity];
		assert_eq!(e.value, 2);
		assert_eq!(e.relationships.len(), 1);
		assert_eq!(e.relationships[0].id, NodeId::Entity(other));
		assert_eq!(e.relationships[0].shared_attributes.len(), 1);
		assert_eq!(e.relationships[0].shared_attributes[0].name, "city: X");
	}

	// name, city: two top-level hues 180 degrees apart
	assert_eq!(city[0].color, Hsl::new(180.0, 50.0, 50.0));
	assert_eq!(graph.primitives[0].color, Hsl::new(0.0, 50.0, 50.0));
}

#[test]
fn records_without_overlap_stay_unrelated() {
	let dataset = json!([
		{"a": 1},
		{"b": 2},
		{"c": {"d": [3, 4]}},
	]);
	let graph = transform(&dataset, &options()).expect("valid dataset");

	assert!(graph.entities.iter().all(|e| e.relationships.is_empty()));
	assert!(graph.entities.iter().all(|e| e.value == 1));
	assert!(graph.primitives.iter().all(|p| p.entities.len() == 1));
	assert_eq!(graph.stats().shared_primitives, 0);
	assert_eq!(graph.entities[0].name, "Unnamed (e0)");
}

#[test]
fn clicking_an_entity_toggles_focus_mode() {
	let dataset = json!([
		{"name": "A", "city": "X"},
		{"name": "B", "city": "X"},
		{"name": "C", "city": "Y"},
	]);
	let graph = transform(&dataset, &options()).expect("valid dataset");
	let a = NodeId::Entity(0);
	let owned = graph.entities[0].primitives.clone();
	let mut sm = SelectionStateMachine::new();

	sm.click(&graph, a);
	assert!(sm.focus_mode());
	let sel = sm.snapshot();
	assert_eq!(node_emphasis(&sel, a), Emphasis::Selected);
	for &p in &owned {
		assert_eq!(node_emphasis(&sel, p), Emphasis::Selected);
		assert!(sel.clicked_links.contains(&PairKey::new(a, p)));
	}
	assert_eq!(node_emphasis(&sel, NodeId::Entity(2)), Emphasis::Dimmed);

	sm.click(&graph, a);
	assert!(!sm.focus_mode());
	let sel = sm.snapshot();
	assert!(sel.clicked_nodes.is_empty() && sel.clicked_links.is_empty());
	assert_eq!(node_emphasis(&sel, a), Emphasis::Base);
}

#[test]
fn empty_dataset_projects_to_nothing_but_the_root() {
	let graph = transform(&json!([]), &options()).expect("empty is valid");
	let data = project(&graph);

	assert!(graph.entities.is_empty() && graph.primitives.is_empty());
	assert_eq!(data.nodes.len(), 1);
	assert!(data.links.is_empty());
}

#[test]
fn hover_wins_over_focus() {
	let dataset = json!([{"name": "A", "city": "X"}, {"name": "B", "city": "Y"}]);
	let graph = transform(&dataset, &options()).expect("valid dataset");
	let mut sm = SelectionStateMachine::new();

	sm.click(&graph, NodeId::Entity(0));
	sm.hover(&graph, Some(NodeId::Entity(1)));
	let sel = sm.snapshot();
	assert_eq!(node_emphasis(&sel, NodeId::Entity(1)), Emphasis::Hovered);
	assert_eq!(node_emphasis(&sel, NodeId::Entity(0)), Emphasis::Selected);
}

#[test]
fn exports_for_focused_nodes() {
	let dataset = json!([
		{"name": "Alien", "genre": ["horror", "sci-fi"]},
		{"name": "Arrival", "genre": ["sci-fi"]},
	]);
	let graph = transform(&dataset, &options()).expect("valid dataset");
	let sci_fi = graph
		.primitives
		.iter()
		.find(|p| p.name == "genre: sci-fi")
		.expect("shared genre");

	assert_eq!(
		export_primitive(&graph, sci_fi.id),
		Some(vec!["Alien".to_string(), "Arrival".to_string()])
	);
	let export = export_entity(&graph, NodeId::Entity(1)).expect("entity export");
	assert_eq!(
		serde_json::to_value(&export).expect("serializable"),
		json!({
			"entity": {"name": "Arrival", "genre": ["sci-fi"]},
			"relationships": [{"name": "Alien", "sharedAttributes": ["genre: sci-fi"]}]
		})
	);
}

#[test]
fn projection_links_each_owned_reference() {
	let dataset = json!([{"tags": ["x", "x", "y"]}]);
	let graph = transform(&dataset, &options()).expect("valid dataset");
	let mut data = project(&graph);
	record_graph::assign_curvature(&mut data.links, 0.25);

	let ownership: Vec<_> = data.links.iter().filter(|l| l.kind == LinkKind::Ownership).collect();
	assert_eq!(ownership.len(), 3);
	// the repeated tag yields two parallel links, bent apart
	assert_eq!(ownership[0].curvature, Some(-0.25));
	assert_eq!(ownership[1].curvature, Some(0.25));
	assert_eq!(ownership[2].curvature, None);
}
