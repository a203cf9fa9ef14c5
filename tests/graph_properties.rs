use std::collections::{HashMap, HashSet};

use proptest::prelude::*;
use record_graph::graph::{assign_curvature, focus_links, project};
use record_graph::model::{DatasetGraph, NodeId, PairKey};
use record_graph::{TransformOptions, transform};
use serde_json::{Map, Value};

fn leaf() -> impl Strategy<Value = Value> {
	prop_oneof![
		Just(Value::Null),
		any::<bool>().prop_map(Value::Bool),
		(0i64..3).prop_map(Value::from),
		prop::sample::select(vec!["x", "y", "1"]).prop_map(Value::from),
	]
}

fn key() -> impl Strategy<Value = String> {
	prop::sample::select(vec!["name", "city", "tags", "meta"]).prop_map(String::from)
}

fn value() -> impl Strategy<Value = Value> {
	leaf().prop_recursive(3, 12, 3, |inner| {
		prop_oneof![
			prop::collection::vec(inner.clone(), 0..3).prop_map(Value::Array),
			prop::collection::btree_map(key(), inner, 0..3)
				.prop_map(|m| Value::Object(m.into_iter().collect::<Map<_, _>>())),
		]
	})
}

fn dataset() -> impl Strategy<Value = Value> {
	let record = prop::collection::btree_map(key(), value(), 0..4)
		.prop_map(|m| Value::Object(m.into_iter().collect::<Map<_, _>>()));
	prop::collection::vec(record, 0..6).prop_map(Value::Array)
}

fn build(dataset: &Value) -> DatasetGraph {
	transform(dataset, &TransformOptions::default()).expect("generated datasets are valid")
}

proptest! {
	#[test]
	fn primitives_and_keys_are_unique(data in dataset()) {
		let graph = build(&data);

		let pairs: HashSet<_> = graph
			.primitives
			.iter()
			.map(|p| (p.path.clone(), p.value.identity()))
			.collect();
		prop_assert_eq!(pairs.len(), graph.primitives.len());

		let paths: HashSet<_> = graph.keys.iter().map(|k| k.path.clone()).collect();
		prop_assert_eq!(paths.len(), graph.keys.len());
	}

	#[test]
	fn keys_hang_off_their_parent_path(data in dataset()) {
		let graph = build(&data);
		for key in graph.keys.iter().skip(1) {
			let parent = graph.key(key.parent.expect("non-root key")).expect("parent exists");
			prop_assert_eq!(&parent.path[..], &key.path[..key.path.len() - 1]);
			prop_assert!(parent.children.contains(&key.id));
		}
		for primitive in &graph.primitives {
			let parent = graph.key(primitive.parent).expect("parent exists");
			prop_assert_eq!(&parent.path, &primitive.path);
			prop_assert_eq!(primitive.color.h, parent.color.h);
		}
	}

	#[test]
	fn relationships_are_symmetric(data in dataset()) {
		let graph = build(&data);
		for a in &graph.entities {
			for rel in &a.relationships {
				let b = graph.entity(rel.id).expect("target exists");
				let back = b.relationships.iter().find(|r| r.id == a.id);
				prop_assert!(back.is_some(), "{} -> {} not mirrored", a.id, b.id);

				let mut forward: Vec<_> = rel.shared_attributes.iter().map(|s| s.id).collect();
				let mut reverse: Vec<_> = back.map(|r| r.shared_attributes.iter().map(|s| s.id).collect()).unwrap_or_default();
				forward.sort();
				reverse.sort();
				prop_assert_eq!(forward, reverse);
			}
		}
	}

	#[test]
	fn entity_value_counts_shared_attributes(data in dataset()) {
		let graph = build(&data);
		for entity in &graph.entities {
			let shared: usize = entity.relationships.iter().map(|r| r.shared_attributes.len()).sum();
			prop_assert_eq!(entity.value as usize, 1 + shared);
			prop_assert!(entity.relationships.iter().all(|r| r.id != entity.id));
		}
	}

	#[test]
	fn transform_is_repeatable(data in dataset()) {
		prop_assert_eq!(project(&build(&data)), project(&build(&data)));
	}

	#[test]
	fn curvature_is_balanced_per_pair(data in dataset()) {
		let graph = build(&data);
		let mut links = project(&graph).links;
		links.extend(focus_links(&graph, (0..graph.entities.len()).map(NodeId::Entity)));
		assign_curvature(&mut links, 0.25);

		let mut groups: HashMap<PairKey, Vec<usize>> = HashMap::new();
		for (i, link) in links.iter().enumerate().filter(|(_, l)| !l.pair_key.is_loop()) {
			groups.entry(link.pair_key).or_default().push(i);
		}
		for members in groups.values() {
			if members.len() == 1 {
				prop_assert!(links[members[0]].curvature.is_none());
				continue;
			}
			let reference = links[*members.last().expect("non-empty")].source;
			let oriented: Vec<f64> = members
				.iter()
				.map(|&i| {
					let c = links[i].curvature.expect("grouped links are curved");
					if links[i].source == reference { c } else { -c }
				})
				.collect();
			let sum: f64 = oriented.iter().sum();
			prop_assert!(sum.abs() < 1e-9);
			for (i, a) in oriented.iter().enumerate() {
				for b in &oriented[i + 1..] {
					prop_assert!((a - b).abs() > 1e-9);
				}
			}
		}
	}
}
