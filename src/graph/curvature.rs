//! Bends parallel links so they do not overlap.

use std::collections::HashMap;

use crate::model::PairKey;

use super::projection::GraphLink;

/// Default curvature bound; groups spread over `-MAX..=MAX`.
pub const DEFAULT_MAX_CURVATURE: f64 = 0.25;

/// Assigns curvature to every group of links sharing a pair key.
///
/// Single links are straight. In a group of `n`, the last link is the
/// reference and gets `+max`; the others are spaced evenly from `-max`, and
/// flipped whenever their source differs from the reference's source so the
/// group stays balanced around the straight line. Self-loops are left alone.
pub fn assign_curvature(links: &mut [GraphLink], max: f64) {
	let mut groups: HashMap<PairKey, Vec<usize>> = HashMap::new();
	for (i, link) in links.iter_mut().enumerate() {
		link.curvature = None;
		if !link.pair_key.is_loop() {
			groups.entry(link.pair_key).or_default().push(i);
		}
	}

	for members in groups.values().filter(|m| m.len() > 1) {
		let Some((&reference, rest)) = members.split_last() else {
			continue;
		};
		let reference_source = links[reference].source;
		links[reference].curvature = Some(max);

		let delta = 2.0 * max / rest.len() as f64;
		for (i, &member) in rest.iter().enumerate() {
			let mut curvature = -max + i as f64 * delta;
			if links[member].source != reference_source {
				curvature = -curvature;
			}
			links[member].curvature = Some(curvature);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::projection::LinkKind;
	use crate::model::NodeId;

	fn link(source: NodeId, target: NodeId) -> GraphLink {
		GraphLink::new(source, target, LinkKind::Ownership)
	}

	#[test]
	fn single_links_stay_straight() {
		let mut links = vec![
			link(NodeId::Entity(0), NodeId::Primitive(0)),
			link(NodeId::Entity(1), NodeId::Primitive(0)),
		];
		assign_curvature(&mut links, DEFAULT_MAX_CURVATURE);
		assert!(links.iter().all(|l| l.curvature.is_none()));
	}

	#[test]
	fn parallel_links_spread_symmetrically() {
		let (a, b) = (NodeId::Entity(0), NodeId::Entity(1));
		let mut links = vec![link(a, b), link(a, b), link(a, b)];
		assign_curvature(&mut links, 0.25);
		let values: Vec<_> = links.iter().map(|l| l.curvature.unwrap()).collect();
		assert_eq!(values, [-0.25, 0.0, 0.25]);
	}

	#[test]
	fn reversed_links_are_flipped() {
		let (a, b) = (NodeId::Entity(0), NodeId::Entity(1));
		let mut links = vec![link(b, a), link(a, b)];
		assign_curvature(&mut links, 0.25);
		// opposite direction of travel puts the bend on the other side
		assert_eq!(links[0].curvature, Some(0.25));
		assert_eq!(links[1].curvature, Some(0.25));
	}

	#[test]
	fn recomputing_clears_stale_values() {
		let (a, b) = (NodeId::Entity(0), NodeId::Entity(1));
		let mut links = vec![link(a, b), link(a, b)];
		assign_curvature(&mut links, 0.25);
		links.truncate(1);
		assign_curvature(&mut links, 0.25);
		assert_eq!(links[0].curvature, None);
	}
}
