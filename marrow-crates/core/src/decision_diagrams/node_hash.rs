use std::hash::Hasher;

use fnv::FnvHasher;

use super::EdgeInfo;

/// Computes the content hash of a node with the provided `variable` and `edges`.
///
/// The header is folded into a seed (djb2), after which the edges are mixed in field by field with
/// a hasher keyed by that seed. Equal content always results in an equal hash.
pub(crate) fn hash_node(variable: u32, edges: &[EdgeInfo]) -> u32 {
    let mut seed: u32 = 5381;
    seed = seed.wrapping_mul(33).wrapping_add(variable);
    seed = seed.wrapping_mul(33).wrapping_add(edges.len() as u32);

    let mut hasher = FnvHasher::with_key(u64::from(seed));
    for edge in edges {
        hasher.write_i32(edge.value);
        hasher.write_i32(edge.weight);
        hasher.write_u32(edge.destination.as_u32());
    }

    let hash = hasher.finish();
    (hash ^ (hash >> 32)) as u32
}
