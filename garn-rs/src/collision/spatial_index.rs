use rstar::{AABB, RTree, RTreeObject};

use crate::geometry::primitives::Rect;

/// An entry in the spatial index: the bounding box of a committed polygon
/// and its position in the committed list.
#[derive(Clone, Debug)]
struct BBoxEntry {
    index: usize,
    envelope: AABB<[f64; 2]>,
}

impl RTreeObject for BBoxEntry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

/// R-tree over the bounding boxes of a set of polygons, used as the
/// broad phase of collision detection: a bounding-box query yields the
/// candidate indices that still need an exact geometric test.
#[derive(Debug)]
pub struct SpatialIndex {
    tree: RTree<BBoxEntry>,
}

impl SpatialIndex {
    pub fn empty() -> Self {
        SpatialIndex { tree: RTree::new() }
    }

    /// Bulk-loads the index from (index, bounding box) pairs.
    pub fn build(bboxes: impl Iterator<Item = (usize, Rect)>) -> Self {
        let entries = bboxes
            .map(|(index, bbox)| BBoxEntry {
                index,
                envelope: AABB::from_corners([bbox.x_min, bbox.y_min], [bbox.x_max, bbox.y_max]),
            })
            .collect();
        SpatialIndex {
            tree: RTree::bulk_load(entries),
        }
    }

    /// Indices of all entries whose bounding boxes intersect `bbox`.
    pub fn query<'a>(&'a self, bbox: &Rect) -> impl Iterator<Item = usize> + 'a {
        let envelope = AABB::from_corners([bbox.x_min, bbox.y_min], [bbox.x_max, bbox.y_max]);
        self.tree
            .locate_in_envelope_intersecting(&envelope)
            .map(|entry| entry.index)
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}
