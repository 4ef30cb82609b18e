mod spatial_index;

pub use spatial_index::SpatialIndex;
