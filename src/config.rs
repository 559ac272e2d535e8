//! Application configuration and constants

// === Embedding Parameters ===

/// Dimensionality produced by the catalog's embedding model (CLIP ViT-B/32).
/// Used for reporting; the selector checks query vs candidate lengths at
/// call time rather than pinning a global dimension.
pub const EMBEDDING_DIM: usize = 512;

/// Norms at or below this are treated as zero during normalization.
/// Small relative to typical embedding magnitudes, so tiny-but-real
/// vectors still get rescaled.
pub const NORM_EPSILON: f32 = 1e-12;

// === Search Defaults ===
pub const DEFAULT_TOP_K: i64 = 8;

// === Catalog Files ===
pub const CATALOG_EXT_JSON: &str = "json";
pub const CATALOG_EXT_MSGPACK: &str = "msgpack";
