//! Map-reduce configuration from TOML (`[map_reduce]` section)

use serde::{Deserialize, Serialize};

/// Raw map-reduce configuration from TOML
///
/// ```toml
/// [map_reduce]
/// max_concurrency = 8   # 0 runs every mapper call at once
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileMapReduceConfig {
    /// Mapper calls in flight at once (0 = unbounded)
    pub max_concurrency: usize,
}
