//! AMap search adapter: coordinate conversion, place search and AOI boundaries.

use amap_mcp_server::{Toolset, core::launch};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    launch::run(Toolset::Search).await
}
