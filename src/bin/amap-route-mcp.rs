//! AMap route adapter: walking, transit, driving and cycling routes, distances.

use amap_mcp_server::{Toolset, core::launch};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    launch::run(Toolset::Route).await
}
