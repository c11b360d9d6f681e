//! Tool definitions module.
//!
//! Each tool is one row in a `const` table. Adding a tool means adding a row
//! to `search.rs` or `route.rs`; nothing else changes.

pub mod route;
pub mod search;

use super::handlers::UpstreamTool;

/// The tool table a server process exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toolset {
    /// Coordinate conversion, place search, AOI boundaries.
    Search,
    /// Route planning and distance measurement.
    Route,
}

impl Toolset {
    /// Every catalog row of this toolset, in listing order.
    pub fn tools(self) -> &'static [UpstreamTool] {
        match self {
            Self::Search => search::TOOLS,
            Self::Route => route::TOOLS,
        }
    }

    /// Name reported to clients unless overridden by configuration.
    pub fn server_name(self) -> &'static str {
        match self {
            Self::Search => "amap-search-mcp",
            Self::Route => "amap-route-mcp",
        }
    }

    /// Instructions returned during MCP initialization.
    pub fn instructions(self) -> &'static str {
        match self {
            Self::Search => {
                "AMap place search server. Converts coordinates into AMap's system, searches \
                 points of interest by keyword, around a point or inside a polygon, and looks up \
                 POI details and AOI boundaries. Responses are the provider's raw JSON."
            }
            Self::Route => {
                "AMap route planning server. Plans walking, transit, driving and bicycling \
                 routes and measures distances between coordinates given as 'lng,lat'. \
                 Responses are the provider's raw JSON."
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    /// Required and optional parameters per tool, as the provider documents them.
    const EXPECTED: &[(&str, &str, &[&str], &[&str])] = &[
        ("coordinate_convert", "/v3/assistant/coordinate/convert", &["locations"], &["coordsys", "output"]),
        (
            "keyword_search",
            "/v3/place/text",
            &["keywords"],
            &["types", "city", "citylimit", "children", "offset", "page", "extensions"],
        ),
        (
            "around_search",
            "/v3/place/around",
            &["location"],
            &["keywords", "types", "city", "radius", "sortrule", "offset", "page", "extensions"],
        ),
        (
            "polygon_search",
            "/v3/place/polygon",
            &["polygon"],
            &["keywords", "types", "offset", "page", "extensions"],
        ),
        ("id_search", "/v3/place/detail", &["id"], &[]),
        ("aoi_boundary_query", "/v5/aoi/polyline", &["id"], &[]),
        ("walking_route", "/v3/direction/walking", &["origin", "destination"], &[]),
        (
            "transit_route",
            "/v3/direction/transit/integrated",
            &["origin", "destination", "city"],
            &[],
        ),
        ("driving_route", "/v3/direction/driving", &["origin", "destination"], &[]),
        ("bicycling_route", "/v4/direction/bicycling", &["origin", "destination"], &[]),
        ("distance", "/v3/distance", &["origins", "destination"], &[]),
    ];

    fn all_tools() -> impl Iterator<Item = &'static UpstreamTool> {
        Toolset::Search.tools().iter().chain(Toolset::Route.tools())
    }

    #[test]
    fn test_catalog_matches_provider_table() {
        assert_eq!(all_tools().count(), EXPECTED.len());

        for (name, path, required, optional) in EXPECTED {
            let tool = all_tools()
                .find(|t| t.descriptor.name == *name)
                .unwrap_or_else(|| panic!("missing tool {name}"));

            assert_eq!(tool.template.path, *path, "path of {name}");

            let declared_required: HashSet<_> =
                tool.descriptor.required_parameters().into_iter().collect();
            let expected_required: HashSet<_> = required.iter().copied().collect();
            assert_eq!(declared_required, expected_required, "required set of {name}");

            let declared_optional: HashSet<_> = tool
                .descriptor
                .parameters
                .iter()
                .filter(|p| !p.required)
                .map(|p| p.name)
                .collect();
            let expected_optional: HashSet<_> = optional.iter().copied().collect();
            assert_eq!(declared_optional, expected_optional, "optional set of {name}");
        }
    }

    #[test]
    fn test_tool_names_are_unique() {
        let names: HashSet<_> = all_tools().map(|t| t.descriptor.name).collect();
        assert_eq!(names.len(), all_tools().count());
    }

    #[test]
    fn test_no_template_hardcodes_a_credential() {
        for tool in all_tools() {
            assert!(tool.template.static_params.iter().all(|(k, _)| *k != "key"));
            assert!(tool.descriptor.parameter("key").is_none());
        }
    }

    #[test]
    fn test_split_between_processes() {
        assert_eq!(Toolset::Search.tools().len(), 6);
        assert_eq!(Toolset::Route.tools().len(), 5);
        assert_ne!(Toolset::Search.server_name(), Toolset::Route.server_name());
    }
}
