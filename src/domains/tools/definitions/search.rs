//! Place search and geocoding tools served by `amap-search-mcp`.

use crate::domains::tools::catalog::{ParameterSpec, ToolDescriptor};
use crate::domains::tools::handlers::UpstreamTool;
use crate::domains::tools::upstream::UpstreamRequestTemplate;

const COORDSYS: &[&str] = &["gps", "mapbar", "baidu", "autonavi"];
const OUTPUT: &[&str] = &["json", "xml"];
const EXTENSIONS: &[&str] = &["base", "all"];
const SORTRULE: &[&str] = &["distance", "weight"];

const TYPES: ParameterSpec =
    ParameterSpec::string("types", "POI type codes or names, separated by '|'");
const OFFSET: ParameterSpec = ParameterSpec::number("offset", "Results per page (max 25)");
const PAGE: ParameterSpec = ParameterSpec::number("page", "Page number, starting at 1");
const DETAIL: ParameterSpec = ParameterSpec::string(
    "extensions",
    "'base' returns basic fields, 'all' adds detailed POI information",
)
.one_of(EXTENSIONS);

pub const COORDINATE_CONVERT: UpstreamTool = UpstreamTool {
    descriptor: ToolDescriptor {
        name: "coordinate_convert",
        description: "Convert coordinates from GPS, Mapbar or Baidu systems into AMap coordinates.",
        parameters: &[
            ParameterSpec::string(
                "locations",
                "Coordinates as 'lng,lat', multiple pairs separated by '|'",
            )
            .required(),
            ParameterSpec::string("coordsys", "Source coordinate system").one_of(COORDSYS),
            ParameterSpec::string("output", "Response format").one_of(OUTPUT),
        ],
    },
    template: UpstreamRequestTemplate::get("/v3/assistant/coordinate/convert"),
};

pub const KEYWORD_SEARCH: UpstreamTool = UpstreamTool {
    descriptor: ToolDescriptor {
        name: "keyword_search",
        description: "Search points of interest by keyword, optionally within a city.",
        parameters: &[
            ParameterSpec::string("keywords", "Search keywords, separated by '|'").required(),
            TYPES,
            ParameterSpec::string("city", "City name, citycode or adcode"),
            ParameterSpec::boolean("citylimit", "Only return results inside the given city"),
            ParameterSpec::number("children", "1 to include child POIs, 0 otherwise"),
            OFFSET,
            PAGE,
            DETAIL,
        ],
    },
    template: UpstreamRequestTemplate::get("/v3/place/text"),
};

pub const AROUND_SEARCH: UpstreamTool = UpstreamTool {
    descriptor: ToolDescriptor {
        name: "around_search",
        description: "Search points of interest around a center coordinate.",
        parameters: &[
            ParameterSpec::string("location", "Center point as 'lng,lat'").required(),
            ParameterSpec::string("keywords", "Search keywords, separated by '|'"),
            TYPES,
            ParameterSpec::string("city", "City name, citycode or adcode"),
            ParameterSpec::number("radius", "Search radius in meters (0-50000)"),
            ParameterSpec::string("sortrule", "Result ordering").one_of(SORTRULE),
            OFFSET,
            PAGE,
            DETAIL,
        ],
    },
    template: UpstreamRequestTemplate::get("/v3/place/around"),
};

pub const POLYGON_SEARCH: UpstreamTool = UpstreamTool {
    descriptor: ToolDescriptor {
        name: "polygon_search",
        description: "Search points of interest inside a polygon.",
        parameters: &[
            ParameterSpec::string(
                "polygon",
                "Polygon vertices as 'lng,lat' pairs separated by '|'; two pairs form a rectangle",
            )
            .required(),
            ParameterSpec::string("keywords", "Search keywords, separated by '|'"),
            TYPES,
            OFFSET,
            PAGE,
            DETAIL,
        ],
    },
    template: UpstreamRequestTemplate::get("/v3/place/polygon"),
};

pub const ID_SEARCH: UpstreamTool = UpstreamTool {
    descriptor: ToolDescriptor {
        name: "id_search",
        description: "Fetch the details of a point of interest by its ID.",
        parameters: &[ParameterSpec::string("id", "POI ID").required()],
    },
    template: UpstreamRequestTemplate::get("/v3/place/detail"),
};

pub const AOI_BOUNDARY_QUERY: UpstreamTool = UpstreamTool {
    descriptor: ToolDescriptor {
        name: "aoi_boundary_query",
        description: "Fetch the boundary polyline of an area of interest by its ID.",
        parameters: &[ParameterSpec::string("id", "AOI ID").required()],
    },
    template: UpstreamRequestTemplate::get("/v5/aoi/polyline"),
};

pub const TOOLS: &[UpstreamTool] = &[
    COORDINATE_CONVERT,
    KEYWORD_SEARCH,
    AROUND_SEARCH,
    POLYGON_SEARCH,
    ID_SEARCH,
    AOI_BOUNDARY_QUERY,
];
