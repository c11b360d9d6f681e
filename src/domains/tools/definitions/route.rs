//! Route planning and distance tools served by `amap-route-mcp`.

use crate::domains::tools::catalog::{ParameterSpec, ToolDescriptor};
use crate::domains::tools::handlers::UpstreamTool;
use crate::domains::tools::upstream::UpstreamRequestTemplate;

const ORIGIN: ParameterSpec =
    ParameterSpec::string("origin", "Start point as 'lng,lat'").required();
const DESTINATION: ParameterSpec =
    ParameterSpec::string("destination", "End point as 'lng,lat'").required();
const POINT_TO_POINT: &[ParameterSpec] = &[ORIGIN, DESTINATION];

pub const WALKING_ROUTE: UpstreamTool = UpstreamTool {
    descriptor: ToolDescriptor {
        name: "walking_route",
        description: "Plan a walking route between two points (up to 100 km).",
        parameters: POINT_TO_POINT,
    },
    template: UpstreamRequestTemplate::get("/v3/direction/walking"),
};

pub const TRANSIT_ROUTE: UpstreamTool = UpstreamTool {
    descriptor: ToolDescriptor {
        name: "transit_route",
        description: "Plan a public transit route (bus, subway, train) between two points.",
        parameters: &[
            ORIGIN,
            DESTINATION,
            ParameterSpec::string("city", "City of the start point, name or citycode").required(),
        ],
    },
    template: UpstreamRequestTemplate::get("/v3/direction/transit/integrated"),
};

pub const DRIVING_ROUTE: UpstreamTool = UpstreamTool {
    descriptor: ToolDescriptor {
        name: "driving_route",
        description: "Plan a driving route between two points.",
        parameters: POINT_TO_POINT,
    },
    template: UpstreamRequestTemplate::get("/v3/direction/driving"),
};

pub const BICYCLING_ROUTE: UpstreamTool = UpstreamTool {
    descriptor: ToolDescriptor {
        name: "bicycling_route",
        description: "Plan a bicycling route between two points (up to 500 km).",
        parameters: POINT_TO_POINT,
    },
    template: UpstreamRequestTemplate::get("/v4/direction/bicycling"),
};

pub const DISTANCE: UpstreamTool = UpstreamTool {
    descriptor: ToolDescriptor {
        name: "distance",
        description: "Measure the distance from one or more origins to a destination.",
        parameters: &[
            ParameterSpec::string(
                "origins",
                "Start points as 'lng,lat', up to 100 pairs separated by '|'",
            )
            .required(),
            DESTINATION,
        ],
    },
    template: UpstreamRequestTemplate::get("/v3/distance"),
};

pub const TOOLS: &[UpstreamTool] = &[
    WALKING_ROUTE,
    TRANSIT_ROUTE,
    DRIVING_ROUTE,
    BICYCLING_ROUTE,
    DISTANCE,
];
