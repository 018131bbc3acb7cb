use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignCategory {
    Regulatory,
    Warning,
    Guide,
}

impl SignCategory {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SignCategory::Regulatory => "Regulatory",
            SignCategory::Warning => "Warning",
            SignCategory::Guide => "Guide",
        }
    }
}

impl fmt::Display for SignCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoadSign {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub category: SignCategory,
}

/// Signs used by the category drill, in play order.
pub const ROAD_SIGNS: [RoadSign; 6] = [
    RoadSign {
        id: "stop",
        name: "Stop Sign",
        description: "Come to a complete stop and yield the right-of-way.",
        category: SignCategory::Regulatory,
    },
    RoadSign {
        id: "yield",
        name: "Yield Sign",
        description: "Slow down and yield to oncoming traffic.",
        category: SignCategory::Regulatory,
    },
    RoadSign {
        id: "merge",
        name: "Merge",
        description: "Prepare to blend with traffic from another lane.",
        category: SignCategory::Warning,
    },
    RoadSign {
        id: "speed-limit",
        name: "Speed Limit",
        description: "Maximum legal speed allowed under ideal conditions.",
        category: SignCategory::Regulatory,
    },
    RoadSign {
        id: "interstate",
        name: "Interstate Shield",
        description: "Indicates a high-speed divided highway.",
        category: SignCategory::Guide,
    },
    RoadSign {
        id: "pedestrian",
        name: "Pedestrian Crossing",
        description: "Watch for people crossing the street ahead.",
        category: SignCategory::Warning,
    },
];
