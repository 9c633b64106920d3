/// Size class of a two-set diagram, chosen from its union size.
///
/// Larger unions get larger circles and smaller labels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Comfortable,
    Moderate,
    Tight,
    VeryTight,
    Crowded,
}

/// Baseline geometry for a tier.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TierParams {
    /// Baseline radius as a fraction of the largest radius the area allows.
    pub radius_fraction: f64,
    pub font_size: u32,
    /// Clearance around a label, in pixels.
    pub padding: f64,
}

const TIERS: [(usize, Tier, TierParams); 4] = [
    (
        15,
        Tier::Comfortable,
        TierParams {
            radius_fraction: 0.55,
            font_size: 38,
            padding: 20.0,
        },
    ),
    (
        25,
        Tier::Moderate,
        TierParams {
            radius_fraction: 0.65,
            font_size: 32,
            padding: 16.0,
        },
    ),
    (
        40,
        Tier::Tight,
        TierParams {
            radius_fraction: 0.75,
            font_size: 28,
            padding: 13.0,
        },
    ),
    (
        60,
        Tier::VeryTight,
        TierParams {
            radius_fraction: 0.85,
            font_size: 24,
            padding: 10.0,
        },
    ),
];

const CROWDED: TierParams = TierParams {
    radius_fraction: 0.95,
    font_size: 20,
    padding: 8.0,
};

/// Unions above this size no longer read comfortably on one canvas.
pub const COMFORTABLE_UNION_LIMIT: usize = 40;

impl Tier {
    pub fn for_union(union_size: usize) -> Tier {
        TIERS
            .iter()
            .find(|(limit, _, _)| union_size <= *limit)
            .map(|(_, tier, _)| *tier)
            .unwrap_or(Tier::Crowded)
    }

    pub fn params(self) -> TierParams {
        TIERS
            .iter()
            .find(|(_, tier, _)| *tier == self)
            .map(|(_, _, params)| *params)
            .unwrap_or(CROWDED)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Comfortable => "comfortable",
            Tier::Moderate => "moderate",
            Tier::Tight => "tight",
            Tier::VeryTight => "very_tight",
            Tier::Crowded => "crowded",
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
