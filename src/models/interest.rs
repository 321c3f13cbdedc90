use serde::{Deserialize, Serialize};
use std::{collections::BTreeSet, fmt::Display, str::FromStr};

/// The visitor's declared interests
pub type InterestSelection = BTreeSet<InterestTag>;

/// A topic from the fixed interest catalog
///
/// Variant order is catalog order; it also fixes the order a selection is
/// persisted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterestTag {
    Beach,
    Adventure,
    Culture,
    Luxury,
    Nature,
    Mountains,
    City,
    Spiritual,
}

impl InterestTag {
    pub const ALL: [InterestTag; 8] = [
        InterestTag::Beach,
        InterestTag::Adventure,
        InterestTag::Culture,
        InterestTag::Luxury,
        InterestTag::Nature,
        InterestTag::Mountains,
        InterestTag::City,
        InterestTag::Spiritual,
    ];

    /// Stable identifier used in persisted slots and over the wire
    pub fn id(self) -> &'static str {
        match self {
            InterestTag::Beach => "beach",
            InterestTag::Adventure => "adventure",
            InterestTag::Culture => "culture",
            InterestTag::Luxury => "luxury",
            InterestTag::Nature => "nature",
            InterestTag::Mountains => "mountains",
            InterestTag::City => "city",
            InterestTag::Spiritual => "spiritual",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            InterestTag::Beach => "Beach & Islands",
            InterestTag::Adventure => "Adventure",
            InterestTag::Culture => "Culture & History",
            InterestTag::Luxury => "Luxury",
            InterestTag::Nature => "Nature & Wildlife",
            InterestTag::Mountains => "Mountains",
            InterestTag::City => "City Breaks",
            InterestTag::Spiritual => "Spiritual",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            InterestTag::Beach => "🏖️",
            InterestTag::Adventure => "🧗",
            InterestTag::Culture => "🏛️",
            InterestTag::Luxury => "💎",
            InterestTag::Nature => "🌿",
            InterestTag::Mountains => "🏔️",
            InterestTag::City => "🏙️",
            InterestTag::Spiritual => "🙏",
        }
    }

    /// Lowercase keywords matched as substrings of a trip's text
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            InterestTag::Beach => &[
                "beach", "island", "coast", "ocean", "bali", "maldives", "santorini", "goa",
            ],
            InterestTag::Adventure => &[
                "adventure", "trek", "hike", "climb", "safari", "wild", "valley",
            ],
            InterestTag::Culture => &[
                "culture", "history", "heritage", "temple", "museum", "ancient", "kyoto", "rome",
                "delhi",
            ],
            InterestTag::Luxury => &["luxury", "premium", "exclusive", "resort", "villa", "spa"],
            InterestTag::Nature => &["nature", "wildlife", "forest", "jungle", "park", "reserve"],
            InterestTag::Mountains => &[
                "mountain", "himalaya", "alpine", "peak", "glacier", "valley",
            ],
            InterestTag::City => &["city", "urban", "tokyo", "paris", "dubai", "singapore"],
            InterestTag::Spiritual => &[
                "spiritual",
                "temple",
                "meditation",
                "yoga",
                "pilgrimage",
                "sacred",
            ],
        }
    }

    /// Catalog entry for the presentation layer
    pub fn option(self) -> InterestOption {
        InterestOption {
            id: self,
            label: self.label(),
            icon: self.icon(),
            keywords: self.keywords(),
        }
    }
}

impl Display for InterestTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for InterestTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        InterestTag::ALL
            .into_iter()
            .find(|tag| tag.id() == s)
            .ok_or_else(|| format!("unknown interest tag: {}", s))
    }
}

/// Serializable view of one interest catalog entry
#[derive(Debug, Clone, Serialize)]
pub struct InterestOption {
    pub id: InterestTag,
    pub label: &'static str,
    pub icon: &'static str,
    pub keywords: &'static [&'static str],
}

/// Full interest catalog in display order
pub fn interest_catalog() -> Vec<InterestOption> {
    InterestTag::ALL.into_iter().map(InterestTag::option).collect()
}
