//! Item identity and the additive bonus algebra (speed/productivity/quality).

use std::fmt;

use indexmap::IndexMap;
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

pub const MIN_QUALITY: u8 = 1;
pub const MAX_QUALITY: u8 = 5;

/// An item or fluid at a given quality tier. Structural equality, so two
/// `Item`s with the same fields are the same key everywhere (recipe maps,
/// transformation rate vectors, the cost table).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Item {
    pub name: String,
    pub quality: u8,
    pub is_fluid: bool,
}

impl Item {
    pub fn new(name: impl Into<String>, quality: u8, is_fluid: bool) -> Self {
        let name = name.into();
        if is_fluid {
            Item { name, quality: MIN_QUALITY, is_fluid: true }
        } else {
            Item { name, quality, is_fluid: false }
        }
    }

    pub fn item(name: impl Into<String>, quality: u8) -> Self {
        Item::new(name, quality, false)
    }

    pub fn fluid(name: impl Into<String>) -> Self {
        Item::new(name, MIN_QUALITY, true)
    }

    /// The sentinel representing raw extracted material; its cost is
    /// pinned to `resource_base_cost` on every iteration.
    pub fn base_resource() -> Self {
        Item::item("resource", MIN_QUALITY)
    }

    /// Returns the same item at a different quality tier. Fluids are
    /// unaffected (they are always quality 1).
    pub fn at_quality(&self, quality: u8) -> Self {
        Item::new(self.name.clone(), quality, self.is_fluid)
    }

    fn serialize_form(&self) -> String {
        if self.is_fluid {
            format!("fluid-{}", self.name)
        } else if self.quality == MIN_QUALITY {
            self.name.clone()
        } else {
            format!("{}-q{}", self.name, self.quality)
        }
    }

    fn parse(data: &str) -> Item {
        if let Some(name) = data.strip_prefix("fluid-") {
            return Item::fluid(name);
        }
        if let Some(dash) = data.rfind("-q") {
            let (name, suffix) = data.split_at(dash);
            let quality_str = &suffix[2..];
            if !quality_str.is_empty() && quality_str.bytes().all(|b| b.is_ascii_digit()) {
                if let Ok(quality) = quality_str.parse::<u8>() {
                    return Item::item(name, quality);
                }
            }
        }
        Item::item(data, MIN_QUALITY)
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.serialize_form())
    }
}

impl Serialize for Item {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.serialize_form())
    }
}

impl<'de> Deserialize<'de> for Item {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ItemVisitor;
        impl Visitor<'_> for ItemVisitor {
            type Value = Item;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an item string like \"iron-plate\", \"iron-plate-q3\", or \"fluid-water\"")
            }

            fn visit_str<E>(self, v: &str) -> Result<Item, E>
            where
                E: de::Error,
            {
                Ok(Item::parse(v))
            }
        }
        deserializer.deserialize_str(ItemVisitor)
    }
}

/// Mapping from item to a non-negative rate or count. Insertion-ordered so
/// iteration over a transformation's outputs is deterministic and matches
/// construction order, per the engine's tie-break requirement.
pub type ItemCounts = IndexMap<Item, f64>;

/// Additive three-vector of (speed, productivity, quality) multipliers.
/// `name` is cosmetic and ignored by `+`/`*`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bonus {
    pub name: String,
    pub speed: f64,
    pub productivity: f64,
    pub quality: f64,
}

impl Default for Bonus {
    fn default() -> Self {
        Bonus { name: String::new(), speed: 0.0, productivity: 0.0, quality: 0.0 }
    }
}

impl Bonus {
    pub const ZERO: Bonus =
        Bonus { name: String::new(), speed: 0.0, productivity: 0.0, quality: 0.0 };

    pub fn new(name: impl Into<String>, speed: f64, productivity: f64, quality: f64) -> Self {
        Bonus { name: name.into(), speed, productivity, quality }
    }
}

impl std::ops::Add for Bonus {
    type Output = Bonus;
    fn add(self, rhs: Bonus) -> Bonus {
        Bonus {
            name: String::new(),
            speed: self.speed + rhs.speed,
            productivity: self.productivity + rhs.productivity,
            quality: self.quality + rhs.quality,
        }
    }
}

impl std::ops::AddAssign for Bonus {
    fn add_assign(&mut self, rhs: Bonus) {
        self.speed += rhs.speed;
        self.productivity += rhs.productivity;
        self.quality += rhs.quality;
    }
}

impl std::ops::Mul<f64> for Bonus {
    type Output = Bonus;
    fn mul(self, scale: f64) -> Bonus {
        Bonus {
            name: self.name,
            speed: self.speed * scale,
            productivity: self.productivity * scale,
            quality: self.quality * scale,
        }
    }
}

impl std::ops::Mul<Bonus> for f64 {
    type Output = Bonus;
    fn mul(self, rhs: Bonus) -> Bonus {
        rhs * self
    }
}

/// Mapping from recipe name to an extra per-recipe bonus
/// (`Configuration::recipe_bonuses`).
pub type BonusMap = IndexMap<String, Bonus>;

/// A beacon's transmission efficiency and the effect it broadcasts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Beacon {
    pub name: String,
    pub transmission: f64,
    pub effect: Bonus,
}
