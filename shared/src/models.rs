//! Enumerations shared between the API surface and storage
//!
//! Every enum has a canonical upper-case name (what the database stores)
//! and a wire form used in JSON. Parsing accepts either, case-insensitively.

use crate::errors::ParseEnumError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Account role
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Admin => "ADMIN",
        }
    }
}

impl FromStr for Role {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "USER" => Ok(Role::User),
            "ADMIN" => Ok(Role::Admin),
            _ => Err(ParseEnumError::Role(s.to_string())),
        }
    }
}

/// Account status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Active,
    Blocked,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Active => "ACTIVE",
            Status::Blocked => "BLOCKED",
        }
    }
}

impl FromStr for Status {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ACTIVE" => Ok(Status::Active),
            "BLOCKED" => Ok(Status::Blocked),
            _ => Err(ParseEnumError::Status(s.to_string())),
        }
    }
}

/// A user's verdict on a recipe. Serialized lowercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserOpinion {
    Like,
    Dislike,
    Neutral,
}

impl UserOpinion {
    pub const ALL: [UserOpinion; 3] = [UserOpinion::Like, UserOpinion::Dislike, UserOpinion::Neutral];

    /// Canonical (storage) name
    pub fn name(&self) -> &'static str {
        match self {
            UserOpinion::Like => "LIKE",
            UserOpinion::Dislike => "DISLIKE",
            UserOpinion::Neutral => "NEUTRAL",
        }
    }
}

impl fmt::Display for UserOpinion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name().to_ascii_lowercase())
    }
}

impl FromStr for UserOpinion {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|o| o.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseEnumError::Opinion(s.to_string()))
    }
}

/// Broad cuisine family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CuisineType {
    Caribbean,
    Asian,
    European,
    NorthAmerican,
    African,
    Jewish,
    CentralSouthAmerican,
    MiddleEastern,
    Other,
}

impl CuisineType {
    pub const ALL: [CuisineType; 9] = [
        CuisineType::Caribbean,
        CuisineType::Asian,
        CuisineType::European,
        CuisineType::NorthAmerican,
        CuisineType::African,
        CuisineType::Jewish,
        CuisineType::CentralSouthAmerican,
        CuisineType::MiddleEastern,
        CuisineType::Other,
    ];

    /// Canonical (storage) name, e.g. `NORTH_AMERICAN`
    pub fn name(&self) -> &'static str {
        match self {
            CuisineType::Caribbean => "CARIBBEAN",
            CuisineType::Asian => "ASIAN",
            CuisineType::European => "EUROPEAN",
            CuisineType::NorthAmerican => "NORTH_AMERICAN",
            CuisineType::African => "AFRICAN",
            CuisineType::Jewish => "JEWISH",
            CuisineType::CentralSouthAmerican => "CENTRAL_SOUTH_AMERICAN",
            CuisineType::MiddleEastern => "MIDDLE_EASTERN",
            CuisineType::Other => "OTHER",
        }
    }

    /// Human-readable name used on the wire, e.g. `North American`
    pub fn display_name(&self) -> &'static str {
        match self {
            CuisineType::Caribbean => "Caribbean",
            CuisineType::Asian => "Asian",
            CuisineType::European => "European",
            CuisineType::NorthAmerican => "North American",
            CuisineType::African => "African",
            CuisineType::Jewish => "Jewish",
            CuisineType::CentralSouthAmerican => "Central South American",
            CuisineType::MiddleEastern => "Middle Eastern",
            CuisineType::Other => "Other",
        }
    }

    /// Look up by canonical name only
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL.into_iter().find(|c| c.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for CuisineType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for CuisineType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.display_name().eq_ignore_ascii_case(trimmed))
            .or_else(|| Self::from_name(trimmed))
            .ok_or_else(|| ParseEnumError::Cuisine(s.to_string()))
    }
}

/// Dietary restriction a recipe satisfies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DietaryPreferenceType {
    Vegetarian,
    Vegan,
    GlutenFree,
    DairyFree,
}

impl DietaryPreferenceType {
    pub const ALL: [DietaryPreferenceType; 4] = [
        DietaryPreferenceType::Vegetarian,
        DietaryPreferenceType::Vegan,
        DietaryPreferenceType::GlutenFree,
        DietaryPreferenceType::DairyFree,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            DietaryPreferenceType::Vegetarian => "VEGETARIAN",
            DietaryPreferenceType::Vegan => "VEGAN",
            DietaryPreferenceType::GlutenFree => "GLUTEN_FREE",
            DietaryPreferenceType::DairyFree => "DAIRY_FREE",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            DietaryPreferenceType::Vegetarian => "Vegetarian",
            DietaryPreferenceType::Vegan => "Vegan",
            DietaryPreferenceType::GlutenFree => "Gluten-Free",
            DietaryPreferenceType::DairyFree => "Dairy-Free",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL.into_iter().find(|d| d.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for DietaryPreferenceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for DietaryPreferenceType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|d| d.display_name().eq_ignore_ascii_case(trimmed))
            .or_else(|| Self::from_name(trimmed))
            .ok_or_else(|| ParseEnumError::DietaryPreference(s.to_string()))
    }
}

/// Serde impls for enums whose wire form is their `Display` output and
/// whose input goes through `FromStr`.
macro_rules! display_serde {
    ($($ty:ty),+ $(,)?) => {$(
        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                raw.parse().map_err(de::Error::custom)
            }
        }
    )+};
}

display_serde!(UserOpinion, CuisineType, DietaryPreferenceType);

/// `TryFrom<String>` through `FromStr`, so rows can decode stored names directly
macro_rules! try_from_string {
    ($($ty:ty),+ $(,)?) => {$(
        impl TryFrom<String> for $ty {
            type Error = ParseEnumError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }
    )+};
}

try_from_string!(Role, Status, UserOpinion);

/// Where a recipe comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RecipeSource {
    MealDb,
    Tasty,
    User,
}

impl RecipeSource {
    pub const ALL: [RecipeSource; 3] = [RecipeSource::MealDb, RecipeSource::Tasty, RecipeSource::User];

    pub fn as_str(&self) -> &'static str {
        match self {
            RecipeSource::MealDb => "MealDb",
            RecipeSource::Tasty => "Tasty",
            RecipeSource::User => "User",
        }
    }
}

impl fmt::Display for RecipeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecipeSource {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseEnumError::Source(s.to_string()))
    }
}

/// Deserialize an optional enum where a blank string counts as absent
pub fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(de::Error::custom),
    }
}
