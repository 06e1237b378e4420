use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Membership type Bungie uses to search every platform at once.
pub const ALL_PLATFORMS: &str = "-1";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Platform {
    Xbox,
    Psn,
    Steam,
    Stadia,
    Epic,
}

impl Platform {
    pub fn membership_type(self) -> i32 {
        match self {
            Platform::Xbox => 1,
            Platform::Psn => 2,
            Platform::Steam => 3,
            Platform::Stadia => 5,
            Platform::Epic => 6,
        }
    }

    /// Membership type for a platform name, or [`ALL_PLATFORMS`] when the
    /// name is missing or unknown.
    pub fn resolve(name: Option<&str>) -> String {
        name.and_then(|n| n.parse::<Platform>().ok())
            .map(|p| p.membership_type().to_string())
            .unwrap_or_else(|| ALL_PLATFORMS.into())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown platform {0:?}")]
pub struct UnknownPlatform(String);

impl FromStr for Platform {
    type Err = UnknownPlatform;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "xbox" => Ok(Platform::Xbox),
            "psn" => Ok(Platform::Psn),
            "steam" => Ok(Platform::Steam),
            "stadia" => Ok(Platform::Stadia),
            "epic" => Ok(Platform::Epic),
            _ => Err(UnknownPlatform(s.into())),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Platform::Xbox => "xbox",
            Platform::Psn => "psn",
            Platform::Steam => "steam",
            Platform::Stadia => "stadia",
            Platform::Epic => "epic",
        };
        f.write_str(name)
    }
}

/// One entry of a player search result.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfoCard {
    pub membership_type: i32,
    pub membership_id: String,
    #[serde(default)]
    pub display_name: String,
    pub bungie_global_display_name: Option<String>,
    pub bungie_global_display_name_code: Option<u16>,
}

/// Paging and mode filter for activity history.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActivityQuery {
    pub mode: Option<i32>,
    pub page: u32,
    pub count: u32,
}

impl Default for ActivityQuery {
    fn default() -> Self {
        Self {
            mode: None,
            page: 0,
            count: 25,
        }
    }
}
