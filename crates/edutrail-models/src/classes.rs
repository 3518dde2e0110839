//! Classes, the root of the hierarchy.

use edutrail_core::serde::{deserialize_null_as_empty, deserialize_optional_string};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ids::ClassId;

/// Language section a class is taught in. Also the filter tab on the class listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Section {
    Francophone,
    Anglophone,
}

impl Section {
    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Francophone => "FRANCOPHONE",
            Section::Anglophone => "ANGLOPHONE",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Section {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "FRANCOPHONE" | "FR" => Ok(Section::Francophone),
            "ANGLOPHONE" | "EN" => Ok(Section::Anglophone),
            other => Err(format!("unknown section: {}", other)),
        }
    }
}

/// Education stage a class belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EducationLevel {
    Nursery,
    Primary,
    SecondaryFirstCycle,
    SecondarySecondCycle,
    Higher,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassEntity {
    pub id: ClassId,
    pub name: String,
    pub section: Section,
    pub level: EducationLevel,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub speciality: Option<String>,
    #[serde(default, deserialize_with = "deserialize_null_as_empty")]
    pub description: String,
}

impl ClassEntity {
    /// Name shown in listings and breadcrumbs, e.g. `Terminale (C)`.
    pub fn display_name(&self) -> String {
        match &self.speciality {
            Some(speciality) => format!("{} ({})", self.name, speciality),
            None => self.name.clone(),
        }
    }
}
