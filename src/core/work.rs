//! Work types, sub-variants, and labor roles

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Kind of construction activity being estimated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WorkType {
    /// Cast-in-place concrete members
    Concrete,
    /// Concrete hollow block (CHB) wall laying
    Masonry,
    /// Rebar cutting, bending, and tying
    Steel,
    /// Wall painting
    Painting,
    /// Roof sheeting and framing
    Roof,
    /// Floor and wall tiling
    Tile,
}

impl WorkType {
    /// Short machine name, as used in request files and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkType::Concrete => "concrete",
            WorkType::Masonry => "masonry",
            WorkType::Steel => "steel",
            WorkType::Painting => "painting",
            WorkType::Roof => "roof",
            WorkType::Tile => "tile",
        }
    }

    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            WorkType::Concrete => "Concrete Works",
            WorkType::Masonry => "Masonry Works",
            WorkType::Steel => "Steel Works",
            WorkType::Painting => "Painting Works",
            WorkType::Roof => "Roof Works",
            WorkType::Tile => "Tile Works",
        }
    }

    /// Short label used in menus ("CHB Laying" for masonry)
    pub fn menu_label(&self) -> &'static str {
        match self {
            WorkType::Concrete => "Concrete",
            WorkType::Masonry => "CHB Laying",
            WorkType::Steel => "Steel Works",
            WorkType::Painting => "Painting",
            WorkType::Roof => "Roof",
            WorkType::Tile => "Tile",
        }
    }

    /// All work types, in menu order
    pub fn all() -> &'static [WorkType] {
        &[
            WorkType::Concrete,
            WorkType::Masonry,
            WorkType::Steel,
            WorkType::Tile,
            WorkType::Painting,
            WorkType::Roof,
        ]
    }

    /// Sub-variants that are meaningful for this work type (empty if none)
    pub fn sub_variants(&self) -> &'static [SubVariant] {
        match self {
            WorkType::Concrete => &[
                SubVariant::Footing,
                SubVariant::Column,
                SubVariant::FloorSlab,
                SubVariant::GradeBeam,
                SubVariant::RoofBeam,
            ],
            WorkType::Painting => &[
                SubVariant::ExteriorWall,
                SubVariant::InteriorWall,
                SubVariant::Both,
            ],
            WorkType::Tile => &[SubVariant::FloorTile, SubVariant::WallTile],
            WorkType::Masonry | WorkType::Steel | WorkType::Roof => &[],
        }
    }

    /// Whether `sub` belongs to this work type
    pub fn accepts(&self, sub: SubVariant) -> bool {
        self.sub_variants().contains(&sub)
    }
}

impl fmt::Display for WorkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for WorkType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = normalize(s);
        let key = key.strip_suffix("-works").unwrap_or(&key);
        match key {
            "concrete" => Ok(WorkType::Concrete),
            "masonry" | "chb" | "chb-laying" => Ok(WorkType::Masonry),
            "steel" | "rebar" => Ok(WorkType::Steel),
            "painting" | "paint" => Ok(WorkType::Painting),
            "roof" | "roofing" => Ok(WorkType::Roof),
            "tile" | "tiling" => Ok(WorkType::Tile),
            _ => Err(ParseError::UnknownWorkType(s.to_string())),
        }
    }
}

/// Secondary discriminator for work types with member or surface variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SubVariant {
    // Concrete members
    Footing,
    Column,
    FloorSlab,
    GradeBeam,
    RoofBeam,
    // Painting surfaces
    InteriorWall,
    ExteriorWall,
    Both,
    // Tile placement
    FloorTile,
    WallTile,
}

impl SubVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubVariant::Footing => "footing",
            SubVariant::Column => "column",
            SubVariant::FloorSlab => "floor-slab",
            SubVariant::GradeBeam => "grade-beam",
            SubVariant::RoofBeam => "roof-beam",
            SubVariant::InteriorWall => "interior-wall",
            SubVariant::ExteriorWall => "exterior-wall",
            SubVariant::Both => "both",
            SubVariant::FloorTile => "floor-tile",
            SubVariant::WallTile => "wall-tile",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SubVariant::Footing => "Footing",
            SubVariant::Column => "Column",
            SubVariant::FloorSlab => "Floor Slab",
            SubVariant::GradeBeam => "Grade Beam",
            SubVariant::RoofBeam => "Roof Beam",
            SubVariant::InteriorWall => "Interior Wall",
            SubVariant::ExteriorWall => "Exterior Wall",
            SubVariant::Both => "Both",
            SubVariant::FloorTile => "Floor Tile",
            SubVariant::WallTile => "Wall Tile",
        }
    }

    /// The work type this sub-variant belongs to
    pub fn work_type(&self) -> WorkType {
        match self {
            SubVariant::Footing
            | SubVariant::Column
            | SubVariant::FloorSlab
            | SubVariant::GradeBeam
            | SubVariant::RoofBeam => WorkType::Concrete,
            SubVariant::InteriorWall | SubVariant::ExteriorWall | SubVariant::Both => {
                WorkType::Painting
            }
            SubVariant::FloorTile | SubVariant::WallTile => WorkType::Tile,
        }
    }
}

impl fmt::Display for SubVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SubVariant {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "footing" => Ok(SubVariant::Footing),
            "column" => Ok(SubVariant::Column),
            "floor-slab" | "slab" => Ok(SubVariant::FloorSlab),
            "grade-beam" => Ok(SubVariant::GradeBeam),
            "roof-beam" => Ok(SubVariant::RoofBeam),
            "interior-wall" | "interior" => Ok(SubVariant::InteriorWall),
            "exterior-wall" | "exterior" => Ok(SubVariant::ExteriorWall),
            "both" => Ok(SubVariant::Both),
            "floor-tile" | "floor" => Ok(SubVariant::FloorTile),
            "wall-tile" | "wall" => Ok(SubVariant::WallTile),
            _ => Err(ParseError::UnknownSubVariant(s.to_string())),
        }
    }
}

/// Labor role participating in a work item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Foreman or lead skilled worker
    Special,
    /// Secondary skilled worker (welder on roofs)
    Special2,
    /// Unskilled labor
    Labor,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Special => "special",
            Role::Special2 => "special2",
            Role::Labor => "labor",
        }
    }

    /// All roles, in reporting order
    pub fn all() -> &'static [Role] {
        &[Role::Special, Role::Special2, Role::Labor]
    }

    /// Crew label shown to site staff; depends on the trade
    pub fn label(&self, work_type: WorkType) -> &'static str {
        match (self, work_type) {
            (Role::Special, WorkType::Steel) => "Skilled",
            (Role::Special, WorkType::Painting) => "Painter",
            (Role::Special, _) => "Foreman",
            (Role::Special2, WorkType::Roof) => "Welder",
            (Role::Special2, _) => "Skilled",
            (Role::Labor, _) => "Unskilled",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Errors parsing user-supplied names
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Unknown work type: '{0}' (expected one of concrete, masonry, steel, painting, roof, tile)")]
    UnknownWorkType(String),

    #[error("Unknown sub-variant: '{0}'")]
    UnknownSubVariant(String),

    #[error("Unknown unit: '{0}' (expected one of m, mm, cm, in, ft)")]
    UnknownUnit(String),

    #[error("Unknown productivity profile: '{0}' (expected three-role or two-role)")]
    UnknownProfile(String),
}

/// Lowercase and collapse spaces/underscores to dashes ("Floor Slab" -> "floor-slab")
pub(crate) fn normalize(s: &str) -> String {
    s.trim()
        .to_lowercase()
        .split(|c: char| c.is_whitespace() || c == '_' || c == '-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_work_type_parse_short_and_display_names() {
        assert_eq!("concrete".parse::<WorkType>().unwrap(), WorkType::Concrete);
        assert_eq!("Concrete Works".parse::<WorkType>().unwrap(), WorkType::Concrete);
        assert_eq!("CHB Laying".parse::<WorkType>().unwrap(), WorkType::Masonry);
        assert_eq!("Roof Works".parse::<WorkType>().unwrap(), WorkType::Roof);
        assert!("plumbing".parse::<WorkType>().is_err());
    }

    #[test]
    fn test_sub_variant_parse() {
        assert_eq!("Floor Slab".parse::<SubVariant>().unwrap(), SubVariant::FloorSlab);
        assert_eq!("floor_slab".parse::<SubVariant>().unwrap(), SubVariant::FloorSlab);
        assert_eq!("wall-tile".parse::<SubVariant>().unwrap(), SubVariant::WallTile);
        assert!("gable".parse::<SubVariant>().is_err());
    }

    #[test]
    fn test_sub_variants_belong_to_their_work_type() {
        for wt in WorkType::all() {
            for sub in wt.sub_variants() {
                assert_eq!(sub.work_type(), *wt);
                assert!(wt.accepts(*sub));
            }
        }
        assert!(WorkType::Masonry.sub_variants().is_empty());
        assert!(!WorkType::Tile.accepts(SubVariant::Footing));
    }

    #[test]
    fn test_role_labels() {
        assert_eq!(Role::Special.label(WorkType::Concrete), "Foreman");
        assert_eq!(Role::Special.label(WorkType::Steel), "Skilled");
        assert_eq!(Role::Special.label(WorkType::Painting), "Painter");
        assert_eq!(Role::Special2.label(WorkType::Roof), "Welder");
        assert_eq!(Role::Labor.label(WorkType::Tile), "Unskilled");
    }

    #[test]
    fn test_serde_kebab_case() {
        let yaml = serde_yml::to_string(&SubVariant::GradeBeam).unwrap();
        assert!(yaml.contains("grade-beam"));
        let parsed: WorkType = serde_yml::from_str("painting").unwrap();
        assert_eq!(parsed, WorkType::Painting);
    }
}
