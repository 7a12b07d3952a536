//! Productivity coefficients per work type and role
//!
//! A coefficient is the number of quantity units (m³, m², or kg of rebar)
//! one worker of a role completes in one day. Two calibration profiles
//! exist and are not numerically reconcilable, so a process picks one at
//! start-up and every estimate it produces uses that profile only:
//!
//! - [`Profile::ThreeRole`]: foreman, skilled, and unskilled coefficients for
//!   every work type. Sub-variants never change the numbers, so each work
//!   type has a single row.
//! - [`Profile::TwoRole`]: foreman and unskilled coefficients, with roofing
//!   as a three-role exception. Concrete members, painted surfaces, and tile
//!   placement have their own rows.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::error::EstimateError;
use crate::core::work::{normalize, ParseError, Role, SubVariant, WorkType};

/// Calibration profile of the productivity table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Profile {
    /// Profile A: special, special2, and labor for every work type
    #[default]
    ThreeRole,
    /// Profile B: special and labor, roofing adds special2
    TwoRole,
}

impl Profile {
    pub fn as_str(&self) -> &'static str {
        match self {
            Profile::ThreeRole => "three-role",
            Profile::TwoRole => "two-role",
        }
    }

    pub fn all() -> &'static [Profile] {
        &[Profile::ThreeRole, Profile::TwoRole]
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Profile {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "three-role" | "three" | "a" | "profile-a" => Ok(Profile::ThreeRole),
            "two-role" | "two" | "b" | "profile-b" => Ok(Profile::TwoRole),
            _ => Err(ParseError::UnknownProfile(s.to_string())),
        }
    }
}

/// Coefficient row selector within a work type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Bucket {
    /// Single row for the whole work type
    All,
    /// Concrete floor slabs and footings
    SlabOrFooting,
    /// Concrete columns and beams
    OtherMember,
    InteriorWall,
    ExteriorWall,
    /// Painting both faces, or unspecified
    BothWalls,
    FloorTile,
    /// Wall tile, or unspecified
    OtherTile,
}

impl Bucket {
    pub fn as_str(&self) -> &'static str {
        match self {
            Bucket::All => "all",
            Bucket::SlabOrFooting => "slab-or-footing",
            Bucket::OtherMember => "other-member",
            Bucket::InteriorWall => "interior-wall",
            Bucket::ExteriorWall => "exterior-wall",
            Bucket::BothWalls => "both-walls",
            Bucket::FloorTile => "floor-tile",
            Bucket::OtherTile => "other-tile",
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-role daily output for one table row
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coefficients {
    pub special: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special2: Option<f64>,
    pub labor: f64,
}

impl Coefficients {
    const fn two(special: f64, labor: f64) -> Self {
        Self {
            special,
            special2: None,
            labor,
        }
    }

    const fn three(special: f64, special2: f64, labor: f64) -> Self {
        Self {
            special,
            special2: Some(special2),
            labor,
        }
    }

    /// Coefficient for a role, `None` if the role does not take part
    pub fn get(&self, role: Role) -> Option<f64> {
        match role {
            Role::Special => Some(self.special),
            Role::Special2 => self.special2,
            Role::Labor => Some(self.labor),
        }
    }

    /// Participating roles with their coefficients, in reporting order
    pub fn roles(&self) -> impl Iterator<Item = (Role, f64)> + '_ {
        Role::all()
            .iter()
            .filter_map(move |role| self.get(*role).map(|c| (*role, c)))
    }

    pub fn role_count(&self) -> usize {
        self.roles().count()
    }
}

/// One row of the productivity table
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Row {
    pub work_type: WorkType,
    pub bucket: Bucket,
    pub coefficients: Coefficients,
}

const fn row(work_type: WorkType, bucket: Bucket, coefficients: Coefficients) -> Row {
    Row {
        work_type,
        bucket,
        coefficients,
    }
}

static THREE_ROLE_ROWS: [Row; 6] = [
    row(WorkType::Concrete, Bucket::All, Coefficients::three(5.0507, 1.6836, 0.8418)),
    row(WorkType::Masonry, Bucket::All, Coefficients::three(7.65, 15.3, 7.65)),
    row(WorkType::Steel, Bucket::All, Coefficients::three(1059.2345, 264.8086, 88.2695)),
    row(WorkType::Painting, Bucket::All, Coefficients::three(8.4, 4.2, 8.4)),
    row(WorkType::Roof, Bucket::All, Coefficients::three(4.152, 4.152, 8.304)),
    row(WorkType::Tile, Bucket::All, Coefficients::three(0.9927, 4.9636, 4.963636364)),
];

static TWO_ROLE_ROWS: [Row; 10] = [
    row(WorkType::Concrete, Bucket::SlabOrFooting, Coefficients::two(4.04444, 1.15556)),
    row(WorkType::Concrete, Bucket::OtherMember, Coefficients::two(2.17778, 0.62222)),
    row(WorkType::Masonry, Bucket::All, Coefficients::two(3.33333, 3.33333)),
    row(WorkType::Steel, Bucket::All, Coefficients::two(180.0, 45.0)),
    row(WorkType::Painting, Bucket::InteriorWall, Coefficients::two(5.0, 5.0)),
    row(WorkType::Painting, Bucket::ExteriorWall, Coefficients::two(4.0, 4.0)),
    row(WorkType::Painting, Bucket::BothWalls, Coefficients::two(4.5, 4.5)),
    row(WorkType::Roof, Bucket::All, Coefficients::three(8.0, 8.0, 8.0)),
    row(WorkType::Tile, Bucket::FloorTile, Coefficients::two(1.84, 1.84)),
    row(WorkType::Tile, Bucket::OtherTile, Coefficients::two(1.52, 1.52)),
];

static THREE_ROLE: ProductivityTable = ProductivityTable {
    profile: Profile::ThreeRole,
    rows: &THREE_ROLE_ROWS,
};

static TWO_ROLE: ProductivityTable = ProductivityTable {
    profile: Profile::TwoRole,
    rows: &TWO_ROLE_ROWS,
};

/// Read-only coefficient table for one calibration profile
#[derive(Debug)]
pub struct ProductivityTable {
    profile: Profile,
    rows: &'static [Row],
}

impl ProductivityTable {
    /// The process-wide table for a profile
    pub fn for_profile(profile: Profile) -> &'static ProductivityTable {
        match profile {
            Profile::ThreeRole => &THREE_ROLE,
            Profile::TwoRole => &TWO_ROLE,
        }
    }

    pub fn profile(&self) -> Profile {
        self.profile
    }

    pub fn rows(&self) -> &'static [Row] {
        self.rows
    }

    /// Which row of `work_type` a sub-variant falls into under this profile
    pub fn bucket(
        &self,
        work_type: WorkType,
        sub_variant: Option<SubVariant>,
    ) -> Result<Bucket, EstimateError> {
        if let Some(sub) = sub_variant {
            if !work_type.accepts(sub) {
                return Err(EstimateError::UnsupportedWorkType {
                    work_type,
                    sub_variant,
                });
            }
        }

        if self.profile == Profile::ThreeRole {
            return Ok(Bucket::All);
        }

        let bucket = match (work_type, sub_variant) {
            (WorkType::Concrete, Some(SubVariant::FloorSlab | SubVariant::Footing)) => {
                Bucket::SlabOrFooting
            }
            (WorkType::Concrete, _) => Bucket::OtherMember,
            (WorkType::Painting, Some(SubVariant::InteriorWall)) => Bucket::InteriorWall,
            (WorkType::Painting, Some(SubVariant::ExteriorWall)) => Bucket::ExteriorWall,
            (WorkType::Painting, _) => Bucket::BothWalls,
            (WorkType::Tile, Some(SubVariant::FloorTile)) => Bucket::FloorTile,
            (WorkType::Tile, _) => Bucket::OtherTile,
            (WorkType::Masonry | WorkType::Steel | WorkType::Roof, _) => Bucket::All,
        };
        Ok(bucket)
    }

    /// Coefficients for a work type and optional sub-variant
    pub fn lookup(
        &self,
        work_type: WorkType,
        sub_variant: Option<SubVariant>,
    ) -> Result<&'static Coefficients, EstimateError> {
        let bucket = self.bucket(work_type, sub_variant)?;
        self.rows
            .iter()
            .find(|r| r.work_type == work_type && r.bucket == bucket)
            .map(|r| &r.coefficients)
            .ok_or(EstimateError::UnsupportedWorkType {
                work_type,
                sub_variant,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_role_has_every_work_type_with_three_roles() {
        let table = ProductivityTable::for_profile(Profile::ThreeRole);
        for wt in WorkType::all() {
            let c = table.lookup(*wt, None).unwrap();
            assert_eq!(c.role_count(), 3, "{} should have three roles", wt);
        }
    }

    #[test]
    fn test_three_role_ignores_sub_variant() {
        let table = ProductivityTable::for_profile(Profile::ThreeRole);
        let slab = table.lookup(WorkType::Concrete, Some(SubVariant::FloorSlab)).unwrap();
        let column = table.lookup(WorkType::Concrete, Some(SubVariant::Column)).unwrap();
        assert_eq!(slab, column);
        assert_eq!(slab.special, 5.0507);
        assert_eq!(slab.special2, Some(1.6836));
        assert_eq!(slab.labor, 0.8418);
    }

    #[test]
    fn test_three_role_values() {
        let table = ProductivityTable::for_profile(Profile::ThreeRole);
        let steel = table.lookup(WorkType::Steel, None).unwrap();
        assert_eq!(steel.special, 1059.2345);
        assert_eq!(steel.special2, Some(264.8086));
        assert_eq!(steel.labor, 88.2695);

        let roof = table.lookup(WorkType::Roof, None).unwrap();
        assert_eq!(roof.special, roof.special2.unwrap());
        assert_eq!(roof.labor, 2.0 * roof.special);

        let tile = table.lookup(WorkType::Tile, Some(SubVariant::WallTile)).unwrap();
        assert_eq!(tile.labor, 4.963636364);
    }

    #[test]
    fn test_two_role_concrete_buckets_differ() {
        let table = ProductivityTable::for_profile(Profile::TwoRole);
        let footing = table.lookup(WorkType::Concrete, Some(SubVariant::Footing)).unwrap();
        let beam = table.lookup(WorkType::Concrete, Some(SubVariant::GradeBeam)).unwrap();
        let unspecified = table.lookup(WorkType::Concrete, None).unwrap();

        assert_eq!(footing.special, 4.04444);
        assert_eq!(footing.labor, 1.15556);
        assert_eq!(footing.special2, None);
        assert_eq!(beam.special, 2.17778);
        assert_eq!(beam.labor, 0.62222);
        assert_eq!(unspecified, beam);
    }

    #[test]
    fn test_two_role_painting_and_tile_branches() {
        let table = ProductivityTable::for_profile(Profile::TwoRole);
        let interior = table.lookup(WorkType::Painting, Some(SubVariant::InteriorWall)).unwrap();
        let exterior = table.lookup(WorkType::Painting, Some(SubVariant::ExteriorWall)).unwrap();
        let both = table.lookup(WorkType::Painting, Some(SubVariant::Both)).unwrap();
        let default = table.lookup(WorkType::Painting, None).unwrap();
        assert_eq!((interior.special, interior.labor), (5.0, 5.0));
        assert_eq!((exterior.special, exterior.labor), (4.0, 4.0));
        assert_eq!((both.special, both.labor), (4.5, 4.5));
        assert_eq!(default, both);

        let floor = table.lookup(WorkType::Tile, Some(SubVariant::FloorTile)).unwrap();
        let wall = table.lookup(WorkType::Tile, Some(SubVariant::WallTile)).unwrap();
        assert_eq!(floor.special, 1.84);
        assert_eq!(wall.special, 1.52);
    }

    #[test]
    fn test_two_role_roof_is_three_role_exception() {
        let table = ProductivityTable::for_profile(Profile::TwoRole);
        let roof = table.lookup(WorkType::Roof, None).unwrap();
        assert_eq!(roof.role_count(), 3);
        assert_eq!(roof.special2, Some(8.0));
        assert_eq!(table.lookup(WorkType::Steel, None).unwrap().role_count(), 2);
    }

    #[test]
    fn test_foreign_sub_variant_is_unsupported() {
        for profile in Profile::all() {
            let table = ProductivityTable::for_profile(*profile);
            let err = table
                .lookup(WorkType::Masonry, Some(SubVariant::Footing))
                .unwrap_err();
            assert!(matches!(err, EstimateError::UnsupportedWorkType { .. }));
        }
    }

    #[test]
    fn test_every_coefficient_positive() {
        for profile in Profile::all() {
            for row in ProductivityTable::for_profile(*profile).rows() {
                for (_, c) in row.coefficients.roles() {
                    assert!(c > 0.0);
                }
            }
        }
    }

    #[test]
    fn test_profile_parse() {
        assert_eq!("three-role".parse::<Profile>().unwrap(), Profile::ThreeRole);
        assert_eq!("Profile B".parse::<Profile>().unwrap(), Profile::TwoRole);
        assert!("four-role".parse::<Profile>().is_err());
    }
}
