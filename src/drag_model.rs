use serde::{Deserialize, Serialize};

use crate::error::BallisticsError;

/// Standard reference projectile ("G function") a ballistic coefficient is
/// expressed against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DragModel {
    G1,
    G2,
    G3,
    G4,
    G5,
    G6,
    G7,
    G8,
}

impl DragModel {
    pub const ALL: [DragModel; 8] = [
        DragModel::G1,
        DragModel::G2,
        DragModel::G3,
        DragModel::G4,
        DragModel::G5,
        DragModel::G6,
        DragModel::G7,
        DragModel::G8,
    ];

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "G1" => Some(DragModel::G1),
            "G2" => Some(DragModel::G2),
            "G3" => Some(DragModel::G3),
            "G4" => Some(DragModel::G4),
            "G5" => Some(DragModel::G5),
            "G6" => Some(DragModel::G6),
            "G7" => Some(DragModel::G7),
            "G8" => Some(DragModel::G8),
            _ => None,
        }
    }

    /// Numeric identifier used by the C interface (G1 = 1 ... G8 = 8)
    pub fn from_id(id: i32) -> Option<Self> {
        match id {
            1..=8 => Some(Self::ALL[(id - 1) as usize]),
            _ => None,
        }
    }

    pub fn id(self) -> i32 {
        self as i32 + 1
    }

    pub fn description(self) -> &'static str {
        match self {
            DragModel::G1 => "flat base, blunt nose (Ingalls)",
            DragModel::G2 => "Aberdeen J projectile",
            DragModel::G3 => "no standard retardation fit",
            DragModel::G4 => "no standard retardation fit",
            DragModel::G5 => "short 7.5 degree boat-tail, 6.19 caliber tangent ogive",
            DragModel::G6 => "flat base, 6 caliber secant ogive",
            DragModel::G7 => "long 7.5 degree boat-tail, 10 caliber tangent ogive",
            DragModel::G8 => "flat base, 10 caliber secant ogive",
        }
    }
}

impl std::fmt::Display for DragModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::str::FromStr for DragModel {
    type Err = BallisticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DragModel::from_str(s).ok_or_else(|| BallisticsError::UnknownDragModel(s.to_string()))
    }
}

impl TryFrom<String> for DragModel {
    type Error = BallisticsError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DragModel> for String {
    fn from(model: DragModel) -> Self {
        model.to_string()
    }
}
