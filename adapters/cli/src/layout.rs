//! Scripted tower layouts supplied on the command line as `kind@x,y`.

use std::str::FromStr;

use thiserror::Error;
use zombie_defence_core::{GridPosition, TowerKind};

/// Separates the tower kind from its coordinates.
const KIND_DELIMITER: char = '@';
/// Separates the column from the row.
const COORDINATE_DELIMITER: char = ',';

/// Tower to build before the session starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct TowerPlacement {
    /// Type of tower to build.
    pub(crate) kind: TowerKind,
    /// Cell receiving the tower.
    pub(crate) position: GridPosition,
}

/// Errors raised while parsing a `kind@x,y` placement.
#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum LayoutError {
    /// The value was empty or contained only whitespace.
    #[error("tower placement was empty")]
    Empty,
    /// The `@` between kind and coordinates was missing.
    #[error("expected kind@x,y but found '{0}'")]
    MissingSeparator(String),
    /// The tower kind is not one of the known names.
    #[error("unknown tower kind '{0}' (expected one of knight, archer, cannon, gold_miner, blacksmith)")]
    UnknownKind(String),
    /// The coordinates could not be parsed as two unsigned integers.
    #[error("could not parse coordinates '{0}'")]
    InvalidCoordinates(String),
}

impl FromStr for TowerPlacement {
    type Err = LayoutError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(LayoutError::Empty);
        }

        let (kind, coordinates) = trimmed
            .split_once(KIND_DELIMITER)
            .ok_or_else(|| LayoutError::MissingSeparator(trimmed.to_owned()))?;

        let normalized = kind.trim().to_ascii_lowercase().replace('-', "_");
        let kind = TowerKind::from_name(&normalized)
            .ok_or_else(|| LayoutError::UnknownKind(kind.trim().to_owned()))?;

        Ok(Self {
            kind,
            position: parse_coordinates(coordinates)?,
        })
    }
}

fn parse_coordinates(coordinates: &str) -> Result<GridPosition, LayoutError> {
    let invalid = || LayoutError::InvalidCoordinates(coordinates.to_owned());
    let (x, y) = coordinates
        .split_once(COORDINATE_DELIMITER)
        .ok_or_else(invalid)?;
    let x = x.trim().parse::<u32>().map_err(|_| invalid())?;
    let y = y.trim().parse::<u32>().map_err(|_| invalid())?;
    Ok(GridPosition::new(x, y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_kind_and_coordinates() {
        assert_eq!(
            "archer@1,2".parse::<TowerPlacement>(),
            Ok(TowerPlacement {
                kind: TowerKind::Archer,
                position: GridPosition::new(1, 2),
            })
        );
    }

    #[test]
    fn accepts_whitespace_and_dashed_names() {
        assert_eq!(
            " Gold-Miner@ 4 , 7 ".parse::<TowerPlacement>(),
            Ok(TowerPlacement {
                kind: TowerKind::GoldMiner,
                position: GridPosition::new(4, 7),
            })
        );
    }

    #[test]
    fn rejects_malformed_placements() {
        assert_eq!("  ".parse::<TowerPlacement>(), Err(LayoutError::Empty));
        assert_eq!(
            "knight 1,2".parse::<TowerPlacement>(),
            Err(LayoutError::MissingSeparator("knight 1,2".to_owned()))
        );
        assert_eq!(
            "wizard@1,2".parse::<TowerPlacement>(),
            Err(LayoutError::UnknownKind("wizard".to_owned()))
        );
        assert_eq!(
            "cannon@1".parse::<TowerPlacement>(),
            Err(LayoutError::InvalidCoordinates("1".to_owned()))
        );
        assert_eq!(
            "cannon@-1,2".parse::<TowerPlacement>(),
            Err(LayoutError::InvalidCoordinates("-1,2".to_owned()))
        );
    }
}
