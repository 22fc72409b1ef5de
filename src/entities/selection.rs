use serde::{Deserialize, Serialize};

use crate::entities::Coordinate;

/// Origin/destination selection for one session. A destination can only
/// exist alongside an origin, which the variants make unrepresentable
/// otherwise.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum Selection {
    #[default]
    Empty,
    OriginSet {
        origin: Coordinate,
    },
    BothSet {
        origin: Coordinate,
        destination: Coordinate,
    },
}

/// What a map click did to the selection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Transition {
    OriginSelected(Coordinate),
    DestinationSelected {
        origin: Coordinate,
        destination: Coordinate,
    },
    /// Both points are already set; the click needs confirmation before it
    /// may replace the origin. The selection is untouched.
    ReplaceRequested(Coordinate),
}

impl Selection {
    pub fn name(&self) -> String {
        match self {
            Self::Empty => "empty".into(),
            Self::OriginSet { .. } => "origin_set".into(),
            Self::BothSet { .. } => "both_set".into(),
        }
    }

    pub fn origin(&self) -> Option<Coordinate> {
        match self {
            Self::Empty => None,
            Self::OriginSet { origin } | Self::BothSet { origin, .. } => Some(*origin),
        }
    }

    pub fn destination(&self) -> Option<Coordinate> {
        match self {
            Self::BothSet { destination, .. } => Some(*destination),
            _ => None,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, Self::BothSet { .. })
    }

    #[tracing::instrument]
    pub fn select(&mut self, point: Coordinate) -> Transition {
        match *self {
            Self::Empty => {
                *self = Self::OriginSet { origin: point };
                Transition::OriginSelected(point)
            }
            Self::OriginSet { origin } => {
                *self = Self::BothSet {
                    origin,
                    destination: point,
                };
                Transition::DestinationSelected {
                    origin,
                    destination: point,
                }
            }
            Self::BothSet { .. } => Transition::ReplaceRequested(point),
        }
    }

    /// Clears both points together.
    pub fn reset(&mut self) {
        *self = Self::Empty;
    }
}
