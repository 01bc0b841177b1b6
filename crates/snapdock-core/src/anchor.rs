#![forbid(unsafe_code)]

//! Anchor placement and anchor selection.
//!
//! An [`Anchor`] names one of eight snap positions around the viewport
//! perimeter. [`anchor_to_position`] maps an anchor to the top-left corner of
//! a window resting there, [`position_to_anchor`] inverts that mapping, and
//! the two pickers ([`closest_by_distance`], [`closest_by_angle`]) choose a
//! landing anchor from a configured [`AnchorSet`] when a drag is released.
//!
//! # Invariants
//!
//! 1. For any non-degenerate [`Placement`] (all eight placements distinct),
//!    `position_to_anchor(anchor_to_position(a, p), p) == a`.
//! 2. Pickers only ever return members of the candidate set.
//! 3. No function here panics or returns `NaN` for finite input.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::vector::Vector2;

/// Angle difference (radians) under which two candidates count as a tie in
/// [`closest_by_angle`].
pub const DEFAULT_ANGLE_TIE_EPSILON: f64 = 0.1;

/// Fixed evaluation order for [`position_to_anchor`]. The first anchor at the
/// minimal distance wins.
pub const ANCHOR_EVALUATION_ORDER: [Anchor; 8] = [
    Anchor::NE,
    Anchor::N,
    Anchor::NW,
    Anchor::E,
    Anchor::W,
    Anchor::SE,
    Anchor::S,
    Anchor::SW,
];

/// Named snap position: four corners and four edge midpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Anchor {
    #[default]
    NW,
    N,
    NE,
    W,
    E,
    SW,
    S,
    SE,
}

/// Horizontal alignment component of an anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Start,
    Center,
    End,
}

/// Vertical alignment component of an anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Row {
    Start,
    Center,
    End,
}

impl Anchor {
    /// All anchors in declaration order.
    pub const ALL: [Anchor; 8] = [
        Anchor::NW,
        Anchor::N,
        Anchor::NE,
        Anchor::W,
        Anchor::E,
        Anchor::SW,
        Anchor::S,
        Anchor::SE,
    ];

    /// Canonical upper-case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NW => "NW",
            Self::N => "N",
            Self::NE => "NE",
            Self::W => "W",
            Self::E => "E",
            Self::SW => "SW",
            Self::S => "S",
            Self::SE => "SE",
        }
    }

    /// Parse a name, falling back to [`Anchor::NW`] for anything unrecognized.
    #[must_use]
    pub fn parse_lenient(name: &str) -> Self {
        name.parse().unwrap_or_default()
    }

    /// The anchor on the far side of the window. A resize handle for a window
    /// pinned at `self` is drawn here.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::NW => Self::SE,
            Self::N => Self::S,
            Self::NE => Self::SW,
            Self::W => Self::E,
            Self::E => Self::W,
            Self::SW => Self::NE,
            Self::S => Self::N,
            Self::SE => Self::NW,
        }
    }

    /// True for `NE`, `E`, `SE`.
    #[must_use]
    pub const fn is_east(self) -> bool {
        matches!(self.column(), Column::End)
    }

    /// True for `NW`, `W`, `SW`.
    #[must_use]
    pub const fn is_west(self) -> bool {
        matches!(self.column(), Column::Start)
    }

    const fn column(self) -> Column {
        match self {
            Self::NW | Self::W | Self::SW => Column::Start,
            Self::N | Self::S => Column::Center,
            Self::NE | Self::E | Self::SE => Column::End,
        }
    }

    const fn row(self) -> Row {
        match self {
            Self::NW | Self::N | Self::NE => Row::Start,
            Self::W | Self::E => Row::Center,
            Self::SW | Self::S | Self::SE => Row::End,
        }
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strict anchor name parse failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchorParseError {
    pub name: String,
}

impl fmt::Display for AnchorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown anchor name {:?}", self.name)
    }
}

impl std::error::Error for AnchorParseError {}

impl FromStr for Anchor {
    type Err = AnchorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Anchor::ALL
            .into_iter()
            .find(|anchor| anchor.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| AnchorParseError {
                name: s.to_owned(),
            })
    }
}

/// Ordered, non-empty, duplicate-free anchor list. The first entry is the
/// default anchor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Anchor>", into = "Vec<Anchor>")]
pub struct AnchorSet {
    anchors: Vec<Anchor>,
}

/// Errors while building an [`AnchorSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorSetError {
    Empty,
}

impl fmt::Display for AnchorSetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "anchor set must contain at least one anchor"),
        }
    }
}

impl std::error::Error for AnchorSetError {}

impl AnchorSet {
    /// Build from anchors in priority order. Later duplicates are dropped.
    pub fn new(anchors: impl IntoIterator<Item = Anchor>) -> Result<Self, AnchorSetError> {
        let mut unique: Vec<Anchor> = Vec::with_capacity(Anchor::ALL.len());
        for anchor in anchors {
            if !unique.contains(&anchor) {
                unique.push(anchor);
            }
        }
        if unique.is_empty() {
            return Err(AnchorSetError::Empty);
        }
        Ok(Self { anchors: unique })
    }

    /// Build from raw names; unrecognized names resolve to [`Anchor::NW`].
    pub fn from_names<S: AsRef<str>>(
        names: impl IntoIterator<Item = S>,
    ) -> Result<Self, AnchorSetError> {
        Self::new(
            names
                .into_iter()
                .map(|name| Anchor::parse_lenient(name.as_ref())),
        )
    }

    /// A set containing all eight anchors, `NW` first.
    #[must_use]
    pub fn all() -> Self {
        Self {
            anchors: Anchor::ALL.to_vec(),
        }
    }

    /// The default (first-listed) anchor.
    #[must_use]
    pub fn default_anchor(&self) -> Anchor {
        self.anchors[0]
    }

    #[must_use]
    pub fn contains(&self, anchor: Anchor) -> bool {
        self.anchors.contains(&anchor)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    /// Always false; kept for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Anchor> + '_ {
        self.anchors.iter().copied()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Anchor] {
        &self.anchors
    }
}

impl Default for AnchorSet {
    fn default() -> Self {
        Self {
            anchors: vec![Anchor::NW],
        }
    }
}

impl TryFrom<Vec<Anchor>> for AnchorSet {
    type Error = AnchorSetError;

    fn try_from(anchors: Vec<Anchor>) -> Result<Self, Self::Error> {
        Self::new(anchors)
    }
}

impl From<AnchorSet> for Vec<Anchor> {
    fn from(set: AnchorSet) -> Self {
        set.anchors
    }
}

/// Placement context shared by every anchor computation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    /// Gap kept between a resting window and the viewport edges.
    pub margin: f64,
    pub element_size: Vector2,
    pub viewport_size: Vector2,
}

impl Placement {
    #[must_use]
    pub const fn new(margin: f64, element_size: Vector2, viewport_size: Vector2) -> Self {
        Self {
            margin,
            element_size,
            viewport_size,
        }
    }
}

/// Top-left position of a window resting at `anchor`.
#[must_use]
pub fn anchor_to_position(anchor: Anchor, placement: &Placement) -> Vector2 {
    let Placement {
        margin,
        element_size: element,
        viewport_size: viewport,
    } = *placement;
    let x = match anchor.column() {
        Column::Start => margin,
        Column::Center => viewport.x / 2.0 - element.x / 2.0,
        Column::End => viewport.x - element.x - margin,
    };
    let y = match anchor.row() {
        Row::Start => margin,
        Row::Center => viewport.y / 2.0 - element.y / 2.0,
        Row::End => viewport.y - element.y - margin,
    };
    Vector2::new(x, y)
}

/// Like [`anchor_to_position`] for a raw name; unknown names place at `NW`.
#[must_use]
pub fn anchor_name_to_position(name: &str, placement: &Placement) -> Vector2 {
    anchor_to_position(Anchor::parse_lenient(name), placement)
}

/// Nearest of all eight anchors to `position`.
///
/// Ties resolve by [`ANCHOR_EVALUATION_ORDER`].
#[must_use]
pub fn position_to_anchor(position: Vector2, placement: &Placement) -> Anchor {
    let mut best = ANCHOR_EVALUATION_ORDER[0];
    let mut best_distance = f64::INFINITY;
    for anchor in ANCHOR_EVALUATION_ORDER {
        let distance = position.distance(anchor_to_position(anchor, placement));
        if distance < best_distance {
            best = anchor;
            best_distance = distance;
        }
    }
    best
}

/// One anchor chosen by a picker together with its resolved position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnchorPick {
    pub anchor: Anchor,
    pub position: Vector2,
}

/// Candidate whose resting position is nearest to `position`.
///
/// Ties keep the earlier candidate.
#[must_use]
pub fn closest_by_distance(
    position: Vector2,
    candidates: &AnchorSet,
    placement: &Placement,
) -> AnchorPick {
    let mut best: Option<(AnchorPick, f64)> = None;
    for anchor in candidates.iter() {
        let resolved = anchor_to_position(anchor, placement);
        let distance = position.distance(resolved);
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => {
                best = Some((
                    AnchorPick {
                        anchor,
                        position: resolved,
                    },
                    distance,
                ));
            }
        }
    }
    best.map_or_else(|| default_pick(candidates, placement), |(pick, _)| pick)
}

/// Candidate whose direction from `position` best matches `direction`.
///
/// The score is the angle between `direction` and `anchor - position`. Every
/// candidate whose score is within `tie_epsilon` of the best score is a
/// near-tie, and the nearest near-tie wins (earlier candidate on an exact
/// distance tie). The result does not depend on candidate order otherwise. A
/// candidate that coincides with `position` has no direction and scores `π`.
/// A zero `direction` scores every other candidate `0`, which reduces to a
/// distance pick.
#[must_use]
pub fn closest_by_angle(
    position: Vector2,
    direction: Vector2,
    candidates: &AnchorSet,
    placement: &Placement,
    tie_epsilon: f64,
) -> AnchorPick {
    let tie_epsilon = if tie_epsilon.is_finite() {
        tie_epsilon.max(0.0)
    } else {
        DEFAULT_ANGLE_TIE_EPSILON
    };
    let scored: Vec<(AnchorPick, f64, f64)> = candidates
        .iter()
        .map(|anchor| {
            let resolved = anchor_to_position(anchor, placement);
            let offset = resolved - position;
            let distance = offset.magnitude();
            let angle = if distance == 0.0 {
                PI
            } else {
                direction.angle_to(offset)
            };
            (
                AnchorPick {
                    anchor,
                    position: resolved,
                },
                angle,
                distance,
            )
        })
        .collect();

    let best_angle = scored
        .iter()
        .map(|&(_, angle, _)| angle)
        .fold(f64::INFINITY, f64::min);
    let mut best: Option<(AnchorPick, f64)> = None;
    for &(pick, angle, distance) in &scored {
        let near_tie = angle - best_angle < tie_epsilon || angle == best_angle;
        if !near_tie {
            continue;
        }
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((pick, distance)),
        }
    }
    best.map_or_else(|| default_pick(candidates, placement), |(pick, _)| pick)
}

fn default_pick(candidates: &AnchorSet, placement: &Placement) -> AnchorPick {
    let anchor = candidates.default_anchor();
    AnchorPick {
        anchor,
        position: anchor_to_position(anchor, placement),
    }
}
