//! Per-piece emotional state and the table that keys it by square.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chess_core::{Color, Position, Square};
use rand::Rng;
use serde::Serialize;

use crate::error::UnknownAttribute;

pub const ATTRIBUTE_MIN: f64 = 0.0;
pub const ATTRIBUTE_MAX: f64 = 100.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Attribute {
    Loyalty,
    Motivation,
    Morale,
    Trust,
    Empathy,
}

impl Attribute {
    pub const ALL: [Attribute; 5] = [
        Attribute::Loyalty,
        Attribute::Motivation,
        Attribute::Morale,
        Attribute::Trust,
        Attribute::Empathy,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Attribute::Loyalty => "loyalty",
            Attribute::Motivation => "motivation",
            Attribute::Morale => "morale",
            Attribute::Trust => "trust",
            Attribute::Empathy => "empathy",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Attribute {
    type Err = UnknownAttribute;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Attribute::ALL
            .into_iter()
            .find(|a| a.name() == wanted)
            .ok_or_else(|| UnknownAttribute(s.to_string()))
    }
}

/// Plain copy of the five attribute values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Snapshot {
    pub loyalty: f64,
    pub motivation: f64,
    pub morale: f64,
    pub trust: f64,
    pub empathy: f64,
}

impl Snapshot {
    pub fn get(&self, attr: Attribute) -> f64 {
        match attr {
            Attribute::Loyalty => self.loyalty,
            Attribute::Motivation => self.motivation,
            Attribute::Morale => self.morale,
            Attribute::Trust => self.trust,
            Attribute::Empathy => self.empathy,
        }
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "loyalty {:.0}, motivation {:.0}, morale {:.0}, trust {:.0}, empathy {:.0}",
            self.loyalty, self.motivation, self.morale, self.trust, self.empathy
        )
    }
}

/// Emotional state of one living piece.
#[derive(Clone, Debug, PartialEq)]
pub struct PieceProfile {
    pub square: Square,
    pub side: Color,
    values: Snapshot,
}

impl PieceProfile {
    /// Builds a profile from explicit values, clamping each one.
    pub fn new(square: Square, side: Color, values: Snapshot) -> Self {
        let mut profile = Self {
            square,
            side,
            values: Snapshot::default(),
        };
        for attr in Attribute::ALL {
            profile.set(attr, values.get(attr));
        }
        profile
    }

    /// Fresh recruit: loyalty, motivation and morale in [60, 80], trust in
    /// [50, 70], empathy in [40, 60].
    pub fn seeded<R: Rng + ?Sized>(square: Square, side: Color, rng: &mut R) -> Self {
        let values = Snapshot {
            loyalty: rng.gen_range(60.0..=80.0),
            motivation: rng.gen_range(60.0..=80.0),
            morale: rng.gen_range(60.0..=80.0),
            trust: rng.gen_range(50.0..=70.0),
            empathy: rng.gen_range(40.0..=60.0),
        };
        Self::new(square, side, values)
    }

    pub fn get(&self, attr: Attribute) -> f64 {
        self.values.get(attr)
    }

    pub fn set(&mut self, attr: Attribute, value: f64) {
        let value = if value.is_nan() {
            ATTRIBUTE_MIN
        } else {
            value.clamp(ATTRIBUTE_MIN, ATTRIBUTE_MAX)
        };
        let slot = match attr {
            Attribute::Loyalty => &mut self.values.loyalty,
            Attribute::Motivation => &mut self.values.motivation,
            Attribute::Morale => &mut self.values.morale,
            Attribute::Trust => &mut self.values.trust,
            Attribute::Empathy => &mut self.values.empathy,
        };
        *slot = value;
    }

    pub fn adjust(&mut self, attr: Attribute, delta: f64) {
        self.set(attr, self.get(attr) + delta);
    }

    pub fn loyalty(&self) -> f64 {
        self.values.loyalty
    }
    pub fn motivation(&self) -> f64 {
        self.values.motivation
    }
    pub fn morale(&self) -> f64 {
        self.values.morale
    }
    pub fn trust(&self) -> f64 {
        self.values.trust
    }
    pub fn empathy(&self) -> f64 {
        self.values.empathy
    }

    /// Mean of all five attributes.
    pub fn average(&self) -> f64 {
        Attribute::ALL.iter().map(|&a| self.get(a)).sum::<f64>() / Attribute::ALL.len() as f64
    }

    /// Individual belief used for lone-hero eligibility.
    pub fn belief(&self) -> f64 {
        (self.loyalty() + self.trust() + self.morale()) / 3.0
    }

    pub fn snapshot(&self) -> Snapshot {
        self.values
    }
}

/// Profiles of every living piece, ordered a1, b1, ..., h8.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProfileTable {
    profiles: BTreeMap<Square, PieceProfile>,
}

impl ProfileTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// One seeded profile per occupied square of `pos`.
    pub fn seed<R: Rng + ?Sized>(pos: &Position, rng: &mut R) -> Self {
        let profiles = pos
            .pieces()
            .map(|(sq, pc)| (sq, PieceProfile::seeded(sq, pc.color, &mut *rng)))
            .collect();
        Self { profiles }
    }

    pub fn get(&self, sq: Square) -> Option<&PieceProfile> {
        self.profiles.get(&sq)
    }

    pub fn get_mut(&mut self, sq: Square) -> Option<&mut PieceProfile> {
        self.profiles.get_mut(&sq)
    }

    /// Inserts `profile` under its own square, replacing any previous entry.
    pub fn insert(&mut self, profile: PieceProfile) -> Option<PieceProfile> {
        self.profiles.insert(profile.square, profile)
    }

    pub fn remove(&mut self, sq: Square) -> Option<PieceProfile> {
        self.profiles.remove(&sq)
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PieceProfile> + '_ {
        self.profiles.values()
    }

    pub fn side(&self, side: Color) -> impl Iterator<Item = &PieceProfile> + '_ {
        self.profiles.values().filter(move |p| p.side == side)
    }

    pub fn side_mut(&mut self, side: Color) -> impl Iterator<Item = &mut PieceProfile> + '_ {
        self.profiles.values_mut().filter(move |p| p.side == side)
    }

    /// Exactly one profile per occupied square, matching the occupant's color.
    pub fn is_consistent_with(&self, pos: &Position) -> bool {
        self.profiles.len() == pos.occupied_count()
            && self.profiles.iter().all(|(&sq, prof)| {
                prof.square == sq && pos.piece_at(sq).map(|pc| pc.color) == Some(prof.side)
            })
    }
}
