//! Axis identity, axis sets and endstop wiring.

use core::fmt;
use core::str::FromStr;

use bitflags::bitflags;

/// One controllable degree of freedom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AxisId {
    /// Linear X
    X,
    /// Linear Y
    Y,
    /// Linear Z
    Z,
    /// First auxiliary axis (rotary or extruder drive)
    A,
    /// Second auxiliary axis
    B,
}

impl AxisId {
    /// Number of axis identifiers.
    pub const COUNT: usize = 5;

    /// All identifiers in index order.
    pub const ALL: [Self; Self::COUNT] = [Self::X, Self::Y, Self::Z, Self::A, Self::B];

    /// Position of this axis in per-axis arrays.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Upper-case single-letter name.
    pub const fn name(self) -> &'static str {
        match self {
            AxisId::X => "X",
            AxisId::Y => "Y",
            AxisId::Z => "Z",
            AxisId::A => "A",
            AxisId::B => "B",
        }
    }
}

impl fmt::Display for AxisId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unknown axis identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownAxis(pub String);

impl FromStr for AxisId {
    type Err = UnknownAxis;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AxisId::ALL
            .into_iter()
            .find(|id| id.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownAxis(s.to_owned()))
    }
}

bitflags! {
    /// A set of axes, e.g. the axes a machine actually has.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct AxisFlags: u8 {
        /// X axis
        const X = 0x01;
        /// Y axis
        const Y = 0x02;
        /// Z axis
        const Z = 0x04;
        /// A axis
        const A = 0x08;
        /// B axis
        const B = 0x10;
    }
}

impl AxisFlags {
    /// Check membership of a single axis.
    #[inline]
    pub fn contains_axis(self, id: AxisId) -> bool {
        self.contains(Self::from(id))
    }

    /// Iterate over member axes in [`AxisId::ALL`] order.
    pub fn axes(self) -> impl Iterator<Item = AxisId> {
        AxisId::ALL
            .into_iter()
            .filter(move |&id| self.contains_axis(id))
    }
}

impl From<AxisId> for AxisFlags {
    fn from(id: AxisId) -> Self {
        Self::from_bits_retain(1 << id.index())
    }
}

impl FromIterator<AxisId> for AxisFlags {
    fn from_iter<I: IntoIterator<Item = AxisId>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::empty(), |set, id| set | Self::from(id))
    }
}

/// Which travel limits carry a limit switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Endstops {
    /// No switches
    #[default]
    None,
    /// Switch at minimum travel
    Min,
    /// Switch at maximum travel
    Max,
    /// Switches at both ends
    Both,
}

/// Unknown endstop token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownEndstops(pub String);

impl FromStr for Endstops {
    type Err = UnknownEndstops;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(Endstops::None),
            "min" => Ok(Endstops::Min),
            "max" => Ok(Endstops::Max),
            "both" => Ok(Endstops::Both),
            _ => Err(UnknownEndstops(s.to_owned())),
        }
    }
}

impl Endstops {
    /// True if a switch sits at minimum travel.
    pub fn has_min(self) -> bool {
        matches!(self, Endstops::Min | Endstops::Both)
    }

    /// True if a switch sits at maximum travel.
    pub fn has_max(self) -> bool {
        matches!(self, Endstops::Max | Endstops::Both)
    }
}
