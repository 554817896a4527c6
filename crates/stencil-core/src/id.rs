//! Coordinates, extents, and strongly-typed identifiers.

use std::fmt;
use std::num::ParseIntError;
use std::ops::Add;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

/// An absolute coordinate in host-environment space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockPos {
    /// East-west axis.
    pub x: i32,
    /// Vertical axis.
    pub y: i32,
    /// North-south axis.
    pub z: i32,
}

impl BlockPos {
    /// Construct a position from its three components.
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// The offset of `self` relative to `origin`.
    ///
    /// Inverse of `origin + offset`: for any `origin` and `pos`,
    /// `origin + pos.offset_from(origin) == pos`.
    pub fn offset_from(self, origin: BlockPos) -> Offset {
        Offset {
            dx: self.x - origin.x,
            dy: self.y - origin.y,
            dz: self.z - origin.z,
        }
    }
}

impl Add<Offset> for BlockPos {
    type Output = BlockPos;

    fn add(self, rhs: Offset) -> BlockPos {
        BlockPos {
            x: self.x + rhs.dx,
            y: self.y + rhs.dy,
            z: self.z + rhs.dz,
        }
    }
}

impl fmt::Display for BlockPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.x, self.y, self.z)
    }
}

/// A coordinate relative to a structure document's anchor.
///
/// Document keys are offsets with every component in `[0, dimension)`,
/// but the type itself is signed — re-basing arithmetic produces
/// intermediate values outside that range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Offset {
    /// X component.
    pub dx: i32,
    /// Y component.
    pub dy: i32,
    /// Z component.
    pub dz: i32,
}

impl Offset {
    /// Construct an offset from its three components.
    pub fn new(dx: i32, dy: i32, dz: i32) -> Self {
        Self { dx, dy, dz }
    }
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.dx, self.dy, self.dz)
    }
}

/// Error from parsing an [`Offset`] out of its `"dx,dy,dz"` key form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseOffsetError {
    detail: String,
}

impl fmt::Display for ParseOffsetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid offset key: {}", self.detail)
    }
}

impl std::error::Error for ParseOffsetError {}

impl From<ParseIntError> for ParseOffsetError {
    fn from(e: ParseIntError) -> Self {
        Self {
            detail: e.to_string(),
        }
    }
}

impl FromStr for Offset {
    type Err = ParseOffsetError;

    /// Parse the exact 3-component key form `"dx,dy,dz"`.
    ///
    /// Anything other than three comma-separated integers is rejected —
    /// there is deliberately no tolerance for whitespace, trailing
    /// separators, or other component counts.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(',');
        let (Some(dx), Some(dy), Some(dz), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(ParseOffsetError {
                detail: format!("expected 3 comma-separated components, got '{s}'"),
            });
        };
        Ok(Offset {
            dx: dx.parse()?,
            dy: dy.parse()?,
            dz: dz.parse()?,
        })
    }
}

/// Bounding-box extent of a captured volume: width × height × length.
///
/// Every component is at least 1; a zero-size dimension cannot be
/// represented (construction is validated).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Extent {
    width: u32,
    height: u32,
    length: u32,
}

impl Extent {
    /// Construct an extent, rejecting any zero component.
    pub fn new(width: u32, height: u32, length: u32) -> Option<Self> {
        if width == 0 || height == 0 || length == 0 {
            return None;
        }
        Some(Self {
            width,
            height,
            length,
        })
    }

    /// The extent spanned by an inclusive corner pair.
    ///
    /// Components are computed as `max - min + 1`, so equal corners give
    /// a 1×1×1 extent.
    ///
    /// # Panics
    ///
    /// Panics if any `max` component is below the corresponding `min`
    /// component. Corner pairs come from selection providers, which
    /// guarantee ordering.
    pub fn of_corners(min: BlockPos, max: BlockPos) -> Self {
        assert!(
            min.x <= max.x && min.y <= max.y && min.z <= max.z,
            "corner pair not ordered: min {min}, max {max}"
        );
        Self {
            width: (max.x - min.x + 1) as u32,
            height: (max.y - min.y + 1) as u32,
            length: (max.z - min.z + 1) as u32,
        }
    }

    /// Width (x extent).
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height (y extent).
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Length (z extent).
    pub fn length(&self) -> u32 {
        self.length
    }

    /// Whether an offset lies within `[0, dimension)` on all three axes.
    pub fn contains(&self, offset: Offset) -> bool {
        (0..self.width as i32).contains(&offset.dx)
            && (0..self.height as i32).contains(&offset.dy)
            && (0..self.length as i32).contains(&offset.dz)
    }

    /// Total number of cells in the bounding box.
    pub fn volume(&self) -> u64 {
        self.width as u64 * self.height as u64 * self.length as u64
    }

    /// Iterate every offset in the bounding box, x-major.
    pub fn offsets(&self) -> impl Iterator<Item = Offset> + '_ {
        let (w, h, l) = (self.width as i32, self.height as i32, self.length as i32);
        (0..w).flat_map(move |dx| {
            (0..h).flat_map(move |dy| (0..l).map(move |dz| Offset { dx, dy, dz }))
        })
    }
}

impl fmt::Display for Extent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}x{}", self.width, self.height, self.length)
    }
}

/// Counter for unique [`SessionId`] allocation.
static SESSION_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique identifier for one placement invocation.
///
/// Allocated from a monotonic atomic counter via [`SessionId::next`].
/// Two concurrent replays always carry distinct IDs, which is what the
/// lock set keys coordinate ownership on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(u64);

impl SessionId {
    /// Allocate a fresh, unique session ID. Thread-safe.
    pub fn next() -> Self {
        Self(SESSION_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifies the actor whose active selection is captured.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActorId(pub u64);

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ActorId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}
