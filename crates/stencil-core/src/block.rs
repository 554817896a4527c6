//! Cell contents: material tokens and the tagged payload variant.

use smallvec::SmallVec;
use std::fmt;

/// Maximum number of display-text lines a sign payload carries.
pub const MAX_SIGN_LINES: usize = 4;

/// Display-text lines for a sign cell.
///
/// Inline storage for the common case — hosts cap signs at
/// [`MAX_SIGN_LINES`] lines, so this never spills in practice.
pub type SignLines = SmallVec<[String; MAX_SIGN_LINES]>;

/// An opaque material/type token naming what a cell is made of.
///
/// The core treats the token as an uninterpreted identifier; only the
/// host environment knows which tokens name real materials.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MaterialId(pub String);

impl MaterialId {
    /// Construct a material token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether a token has the shape of a material identifier:
    /// non-empty, ASCII alphanumerics plus `_` and `:` (namespaced
    /// tokens like `minecraft:stone`).
    ///
    /// This is a syntactic check only — whether the token names a
    /// material the host actually knows is decided at write time.
    pub fn is_valid_token(token: &str) -> bool {
        !token.is_empty()
            && token
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b':')
    }
}

impl fmt::Display for MaterialId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An opaque item-stack descriptor.
///
/// The host environment owns the meaning of the descriptor; the core
/// only carries it between capture and replay.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemStack(pub String);

impl ItemStack {
    /// Construct an item-stack descriptor.
    pub fn new(descriptor: impl Into<String>) -> Self {
        Self(descriptor.into())
    }
}

impl fmt::Display for ItemStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Extra content a cell carries beyond its material.
///
/// Exactly two shapes exist, and a cell has at most one of them — a
/// closed variant, not an open property bag. Payload presence is
/// recorded at capture time from what the host reports, never inferred
/// from the material token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BlockPayload {
    /// Ordered display-text lines (a sign).
    SignText(SignLines),
    /// Ordered container contents (a chest or similar).
    Container(Vec<ItemStack>),
}

/// One captured cell: its material plus optional payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockSpec {
    /// Material/type token. Required.
    pub material: MaterialId,
    /// At most one payload variant.
    pub payload: Option<BlockPayload>,
}

impl BlockSpec {
    /// A cell with no payload.
    pub fn plain(material: impl Into<String>) -> Self {
        Self {
            material: MaterialId::new(material),
            payload: None,
        }
    }

    /// A sign cell with the given text lines.
    pub fn sign<I, S>(material: impl Into<String>, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            material: MaterialId::new(material),
            payload: Some(BlockPayload::SignText(
                lines.into_iter().map(Into::into).collect(),
            )),
        }
    }

    /// A container cell with the given contents.
    pub fn container<I, S>(material: impl Into<String>, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            material: MaterialId::new(material),
            payload: Some(BlockPayload::Container(
                items.into_iter().map(|s| ItemStack::new(s)).collect(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_shape_check() {
        assert!(MaterialId::is_valid_token("STONE"));
        assert!(MaterialId::is_valid_token("oak_sign"));
        assert!(MaterialId::is_valid_token("minecraft:chest"));
        assert!(!MaterialId::is_valid_token(""));
        assert!(!MaterialId::is_valid_token("two words"));
        assert!(!MaterialId::is_valid_token("newline\n"));
        assert!(!MaterialId::is_valid_token("émeraude"));
    }

    #[test]
    fn builders_set_one_payload_at_most() {
        assert!(BlockSpec::plain("STONE").payload.is_none());
        assert!(matches!(
            BlockSpec::sign("OAK_SIGN", ["hi"]).payload,
            Some(BlockPayload::SignText(_))
        ));
        assert!(matches!(
            BlockSpec::container("CHEST", ["ItemA"]).payload,
            Some(BlockPayload::Container(_))
        ));
    }
}
