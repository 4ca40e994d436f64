//! Embedding rights and their most-restrictive aggregation
//!
//! OpenType stores embedding permissions in the low bits of the `OS/2`
//! table's `fsType` field; Adobe Type 1 fonts declare the same vocabulary
//! through an `/FSType` dictionary entry. Both feed the same four-value
//! enum here.

/// What a document author may legally do when embedding a font.
///
/// Values match the installable-embedding bits of `fsType`. Codes outside
/// this set carry no usable information and are represented as `None` at
/// the record level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum EmbeddingRights {
    /// Unrestricted embedding and redistribution.
    Installable = 0,
    /// Must not be embedded or exchanged without explicit owner permission.
    Restricted = 2,
    /// Embeddable for temporary viewing or printing only; documents using
    /// the font must open read-only.
    PreviewAndPrint = 4,
    /// Embeddable and editable, including saving documents that use the
    /// embedded font.
    Editable = 8,
}

impl EmbeddingRights {
    /// Interpret a raw rights code. Anything outside {0, 2, 4, 8} is
    /// indeterminate.
    pub fn from_bits(bits: u16) -> Option<Self> {
        match bits {
            0 => Some(Self::Installable),
            2 => Some(Self::Restricted),
            4 => Some(Self::PreviewAndPrint),
            8 => Some(Self::Editable),
            _ => None,
        }
    }

    pub fn bits(self) -> u16 {
        self as u16
    }

    /// Short human-readable name for the rights code.
    pub fn label(self) -> &'static str {
        match self {
            Self::Installable => "Installable",
            Self::Restricted => "Restricted",
            Self::PreviewAndPrint => "Preview & Print",
            Self::Editable => "Editable",
        }
    }

    /// Position on the restrictiveness ladder. Higher is more restrictive.
    fn rank(self) -> u8 {
        match self {
            Self::Installable => 0,
            Self::Editable => 1,
            Self::PreviewAndPrint => 2,
            Self::Restricted => 3,
        }
    }

    /// Aggregate a set of per-font rights into the group's effective
    /// rights.
    ///
    /// `Restricted` anywhere wins outright. Failing that, an indeterminate
    /// member (`None`) makes the whole group indeterminate, since the
    /// group's rights cannot be established with confidence. Otherwise the
    /// most restrictive code wins, with `PreviewAndPrint` above `Editable`
    /// above `Installable`. An empty set is indeterminate.
    pub fn most_restrictive<I>(rights: I) -> Option<Self>
    where
        I: IntoIterator<Item = Option<Self>>,
    {
        let mut aggregate = None;
        let mut indeterminate = false;
        for member in rights {
            match member {
                Some(Self::Restricted) => return Some(Self::Restricted),
                Some(value) => {
                    let current = aggregate.unwrap_or(Self::Installable);
                    if value.rank() > current.rank() {
                        aggregate = Some(value);
                    } else if aggregate.is_none() {
                        aggregate = Some(current);
                    }
                }
                None => indeterminate = true,
            }
        }
        if indeterminate {
            None
        } else {
            aggregate
        }
    }
}
