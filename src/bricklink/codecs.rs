//! Compact wire tokens used by the BrickLink API and their domain enums.
//!
//! Every codec enum lists its values once in [`WireCode::all`]; decoding is derived
//! from that table, so `from_code(v.code()) == v` holds for every value. Decoding
//! is total: unknown tokens fall back to [`WireCode::DEFAULT`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Bidirectional mapping between a domain enum and its wire token.
pub trait WireCode: Sized + Copy + PartialEq + 'static {
    /// Value returned for unrecognized tokens.
    const DEFAULT: Self;

    /// Every value of the enum.
    fn all() -> &'static [Self];

    /// Wire token for this value.
    fn code(&self) -> &'static str;

    /// Exact lookup; `None` for unknown tokens.
    fn try_from_code(code: &str) -> Option<Self> {
        Self::all().iter().copied().find(|v| v.code() == code)
    }

    /// Total lookup; unknown tokens map to [`WireCode::DEFAULT`].
    fn from_code(code: &str) -> Self {
        Self::try_from_code(code).unwrap_or(Self::DEFAULT)
    }
}

/// Case-insensitive strict parse, for user input rather than wire data.
fn parse_code<T: WireCode>(s: &str, what: &str) -> Result<T, String> {
    T::all().iter().copied().find(|v| v.code().eq_ignore_ascii_case(s.trim())).ok_or_else(|| {
        let known: Vec<&str> = T::all().iter().map(|v| v.code()).collect();
        format!("Unknown {}: {}. Use: {}", what, s, known.join(", "))
    })
}

macro_rules! wire_code_traits {
    ($ty:ident, $what:literal) => {
        impl From<String> for $ty {
            fn from(code: String) -> Self {
                <$ty as WireCode>::from_code(&code)
            }
        }

        impl From<$ty> for String {
            fn from(value: $ty) -> Self {
                value.code().to_string()
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.code())
            }
        }

        impl FromStr for $ty {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                parse_code(s, $what)
            }
        }
    };
}

/// Whether a lot is complete, incomplete or still factory-sealed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Completeness {
    #[default]
    Complete,
    Incomplete,
    Sealed,
}

impl WireCode for Completeness {
    // Unknown codes decode as Complete rather than failing. Upstream clients behave
    // the same way; see DESIGN.md before changing this.
    const DEFAULT: Self = Completeness::Complete;

    fn all() -> &'static [Self] {
        &[Completeness::Complete, Completeness::Incomplete, Completeness::Sealed]
    }

    fn code(&self) -> &'static str {
        match self {
            Completeness::Complete => "C",
            Completeness::Incomplete => "B",
            Completeness::Sealed => "S",
        }
    }
}

wire_code_traits!(Completeness, "completeness");

/// Catalog item types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ItemType {
    Minifig,
    #[default]
    Part,
    Set,
    Book,
    Gear,
    Catalog,
    Instruction,
    UnsortedLot,
    OriginalBox,
}

impl WireCode for ItemType {
    const DEFAULT: Self = ItemType::Part;

    fn all() -> &'static [Self] {
        &[
            ItemType::Minifig,
            ItemType::Part,
            ItemType::Set,
            ItemType::Book,
            ItemType::Gear,
            ItemType::Catalog,
            ItemType::Instruction,
            ItemType::UnsortedLot,
            ItemType::OriginalBox,
        ]
    }

    fn code(&self) -> &'static str {
        match self {
            ItemType::Minifig => "MINIFIG",
            ItemType::Part => "PART",
            ItemType::Set => "SET",
            ItemType::Book => "BOOK",
            ItemType::Gear => "GEAR",
            ItemType::Catalog => "CATALOG",
            ItemType::Instruction => "INSTRUCTION",
            ItemType::UnsortedLot => "UNSORTED_LOT",
            ItemType::OriginalBox => "ORIGINAL_BOX",
        }
    }
}

wire_code_traits!(ItemType, "item type");

/// Item types that can be parted out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PartOutItemType {
    Minifig,
    #[default]
    Set,
    Gear,
}

impl PartOutItemType {
    /// The catalog item type used in the request path.
    pub fn item_type(&self) -> ItemType {
        match self {
            PartOutItemType::Minifig => ItemType::Minifig,
            PartOutItemType::Set => ItemType::Set,
            PartOutItemType::Gear => ItemType::Gear,
        }
    }
}

impl WireCode for PartOutItemType {
    const DEFAULT: Self = PartOutItemType::Set;

    fn all() -> &'static [Self] {
        &[PartOutItemType::Minifig, PartOutItemType::Set, PartOutItemType::Gear]
    }

    fn code(&self) -> &'static str {
        self.item_type().code()
    }
}

wire_code_traits!(PartOutItemType, "part-out item type");

/// New or used condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NewOrUsed {
    #[default]
    New,
    Used,
}

impl WireCode for NewOrUsed {
    const DEFAULT: Self = NewOrUsed::New;

    fn all() -> &'static [Self] {
        &[NewOrUsed::New, NewOrUsed::Used]
    }

    fn code(&self) -> &'static str {
        match self {
            NewOrUsed::New => "N",
            NewOrUsed::Used => "U",
        }
    }
}

wire_code_traits!(NewOrUsed, "condition");

/// Price guide source: completed sales or current store listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum GuideType {
    Sold,
    #[default]
    Stock,
}

impl WireCode for GuideType {
    const DEFAULT: Self = GuideType::Stock;

    fn all() -> &'static [Self] {
        &[GuideType::Sold, GuideType::Stock]
    }

    fn code(&self) -> &'static str {
        match self {
            GuideType::Sold => "sold",
            GuideType::Stock => "stock",
        }
    }
}

wire_code_traits!(GuideType, "guide type");
