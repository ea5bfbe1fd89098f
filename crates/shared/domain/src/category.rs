//! Fixed filter categories and the bitset used to tag catalog entries.

use crate::constants::{ACCOMMODATION, ART, DINING, EVENTS, SHOP, TOURS, VIP_TOURS};
use bitflags::bitflags;
use serde::de::{self, SeqAccess, Visitor};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Symbolic icon identifier. The presentation layer maps these to graphics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IconId {
    Ticket,
    Crown,
    Gallery,
    Camera,
    Bed,
    Home,
    Hotel,
    ShoppingBag,
    Utensils,
}

impl IconId {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ticket => "ticket",
            Self::Crown => "crown",
            Self::Gallery => "gallery",
            Self::Camera => "camera",
            Self::Bed => "bed",
            Self::Home => "home",
            Self::Hotel => "hotel",
            Self::ShoppingBag => "shopping-bag",
            Self::Utensils => "utensils",
        }
    }
}

/// One of the fixed catalog filter categories, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FilterCategory {
    Tours,
    VipTours,
    Art,
    Events,
    Accommodation,
    Shop,
    Dining,
}

impl FilterCategory {
    pub const ALL: [Self; 7] = [
        Self::Tours,
        Self::VipTours,
        Self::Art,
        Self::Events,
        Self::Accommodation,
        Self::Shop,
        Self::Dining,
    ];

    pub const fn id(self) -> &'static str {
        match self {
            Self::Tours => TOURS,
            Self::VipTours => VIP_TOURS,
            Self::Art => ART,
            Self::Events => EVENTS,
            Self::Accommodation => ACCOMMODATION,
            Self::Shop => SHOP,
            Self::Dining => DINING,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Tours => "GUIDED TOURS",
            Self::VipTours => "VIP TOURS",
            Self::Art => "ART GALLERY",
            Self::Events => "EVENTS",
            Self::Accommodation => "ACCOMMODATION",
            Self::Shop => "SHOP",
            Self::Dining => "RESTAURANT",
        }
    }

    pub const fn icon(self) -> IconId {
        match self {
            Self::Tours => IconId::Ticket,
            Self::VipTours => IconId::Crown,
            Self::Art => IconId::Gallery,
            Self::Events => IconId::Camera,
            Self::Accommodation => IconId::Bed,
            Self::Shop => IconId::ShoppingBag,
            Self::Dining => IconId::Utensils,
        }
    }

    /// Looks a category up by its identifier (`"vip-tours"`, ...).
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|category| category.id() == id)
    }

    const fn flag(self) -> CategorySet {
        match self {
            Self::Tours => CategorySet::TOURS,
            Self::VipTours => CategorySet::VIP_TOURS,
            Self::Art => CategorySet::ART,
            Self::Events => CategorySet::EVENTS,
            Self::Accommodation => CategorySet::ACCOMMODATION,
            Self::Shop => CategorySet::SHOP,
            Self::Dining => CategorySet::DINING,
        }
    }
}

impl fmt::Display for FilterCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

bitflags! {
    /// A set of filter categories. Empty means "no restriction" when used as a filter.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct CategorySet: u8 {
        const TOURS = 1 << 0;
        const VIP_TOURS = 1 << 1;
        const ART = 1 << 2;
        const EVENTS = 1 << 3;
        const ACCOMMODATION = 1 << 4;
        const SHOP = 1 << 5;
        const DINING = 1 << 6;
    }
}

impl CategorySet {
    /// Adds the category if absent, removes it if present.
    pub fn toggle_category(&mut self, category: FilterCategory) {
        self.toggle(category.flag());
    }

    pub const fn has(self, category: FilterCategory) -> bool {
        self.contains(category.flag())
    }

    /// Categories in the set, in display order.
    pub fn categories(self) -> impl Iterator<Item = FilterCategory> {
        FilterCategory::ALL.into_iter().filter(move |category| self.has(*category))
    }

    /// Parses a comma separated id list. Unknown ids are skipped.
    pub fn parse_list(list: &str) -> Self {
        list.split(',').map(str::trim).filter_map(FilterCategory::from_id).collect()
    }
}

impl Default for CategorySet {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<FilterCategory> for CategorySet {
    fn from(category: FilterCategory) -> Self {
        category.flag()
    }
}

impl FromIterator<FilterCategory> for CategorySet {
    fn from_iter<I: IntoIterator<Item = FilterCategory>>(iter: I) -> Self {
        iter.into_iter().fold(Self::empty(), |set, category| set | category.flag())
    }
}

impl From<&str> for CategorySet {
    fn from(s: &str) -> Self {
        Self::parse_list(s)
    }
}

impl Serialize for CategorySet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.bits().count_ones() as usize))?;
        for category in self.categories() {
            seq.serialize_element(category.id())?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for CategorySet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct CategoryListVisitor;

        impl<'de> Visitor<'de> for CategoryListVisitor {
            type Value = CategorySet;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a list of category ids")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut set = CategorySet::empty();
                while let Some(id) = seq.next_element::<String>()? {
                    let category = FilterCategory::from_id(&id)
                        .ok_or_else(|| de::Error::custom(format!("unknown category `{id}`")))?;
                    set |= CategorySet::from(category);
                }
                Ok(set)
            }
        }

        deserializer.deserialize_seq(CategoryListVisitor)
    }
}
