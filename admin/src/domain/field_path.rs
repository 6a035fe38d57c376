//! Typed single-field edits on a [`UserDraft`].
//!
//! Form inputs name their target with a dotted path (`name`,
//! `address.city`, `address.geo.lat`). The path is parsed once into a
//! [`FieldPath`] so the updater is a pattern match instead of string
//! splitting, and an unknown path is a parse error rather than a silently
//! ignored edit.

use std::fmt;
use std::str::FromStr;

use super::user_record::UserDraft;
use super::validation::FieldKey;

/// Leaf fields inside [`crate::domain::Geo`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeoField {
    /// `address.geo.lat`
    Lat,
    /// `address.geo.lng`
    Lng,
}

/// Fields inside [`crate::domain::Address`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressField {
    /// `address.street`
    Street,
    /// `address.city`
    City,
    /// `address.zip`
    Zip,
    /// `address.geo.*`
    Geo(GeoField),
}

/// Path to one editable leaf of a [`UserDraft`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldPath {
    /// `name`
    Name,
    /// `email`
    Email,
    /// `phone`
    Phone,
    /// `company`
    Company,
    /// `address.*`
    Address(AddressField),
}

/// Errors returned when parsing a dotted path.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldPathError {
    /// The path had no segments or more than three.
    #[error("field path `{path}` must have between 1 and 3 segments")]
    UnsupportedDepth {
        /// The rejected path.
        path: String,
    },
    /// A segment did not name a known field.
    #[error("unknown field path `{path}`")]
    Unknown {
        /// The rejected path.
        path: String,
    },
}

impl FieldPath {
    /// Every editable leaf, in form order.
    pub const ALL: [Self; 9] = [
        Self::Name,
        Self::Email,
        Self::Phone,
        Self::Company,
        Self::Address(AddressField::Street),
        Self::Address(AddressField::City),
        Self::Address(AddressField::Zip),
        Self::Address(AddressField::Geo(GeoField::Lat)),
        Self::Address(AddressField::Geo(GeoField::Lng)),
    ];

    /// Number of dotted segments: 1, 2 or 3.
    pub const fn depth(self) -> usize {
        match self {
            Self::Name | Self::Email | Self::Phone | Self::Company => 1,
            Self::Address(AddressField::Geo(_)) => 3,
            Self::Address(_) => 2,
        }
    }

    /// Validation key of the leaf this path addresses.
    pub const fn key(self) -> FieldKey {
        match self {
            Self::Name => FieldKey::Name,
            Self::Email => FieldKey::Email,
            Self::Phone => FieldKey::Phone,
            Self::Company => FieldKey::Company,
            Self::Address(AddressField::Street) => FieldKey::Street,
            Self::Address(AddressField::City) => FieldKey::City,
            Self::Address(AddressField::Zip) => FieldKey::Zip,
            Self::Address(AddressField::Geo(GeoField::Lat)) => FieldKey::Lat,
            Self::Address(AddressField::Geo(GeoField::Lng)) => FieldKey::Lng,
        }
    }

    /// Dotted form, e.g. `address.geo.lat`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Company => "company",
            Self::Address(AddressField::Street) => "address.street",
            Self::Address(AddressField::City) => "address.city",
            Self::Address(AddressField::Zip) => "address.zip",
            Self::Address(AddressField::Geo(GeoField::Lat)) => "address.geo.lat",
            Self::Address(AddressField::Geo(GeoField::Lng)) => "address.geo.lng",
        }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldPath {
    type Err = FieldPathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let segments: Vec<&str> = s.split('.').collect();
        let unknown = || FieldPathError::Unknown { path: s.to_owned() };
        match segments.as_slice() {
            ["name"] => Ok(Self::Name),
            ["email"] => Ok(Self::Email),
            ["phone"] => Ok(Self::Phone),
            ["company"] => Ok(Self::Company),
            ["address", "street"] => Ok(Self::Address(AddressField::Street)),
            ["address", "city"] => Ok(Self::Address(AddressField::City)),
            ["address", "zip"] => Ok(Self::Address(AddressField::Zip)),
            ["address", "geo", "lat"] => Ok(Self::Address(AddressField::Geo(GeoField::Lat))),
            ["address", "geo", "lng"] => Ok(Self::Address(AddressField::Geo(GeoField::Lng))),
            [""] => Err(FieldPathError::UnsupportedDepth { path: s.to_owned() }),
            parts if parts.len() > 3 => {
                Err(FieldPathError::UnsupportedDepth { path: s.to_owned() })
            }
            _ => Err(unknown()),
        }
    }
}

impl UserDraft {
    /// Read the leaf addressed by `path`.
    pub fn field(&self, path: FieldPath) -> &str {
        match path {
            FieldPath::Name => &self.name,
            FieldPath::Email => &self.email,
            FieldPath::Phone => &self.phone,
            FieldPath::Company => &self.company,
            FieldPath::Address(AddressField::Street) => &self.address.street,
            FieldPath::Address(AddressField::City) => &self.address.city,
            FieldPath::Address(AddressField::Zip) => &self.address.zip,
            FieldPath::Address(AddressField::Geo(GeoField::Lat)) => &self.address.geo.lat,
            FieldPath::Address(AddressField::Geo(GeoField::Lng)) => &self.address.geo.lng,
        }
    }

    /// Return a copy of this draft with the leaf at `path` replaced.
    pub fn with_field(&self, path: FieldPath, value: impl Into<String>) -> Self {
        let mut next = self.clone();
        *next.field_mut(path) = value.into();
        next
    }

    fn field_mut(&mut self, path: FieldPath) -> &mut String {
        match path {
            FieldPath::Name => &mut self.name,
            FieldPath::Email => &mut self.email,
            FieldPath::Phone => &mut self.phone,
            FieldPath::Company => &mut self.company,
            FieldPath::Address(field) => {
                let address = &mut self.address;
                match field {
                    AddressField::Street => &mut address.street,
                    AddressField::City => &mut address.city,
                    AddressField::Zip => &mut address.zip,
                    AddressField::Geo(GeoField::Lat) => &mut address.geo.lat,
                    AddressField::Geo(GeoField::Lng) => &mut address.geo.lng,
                }
            }
        }
    }
}

/// Apply a single-field edit, returning a new draft.
///
/// The input is left untouched and the result owns its data, so neither
/// value can observe later edits to the other.
///
/// # Examples
/// ```
/// use user_admin::domain::{UserDraft, apply_edit};
///
/// let draft = UserDraft::default();
/// let path = "address.geo.lat".parse().expect("known path");
/// let edited = apply_edit(&draft, path, "10");
/// assert_eq!(edited.address.geo.lat, "10");
/// assert_eq!(draft.address.geo.lat, "");
/// ```
pub fn apply_edit(draft: &UserDraft, path: FieldPath, value: impl Into<String>) -> UserDraft {
    draft.with_field(path, value)
}

#[cfg(test)]
mod tests {
    //! Path parsing and copy-on-edit behaviour.

    use super::*;
    use crate::domain::{Address, Geo};
    use rstest::{fixture, rstest};

    #[fixture]
    fn draft() -> UserDraft {
        UserDraft {
            name: "Jane Doe".to_owned(),
            email: "jane@example.com".to_owned(),
            phone: "+1(212)5551234".to_owned(),
            company: "Acme".to_owned(),
            address: Address {
                street: "1 Main St".to_owned(),
                city: "NYC".to_owned(),
                zip: "10001".to_owned(),
                geo: Geo {
                    lat: "40.7128".to_owned(),
                    lng: "-74.0060".to_owned(),
                },
            },
        }
    }

    #[rstest]
    fn every_leaf_round_trips_through_its_dotted_form() {
        for path in FieldPath::ALL {
            let parsed: FieldPath = path.to_string().parse().expect("dotted form parses");
            assert_eq!(parsed, path);
            assert_eq!(path.as_str().split('.').count(), path.depth());
        }
    }

    #[rstest]
    #[case("", FieldPathError::UnsupportedDepth { path: String::new() })]
    #[case("address.geo.lat.deg", FieldPathError::UnsupportedDepth { path: "address.geo.lat.deg".to_owned() })]
    #[case("nickname", FieldPathError::Unknown { path: "nickname".to_owned() })]
    #[case("address", FieldPathError::Unknown { path: "address".to_owned() })]
    #[case("address.geo", FieldPathError::Unknown { path: "address.geo".to_owned() })]
    #[case("geo.lat", FieldPathError::Unknown { path: "geo.lat".to_owned() })]
    fn rejects_unknown_or_unsupported_paths(#[case] raw: &str, #[case] expected: FieldPathError) {
        assert_eq!(raw.parse::<FieldPath>(), Err(expected));
    }

    #[rstest]
    fn depth_one_edit_replaces_top_level_field(draft: UserDraft) {
        let edited = apply_edit(&draft, FieldPath::Company, "Globex");
        assert_eq!(edited.company, "Globex");
        assert_eq!(edited.address, draft.address);
        assert_eq!(draft.company, "Acme");
    }

    #[rstest]
    fn depth_two_edit_preserves_siblings(draft: UserDraft) {
        let edited = apply_edit(&draft, FieldPath::Address(AddressField::City), "Boston");
        assert_eq!(edited.address.city, "Boston");
        assert_eq!(edited.address.street, draft.address.street);
        assert_eq!(edited.address.zip, draft.address.zip);
        assert_eq!(edited.address.geo, draft.address.geo);
        assert_eq!(edited.name, draft.name);
    }

    #[rstest]
    fn depth_three_edit_changes_only_that_leaf(draft: UserDraft) {
        let path: FieldPath = "address.geo.lat".parse().expect("known path");
        let edited = apply_edit(&draft, path, "10");

        for other in FieldPath::ALL.into_iter().filter(|candidate| *candidate != path) {
            assert_eq!(edited.field(other), draft.field(other), "{other} changed");
        }
        assert_eq!(edited.field(path), "10");
        assert_eq!(draft.field(path), "40.7128");
    }

    #[rstest]
    fn later_edits_do_not_leak_into_earlier_snapshots(draft: UserDraft) {
        let first = apply_edit(&draft, FieldPath::Address(AddressField::Geo(GeoField::Lng)), "1");
        let second = apply_edit(&first, FieldPath::Address(AddressField::Geo(GeoField::Lat)), "2");

        assert_eq!(first.address.geo.lat, "40.7128");
        assert_eq!(second.address.geo.lng, "1");
        assert_eq!(draft.address.geo.lng, "-74.0060");
    }

    #[rstest]
    fn keys_follow_the_leaf_segment() {
        let keys: Vec<&str> = FieldPath::ALL.iter().map(|path| path.key().as_str()).collect();
        assert_eq!(
            keys,
            ["name", "email", "phone", "company", "street", "city", "zip", "lat", "lng"]
        );
    }
}
