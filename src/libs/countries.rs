//! Static country tables.
//!
//! Everything here is a lookup, never a computation: the calling codes and
//! display names live in one immutable table built into the binary. The
//! candidate list handed to the country selector is derived from it, with an
//! optional preferred block separated by a divider entry.

use phonenumber::country::Id;

pub(crate) struct CountryEntry {
    pub id: Id,
    pub name: &'static str,
    pub calling_code: u16,
}

/// One row of the selector's candidate list. A `None` id marks a divider
/// between the preferred block and the full list; dividers are never
/// selectable.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct CountryListEntry {
    pub label: String,
    pub id: Option<Id>,
}

macro_rules! country {
    ($id:ident, $name:literal, $code:literal) => {
        CountryEntry {
            id: Id::$id,
            name: $name,
            calling_code: $code,
        }
    };
}

/// Sorted by display name.
static COUNTRIES: &[CountryEntry] = &[
    country!(AR, "Argentina", 54),
    country!(AU, "Australia", 61),
    country!(AT, "Austria", 43),
    country!(BE, "Belgium", 32),
    country!(BR, "Brazil", 55),
    country!(CA, "Canada", 1),
    country!(CL, "Chile", 56),
    country!(CN, "China", 86),
    country!(CO, "Colombia", 57),
    country!(CZ, "Czechia", 420),
    country!(DK, "Denmark", 45),
    country!(EG, "Egypt", 20),
    country!(FI, "Finland", 358),
    country!(FR, "France", 33),
    country!(DE, "Germany", 49),
    country!(GR, "Greece", 30),
    country!(HK, "Hong Kong", 852),
    country!(HU, "Hungary", 36),
    country!(IN, "India", 91),
    country!(ID, "Indonesia", 62),
    country!(IE, "Ireland", 353),
    country!(IL, "Israel", 972),
    country!(IT, "Italy", 39),
    country!(JP, "Japan", 81),
    country!(KE, "Kenya", 254),
    country!(MY, "Malaysia", 60),
    country!(MX, "Mexico", 52),
    country!(NL, "Netherlands", 31),
    country!(NZ, "New Zealand", 64),
    country!(NG, "Nigeria", 234),
    country!(NO, "Norway", 47),
    country!(PK, "Pakistan", 92),
    country!(PH, "Philippines", 63),
    country!(PL, "Poland", 48),
    country!(PT, "Portugal", 351),
    country!(RO, "Romania", 40),
    country!(SA, "Saudi Arabia", 966),
    country!(SG, "Singapore", 65),
    country!(ZA, "South Africa", 27),
    country!(KR, "South Korea", 82),
    country!(ES, "Spain", 34),
    country!(SE, "Sweden", 46),
    country!(CH, "Switzerland", 41),
    country!(TH, "Thailand", 66),
    country!(TR, "Turkey", 90),
    country!(UA, "Ukraine", 380),
    country!(AE, "United Arab Emirates", 971),
    country!(GB, "United Kingdom", 44),
    country!(US, "United States", 1),
    country!(VN, "Vietnam", 84),
];

pub(crate) fn all() -> &'static [CountryEntry] {
    COUNTRIES
}

pub(crate) fn lookup(id: Id) -> Option<&'static CountryEntry> {
    COUNTRIES.iter().find(|e| e.id == id)
}

pub(crate) fn calling_code(id: Id) -> Option<u16> {
    lookup(id).map(|e| e.calling_code)
}

/// Resolve a two-letter region code from config or CLI input.
pub(crate) fn by_code(code: &str) -> Option<Id> {
    COUNTRIES
        .iter()
        .find(|e| e.id.as_ref().eq_ignore_ascii_case(code.trim()))
        .map(|e| e.id)
}

/// Build the candidate list for the country selector.
///
/// Preferred countries come first in the given order, followed by a divider
/// entry, followed by the full table. With no preferred countries the list is
/// just the table, no divider.
pub(crate) fn country_list(preferred: &[Id]) -> Vec<CountryListEntry> {
    let mut list: Vec<CountryListEntry> = preferred
        .iter()
        .filter_map(|id| lookup(*id))
        .map(|e| CountryListEntry {
            label: e.name.to_string(),
            id: Some(e.id),
        })
        .collect();

    if !list.is_empty() {
        list.push(CountryListEntry {
            label: String::new(),
            id: None,
        });
    }

    list.extend(all().iter().map(|e| CountryListEntry {
        label: e.name.to_string(),
        id: Some(e.id),
    }));
    list
}
