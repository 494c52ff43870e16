//! Flag glyph table.
//!
//! Terminal cells being what they are, a flag is just a two-cell emoji. The
//! table is static and read-only; a country without an entry renders as a
//! blank placeholder of the same footprint so row layout never shifts.

use phonenumber::country::Id;

/// Rendered in place of a missing flag. Same two-cell footprint as the
/// emoji flags.
pub(crate) const FLAG_PLACEHOLDER: &str = "  ";

static FLAGS: &[(Id, &str)] = &[
    (Id::AR, "🇦🇷"),
    (Id::AU, "🇦🇺"),
    (Id::AT, "🇦🇹"),
    (Id::BE, "🇧🇪"),
    (Id::BR, "🇧🇷"),
    (Id::CA, "🇨🇦"),
    (Id::CL, "🇨🇱"),
    (Id::CN, "🇨🇳"),
    (Id::CO, "🇨🇴"),
    (Id::CZ, "🇨🇿"),
    (Id::DK, "🇩🇰"),
    (Id::EG, "🇪🇬"),
    (Id::FI, "🇫🇮"),
    (Id::FR, "🇫🇷"),
    (Id::DE, "🇩🇪"),
    (Id::GR, "🇬🇷"),
    (Id::HK, "🇭🇰"),
    (Id::HU, "🇭🇺"),
    (Id::IN, "🇮🇳"),
    (Id::ID, "🇮🇩"),
    (Id::IE, "🇮🇪"),
    (Id::IL, "🇮🇱"),
    (Id::IT, "🇮🇹"),
    (Id::JP, "🇯🇵"),
    (Id::KE, "🇰🇪"),
    (Id::MY, "🇲🇾"),
    (Id::MX, "🇲🇽"),
    (Id::NL, "🇳🇱"),
    (Id::NZ, "🇳🇿"),
    (Id::NG, "🇳🇬"),
    (Id::NO, "🇳🇴"),
    (Id::PK, "🇵🇰"),
    (Id::PH, "🇵🇭"),
    (Id::PL, "🇵🇱"),
    (Id::PT, "🇵🇹"),
    (Id::RO, "🇷🇴"),
    (Id::SA, "🇸🇦"),
    (Id::SG, "🇸🇬"),
    (Id::ZA, "🇿🇦"),
    (Id::KR, "🇰🇷"),
    (Id::ES, "🇪🇸"),
    (Id::SE, "🇸🇪"),
    (Id::CH, "🇨🇭"),
    (Id::TH, "🇹🇭"),
    (Id::TR, "🇹🇷"),
    (Id::UA, "🇺🇦"),
    (Id::AE, "🇦🇪"),
    (Id::GB, "🇬🇧"),
    (Id::US, "🇺🇸"),
    (Id::VN, "🇻🇳"),
];

pub(crate) fn flag(id: Id) -> Option<&'static str> {
    FLAGS.iter().find(|(i, _)| *i == id).map(|(_, f)| *f)
}

pub(crate) fn flag_or_placeholder(id: Id) -> &'static str {
    flag(id).unwrap_or(FLAG_PLACEHOLDER)
}
