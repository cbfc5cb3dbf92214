//! Sort directives, header-click cycling and string collation.

use crate::error::{Result, RollcallError};
use crate::store::Record;
use std::cmp::Ordering;
use std::str::FromStr;

/// Columns the view can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortField {
    Name,
    Email,
    Phone,
    Score,
    LastActivity,
}

impl SortField {
    pub const ALL: [SortField; 5] = [
        SortField::Name,
        SortField::Email,
        SortField::Phone,
        SortField::Score,
        SortField::LastActivity,
    ];

    /// Column header text.
    pub fn label(self) -> &'static str {
        match self {
            SortField::Name => "Name",
            SortField::Email => "Email",
            SortField::Phone => "Phone",
            SortField::Score => "Score",
            SortField::LastActivity => "Last Activity",
        }
    }

    /// Ascending comparison of two records on this field.
    pub fn compare(self, a: &Record, b: &Record) -> Ordering {
        match self {
            SortField::Name => locale_cmp(&a.name, &b.name),
            SortField::Email => locale_cmp(&a.email, &b.email),
            SortField::Phone => locale_cmp(&a.phone, &b.phone),
            SortField::Score => a.score.cmp(&b.score),
            SortField::LastActivity => a.last_activity.cmp(&b.last_activity),
        }
    }

    pub fn is_text(self) -> bool {
        matches!(self, SortField::Name | SortField::Email | SortField::Phone)
    }

    /// The field's text for string columns, `None` for numeric and date columns.
    pub fn text(self, record: &Record) -> Option<&str> {
        match self {
            SortField::Name => Some(&record.name),
            SortField::Email => Some(&record.email),
            SortField::Phone => Some(&record.phone),
            SortField::Score | SortField::LastActivity => None,
        }
    }
}

impl FromStr for SortField {
    type Err = RollcallError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(SortField::Name),
            "email" => Ok(SortField::Email),
            "phone" => Ok(SortField::Phone),
            "score" => Ok(SortField::Score),
            "last_activity" | "last-activity" | "lastactivity" | "activity" => {
                Ok(SortField::LastActivity)
            }
            _ => Err(RollcallError::unknown_sort_field(s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    /// Header indicator glyph.
    pub fn indicator(self) -> char {
        match self {
            SortDirection::Ascending => '▲',
            SortDirection::Descending => '▼',
        }
    }

    /// Orient an ascending comparison.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// Current sort directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortState {
    #[default]
    Unsorted,
    Sorted {
        field: SortField,
        direction: SortDirection,
    },
}

impl SortState {
    pub fn ascending(field: SortField) -> Self {
        SortState::Sorted {
            field,
            direction: SortDirection::Ascending,
        }
    }

    pub fn descending(field: SortField) -> Self {
        SortState::Sorted {
            field,
            direction: SortDirection::Descending,
        }
    }

    /// Next state after a header click on `field`.
    ///
    /// Repeated clicks on one field cycle ascending, descending, unsorted. Clicking a
    /// different field starts that field at ascending.
    pub fn cycle(self, field: SortField) -> Self {
        match self {
            SortState::Sorted {
                field: current,
                direction: SortDirection::Ascending,
            } if current == field => SortState::descending(field),
            SortState::Sorted {
                field: current,
                direction: SortDirection::Descending,
            } if current == field => SortState::Unsorted,
            _ => SortState::ascending(field),
        }
    }

    pub fn field(self) -> Option<SortField> {
        match self {
            SortState::Unsorted => None,
            SortState::Sorted { field, .. } => Some(field),
        }
    }

    /// Direction if `field` is the active sort column.
    pub fn direction_for(self, field: SortField) -> Option<SortDirection> {
        match self {
            SortState::Sorted {
                field: current,
                direction,
            } if current == field => Some(direction),
            _ => None,
        }
    }

    /// Order two records under this directive. `Unsorted` treats everything as equal.
    pub fn compare(self, a: &Record, b: &Record) -> Ordering {
        match self {
            SortState::Unsorted => Ordering::Equal,
            SortState::Sorted { field, direction } => direction.apply(field.compare(a, b)),
        }
    }
}

impl FromStr for SortState {
    type Err = RollcallError;

    /// Parse `field`, `field:asc`, `field:desc` or `none`.
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("none") {
            return Ok(SortState::Unsorted);
        }
        let (field, direction) = match trimmed.split_once(':') {
            Some((field, direction)) => (field, Some(direction)),
            None => (trimmed, None),
        };
        let field: SortField = field.parse()?;
        match direction.map(|d| d.trim().to_ascii_lowercase()) {
            None => Ok(SortState::ascending(field)),
            Some(d) if d == "asc" => Ok(SortState::ascending(field)),
            Some(d) if d == "desc" => Ok(SortState::descending(field)),
            Some(d) => Err(RollcallError::invalid_argument(format!(
                "unknown sort direction '{d}'"
            ))),
        }
    }
}

/// Canned sort directives offered by the "Sort By" menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortPreset {
    MostRecent,
    HighestScore,
    NameAToZ,
}

impl SortPreset {
    pub fn label(self) -> &'static str {
        match self {
            SortPreset::MostRecent => "Most Recent",
            SortPreset::HighestScore => "Highest Score",
            SortPreset::NameAToZ => "Name A-Z",
        }
    }

    pub fn sort_state(self) -> SortState {
        match self {
            SortPreset::MostRecent => SortState::descending(SortField::LastActivity),
            SortPreset::HighestScore => SortState::descending(SortField::Score),
            SortPreset::NameAToZ => SortState::ascending(SortField::Name),
        }
    }
}

/// Collation class: punctuation and symbols, then digits, then letters.
fn collation_class(c: char) -> u8 {
    if c.is_alphabetic() {
        2
    } else if c.is_numeric() {
        1
    } else {
        0
    }
}

/// Lead byte of a non-ASCII character in each class. Every ASCII rank of a class sits
/// below its escape, and every escape sits below the next class.
const CLASS_ESCAPE: [u8; 3] = [67, 78, 105];

/// Rank of an ASCII byte: symbols 1..=66, digits 68..=77, letters 79..=104.
fn ascii_rank(byte: u8) -> u8 {
    match byte {
        b'a'..=b'z' => byte - b'a' + 79,
        b'A'..=b'Z' => byte - b'A' + 79,
        b'0'..=b'9' => byte - b'0' + 68,
        0..=47 => byte + 1,
        58..=64 => byte - 58 + 49,
        91..=96 => byte - 91 + 56,
        _ => byte.saturating_sub(123) + 62,
    }
}

/// Encode one folded character as a prefix-free unit. ASCII takes one byte; anything else
/// takes its class escape followed by the code point in three big-endian bytes.
fn collation_unit(c: char) -> ([u8; 4], usize) {
    if c.is_ascii() {
        return ([ascii_rank(c as u8), 0, 0, 0], 1);
    }
    let [_, high, mid, low] = u32::from(c).to_be_bytes();
    let escape = CLASS_ESCAPE[usize::from(collation_class(c))];
    ([escape, high, mid, low], 4)
}

fn collation_units(s: &str) -> impl Iterator<Item = u8> + '_ {
    s.chars().flat_map(char::to_lowercase).flat_map(|c| {
        let (unit, len) = collation_unit(c);
        unit.into_iter().take(len)
    })
}

/// Primary collation key: case-folded, punctuation before digits before letters.
///
/// Byte-wise comparison of two keys gives the primary order of [`locale_cmp`], so a sort
/// can build each key once instead of re-folding both strings on every comparison.
pub fn collation_key(s: &str) -> Box<[u8]> {
    collation_units(s).collect()
}

/// Secondary order for strings whose primary keys are equal: lowercase before uppercase
/// at the first differing character.
pub fn case_tiebreak(a: &str, b: &str) -> Ordering {
    if a == b {
        return Ordering::Equal;
    }
    a.chars()
        .zip(b.chars())
        .find(|(x, y)| x != y)
        .map(|(x, y)| match (x.is_lowercase(), y.is_lowercase()) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            _ => x.cmp(&y),
        })
        .unwrap_or_else(|| a.len().cmp(&b.len()))
}

/// Locale-style string ordering.
///
/// Approximates the root collation: compares case-insensitively with punctuation before
/// digits before letters, then breaks ties with lowercase before uppercase.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    collation_units(a)
        .cmp(collation_units(b))
        .then_with(|| case_tiebreak(a, b))
}
