use serde::{Deserialize, Serialize};

/// One of the seven fixed decade buckets used by every aggregator.
///
/// Buckets are total and disjoint over the valid year range: a cleaned track
/// belongs to exactly one. The last bucket is deliberately asymmetric, it
/// covers only 2020 through 2024.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Decade {
    #[serde(rename = "1960s")]
    Sixties,
    #[serde(rename = "1970s")]
    Seventies,
    #[serde(rename = "1980s")]
    Eighties,
    #[serde(rename = "1990s")]
    Nineties,
    #[serde(rename = "2000s")]
    Aughts,
    #[serde(rename = "2010s")]
    Tens,
    #[serde(rename = "2020s")]
    Twenties,
}

/// All buckets in chronological order
pub const DECADES: [Decade; 7] = [
    Decade::Sixties,
    Decade::Seventies,
    Decade::Eighties,
    Decade::Nineties,
    Decade::Aughts,
    Decade::Tens,
    Decade::Twenties,
];

impl Decade {
    /// Map a year onto its bucket. Years outside [1960, 2024] have no bucket;
    /// cleaned tracks never hit that case.
    pub fn from_year(year: i32) -> Option<Decade> {
        match year {
            1960..=1969 => Some(Decade::Sixties),
            1970..=1979 => Some(Decade::Seventies),
            1980..=1989 => Some(Decade::Eighties),
            1990..=1999 => Some(Decade::Nineties),
            2000..=2009 => Some(Decade::Aughts),
            2010..=2019 => Some(Decade::Tens),
            2020..=2024 => Some(Decade::Twenties),
            _ => None,
        }
    }

    pub fn start_year(&self) -> i32 {
        match self {
            Decade::Sixties => 1960,
            Decade::Seventies => 1970,
            Decade::Eighties => 1980,
            Decade::Nineties => 1990,
            Decade::Aughts => 2000,
            Decade::Tens => 2010,
            Decade::Twenties => 2020,
        }
    }

    pub fn end_year(&self) -> i32 {
        match self {
            Decade::Twenties => 2024,
            other => other.start_year() + 9,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Decade::Sixties => "1960s",
            Decade::Seventies => "1970s",
            Decade::Eighties => "1980s",
            Decade::Nineties => "1990s",
            Decade::Aughts => "2000s",
            Decade::Tens => "2010s",
            Decade::Twenties => "2020s",
        }
    }
}
