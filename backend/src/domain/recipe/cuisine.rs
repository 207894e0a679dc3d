//! Closed set of cuisines a recipe may belong to.

use std::fmt;
use std::str::FromStr;

/// Cuisine of a recipe.
///
/// The wire representation is the localized display string returned by
/// [`Cuisine::as_str`]. Parsing is exact and case-sensitive.
///
/// # Examples
/// ```
/// use cookbook::domain::Cuisine;
///
/// let cuisine: Cuisine = "Грузинская".parse().expect("known cuisine");
/// assert_eq!(cuisine, Cuisine::Georgian);
/// assert!("Немецкая".parse::<Cuisine>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cuisine {
    Russian,
    Chinese,
    Japanese,
    Indian,
    Italian,
    French,
    Georgian,
    PanAsian,
    Mexican,
    International,
}

/// Raised when a string names no known cuisine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown cuisine: {value}")]
pub struct UnknownCuisine {
    pub value: String,
}

impl Cuisine {
    /// Every variant, in declaration order.
    pub const ALL: [Cuisine; 10] = [
        Cuisine::Russian,
        Cuisine::Chinese,
        Cuisine::Japanese,
        Cuisine::Indian,
        Cuisine::Italian,
        Cuisine::French,
        Cuisine::Georgian,
        Cuisine::PanAsian,
        Cuisine::Mexican,
        Cuisine::International,
    ];

    /// Localized display string, also used in storage and on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Cuisine::Russian => "Русская",
            Cuisine::Chinese => "Китайская",
            Cuisine::Japanese => "Японская",
            Cuisine::Indian => "Индийская",
            Cuisine::Italian => "Итальянская",
            Cuisine::French => "Французская",
            Cuisine::Georgian => "Грузинская",
            Cuisine::PanAsian => "Паназиатская",
            Cuisine::Mexican => "Мексиканская",
            Cuisine::International => "Интернациональная",
        }
    }

    /// Human listing of accepted values: `'A', 'B' or 'C'`.
    #[must_use]
    pub fn expected_values() -> String {
        let quoted: Vec<String> = Self::ALL
            .iter()
            .map(|cuisine| format!("'{}'", cuisine.as_str()))
            .collect();
        match quoted.split_last() {
            Some((last, rest)) if !rest.is_empty() => format!("{} or {last}", rest.join(", ")),
            Some((last, _)) => last.clone(),
            None => String::new(),
        }
    }
}

impl fmt::Display for Cuisine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Cuisine {
    type Err = UnknownCuisine;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|cuisine| cuisine.as_str() == s)
            .ok_or_else(|| UnknownCuisine {
                value: s.to_owned(),
            })
    }
}
