//! Recipe aggregate and its validated building blocks.
//!
//! A recipe owns an ordered list of ingredients. Text and numeric fields are
//! newtypes whose constructors enforce the catalogue bounds, so any value of
//! these types is already known to be storable and presentable.

mod cuisine;

use std::fmt;

use chrono::{NaiveDateTime, SubsecRound};

pub use self::cuisine::{Cuisine, UnknownCuisine};

/// Bounds violation for text fields. Lengths count Unicode scalar values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TextLengthError {
    #[error("must contain at least {min} character(s)")]
    TooShort { min: usize },
    #[error("must contain at most {max} characters")]
    TooLong { max: usize },
}

/// Bounds violation for integer fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RangeError {
    #[error("must be greater than or equal to {min}")]
    BelowMinimum { min: i64 },
    #[error("must be less than or equal to {max}")]
    AboveMaximum { max: i64 },
}

macro_rules! bounded_text {
    ($(#[$meta:meta])* $name:ident, $min:expr, $max:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(String);

        impl $name {
            /// Minimum length in characters.
            pub const MIN_LEN: usize = $min;
            /// Maximum length in characters.
            pub const MAX_LEN: usize = $max;

            /// Validate and wrap `value`.
            pub fn new(value: impl Into<String>) -> Result<Self, TextLengthError> {
                let value = value.into();
                let length = value.chars().count();
                if length < Self::MIN_LEN {
                    return Err(TextLengthError::TooShort { min: Self::MIN_LEN });
                }
                if length > Self::MAX_LEN {
                    return Err(TextLengthError::TooLong { max: Self::MAX_LEN });
                }
                Ok(Self(value))
            }

            /// Borrow the validated text.
            #[must_use]
            pub fn as_str(&self) -> &str {
                self.0.as_str()
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

bounded_text!(
    /// Dish name, 1 to 100 characters.
    RecipeName,
    1,
    100
);
bounded_text!(
    /// Cooking instructions, 1 to 1000 characters.
    RecipeDescription,
    1,
    1000
);
bounded_text!(
    /// Ingredient name, 1 to 100 characters.
    IngredientName,
    1,
    100
);
bounded_text!(
    /// Free-text amount such as `100 г` or `1 шт`, 1 to 20 characters.
    IngredientQuantity,
    1,
    20
);

/// Store-assigned recipe identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecipeId(i32);

impl RecipeId {
    /// Wrap a store-assigned id.
    #[must_use]
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    /// Raw id value.
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Cooking time in whole minutes, 1 to 300 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CookingTime(i16);

impl CookingTime {
    /// Shortest accepted cooking time.
    pub const MIN_MINUTES: i16 = 1;
    /// Longest accepted cooking time.
    pub const MAX_MINUTES: i16 = 300;

    /// Validate a minute count.
    pub fn new(minutes: i64) -> Result<Self, RangeError> {
        if minutes < i64::from(Self::MIN_MINUTES) {
            return Err(RangeError::BelowMinimum {
                min: i64::from(Self::MIN_MINUTES),
            });
        }
        if minutes > i64::from(Self::MAX_MINUTES) {
            return Err(RangeError::AboveMaximum {
                max: i64::from(Self::MAX_MINUTES),
            });
        }
        i16::try_from(minutes).map(Self).map_err(|_| RangeError::AboveMaximum {
            max: i64::from(Self::MAX_MINUTES),
        })
    }

    /// Minutes as stored.
    #[must_use]
    pub const fn minutes(self) -> i16 {
        self.0
    }
}

/// Number of detail views. Never negative, only ever incremented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewCount(i32);

impl ViewCount {
    /// Validate a count read from a payload or the store.
    pub fn new(count: i64) -> Result<Self, RangeError> {
        if count < 0 {
            return Err(RangeError::BelowMinimum { min: 0 });
        }
        i32::try_from(count).map(Self).map_err(|_| RangeError::AboveMaximum {
            max: i64::from(i32::MAX),
        })
    }

    /// Raw count.
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }

    /// The count after one more view. Saturates at `i32::MAX`.
    #[must_use]
    pub const fn incremented(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

/// One ingredient line of a recipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ingredient {
    pub name: IngredientName,
    pub quantity: IngredientQuantity,
}

/// Validated create payload as received from a client.
///
/// `created_at` stays optional until the catalogue service stamps it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeDraft {
    pub name: RecipeName,
    pub cuisine: Option<Cuisine>,
    pub description: RecipeDescription,
    pub cooking_time: CookingTime,
    pub created_at: Option<NaiveDateTime>,
    pub views_amount: ViewCount,
    pub ingredients: Vec<Ingredient>,
}

impl RecipeDraft {
    /// Fill the creation timestamp with `now` when the client omitted it.
    ///
    /// Timestamps are truncated to microseconds, the store's precision.
    #[must_use]
    pub fn resolve(self, now: NaiveDateTime) -> NewRecipe {
        let RecipeDraft {
            name,
            cuisine,
            description,
            cooking_time,
            created_at,
            views_amount,
            ingredients,
        } = self;
        NewRecipe {
            name,
            cuisine,
            description,
            cooking_time,
            created_at: created_at.unwrap_or(now).trunc_subsecs(6),
            views_amount,
            ingredients,
        }
    }
}

/// Recipe ready to be written as one unit with its ingredients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecipe {
    pub name: RecipeName,
    pub cuisine: Option<Cuisine>,
    pub description: RecipeDescription,
    pub cooking_time: CookingTime,
    pub created_at: NaiveDateTime,
    pub views_amount: ViewCount,
    pub ingredients: Vec<Ingredient>,
}

impl NewRecipe {
    /// Attach the identity assigned by the store.
    #[must_use]
    pub fn into_recipe(self, id: RecipeId) -> Recipe {
        let NewRecipe {
            name,
            cuisine,
            description,
            cooking_time,
            created_at,
            views_amount,
            ingredients,
        } = self;
        Recipe {
            id,
            name,
            cuisine,
            description,
            cooking_time,
            created_at,
            views_amount,
            ingredients,
        }
    }
}

/// Persisted recipe with its ingredients in insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    pub id: RecipeId,
    pub name: RecipeName,
    pub cuisine: Option<Cuisine>,
    pub description: RecipeDescription,
    pub cooking_time: CookingTime,
    pub created_at: NaiveDateTime,
    pub views_amount: ViewCount,
    pub ingredients: Vec<Ingredient>,
}

impl Recipe {
    /// Reduced projection used by listings.
    #[must_use]
    pub fn preview(&self) -> RecipePreview {
        RecipePreview {
            name: self.name.clone(),
            cooking_time: self.cooking_time,
            views_amount: self.views_amount,
        }
    }
}

/// List projection: name, cooking time and view count only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipePreview {
    pub name: RecipeName,
    pub cooking_time: CookingTime,
    pub views_amount: ViewCount,
}
