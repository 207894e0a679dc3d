//! Validation of inbound recipe payloads.
//!
//! The create body is walked as raw JSON rather than deserialised straight
//! into a typed struct, so every violation is collected before the request is
//! rejected. Each violation uses the `{type, loc, msg, input, ctx}` shape, with
//! `loc` rooted at `"body"` (or `"path"` for path parameters).

use std::num::IntErrorKind;

use actix_web::error::JsonPayloadError;
use actix_web::web;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::Serialize;
use serde_json::{Value, json};
use tracing::debug;
use utoipa::ToSchema;

use crate::domain::{
    CookingTime, Cuisine, Error, Ingredient, IngredientName, IngredientQuantity, RangeError,
    RecipeDescription, RecipeDraft, RecipeName, TextLengthError, ViewCount,
};

/// Kind of a single validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    Missing,
    StringType,
    StringTooShort,
    StringTooLong,
    IntType,
    IntParsing,
    IntFromFloat,
    GreaterThanEqual,
    LessThanEqual,
    Enum,
    ListType,
    ModelType,
    DatetimeType,
    DatetimeParsing,
    JsonInvalid,
}

/// One entry of a 422 `detail` list.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Violation {
    #[serde(rename = "type")]
    pub kind: ViolationKind,
    /// Path to the offending value, e.g. `["body", "ingredients", 0, "name"]`.
    #[schema(value_type = Vec<Object>)]
    pub loc: Vec<Value>,
    pub msg: String,
    /// The offending value; the enclosing object for `missing`.
    #[schema(value_type = Object)]
    pub input: Value,
    /// Constraint context such as `min_length`, `le` or `expected`.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub ctx: Option<Value>,
}

/// Build the domain error carrying `violations` as its details.
pub fn validation_error(violations: &[Violation]) -> Error {
    let details = serde_json::to_value(violations).unwrap_or_else(|_| Value::Array(Vec::new()));
    Error::invalid_request("request validation failed").with_details(details)
}

#[derive(Debug, Clone)]
struct Loc(Vec<Value>);

impl Loc {
    fn root(segment: &str) -> Self {
        Self(vec![Value::from(segment)])
    }

    fn field(&self, name: &str) -> Self {
        let mut path = self.0.clone();
        path.push(Value::from(name));
        Self(path)
    }

    fn index(&self, index: usize) -> Self {
        let mut path = self.0.clone();
        path.push(Value::from(index));
        Self(path)
    }
}

fn plural(count: usize) -> &'static str {
    if count == 1 { "character" } else { "characters" }
}

#[derive(Debug, Default)]
struct Checker {
    violations: Vec<Violation>,
}

impl Checker {
    fn push(
        &mut self,
        kind: ViolationKind,
        loc: Loc,
        msg: impl Into<String>,
        input: &Value,
        ctx: Option<Value>,
    ) {
        self.violations.push(Violation {
            kind,
            loc: loc.0,
            msg: msg.into(),
            input: input.clone(),
            ctx,
        });
    }

    fn object(&mut self, value: &Value, loc: &Loc) -> bool {
        if value.is_object() {
            return true;
        }
        self.push(
            ViolationKind::ModelType,
            loc.clone(),
            "Input should be a valid dictionary or object to extract fields from",
            value,
            None,
        );
        false
    }

    /// Look up a required field; records `missing` when absent.
    fn required<'a>(&mut self, object: &'a Value, loc: &Loc, field: &str) -> Option<(&'a Value, Loc)> {
        match object.get(field) {
            Some(value) => Some((value, loc.field(field))),
            None => {
                self.push(
                    ViolationKind::Missing,
                    loc.field(field),
                    "Field required",
                    object,
                    None,
                );
                None
            }
        }
    }

    /// Look up an optional field; `null` counts as absent.
    fn optional<'a>(object: &'a Value, loc: &Loc, field: &str) -> Option<(&'a Value, Loc)> {
        object
            .get(field)
            .filter(|value| !value.is_null())
            .map(|value| (value, loc.field(field)))
    }

    fn text<T>(
        &mut self,
        value: &Value,
        loc: Loc,
        parse: impl FnOnce(&str) -> Result<T, TextLengthError>,
    ) -> Option<T> {
        let Some(raw) = value.as_str() else {
            self.push(
                ViolationKind::StringType,
                loc,
                "Input should be a valid string",
                value,
                None,
            );
            return None;
        };
        match parse(raw) {
            Ok(parsed) => Some(parsed),
            Err(TextLengthError::TooShort { min }) => {
                self.push(
                    ViolationKind::StringTooShort,
                    loc,
                    format!("String should have at least {min} {}", plural(min)),
                    value,
                    Some(json!({ "min_length": min })),
                );
                None
            }
            Err(TextLengthError::TooLong { max }) => {
                self.push(
                    ViolationKind::StringTooLong,
                    loc,
                    format!("String should have at most {max} {}", plural(max)),
                    value,
                    Some(json!({ "max_length": max })),
                );
                None
            }
        }
    }

    /// Accepts JSON integers, integral floats and numeric strings.
    fn integer(&mut self, value: &Value, loc: &Loc) -> Option<i64> {
        match value {
            Value::Number(number) => {
                if let Some(int) = number.as_i64() {
                    return Some(int);
                }
                let float = number.as_f64()?;
                if float.fract() == 0.0 {
                    // Saturates; out-of-range values then fail the bound check.
                    return Some(float as i64);
                }
                self.push(
                    ViolationKind::IntFromFloat,
                    loc.clone(),
                    "Input should be a valid integer, got a number with a fractional part",
                    value,
                    None,
                );
                None
            }
            Value::String(raw) => {
                let parsed = raw.trim().parse::<i64>().ok();
                if parsed.is_none() {
                    self.push(
                        ViolationKind::IntParsing,
                        loc.clone(),
                        "Input should be a valid integer, unable to parse string as an integer",
                        value,
                        None,
                    );
                }
                parsed
            }
            _ => {
                self.push(
                    ViolationKind::IntType,
                    loc.clone(),
                    "Input should be a valid integer",
                    value,
                    None,
                );
                None
            }
        }
    }

    fn bounded<T>(
        &mut self,
        value: &Value,
        loc: Loc,
        parse: impl FnOnce(i64) -> Result<T, RangeError>,
    ) -> Option<T> {
        let int = self.integer(value, &loc)?;
        match parse(int) {
            Ok(parsed) => Some(parsed),
            Err(RangeError::BelowMinimum { min }) => {
                self.push(
                    ViolationKind::GreaterThanEqual,
                    loc,
                    format!("Input should be greater than or equal to {min}"),
                    value,
                    Some(json!({ "ge": min })),
                );
                None
            }
            Err(RangeError::AboveMaximum { max }) => {
                self.push(
                    ViolationKind::LessThanEqual,
                    loc,
                    format!("Input should be less than or equal to {max}"),
                    value,
                    Some(json!({ "le": max })),
                );
                None
            }
        }
    }

    fn cuisine(&mut self, value: &Value, loc: Loc) -> Option<Cuisine> {
        if let Some(cuisine) = value.as_str().and_then(|raw| raw.parse().ok()) {
            return Some(cuisine);
        }
        let expected = Cuisine::expected_values();
        self.push(
            ViolationKind::Enum,
            loc,
            format!("Input should be {expected}"),
            value,
            Some(json!({ "expected": expected })),
        );
        None
    }

    fn timestamp(&mut self, value: &Value, loc: Loc) -> Option<NaiveDateTime> {
        let Some(raw) = value.as_str() else {
            self.push(
                ViolationKind::DatetimeType,
                loc,
                "Input should be a valid datetime",
                value,
                None,
            );
            return None;
        };
        let parsed = parse_timestamp(raw);
        if parsed.is_none() {
            self.push(
                ViolationKind::DatetimeParsing,
                loc,
                "Input should be a valid datetime, invalid datetime format",
                value,
                Some(json!({ "error": "invalid datetime format" })),
            );
        }
        parsed
    }

    fn ingredient(&mut self, item: &Value, loc: &Loc) -> Option<Ingredient> {
        if !self.object(item, loc) {
            return None;
        }
        let name = self
            .required(item, loc, "name")
            .and_then(|(value, at)| self.text(value, at, |raw| IngredientName::new(raw)));
        let quantity = self
            .required(item, loc, "quantity")
            .and_then(|(value, at)| self.text(value, at, |raw| IngredientQuantity::new(raw)));
        Some(Ingredient {
            name: name?,
            quantity: quantity?,
        })
    }

    fn ingredients(&mut self, value: &Value, loc: Loc) -> Option<Vec<Ingredient>> {
        let Some(items) = value.as_array() else {
            self.push(
                ViolationKind::ListType,
                loc,
                "Input should be a valid list",
                value,
                None,
            );
            return None;
        };
        let mut parsed = Vec::with_capacity(items.len());
        let mut complete = true;
        for (index, item) in items.iter().enumerate() {
            match self.ingredient(item, &loc.index(index)) {
                Some(ingredient) => parsed.push(ingredient),
                None => complete = false,
            }
        }
        complete.then_some(parsed)
    }
}

/// Parse a creation timestamp.
///
/// Accepts RFC 3339 (offsets are normalised to UTC and dropped), naive
/// `YYYY-MM-DDTHH:MM:SS[.f]` with `T` or a space, and bare dates (midnight).
pub(crate) fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

    if let Ok(with_offset) = DateTime::parse_from_rfc3339(raw) {
        return Some(with_offset.with_timezone(&Utc).naive_utc());
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .map(|date| date.and_time(NaiveTime::MIN))
        })
}

/// Validate a create body, collecting every violation.
///
/// Unknown fields (including a client-supplied `id`) are ignored.
pub fn recipe_draft(body: &Value) -> Result<RecipeDraft, Vec<Violation>> {
    let mut check = Checker::default();
    let loc = Loc::root("body");
    if !check.object(body, &loc) {
        return Err(check.violations);
    }

    let name = check
        .required(body, &loc, "name")
        .and_then(|(value, at)| check.text(value, at, |raw| RecipeName::new(raw)));
    let cooking_time = check
        .required(body, &loc, "cooking_time")
        .and_then(|(value, at)| check.bounded(value, at, CookingTime::new));
    let views_amount = match Checker::optional(body, &loc, "views_amount") {
        Some((value, at)) => check.bounded(value, at, ViewCount::new),
        None => Some(ViewCount::default()),
    };
    let description = check
        .required(body, &loc, "description")
        .and_then(|(value, at)| check.text(value, at, |raw| RecipeDescription::new(raw)));
    let cuisine = match Checker::optional(body, &loc, "cuisine") {
        Some((value, at)) => check.cuisine(value, at).map(Some),
        None => Some(None),
    };
    let created_at = match Checker::optional(body, &loc, "created_at") {
        Some((value, at)) => check.timestamp(value, at).map(Some),
        None => Some(None),
    };
    let ingredients = check
        .required(body, &loc, "ingredients")
        .and_then(|(value, at)| check.ingredients(value, at));

    match (
        name,
        cooking_time,
        views_amount,
        description,
        cuisine,
        created_at,
        ingredients,
    ) {
        (
            Some(name),
            Some(cooking_time),
            Some(views_amount),
            Some(description),
            Some(cuisine),
            Some(created_at),
            Some(ingredients),
        ) if check.violations.is_empty() => Ok(RecipeDraft {
            name,
            cuisine,
            description,
            cooking_time,
            created_at,
            views_amount,
            ingredients,
        }),
        _ => Err(check.violations),
    }
}

fn missing_body() -> Violation {
    Violation {
        kind: ViolationKind::Missing,
        loc: Loc::root("body").0,
        msg: "Field required".to_owned(),
        input: Value::Null,
        ctx: None,
    }
}

fn invalid_json(error: &serde_json::Error) -> Violation {
    Violation {
        kind: ViolationKind::JsonInvalid,
        loc: Loc::root("body").index(error.column()).0,
        msg: "JSON decode error".to_owned(),
        input: json!({}),
        ctx: Some(json!({ "error": error.to_string() })),
    }
}

fn json_payload_error(error: JsonPayloadError) -> actix_web::Error {
    let violation = match error {
        JsonPayloadError::ContentType => missing_body(),
        JsonPayloadError::Deserialize(inner) if inner.is_eof() && inner.column() == 0 => {
            missing_body()
        }
        JsonPayloadError::Deserialize(inner) => invalid_json(&inner),
        other => return other.into(),
    };
    debug!(kind = ?violation.kind, "rejected request body");
    validation_error(&[violation]).into()
}

/// JSON extractor configuration rendering body errors as violations.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|error, _req| json_payload_error(error))
}

/// Read an integer path segment.
///
/// Returns `Ok(None)` for a well-formed integer that does not fit in `i32`;
/// such a value cannot name a stored row. Anything that is not an optionally
/// signed run of ASCII digits is an `int_parsing` violation at `["path", name]`.
pub fn path_integer(name: &str, raw: &str) -> Result<Option<i32>, Violation> {
    match raw.parse::<i32>() {
        Ok(value) => Ok(Some(value)),
        Err(error)
            if matches!(
                error.kind(),
                IntErrorKind::PosOverflow | IntErrorKind::NegOverflow
            ) =>
        {
            Ok(None)
        }
        Err(error) => {
            debug!(%error, segment = name, "rejected path parameter");
            Err(Violation {
                kind: ViolationKind::IntParsing,
                loc: Loc::root("path").field(name).0,
                msg: "Input should be a valid integer, unable to parse string as an integer"
                    .to_owned(),
                input: Value::from(raw),
                ctx: None,
            })
        }
    }
}
