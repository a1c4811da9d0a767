use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::str::FromStr;
use utoipa::ToSchema;

/// Input widget. Its type is the only validation a value gets before submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Widget {
    Text,
    Password,
    Number { min: f64 },
    Date,
    Select { options: Vec<String> },
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Field {
    pub name: String,
    pub label: String,
    #[schema(value_type = Object)]
    pub widget: Widget,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

impl Field {
    pub fn text(name: &str, label: &str) -> Self {
        Self::new(name, label, Widget::Text)
    }

    pub fn password(name: &str, label: &str) -> Self {
        Self::new(name, label, Widget::Password)
    }

    pub fn number(name: &str, label: &str, min: f64) -> Self {
        Self::new(name, label, Widget::Number { min })
    }

    pub fn date(name: &str, label: &str, default: NaiveDate) -> Self {
        let mut field = Self::new(name, label, Widget::Date);
        field.default = Some(default.format("%Y-%m-%d").to_string());
        field
    }

    pub fn select<I, S>(name: &str, label: &str, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        let options: Vec<String> = options.into_iter().map(|o| o.to_string()).collect();
        let mut field = Self::new(name, label, Widget::Select { options });
        if let Widget::Select { options } = &field.widget {
            field.default = options.first().cloned();
        }
        field
    }

    fn new(name: &str, label: &str, widget: Widget) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            widget,
            default: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct FormSpec {
    pub title: String,
    pub fields: Vec<Field>,
    pub submit_label: String,
}

/// Submitted form values, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct FormInput {
    #[schema(value_type = Object)]
    values: HashMap<String, Value>,
}

impl FormInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.values.insert(name.to_string(), value.into());
        self
    }

    /// Raw value as text; numbers are rendered, missing or null is empty.
    fn raw(&self, name: &str) -> String {
        match self.values.get(name) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.trim().to_string(),
            Some(other) => other.to_string(),
        }
    }

    pub fn text(&self, name: &str) -> String {
        self.raw(name)
    }

    pub fn id(&self, name: &str) -> Result<i32, String> {
        let raw = self.raw(name);
        if raw.is_empty() {
            return Err(format!("{} is required", name));
        }
        raw.parse::<i32>()
            .map_err(|_| format!("{} must be a whole number, got '{}'", name, raw))
    }

    /// Empty means "not given".
    pub fn optional_id(&self, name: &str) -> Result<Option<i32>, String> {
        if self.raw(name).is_empty() {
            Ok(None)
        } else {
            self.id(name).map(Some)
        }
    }

    pub fn number(&self, name: &str, min: f64) -> Result<f64, String> {
        let raw = self.raw(name);
        if raw.is_empty() {
            return Ok(min);
        }
        let value = raw
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| format!("{} must be a number, got '{}'", name, raw))?;
        if value < min {
            return Err(format!("{} must be at least {}", name, min));
        }
        Ok(value)
    }

    pub fn date(&self, name: &str, default: NaiveDate) -> Result<NaiveDate, String> {
        let raw = self.raw(name);
        if raw.is_empty() {
            return Ok(default);
        }
        NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
            .map_err(|_| format!("{} must be a date (YYYY-MM-DD), got '{}'", name, raw))
    }

    /// Select widgets fall back to their first option when nothing was chosen.
    pub fn choice<T>(&self, name: &str, first: T) -> Result<T, String>
    where
        T: FromStr<Err = String>,
    {
        let raw = self.raw(name);
        if raw.is_empty() {
            Ok(first)
        } else {
            raw.parse::<T>()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RecipientCategory;

    #[test]
    fn ids_accept_strings_and_numbers() {
        let input = FormInput::new().with("a", "7").with("b", 8).with("c", "").with("d", "x7");
        assert_eq!(input.id("a"), Ok(7));
        assert_eq!(input.id("b"), Ok(8));
        assert_eq!(input.optional_id("c"), Ok(None));
        assert_eq!(input.optional_id("missing"), Ok(None));
        assert!(input.id("c").is_err());
        assert!(input.optional_id("d").is_err());
    }

    #[test]
    fn numbers_respect_minimum() {
        let input = FormInput::new().with("ok", "50.00").with("neg", -1.0).with("nan", "lots");
        assert_eq!(input.number("ok", 0.0), Ok(50.0));
        assert_eq!(input.number("missing", 0.0), Ok(0.0));
        assert!(input.number("neg", 0.0).unwrap_err().contains("at least 0"));
        assert!(input.number("nan", 0.0).is_err());
    }

    #[test]
    fn dates_default_when_blank() {
        let today = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let input = FormInput::new().with("start", "2024-06-30").with("bad", "30/06/2024");
        assert_eq!(input.date("start", today), Ok(NaiveDate::from_ymd_opt(2024, 6, 30).unwrap()));
        assert_eq!(input.date("end", today), Ok(today));
        assert!(input.date("bad", today).is_err());
    }

    #[test]
    fn choice_falls_back_to_first_option() {
        let input = FormInput::new().with("category", "Disaster relief");
        assert_eq!(
            input.choice("category", RecipientCategory::General),
            Ok(RecipientCategory::DisasterRelief)
        );
        assert_eq!(
            FormInput::new().choice("category", RecipientCategory::General),
            Ok(RecipientCategory::General)
        );
    }

    #[test]
    fn select_defaults_to_first_option() {
        let field = Field::select("role", "Choose Role: ", ["Donor", "Volunteer"]);
        assert_eq!(field.default.as_deref(), Some("Donor"));
    }
}
