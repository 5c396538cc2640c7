//! Field rules and the pure validator that checks a draft against them.

use chrono::NaiveDate;

/// A draft field as seen by the validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    List(&'a [String]),
    Missing,
}

/// Exposes a draft's fields by name.
pub trait FormFields {
    fn field(&self, name: &str) -> FieldValue<'_>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    /// Non-blank text, or a non-empty list.
    Required(&'static str),
    /// Text must be one of the listed values.
    OneOf(&'static [&'static str], &'static str),
    /// At least `n` characters, or `n` list items.
    MinLength(usize, &'static str),
    /// Positive decimal number. Blank text is left to `Required`.
    Numeric(&'static str),
    /// `YYYY-MM-DD` calendar date. Blank text is left to `Required`.
    IsoDate(&'static str),
    /// Something shaped like `local@domain.tld`. Blank text is left to `Required`.
    Email(&'static str),
    /// Same text as the named field.
    Matches(&'static str, &'static str),
}

impl Rule {
    pub fn message(&self) -> &'static str {
        match self {
            Rule::Required(msg)
            | Rule::OneOf(_, msg)
            | Rule::MinLength(_, msg)
            | Rule::Numeric(msg)
            | Rule::IsoDate(msg)
            | Rule::Email(msg)
            | Rule::Matches(_, msg) => msg,
        }
    }

    fn holds<D: FormFields + ?Sized>(&self, value: FieldValue<'_>, draft: &D) -> bool {
        match (self, value) {
            (Rule::Required(_), FieldValue::Text(text)) => !text.trim().is_empty(),
            (Rule::Required(_), FieldValue::List(items)) => !items.is_empty(),

            (Rule::OneOf(options, _), FieldValue::Text(text)) => {
                options.iter().any(|option| *option == text)
            }

            (Rule::MinLength(min, _), FieldValue::Text(text)) => text.chars().count() >= *min,
            (Rule::MinLength(min, _), FieldValue::List(items)) => items.len() >= *min,

            (Rule::Numeric(_), FieldValue::Text(text)) => {
                let text = text.trim();
                text.is_empty()
                    || text
                        .parse::<f64>()
                        .map(|n| n.is_finite() && n > 0.0)
                        .unwrap_or(false)
            }

            (Rule::IsoDate(_), FieldValue::Text(text)) => {
                let text = text.trim();
                text.is_empty() || NaiveDate::parse_from_str(text, "%Y-%m-%d").is_ok()
            }

            (Rule::Email(_), FieldValue::Text(text)) => {
                let text = text.trim();
                text.is_empty() || looks_like_email(text)
            }

            (Rule::Matches(other, _), FieldValue::Text(text)) => match draft.field(other) {
                FieldValue::Text(other_text) => other_text == text,
                _ => false,
            },

            _ => false,
        }
    }
}

fn looks_like_email(text: &str) -> bool {
    let Some((local, domain)) = text.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !text.contains(char::is_whitespace)
        && domain
            .split_once('.')
            .map(|(host, tld)| !host.is_empty() && !tld.is_empty())
            .unwrap_or(false)
}

/// Ordered set of field rules. Field order decides which message a failed
/// submit shows first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    fields: Vec<(&'static str, Vec<Rule>)>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, name: &'static str, rules: impl IntoIterator<Item = Rule>) -> Self {
        self.fields.push((name, rules.into_iter().collect()));
        self
    }
}

/// Field name → message of the first rule it violated, in schema order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(Vec<(&'static str, String)>);

impl FieldErrors {
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, msg)| msg.as_str())
    }

    pub fn contains(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    pub fn first_message(&self) -> Option<&str> {
        self.0.first().map(|(_, msg)| msg.as_str())
    }

    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.iter().map(|(name, _)| *name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    Valid,
    Invalid(FieldErrors),
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }

    /// Field errors, empty when valid.
    pub fn into_errors(self) -> FieldErrors {
        match self {
            ValidationResult::Valid => FieldErrors::default(),
            ValidationResult::Invalid(errors) => errors,
        }
    }
}

pub fn validate<D: FormFields + ?Sized>(draft: &D, schema: &Schema) -> ValidationResult {
    let mut errors = Vec::new();

    for (name, rules) in &schema.fields {
        let value = draft.field(name);
        if let Some(rule) = rules.iter().find(|rule| !rule.holds(value, draft)) {
            errors.push((*name, rule.message().to_string()));
        }
    }

    if errors.is_empty() {
        ValidationResult::Valid
    } else {
        ValidationResult::Invalid(FieldErrors(errors))
    }
}
