use std::str::FromStr;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{AppError, Result};

pub const MISSING_FIELDS_MESSAGE: &str =
    "Body must include url, summaryTemperature, summaryExtractiveness, summaryFormat, and summaryLength";
pub const EXTRACTIVENESS_MESSAGE: &str = "summaryExtractiveness must be 'LOW', 'MEDIUM' or 'HIGH'";
pub const LENGTH_MESSAGE: &str = "summaryLength must be 'SHORT', 'MEDIUM' or 'LONG'";
pub const FORMAT_MESSAGE: &str = "summaryFormat must be either 'BULLETS' or 'PARAGRAPH'";
pub const TEMPERATURE_MESSAGE: &str = "summaryTemperature must be a number between 0 and 5";

pub const MIN_TEMPERATURE: f64 = 0.0;
pub const MAX_TEMPERATURE: f64 = 5.0;

/// Request body exactly as received; nothing is trusted yet.
///
/// Option fields stay untyped JSON so a value of the wrong type is reported with that
/// field's own message. The temperature may be a string or a number.
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct RawSummaryRequest {
    pub url: Option<String>,
    pub summary_temperature: Option<Value>,
    pub summary_extractiveness: Option<Value>,
    pub summary_format: Option<Value>,
    pub summary_length: Option<Value>,
    pub summary_additional_command: Option<String>,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Extractiveness {
    Low,
    Medium,
    High,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SummaryFormat {
    Bullets,
    Paragraph,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SummaryLength {
    Short,
    Medium,
    Long,
}

impl FromStr for Extractiveness {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "LOW" => Ok(Self::Low),
            "MEDIUM" => Ok(Self::Medium),
            "HIGH" => Ok(Self::High),
            _ => Err(AppError::ValidationError(EXTRACTIVENESS_MESSAGE.to_string())),
        }
    }
}

impl FromStr for SummaryFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "BULLETS" => Ok(Self::Bullets),
            "PARAGRAPH" => Ok(Self::Paragraph),
            _ => Err(AppError::ValidationError(FORMAT_MESSAGE.to_string())),
        }
    }
}

impl FromStr for SummaryLength {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "SHORT" => Ok(Self::Short),
            "MEDIUM" => Ok(Self::Medium),
            "LONG" => Ok(Self::Long),
            _ => Err(AppError::ValidationError(LENGTH_MESSAGE.to_string())),
        }
    }
}

/// A request that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRequest {
    pub url: String,
    pub temperature: f64,
    pub extractiveness: Extractiveness,
    pub format: SummaryFormat,
    pub length: SummaryLength,
    pub additional_command: Option<String>,
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Null and "" count as missing, like absent keys.
fn present_value(value: &Option<Value>) -> Option<&Value> {
    value.as_ref().filter(|v| !matches!(v, Value::Null) && v.as_str() != Some(""))
}

fn parse_option<T: FromStr<Err = AppError>>(raw: &Value, message: &str) -> Result<T> {
    raw.as_str()
        .ok_or_else(|| AppError::ValidationError(message.to_string()))?
        .parse::<T>()
}

fn parse_temperature(raw: &Value) -> Result<f64> {
    let invalid = || AppError::ValidationError(TEMPERATURE_MESSAGE.to_string());
    let value = match raw {
        Value::Number(n) => n.as_f64().ok_or_else(invalid)?,
        Value::String(s) => s.trim().parse::<f64>().map_err(|_| invalid())?,
        _ => return Err(invalid()),
    };

    if !value.is_finite() || !(MIN_TEMPERATURE..=MAX_TEMPERATURE).contains(&value) {
        return Err(AppError::ValidationError(TEMPERATURE_MESSAGE.to_string()));
    }

    Ok(value)
}

impl RawSummaryRequest {
    /// Checks presence first, then the publisher domain, then each option in turn.
    /// Nothing here touches the network.
    pub fn validate(&self, article_domain: &str) -> Result<SummaryRequest> {
        let (Some(url), Some(temperature), Some(extractiveness), Some(format), Some(length)) = (
            present(&self.url),
            present_value(&self.summary_temperature),
            present_value(&self.summary_extractiveness),
            present_value(&self.summary_format),
            present_value(&self.summary_length),
        ) else {
            return Err(AppError::ValidationError(MISSING_FIELDS_MESSAGE.to_string()));
        };

        if !url.contains(article_domain) {
            return Err(AppError::ValidationError(format!(
                "URL is not a valid {} article",
                article_domain
            )));
        }

        let extractiveness: Extractiveness = parse_option(extractiveness, EXTRACTIVENESS_MESSAGE)?;
        let length: SummaryLength = parse_option(length, LENGTH_MESSAGE)?;
        let format: SummaryFormat = parse_option(format, FORMAT_MESSAGE)?;

        let temperature = parse_temperature(temperature)?;

        Ok(SummaryRequest {
            url: url.to_string(),
            temperature,
            extractiveness,
            format,
            length,
            additional_command: present(&self.summary_additional_command).map(str::to_string),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid() -> RawSummaryRequest {
        RawSummaryRequest {
            url: Some("https://www.cbc.ca/news/world/story-1.6759244".to_string()),
            summary_temperature: Some(json!("0.3")),
            summary_extractiveness: Some(json!("LOW")),
            summary_format: Some(json!("BULLETS")),
            summary_length: Some(json!("MEDIUM")),
            summary_additional_command: None,
        }
    }

    fn message(err: AppError) -> String {
        match err {
            AppError::ValidationError(msg) => msg,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn accepts_valid_request() {
        let req = valid().validate("cbc.ca").unwrap();
        assert_eq!(req.temperature, 0.3);
        assert_eq!(req.extractiveness, Extractiveness::Low);
        assert_eq!(req.format, SummaryFormat::Bullets);
        assert_eq!(req.length, SummaryLength::Medium);
        assert_eq!(req.additional_command, None);
    }

    #[test]
    fn parses_camel_case_json() {
        let raw: RawSummaryRequest = serde_json::from_str(
            r#"{"url":"https://cbc.ca/a","summaryTemperature":2,"summaryExtractiveness":"HIGH",
                "summaryFormat":"PARAGRAPH","summaryLength":"LONG","summaryAdditionalCommand":"focus on dates"}"#,
        )
        .unwrap();
        let req = raw.validate("cbc.ca").unwrap();
        assert_eq!(req.temperature, 2.0);
        assert_eq!(req.format, SummaryFormat::Paragraph);
        assert_eq!(req.length, SummaryLength::Long);
        assert_eq!(req.additional_command.as_deref(), Some("focus on dates"));
    }

    #[test]
    fn every_missing_field_is_reported() {
        let cases: [fn(&mut RawSummaryRequest); 7] = [
            |r: &mut RawSummaryRequest| r.url = None,
            |r: &mut RawSummaryRequest| r.summary_temperature = None,
            |r: &mut RawSummaryRequest| r.summary_extractiveness = None,
            |r: &mut RawSummaryRequest| r.summary_format = None,
            |r: &mut RawSummaryRequest| r.summary_length = None,
            |r: &mut RawSummaryRequest| r.url = Some(String::new()),
            |r: &mut RawSummaryRequest| r.summary_temperature = Some(json!("")),
        ];
        for strip in cases {
            let mut raw = valid();
            strip(&mut raw);
            assert_eq!(message(raw.validate("cbc.ca").unwrap_err()), MISSING_FIELDS_MESSAGE);
        }
    }

    #[test]
    fn foreign_domain_is_rejected() {
        let mut raw = valid();
        raw.url = Some("https://www.bbc.co.uk/news/1".to_string());
        assert_eq!(
            message(raw.validate("cbc.ca").unwrap_err()),
            "URL is not a valid cbc.ca article"
        );
    }

    #[test]
    fn unknown_enum_values_are_rejected() {
        let mut raw = valid();
        raw.summary_extractiveness = Some(json!("low"));
        assert_eq!(message(raw.validate("cbc.ca").unwrap_err()), EXTRACTIVENESS_MESSAGE);

        let mut raw = valid();
        raw.summary_length = Some(json!("TINY"));
        assert_eq!(message(raw.validate("cbc.ca").unwrap_err()), LENGTH_MESSAGE);

        let mut raw = valid();
        raw.summary_format = Some(json!("LIST"));
        assert_eq!(message(raw.validate("cbc.ca").unwrap_err()), FORMAT_MESSAGE);
    }

    #[test]
    fn wrongly_typed_options_get_their_field_message() {
        let mut raw = valid();
        raw.summary_extractiveness = Some(json!(5));
        assert_eq!(message(raw.validate("cbc.ca").unwrap_err()), EXTRACTIVENESS_MESSAGE);

        let mut raw = valid();
        raw.summary_length = Some(json!({ "value": "SHORT" }));
        assert_eq!(message(raw.validate("cbc.ca").unwrap_err()), LENGTH_MESSAGE);

        let mut raw = valid();
        raw.summary_format = Some(json!(["BULLETS"]));
        assert_eq!(message(raw.validate("cbc.ca").unwrap_err()), FORMAT_MESSAGE);
    }

    #[test]
    fn null_options_count_as_missing() {
        let raw: RawSummaryRequest = serde_json::from_str(
            r#"{"url":"https://cbc.ca/a","summaryTemperature":"1","summaryExtractiveness":null,
                "summaryFormat":"BULLETS","summaryLength":"SHORT"}"#,
        )
        .unwrap();
        assert_eq!(message(raw.validate("cbc.ca").unwrap_err()), MISSING_FIELDS_MESSAGE);
    }

    #[test]
    fn temperature_bounds_are_inclusive() {
        for t in ["0", "5", "2.5"] {
            let mut raw = valid();
            raw.summary_temperature = Some(json!(t));
            assert!(raw.validate("cbc.ca").is_ok(), "{} should be accepted", t);
        }
    }

    #[test]
    fn temperature_out_of_range_or_garbage_is_rejected() {
        let bad = [
            json!("-0.1"),
            json!("5.01"),
            json!("warm"),
            json!("NaN"),
            json!(42.0),
            json!(true),
            json!([1]),
        ];
        for t in bad {
            let mut raw = valid();
            raw.summary_temperature = Some(t);
            assert_eq!(message(raw.validate("cbc.ca").unwrap_err()), TEMPERATURE_MESSAGE);
        }
    }

    #[test]
    fn empty_additional_command_is_dropped() {
        let mut raw = valid();
        raw.summary_additional_command = Some(String::new());
        assert_eq!(raw.validate("cbc.ca").unwrap().additional_command, None);
    }

    #[test]
    fn enums_serialize_lowercase() {
        assert_eq!(serde_json::to_string(&Extractiveness::High).unwrap(), "\"high\"");
        assert_eq!(serde_json::to_string(&SummaryFormat::Bullets).unwrap(), "\"bullets\"");
        assert_eq!(serde_json::to_string(&SummaryLength::Short).unwrap(), "\"short\"");
    }
}
