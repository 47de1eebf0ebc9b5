//! Transform parameters read from submitted form fields.

use crate::error::ProcessingError;
use serde::Serialize;
use std::collections::HashMap;

pub const DEFAULT_BRIGHTNESS: i32 = 0;
pub const DEFAULT_CONTRAST: f32 = 1.0;
pub const DEFAULT_BLUR: i32 = 5;

/// Flat record of optional knobs. Every field has a neutral default except
/// blur, which defaults to a 5x5 kernel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TransformParams {
    pub brightness: i32,
    pub contrast: f32,
    pub blur: i32,
    pub grayscale: bool,
    pub edge: bool,
}

impl Default for TransformParams {
    fn default() -> Self {
        Self {
            brightness: DEFAULT_BRIGHTNESS,
            contrast: DEFAULT_CONTRAST,
            blur: DEFAULT_BLUR,
            grayscale: false,
            edge: false,
        }
    }
}

impl TransformParams {
    /// Parse from text form fields.
    ///
    /// Flags are read from `grayscale`/`edge`, falling back to the
    /// `grayscale_value`/`edge_value` names the HTML form uses. Empty values
    /// count as absent.
    pub fn from_fields(fields: &HashMap<String, String>) -> Result<Self, ProcessingError> {
        let mut params = TransformParams::default();

        if let Some(raw) = field(fields, &["brightness_value"]) {
            params.brightness = parse_number("brightness_value", raw)?;
        }

        if let Some(raw) = field(fields, &["contrast_value"]) {
            let contrast: f32 = parse_number("contrast_value", raw)?;
            if !contrast.is_finite() || contrast < 0.0 {
                return Err(ProcessingError::InvalidParameter {
                    name: "contrast_value",
                    value: raw.to_string(),
                });
            }
            params.contrast = contrast;
        }

        if let Some(raw) = field(fields, &["blur_value"]) {
            params.blur = parse_number("blur_value", raw)?;
        }

        params.grayscale = field(fields, &["grayscale", "grayscale_value"]).is_some_and(is_true);
        params.edge = field(fields, &["edge", "edge_value"]).is_some_and(is_true);

        Ok(params)
    }
}

fn field<'a>(fields: &'a HashMap<String, String>, names: &[&str]) -> Option<&'a str> {
    names
        .iter()
        .filter_map(|name| fields.get(*name))
        .map(|v| v.trim())
        .find(|v| !v.is_empty())
}

fn parse_number<T: std::str::FromStr>(
    name: &'static str,
    raw: &str,
) -> Result<T, ProcessingError> {
    raw.parse::<T>()
        .map_err(|_| ProcessingError::InvalidParameter {
            name,
            value: raw.to_string(),
        })
}

fn is_true(raw: &str) -> bool {
    raw.eq_ignore_ascii_case("true")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults_when_absent() {
        let params = TransformParams::from_fields(&HashMap::new()).unwrap();
        assert_eq!(params, TransformParams::default());
        assert_eq!(params.blur, 5);
        assert_eq!(params.contrast, 1.0);
    }

    #[test]
    fn test_parses_all_fields() {
        let params = TransformParams::from_fields(&fields(&[
            ("brightness_value", "-20"),
            ("contrast_value", "1.5"),
            ("blur_value", "8"),
            ("grayscale", "true"),
            ("edge", "TRUE"),
        ]))
        .unwrap();
        assert_eq!(params.brightness, -20);
        assert_eq!(params.contrast, 1.5);
        assert_eq!(params.blur, 8);
        assert!(params.grayscale);
        assert!(params.edge);
    }

    #[test]
    fn test_form_flag_names_are_accepted() {
        let params = TransformParams::from_fields(&fields(&[
            ("grayscale_value", "true"),
            ("edge_value", "false"),
        ]))
        .unwrap();
        assert!(params.grayscale);
        assert!(!params.edge);
    }

    #[test]
    fn test_empty_values_fall_back_to_defaults() {
        let params =
            TransformParams::from_fields(&fields(&[("brightness_value", ""), ("blur_value", " ")]))
                .unwrap();
        assert_eq!(params.brightness, 0);
        assert_eq!(params.blur, 5);
    }

    #[test]
    fn test_rejects_unparseable_numbers() {
        for (name, value) in [
            ("brightness_value", "bright"),
            ("brightness_value", "1.5"),
            ("contrast_value", "much"),
            ("contrast_value", "-1"),
            ("contrast_value", "NaN"),
            ("blur_value", "5px"),
        ] {
            let err = TransformParams::from_fields(&fields(&[(name, value)])).unwrap_err();
            assert!(
                matches!(err, ProcessingError::InvalidParameter { name: n, .. } if n == name),
                "{name}={value}"
            );
        }
    }

    #[test]
    fn test_non_true_flags_are_false() {
        let params =
            TransformParams::from_fields(&fields(&[("grayscale", "on"), ("edge", "1")])).unwrap();
        assert!(!params.grayscale);
        assert!(!params.edge);
    }
}
