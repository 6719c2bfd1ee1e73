// file: src/utils/validation.rs
// description: request and configuration validation helpers
// reference: input validation patterns

use crate::error::{MaterialError, Result};
use std::fmt::Display;
use std::ops::RangeInclusive;

pub struct Validator;

impl Validator {
    pub fn validate_topic(topic: &str) -> Result<()> {
        if topic.trim().is_empty() {
            return Err(MaterialError::Validation(
                "Topic must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn validate_range<T>(name: &str, value: T, range: &RangeInclusive<T>) -> Result<()>
    where
        T: PartialOrd + Display,
    {
        if !range.contains(&value) {
            return Err(MaterialError::Validation(format!(
                "{} must be between {} and {}, got {}",
                name,
                range.start(),
                range.end(),
                value
            )));
        }
        Ok(())
    }

    pub fn validate_one_of(name: &str, value: &str, allowed: &[&str]) -> Result<()> {
        if !allowed.contains(&value) {
            return Err(MaterialError::Validation(format!(
                "{} must be one of {}, got {}",
                name,
                allowed.join(", "),
                value
            )));
        }
        Ok(())
    }

    pub fn validate_url(url: &str) -> Result<()> {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(MaterialError::Validation(format!(
                "Invalid URL format: {}",
                url
            )));
        }
        Ok(())
    }
}
