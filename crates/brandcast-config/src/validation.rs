//! Validation utilities and regex patterns

use crate::Config;
use brandcast_common::Brand;
use regex::Regex;
use std::collections::HashSet;
use std::net::SocketAddr;
use std::sync::LazyLock;
use validator::{Validate, ValidationError, ValidationErrors};

/// Regex pattern for validating hex color codes (e.g., #FFFFFF, #0984e3)
pub static HEX_COLOR_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("Invalid hex color regex pattern")
});

/// Artifact file name patterns must reference the brand.
pub static BRAND_PLACEHOLDER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{brand\}").expect("Invalid brand placeholder regex pattern")
});

/// Validate the brand list: every entry usable as a brand, no duplicates.
pub fn validate_brand_list(brands: &[String]) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    for name in brands {
        let brand = Brand::new(name.as_str()).map_err(|_| ValidationError::new("invalid_brand"))?;
        if !seen.insert(brand) {
            return Err(ValidationError::new("duplicate_brand"));
        }
    }
    Ok(())
}

/// Validate a socket address such as `127.0.0.1:5000`.
pub fn validate_bind_addr(addr: &str) -> Result<(), ValidationError> {
    addr.parse::<SocketAddr>()
        .map(|_| ())
        .map_err(|_| ValidationError::new("invalid_bind_addr"))
}

/// Validate a tracing filter directive string.
pub fn validate_log_level(level: &str) -> Result<(), ValidationError> {
    const LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
    let valid = level.split(',').all(|directive| {
        let lvl = directive.rsplit('=').next().unwrap_or_default().trim();
        LEVELS.contains(&lvl.to_ascii_lowercase().as_str())
    });
    if valid {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_log_level"))
    }
}

impl Config {
    /// Comprehensive validation of the entire configuration
    pub fn validate_all(&self) -> Result<(), ValidationErrors> {
        self.validate()?;

        let mut errors = ValidationErrors::new();
        if let Err(err) = validate_brand_list(&self.brands) {
            errors.add("brands", err);
        }
        if let Err(err) = validate_bind_addr(&self.web.bind_addr) {
            errors.add("bind_addr", err);
        }
        if let Err(err) = validate_log_level(&self.logging.level) {
            errors.add("level", err);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
