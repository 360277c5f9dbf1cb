//! # Validation Module
//!
//! Input validation and normalization for counter input.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP (axum Json extractor)                                   │
//! │  └── Type validation (deserialization)                                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                   │
//! │  ├── Blank / over-long product codes                                   │
//! │  └── Trimming, blank → absent                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── CHECK (quantity >= 0)                                             │
//! │  └── UNIQUE product_code / invoice_no                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::{DEFAULT_PAYMENT_METHOD, MAX_PRODUCT_CODE_LEN, MAX_PRODUCT_NAME_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product code and returns it trimmed.
///
/// ## Example
/// ```rust
/// use shelfmark_core::validation::validate_product_code;
///
/// assert_eq!(validate_product_code(" SHIRT-01 ", "productCode").unwrap(), "SHIRT-01");
/// assert!(validate_product_code("   ", "productCode").is_err());
/// ```
pub fn validate_product_code<'a>(code: &'a str, field: &str) -> ValidationResult<&'a str> {
    let code = code.trim();

    if code.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if code.chars().count() > MAX_PRODUCT_CODE_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_PRODUCT_CODE_LEN,
        });
    }

    Ok(code)
}

/// Validates a product name (used by the seed catalog).
pub fn validate_product_name(name: &str) -> ValidationResult<&str> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_PRODUCT_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_PRODUCT_NAME_LEN,
        });
    }

    Ok(name)
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Rejects negative prices.
pub fn validate_price(price: Money) -> ValidationResult<Money> {
    if price.is_negative() {
        return Err(ValidationError::Negative {
            field: "price".to_string(),
        });
    }
    Ok(price)
}

/// Rejects negative stock levels.
pub fn validate_stock(quantity: i64) -> ValidationResult<i64> {
    if quantity < 0 {
        return Err(ValidationError::Negative {
            field: "quantity".to_string(),
        });
    }
    Ok(quantity)
}

// =============================================================================
// Normalizers
// =============================================================================

/// Trims optional free text; blank becomes `None`.
pub fn normalize_optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Trims a payment method, falling back to [`DEFAULT_PAYMENT_METHOD`].
pub fn normalize_payment_method(value: Option<&str>) -> String {
    normalize_optional(value).unwrap_or_else(|| DEFAULT_PAYMENT_METHOD.to_string())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_validate_product_code() {
        assert_eq!(validate_product_code("KURTA-7", "code").unwrap(), "KURTA-7");
        assert!(matches!(
            validate_product_code("", "items[0].productCode"),
            Err(ValidationError::Required { field }) if field == "items[0].productCode"
        ));

        let long = "X".repeat(MAX_PRODUCT_CODE_LEN + 1);
        assert!(matches!(
            validate_product_code(&long, "code"),
            Err(ValidationError::TooLong { max: MAX_PRODUCT_CODE_LEN, .. })
        ));
    }

    #[test]
    fn test_validate_product_name() {
        assert_eq!(validate_product_name("  Linen Saree ").unwrap(), "Linen Saree");
        assert!(validate_product_name(" ").is_err());
        assert!(validate_product_name(&"n".repeat(MAX_PRODUCT_NAME_LEN + 1)).is_err());
    }

    #[test]
    fn test_numeric_validators() {
        assert!(validate_price(Money::new(dec!(0))).is_ok());
        assert!(validate_price(Money::new(dec!(-0.5))).is_err());
        assert!(validate_stock(0).is_ok());
        assert!(validate_stock(-1).is_err());
    }

    #[test]
    fn test_normalizers() {
        assert_eq!(normalize_optional(Some("  Asha ")), Some("Asha".to_string()));
        assert_eq!(normalize_optional(Some("   ")), None);
        assert_eq!(normalize_optional(None), None);

        assert_eq!(normalize_payment_method(Some(" UPI ")), "UPI");
        assert_eq!(normalize_payment_method(Some("")), "Cash");
        assert_eq!(normalize_payment_method(None), "Cash");
    }
}
