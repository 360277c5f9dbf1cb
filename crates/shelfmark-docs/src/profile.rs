//! # Shop Profile
//!
//! Who the shop is, as printed on every invoice and sticker.

use serde::{Deserialize, Serialize};
use shelfmark_core::Money;

/// Shop identity injected into both renderers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopProfile {
    pub name: String,
    /// Printed one per line under the shop name.
    pub address_lines: Vec<String>,
    pub phone: Option<String>,
    /// Printed at the foot of each sticker when set.
    pub website: Option<String>,
    pub currency_symbol: String,
    /// Closing line of the invoice.
    pub footer_note: String,
}

impl Default for ShopProfile {
    fn default() -> Self {
        Self {
            name: "Srinivasa Cloth Stores".to_string(),
            address_lines: vec!["5-81, Pasra, Govindarao Pet, Mulugu, 506347".to_string()],
            phone: None,
            website: None,
            currency_symbol: "₹".to_string(),
            footer_note: "Thank you for your business!".to_string(),
        }
    }
}

impl ShopProfile {
    /// Formats an amount with the shop's currency symbol.
    ///
    /// ## Example
    /// ```rust
    /// use rust_decimal_macros::dec;
    /// use shelfmark_core::Money;
    /// use shelfmark_docs::ShopProfile;
    ///
    /// let shop = ShopProfile::default();
    /// assert_eq!(shop.format_money(Money::new(dec!(499.5))), "₹ 499.50");
    /// ```
    pub fn format_money(&self, amount: Money) -> String {
        format!("{} {}", self.currency_symbol, amount.fixed())
    }

    /// Website, if one is configured and not blank.
    pub fn website(&self) -> Option<&str> {
        self.website
            .as_deref()
            .map(str::trim)
            .filter(|w| !w.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_website_is_hidden() {
        let mut shop = ShopProfile::default();
        assert_eq!(shop.website(), None);

        shop.website = Some("   ".into());
        assert_eq!(shop.website(), None);

        shop.website = Some(" shop.example ".into());
        assert_eq!(shop.website(), Some("shop.example"));
    }
}
