//! Currency rate data as published by the PrivatBank public API.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One entry of the upstream `pubinfo` response.
///
/// Amounts are kept as the strings the API returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateQuote {
    /// Currency code, e.g. `"EUR"`.
    pub ccy: String,
    /// Base currency code, e.g. `"UAH"`.
    #[serde(default)]
    pub base_ccy: Option<String>,
    /// Bank buy rate.
    #[serde(default)]
    pub buy: Option<String>,
    /// Bank sale rate.
    #[serde(default)]
    pub sale: Option<String>,
}

impl RateQuote {
    /// Renders the quote as one chat line:
    /// `"{ccy}: Buy - {buy}, Sell - {sale}\n"`, with `N/A` for missing
    /// amounts.
    #[must_use]
    pub fn to_line(&self) -> String {
        format!(
            "{}: Buy - {}, Sell - {}\n",
            self.ccy,
            self.buy.as_deref().unwrap_or("N/A"),
            self.sale.as_deref().unwrap_or("N/A"),
        )
    }

    /// Converts the quote into numeric rates.
    ///
    /// Returns `None` if either amount is missing or not a number.
    #[must_use]
    pub fn daily_rate(&self) -> Option<DailyRate> {
        let sale = self.sale.as_deref()?.trim().parse().ok()?;
        let purchase = self.buy.as_deref()?.trim().parse().ok()?;
        Some(DailyRate { sale, purchase })
    }
}

/// Sale and purchase rate of one currency on one day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DailyRate {
    /// Bank sale rate.
    pub sale: f64,
    /// Bank purchase (buy) rate.
    pub purchase: f64,
}

/// Rates for one day, keyed by `dd.mm.YYYY` and then by currency code.
///
/// Serializes as `{ "19.10.2026": { "EUR": {..}, "USD": null } }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = Object)]
pub struct RateHistoryDay(pub BTreeMap<String, BTreeMap<String, Option<DailyRate>>>);
