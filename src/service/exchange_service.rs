//! Currency rate lookups against the PrivatBank public API.

use std::collections::BTreeMap;
use std::time::Duration;

use chrono::{Local, NaiveDate};
use futures_util::future::join_all;

use crate::domain::{DailyRate, RateHistoryDay, RateQuote};
use crate::error::ChatError;

/// Reply sent to a client when current rates cannot be fetched.
pub const EXCHANGE_FAILURE: &str = "Failed to fetch currency data";

/// Largest number of days [`ExchangeService::rate_history`] accepts.
pub const HISTORY_MAX_DAYS: u32 = 10;

/// Currencies reported by [`ExchangeService::rate_history`].
pub const HISTORY_CURRENCIES: [&str; 2] = ["EUR", "USD"];

/// Client for the `pubinfo` rates endpoint.
///
/// Cheap to clone; all clones share one connection pool.
#[derive(Debug, Clone)]
pub struct ExchangeService {
    client: reqwest::Client,
    api_url: String,
}

impl ExchangeService {
    /// Creates a service calling `api_url` with the given request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::Upstream`] if the HTTP client cannot be built.
    pub fn new(api_url: impl Into<String>, timeout: Duration) -> Result<Self, ChatError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_url: api_url.into(),
        })
    }

    /// Fetches the rate list, for today or for a past `date`.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::UpstreamStatus`] on a non-200 answer and
    /// [`ChatError::Upstream`] on transport or JSON decode failures.
    pub async fn fetch_quotes(&self, date: Option<NaiveDate>) -> Result<Vec<RateQuote>, ChatError> {
        let url = self.quotes_url(date);
        tracing::debug!(%url, "fetching currency rates");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(ChatError::UpstreamStatus(status.as_u16()));
        }
        Ok(response.json::<Vec<RateQuote>>().await?)
    }

    /// Answers the `exchange N` chat command.
    ///
    /// Returns the last `days` quotes (all of them when `days` is 0) as
    /// chat lines, or [`EXCHANGE_FAILURE`] if the rates are unavailable.
    pub async fn current_rates(&self, days: usize) -> String {
        match self.fetch_quotes(None).await {
            Ok(quotes) => format_latest(&quotes, days),
            Err(err) => {
                tracing::warn!(error = %err, "currency rates unavailable");
                EXCHANGE_FAILURE.to_string()
            }
        }
    }

    /// Returns EUR and USD rates for each of the last `days` days, newest
    /// first.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::InvalidRequest`] if `days` exceeds
    /// [`HISTORY_MAX_DAYS`].
    pub async fn rate_history(&self, days: u32) -> Result<Vec<RateHistoryDay>, ChatError> {
        self.rate_history_from(Local::now().date_naive(), days).await
    }

    /// Same as [`rate_history`](Self::rate_history) counting back from
    /// `today`.
    ///
    /// Upstream failures do not fail the request: the affected day reports
    /// `null` for each currency.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::InvalidRequest`] if `days` exceeds
    /// [`HISTORY_MAX_DAYS`].
    pub async fn rate_history_from(
        &self,
        today: NaiveDate,
        days: u32,
    ) -> Result<Vec<RateHistoryDay>, ChatError> {
        if days > HISTORY_MAX_DAYS {
            return Err(ChatError::InvalidRequest(format!(
                "days must be at most {HISTORY_MAX_DAYS}"
            )));
        }

        let dates: Vec<NaiveDate> = (0..days)
            .filter_map(|i| today.checked_sub_days(chrono::Days::new(u64::from(i))))
            .collect();

        let fetches = dates.iter().map(|date| async move {
            match self.fetch_quotes(Some(*date)).await {
                Ok(quotes) => quotes,
                Err(err) => {
                    tracing::warn!(error = %err, %date, "historical rates unavailable");
                    Vec::new()
                }
            }
        });
        let results = join_all(fetches).await;

        Ok(dates
            .iter()
            .zip(results)
            .map(|(date, quotes)| history_day(*date, &quotes))
            .collect())
    }

    fn quotes_url(&self, date: Option<NaiveDate>) -> String {
        match date {
            Some(date) => format!(
                "{}?json&exchange&coursid=5&date={}",
                self.api_url,
                format_date(date)
            ),
            None => format!("{}?json&exchange&coursid=5", self.api_url),
        }
    }
}

/// Formats the last `count` quotes as chat lines; `0` keeps every quote.
#[must_use]
pub fn format_latest(quotes: &[RateQuote], count: usize) -> String {
    let skip = if count == 0 {
        0
    } else {
        quotes.len().saturating_sub(count)
    };
    quotes.iter().skip(skip).map(RateQuote::to_line).collect()
}

/// Formats a date the way the rates API and history keys expect it.
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d.%m.%Y").to_string()
}

fn history_day(date: NaiveDate, quotes: &[RateQuote]) -> RateHistoryDay {
    let rates: BTreeMap<String, Option<DailyRate>> = HISTORY_CURRENCIES
        .iter()
        .map(|ccy| {
            let rate = quotes
                .iter()
                .find(|q| q.ccy == *ccy)
                .and_then(RateQuote::daily_rate);
            ((*ccy).to_string(), rate)
        })
        .collect();

    let mut day = BTreeMap::new();
    day.insert(format_date(date), rates);
    RateHistoryDay(day)
}
