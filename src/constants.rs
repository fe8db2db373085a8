use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// All salaries are normalized into Russian rubles.
pub const BASE_CURRENCY: &str = "RUR";

/// Publication timestamps as exported by hh.ru, e.g. `2022-07-05T18:19:30+0300`.
pub const PUBLISHED_AT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

/// Year-month key used for rate lookups, e.g. `2022-07`.
pub const MONTH_KEY_FORMAT: &str = "%Y-%m";

/// A region participates in the region rankings only when it holds at least
/// this share of all vacancies.
pub const MIN_REGION_SHARE: Decimal = dec!(0.01);

/// The region share view is truncated to this many entries.
pub const TOP_REGIONS_LIMIT: usize = 10;

/// Region shares are reported rounded to this many decimal places.
pub const SHARE_DECIMAL_PRECISION: u32 = 4;
