pub mod cbr;
pub mod hh;
pub mod providers_errors;
pub mod providers_traits;

pub use cbr::{month_range, CbrRateProvider};
pub use hh::HhVacancyProvider;
pub use providers_errors::FeedError;
pub use providers_traits::{RateFeedTrait, VacancyFeedTrait};
