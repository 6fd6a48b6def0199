mod currency;
mod decimal;
mod locale;
mod range;

pub use currency::{Currency, ParseCurrencyError};
pub use decimal::Decimal;
pub use locale::{Locale, ParseLocaleError};
pub use range::{DateTimeRange, NumberRange};
