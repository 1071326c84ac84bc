pub mod base58;
mod convert;
mod format;

pub use convert::pow10;
pub use convert::units_to_ui;
pub use convert::ui_to_units;
pub use convert::parse_decimal;
pub use convert::ratio_to_f64;
pub use format::short_address;
pub use format::display_decimals;
pub use format::format_fixed;
