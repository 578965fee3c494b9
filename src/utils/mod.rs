pub mod slack_markup;
pub mod time;
