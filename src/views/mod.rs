pub mod header;
pub mod login;
pub mod search;
pub mod ticker_details;

pub use header::render_header;
pub use login::render_login;
pub use search::render_search;
pub use ticker_details::render_ticker_details;
