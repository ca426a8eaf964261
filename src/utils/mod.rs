// Utils compartidos

pub mod cancel;
pub mod constants;
pub mod debounce;
pub mod jwt;
pub mod navigation;
pub mod storage;
pub mod time;

pub use cancel::CancelToken;
pub use constants::*;
pub use debounce::Debouncer;
pub use jwt::{decode_claims, is_token_valid};
pub use navigation::{current_path, navigate_to};
pub use storage::{get_string, remove_key, set_string};
pub use time::now_ms;
