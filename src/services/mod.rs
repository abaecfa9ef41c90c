mod change_password;
mod complete_reset;
mod login;
mod redeem_code;
mod register;
mod start_reset;

pub use change_password::change_password;
pub use complete_reset::complete_reset;
pub use login::{is_authenticated, login, logout};
pub use redeem_code::redeem_code;
pub use register::register;
pub use start_reset::start_reset;
