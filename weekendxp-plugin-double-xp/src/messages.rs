//! Message ids and their English defaults. Hosts may override any of them
//! through their [`Locale`](weekendxp_plugins::locale::Locale).

pub const RATE_SET: u32 = 11120;
pub const RATE_ERROR: u32 = 11121;
pub const LOGIN_ACTIVE: u32 = 11122;
pub const LOGIN_INACTIVE: u32 = 11123;
pub const CONFIG_HEADER: u32 = 11124;

pub const RATE_SET_DEFAULT: &str = "Your experience rate has been set to {}.";
pub const RATE_ERROR_DEFAULT: &str =
    "Invalid experience rate. Choose a value above 0 and no higher than {}.";
pub const LOGIN_ACTIVE_DEFAULT: &str = "It's the Weekend! Your XP rate has been set to: {}";
pub const LOGIN_INACTIVE_DEFAULT: &str =
    "This server is running the |cff4CFF00Double XP Weekend |rmodule.";
pub const CONFIG_HEADER_DEFAULT: &str = "Double XP Weekend settings for {}:";
