//! Route paths shared by the server router and its integration tests.

pub const HEALTH: &str = "/health";

pub mod users {
    pub const REGISTER: &str = "/users/register";
    pub const TOKEN: &str = "/users/token";
    pub const REFRESH: &str = "/users/refresh";
}

pub mod movies {
    pub const LIST: &str = "/movies/";
    pub const VOTE: &str = "/movies/vote/";
}
