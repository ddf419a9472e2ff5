/// Get standard user agent string
pub fn get_user_agent() -> &'static str {
    "TokenSync"
}
