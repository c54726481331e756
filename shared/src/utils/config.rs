use std::env;

pub fn load() {
    dotenv::dotenv().ok();
}

pub fn get(var_name: &str) -> String {
    env::var(var_name).unwrap_or_else(|_| panic!("{var_name} environment variable should be set"))
}

pub fn get_optional(var_name: &str) -> Option<String> {
    env::var(var_name)
        .ok()
        // Treat an empty string the same as an unset variable
        .and_then(|val| if val.is_empty() { None } else { Some(val) })
}
