use std::path::PathBuf;

pub const DEFAULT_SERVER_PORT: u16 = 3000;
pub const DEFAULT_STATIC_DIR: &str = "client/dist";

/// The catalog never changes while the process runs.
pub const CATALOG_CACHE_CONTROL: &str = "public, max-age=3600";
pub const FILTERED_CACHE_CONTROL: &str = "public, max-age=300";

pub fn server_port() -> u16 {
    std::env::var("SERVER_PORT")
        .ok()
        .and_then(|value| value.trim().parse::<u16>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(DEFAULT_SERVER_PORT)
}

/// Optional JSON file replacing the built-in catalog.
pub fn catalog_path() -> Option<PathBuf> {
    std::env::var("CATALOG_PATH")
        .ok()
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

pub fn static_dir() -> PathBuf {
    std::env::var("STATIC_DIR")
        .ok()
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn port_falls_back_on_missing_or_invalid_values() {
        temp_env::with_var_unset("SERVER_PORT", || {
            assert_eq!(server_port(), DEFAULT_SERVER_PORT);
        });
        temp_env::with_var("SERVER_PORT", Some("0"), || {
            assert_eq!(server_port(), DEFAULT_SERVER_PORT);
        });
        temp_env::with_var("SERVER_PORT", Some("not-a-port"), || {
            assert_eq!(server_port(), DEFAULT_SERVER_PORT);
        });
        temp_env::with_var("SERVER_PORT", Some(" 8080 "), || {
            assert_eq!(server_port(), 8080);
        });
    }

    #[test]
    fn catalog_path_ignores_blank_values() {
        temp_env::with_var("CATALOG_PATH", Some("   "), || {
            assert_eq!(catalog_path(), None);
        });
        temp_env::with_var("CATALOG_PATH", Some("/srv/colors.json"), || {
            assert_eq!(catalog_path(), Some(PathBuf::from("/srv/colors.json")));
        });
    }

    #[test]
    fn static_dir_defaults_to_client_bundle() {
        temp_env::with_var_unset("STATIC_DIR", || {
            assert_eq!(static_dir(), PathBuf::from(DEFAULT_STATIC_DIR));
        });
        temp_env::with_var("STATIC_DIR", Some("public"), || {
            assert_eq!(static_dir(), PathBuf::from("public"));
        });
    }
}
