pub type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("degenerate input range: in_min and in_max are both {in_min}")]
    DegenerateRange { in_min: f64, in_max: f64 },

    #[error("cannot load config file: {0}")]
    ConfigFile(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn config_file(msg: impl Into<String>) -> Self {
        Self::ConfigFile(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(Error::configuration("x")
            .to_string()
            .starts_with("configuration error:"));
        assert!(Error::config_file("x")
            .to_string()
            .starts_with("cannot load config file:"));
        assert!(Error::DegenerateRange {
            in_min: 3.0,
            in_max: 3.0
        }
        .to_string()
        .contains("degenerate input range"));
    }
}
