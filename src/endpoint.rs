use std::fmt;
use std::str::FromStr;

/// Resource selected for the outbound request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Endpoint {
    People,
    Planets,
    Films,
}

impl Endpoint {
    pub const ALL: [Endpoint; 3] = [Endpoint::People, Endpoint::Planets, Endpoint::Films];

    /// Relative path joined onto the client's base address.
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::People => "api/people/1/",
            Endpoint::Planets => "api/planets/1/",
            Endpoint::Films => "api/films/1/",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Endpoint::People => "people",
            Endpoint::Planets => "planets",
            Endpoint::Films => "films",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Endpoint {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Self::ALL
            .into_iter()
            .find(|endpoint| endpoint.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| format!("unknown endpoint '{trimmed}' (expected people, planets or films)"))
    }
}

/// How a successful response body is reported.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ResponseMode {
    /// Print the body as received.
    Raw,
    /// Parse into [`crate::Person`] and print its fields.
    #[default]
    Record,
}

impl FromStr for ResponseMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "raw" => Ok(ResponseMode::Raw),
            "record" => Ok(ResponseMode::Record),
            other => Err(format!("unknown response mode '{other}' (expected raw or record)")),
        }
    }
}
