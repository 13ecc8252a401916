/// Navigation routes between the list and detail screens
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/` or `/ships`
    ShipList,
    /// `/ships/{id}`
    ShipDetail(String),
}

impl Route {
    /// Parse a path; returns None for anything that is not a known screen
    pub fn parse(path: &str) -> Option<Self> {
        let segments: Vec<&str> = path
            .trim()
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();

        match segments.as_slice() {
            [] | ["ships"] => Some(Route::ShipList),
            ["ships", id] => Some(Route::ShipDetail((*id).to_string())),
            _ => None,
        }
    }

    /// Address of the detail screen for one vessel
    pub fn ship(id: &str) -> Self {
        Route::ShipDetail(id.to_string())
    }

    pub fn path(&self) -> String {
        match self {
            Route::ShipList => "/ships".to_string(),
            Route::ShipDetail(id) => format!("/ships/{id}"),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
