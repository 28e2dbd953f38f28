use crate::session::SessionStore;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// One of the four portals served by the backend. Each portal has its own
/// login and its own token.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Portal {
    Admin,
    Company,
    Engineer,
    Platform,
}

impl Portal {
    pub fn all() -> [Portal; 4] {
        [Portal::Admin, Portal::Company, Portal::Engineer, Portal::Platform]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Portal::Admin => "admin",
            Portal::Company => "company",
            Portal::Engineer => "engineer",
            Portal::Platform => "platform",
        }
    }

    pub fn api_prefix(&self) -> String {
        format!("/api/{}", self.name())
    }

    pub fn login_endpoint(&self) -> String {
        format!("{}/auth/login", self.api_prefix())
    }

    pub fn login_route(&self) -> String {
        format!("/{}/login", self.name())
    }

    /// Resolves the portal owning a route such as `/engineer/dashboard`.
    pub fn for_route(route: &str) -> Option<Portal> {
        let first = route.trim_start_matches('/').split('/').next()?;
        Portal::all().into_iter().find(|portal| portal.name() == first)
    }
}

impl Display for Portal {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(PartialEq, Debug)]
pub enum GuardOutcome {
    Allowed { portal: Portal },
    Redirect { login: String },
    NotFound,
}

/// Gates a route on the session: routes of a portal without a token redirect
/// to that portal's login page.
pub fn guard(route: &str, session: &SessionStore) -> GuardOutcome {
    let Some(portal) = Portal::for_route(route) else {
        return GuardOutcome::NotFound;
    };

    match session.token(portal) {
        Some(_) => GuardOutcome::Allowed { portal },
        None => GuardOutcome::Redirect {
            login: portal.login_route(),
        },
    }
}
