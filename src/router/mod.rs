//! Routing and the admin authorization gate
//!
//! The gate is a rendering-time check only. The API authorizes every
//! request on its own using the bearer token.

use crate::context::AppContext;
use crate::models::Page;

/// A client-side route
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Blog,
    BlogPost(String),
    Gallery,
    Contact,
    Login,
    FirstSetup,
    Page(String),
    Admin,
    NotFound(String),
}

impl Route {
    /// Match a path; trailing slashes and query strings are ignored
    pub fn parse(path: &str, admin_path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');
        let admin = admin_path.trim_end_matches('/');

        if trimmed.is_empty() {
            return Route::Home;
        }
        if trimmed == admin {
            return Route::Admin;
        }

        let segments: Vec<&str> = trimmed.trim_start_matches('/').split('/').collect();
        match segments.as_slice() {
            ["blog"] => Route::Blog,
            ["blog", slug] if !slug.is_empty() => Route::BlogPost(decode(slug)),
            ["gallery"] => Route::Gallery,
            ["contact"] => Route::Contact,
            ["login"] => Route::Login,
            ["first-setup"] => Route::FirstSetup,
            ["page", slug] if !slug.is_empty() => Route::Page(decode(slug)),
            _ => Route::NotFound(path.to_string()),
        }
    }

    pub fn path(&self, admin_path: &str) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Blog => "/blog".to_string(),
            Route::BlogPost(slug) => format!("/blog/{}", urlencoding::encode(slug)),
            Route::Gallery => "/gallery".to_string(),
            Route::Contact => "/contact".to_string(),
            Route::Login => "/login".to_string(),
            Route::FirstSetup => "/first-setup".to_string(),
            Route::Page(slug) => format!("/page/{}", urlencoding::encode(slug)),
            Route::Admin => admin_path.to_string(),
            Route::NotFound(path) => path.clone(),
        }
    }
}

fn decode(segment: &str) -> String {
    urlencoding::decode(segment)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| segment.to_string())
}

/// What the gate knows about the visitor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GateState {
    pub authenticated: bool,
    pub must_change_password: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Render(Route),
    Redirect(Route),
}

impl GateDecision {
    /// The route that ends up on screen
    pub fn route(&self) -> &Route {
        match self {
            GateDecision::Render(route) | GateDecision::Redirect(route) => route,
        }
    }
}

/// Decide whether a route may render
pub fn gate(route: &Route, state: GateState) -> GateDecision {
    match route {
        Route::Admin if !state.authenticated => GateDecision::Redirect(Route::Login),
        Route::Admin if state.must_change_password => GateDecision::Redirect(Route::FirstSetup),
        Route::FirstSetup if !state.authenticated => GateDecision::Redirect(Route::Login),
        other => GateDecision::Render(other.clone()),
    }
}

/// Gate that looks up the account flag on the server
pub struct AuthGate<'a> {
    ctx: &'a AppContext,
}

impl<'a> AuthGate<'a> {
    pub fn new(ctx: &'a AppContext) -> Self {
        Self { ctx }
    }

    /// Check a route against the session and `GET /api/me`.
    ///
    /// Only routes that depend on the account touch the network. A 401
    /// means the stored token is no longer accepted: the session is logged
    /// out and the visitor sent to Login. Any other failure lets the admin
    /// route render.
    pub async fn check(&self, route: &Route) -> GateDecision {
        let authenticated = self.ctx.session.is_authenticated();
        if !authenticated || !matches!(route, Route::Admin | Route::FirstSetup) {
            return gate(route, GateState {
                authenticated,
                must_change_password: false,
            });
        }

        let must_change_password = match self.ctx.api.me().await {
            Ok(me) => me.must_change_password,
            Err(e) if e.is_unauthorized() => {
                tracing::warn!("Stored token rejected, logging out");
                if let Err(e) = self.ctx.session.logout() {
                    tracing::warn!("Failed to clear session: {}", e);
                }
                return gate(route, GateState::default());
            }
            Err(e) => {
                tracing::warn!("Failed to fetch account: {}", e);
                false
            }
        };

        gate(route, GateState {
            authenticated: true,
            must_change_password,
        })
    }
}

/// A link in the site navigation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub label: String,
    pub path: String,
}

impl NavLink {
    fn new(label: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            path: path.into(),
        }
    }
}

/// Navigation bar: fixed sections, then custom pages, then admin links
pub fn nav_links(pages: &[Page], authenticated: bool, admin_path: &str) -> Vec<NavLink> {
    let mut links = vec![
        NavLink::new("Home", "/"),
        NavLink::new("Blog", "/blog"),
        NavLink::new("Gallery", "/gallery"),
        NavLink::new("Contact", "/contact"),
    ];

    links.extend(
        pages
            .iter()
            .filter(|page| !page.is_homepage)
            .map(|page| NavLink::new(page.title.clone(), Route::Page(page.slug.clone()).path(admin_path))),
    );

    if authenticated {
        links.push(NavLink::new("Admin", admin_path));
        links.push(NavLink::new("Logout", "/logout"));
    } else {
        links.push(NavLink::new("Admin Login", "/login"));
    }
    links
}
