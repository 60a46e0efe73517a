//! Screen routes and post-mutation navigation.
//!
//! A successful mutation puts a view into an acknowledged state right
//! away. Showing the success message for a while before leaving is purely
//! cosmetic: [`DelayedNavigation`] is a future that yields the next route
//! after [`ACKNOWLEDGE_DELAY`], can be skipped, and is cancelled by
//! dropping it.

use std::time::Duration;

use tokio::time::Instant;

/// How long a success message stays up before navigating on.
pub const ACKNOWLEDGE_DELAY: Duration = Duration::from_secs(3);

/// The four screens, plus "pop the current one".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    List,
    Create,
    Detail { id: String },
    Single { id: String },
    Back,
}

/// A mutation the service confirmed, and where to go next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Acknowledgement {
    pub message: String,
    pub next: Route,
}

impl Acknowledgement {
    pub fn new(message: impl Into<String>, next: Route) -> Self {
        Self {
            message: message.into(),
            next,
        }
    }

    /// Navigate after the standard cosmetic delay.
    pub fn navigation(&self) -> DelayedNavigation {
        DelayedNavigation::new(self.next.clone(), ACKNOWLEDGE_DELAY)
    }
}

/// Pending navigation to a route after a delay.
#[derive(Debug)]
#[must_use = "navigation only happens when awaited or skipped"]
pub struct DelayedNavigation {
    route: Route,
    deadline: Instant,
}

impl DelayedNavigation {
    pub fn new(route: Route, delay: Duration) -> Self {
        Self {
            route,
            deadline: Instant::now() + delay,
        }
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    /// Wait out the delay, then yield the route.
    pub async fn wait(self) -> Route {
        tokio::time::sleep_until(self.deadline).await;
        self.route
    }

    /// Navigate now.
    pub fn skip(self) -> Route {
        self.route
    }
}
