//! Route guard for protected subtrees.
//!
//! Every protected subtree is gated before any of its handlers run. The
//! guard either lets the request proceed with the caller's [`ShellContext`]
//! or tells the caller where to redirect. It never returns an error.
//!
//! Checks run in a fixed order and stop at the first failure:
//!
//! 1. identity present, else redirect to login
//! 2. profile present, else log an error and redirect to login
//! 3. elevated role when the subtree requires it, else redirect to the
//!    landing page

use axum::http::request::Parts;
use serde::Serialize;
use tracing::{debug, error, warn};

use crate::identity::IdentityProvider;
use crate::models::{Profile, Role};

/// Access level a subtree requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Any authenticated identity with a profile.
    Authenticated,
    /// Authenticated and [`Role::Admin`].
    Admin,
}

impl Access {
    fn permits(self, role: Role) -> bool {
        match self {
            Access::Authenticated => true,
            Access::Admin => role.is_elevated(),
        }
    }
}

/// What a proceeding request hands to the shell renderer.
#[derive(Debug, Clone, Serialize)]
pub struct ShellContext {
    pub role: Role,
    pub is_demo: bool,
    pub profile: Profile,
}

impl From<Profile> for ShellContext {
    fn from(profile: Profile) -> Self {
        Self {
            role: profile.role,
            is_demo: profile.is_demo,
            profile,
        }
    }
}

/// Why a request was turned away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    /// No identity on the request.
    Unauthenticated,
    /// Identity present but no profile record for it.
    MissingProfile,
    /// Valid profile without the role the subtree requires.
    InsufficientRole,
}

/// Result of evaluating a guard.
#[derive(Debug, Clone)]
pub enum GuardOutcome {
    /// Continue rendering with this context.
    Proceed(ShellContext),
    /// Stop rendering and send the client to `location`.
    Redirect {
        location: String,
        reason: DenyReason,
    },
}

impl GuardOutcome {
    /// Redirect target, if the request was denied.
    pub fn location(&self) -> Option<&str> {
        match self {
            GuardOutcome::Proceed(_) => None,
            GuardOutcome::Redirect { location, .. } => Some(location),
        }
    }
}

/// Where denied requests are sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardPaths {
    /// Login entry point for unauthenticated requests.
    pub login: String,
    /// Default authenticated landing page for insufficient-role requests.
    pub landing: String,
}

impl Default for GuardPaths {
    fn default() -> Self {
        Self {
            login: "/login".to_string(),
            landing: "/dashboard".to_string(),
        }
    }
}

/// Before-render gate for one protected subtree.
#[derive(Debug, Clone)]
pub struct RouteGuard {
    access: Access,
    paths: GuardPaths,
}

impl RouteGuard {
    pub fn new(access: Access, paths: GuardPaths) -> Self {
        Self { access, paths }
    }

    pub fn paths(&self) -> &GuardPaths {
        &self.paths
    }

    /// Evaluate the guard for one request.
    pub async fn evaluate(&self, provider: &dyn IdentityProvider, parts: &Parts) -> GuardOutcome {
        let path = parts.uri.path();

        let identity = match provider.current_identity(parts).await {
            Ok(Some(identity)) => identity,
            Ok(None) => {
                debug!(%path, "no identity; redirecting to login");
                return self.deny(DenyReason::Unauthenticated);
            }
            Err(e) => {
                warn!(%path, error = %e, "identity resolution failed; redirecting to login");
                return self.deny(DenyReason::Unauthenticated);
            }
        };

        let profile = match provider.current_profile(&identity).await {
            Ok(Some(profile)) => profile,
            Ok(None) => {
                error!(
                    user_id = %identity.user_id,
                    %path,
                    "authenticated identity has no profile; forcing re-authentication"
                );
                return self.deny(DenyReason::MissingProfile);
            }
            Err(e) => {
                error!(
                    user_id = %identity.user_id,
                    %path,
                    error = %e,
                    "profile lookup failed; forcing re-authentication"
                );
                return self.deny(DenyReason::MissingProfile);
            }
        };

        if !self.access.permits(profile.role) {
            debug!(
                user_id = %identity.user_id,
                role = %profile.role,
                %path,
                "insufficient role; redirecting to landing page"
            );
            return self.deny(DenyReason::InsufficientRole);
        }

        GuardOutcome::Proceed(ShellContext::from(profile))
    }

    fn deny(&self, reason: DenyReason) -> GuardOutcome {
        let location = match reason {
            DenyReason::Unauthenticated | DenyReason::MissingProfile => &self.paths.login,
            DenyReason::InsufficientRole => &self.paths.landing,
        };
        GuardOutcome::Redirect {
            location: location.clone(),
            reason,
        }
    }
}
