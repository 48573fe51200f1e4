//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated user from a JWT Bearer token.
//! - [`auth::MaybeAuthUser`] -- Same, but optional.
//! - [`rbac::RequireAdmin`] -- Requires the `admin` role.
//! - [`rbac::RequireInstructor`] -- Requires `instructor` or `admin`.
//! - [`rbac::RequireStudent`] -- Requires `student`.

pub mod auth;
pub mod rbac;
