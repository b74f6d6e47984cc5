//! # Passage Session
//!
//! The session token store: persists an opaque bearer token together with
//! the session metadata returned by the authentication service, shares the
//! bearer credential with the HTTP client, and drops everything on logout or
//! on a 401 response.
//!
//! The store never looks inside the token. Signature and expiry checks are
//! the authentication service's job; [`SessionStore::verify`] only forwards
//! to a [`SessionVerifier`] and caches the answer.

pub mod bearer;
pub mod storage;
pub mod store;
pub mod verifier;

pub use bearer::{BearerAuth, AUTHORIZATION_HEADER};
pub use storage::{FileSessionStorage, MemorySessionStorage, SessionStorage};
pub use store::{SessionKeys, SessionStore, STATUS_UNAUTHORIZED};
pub use verifier::{RetryPolicy, SessionVerifier};
