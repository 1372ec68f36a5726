//! # Poly1305 compression backend
//!
//! [`Poly1305Core`] drives the Poly1305 one-time authenticator through the
//! streaming engine. See [`onetimeauth`](crate::onetimeauth) for the public
//! interface.

mod poly1305_soft;

pub use poly1305_soft::{Key, Poly1305Core};
