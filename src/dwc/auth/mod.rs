//! Tenant authentication

pub mod handshake;
pub mod html;

pub use handshake::{AuthClient, AuthenticatedSession, Handshake, HandshakeState, SamlAuthClient};
