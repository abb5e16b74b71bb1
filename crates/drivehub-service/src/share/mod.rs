//! Public share links: token generation, issue, revoke, and resolution.

pub mod issuer;
pub mod token;

pub use issuer::ShareIssuer;
pub use token::TokenGenerator;
