//! Wire types exchanged with the voice front-end, and the builders for
//! speech responses.

pub mod request;
pub mod response;

pub use request::*;
pub use response::*;
