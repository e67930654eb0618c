//! INSERT statement generation

mod dialect;
mod error;
mod formatter;
mod options;
mod session;

pub use dialect::*;
pub use error::*;
pub use formatter::*;
pub use options::*;
pub use session::*;
