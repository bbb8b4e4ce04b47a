pub mod error;
pub mod intent;
pub mod lead;
pub mod report;
pub mod scoring;

pub use error::*;
pub use intent::*;
pub use lead::*;
pub use report::*;
pub use scoring::*;
