//! Portfolio and builder types.

mod builder;
#[allow(clippy::module_inception)]
mod portfolio;

pub use builder::PortfolioBuilder;
pub use portfolio::Portfolio;
