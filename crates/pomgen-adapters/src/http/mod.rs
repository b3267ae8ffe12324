//! HTTP adapters.

mod maven_central;

pub use maven_central::{MAVEN_CENTRAL, MavenCentralLookup};
