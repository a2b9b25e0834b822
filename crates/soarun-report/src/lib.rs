//! soarun report - SOAtest XML report discovery and XUnit conversion
//!
//! After a successful SOAtest run the XML report is located with
//! [`locate`], a Java runtime is resolved with [`JavaSearch`], and the report
//! is transformed into XUnit XML with [`convert`].

pub mod converter;
pub mod java;
pub mod locator;

pub use converter::{convert, xunit_output_path, ConvertOptions, TransformAssets};
pub use java::{bundled_java, JavaSearch, JDK_PLUGIN_PREFIX};
pub use locator::{locate, DEFAULT_REPORT_PREFIX};
