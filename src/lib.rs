// src/lib.rs

//! Compile-time auto-loader for declarative routing files.
//!
//! Scans a routing file's JSX for page component references, resolves each
//! name against the conventional `pages` directory, and rewrites references
//! that have no explicit import into lazy-loader descriptors:
//!
//! ```js
//! const HomePage = {
//!     name: "HomePage",
//!     loader: () => import("./pages/HomePage/HomePage")
//! };
//! ```
//!
//! Pages the developer imported manually are passed through untouched, and
//! running the transform over its own output changes nothing, so it is safe
//! to invoke repeatedly from a watch loop.

pub mod codegen;
pub mod emitter;
pub mod error;
pub mod imports;
pub mod model;
pub mod planner;
pub mod resolver;
pub mod scanner;
pub mod transform;

pub use error::{AutoLoadError, Result};
pub use model::{
    ImportBinding, ImportKind, PageManifestEntry, PageReference, RefContext, RewritePlan,
    TransformOutput,
};
pub use resolver::{PagePathResolver, Resolution};
pub use transform::{transform, transform_detailed};
