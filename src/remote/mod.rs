//! # Remote Objects
//!
//! Classification of raw remote handles into typed wrappers and the
//! activation lifecycle that turns any wrapper into a callable unicast object.
//!
//! ## Architecture
//!
//! ```text
//! Remote Objects
//! ├── introspect   (the one reader of handle internals)
//! ├── classifier   (RemoteHandle → RemoteObject)
//! ├── object       (Unicast / SpringRemoting / Activatable / Empty)
//! └── lifecycle    (activation, single and batch)
//! ```

pub mod classifier;
pub mod introspect;
pub mod lifecycle;
pub mod object;

pub use classifier::classify;
pub use object::{ActivatableObject, EmptyObject, ObjectInfo, RemoteObject, UnicastObject};
