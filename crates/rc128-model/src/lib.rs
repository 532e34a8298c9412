pub mod article;
pub mod enums;
pub mod error;
pub mod ids;
pub mod lookup;
pub mod options;

pub use article::{ArticleRecord, NaturalKey};
pub use enums::{Locale, NodeKind};
pub use error::{ModelError, Result};
pub use ids::{NodeId, normalize_key};
pub use lookup::{ClaimType, LookupEntry, LookupTable, RecordType, ResponseType};
pub use options::{ArticleKeying, OrderPolicy, OutlineOptions};
