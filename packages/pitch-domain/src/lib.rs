pub mod query;
pub mod result;
pub mod token;
pub mod venue;

pub use query::Query;
pub use result::{ResultId, ResultKind, SearchResult, SearchState, SourceResult};
pub use token::RequestToken;
pub use venue::Venue;
