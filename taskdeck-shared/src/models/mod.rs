/// Database models
///
/// Each model module contains the row struct, the `CreateX`/`UpdateX` input
/// structs, and the query methods operating on a `PgPool`.
///
/// - `user`: account holders
/// - `category`: named task groupings
/// - `task`: units of work owned by a user, classified under a category

pub mod category;
pub mod task;
pub mod user;
