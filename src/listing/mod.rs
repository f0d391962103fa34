/*!
 * Character listing.
 *
 * - `pipeline`: fetch one page, fan out episode lookups, join all-settled
 * - `search`: client-side name search over a fetched collection
 * - `session`: filter/search state with last-request-wins merging
 */

pub use self::pipeline::{CharacterPipeline, ListingOutcome, PipelineOptions};
pub use self::search::apply_search;
pub use self::session::{ListingSession, ListingState, RefreshOutcome};

pub mod pipeline;
pub mod search;
pub mod session;
