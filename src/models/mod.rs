/*!
 * Data shapes exchanged with the catalog and the finance backend.
 *
 * - `character`: characters, episodes and locations from the catalog
 * - `filters`: the four listing selectors and the query they produce
 * - `debt`: the editable debt record
 */

pub mod character;
pub mod debt;
pub mod filters;

pub use self::character::{
    CharacterEntity, CharacterPage, CharacterStatus, Episode, Location, LocationPage,
    NamedResource, StatusBucket,
};
pub use self::debt::{DebtEnvelope, DebtField, DebtRecord};
pub use self::filters::{FilterOption, FilterState, Selector, SelectorKind};
